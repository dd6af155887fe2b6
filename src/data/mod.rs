//! Data layer — populates all registries at startup.
//!
//! This plugin runs in OnEnter(AppState::Loading), fills every registry
//! (items, recipes, areas, quests, equipment, facilities, books,
//! achievements) from the hard-coded catalog in the submodules, then
//! transitions the app into AppState::MainMenu.
//!
//! No other domain seeds these resources; everything downstream of Loading
//! may read them freely.

mod achievements;
mod areas;
mod books;
mod equipment;
mod facilities;
mod items;
mod quests;
mod recipes;

use crate::shared::*;
use bevy::prelude::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then leaves Loading.
/// Registries only reference each other by string id, so population order
/// does not matter.
fn load_all_data(
    mut item_registry: ResMut<ItemRegistry>,
    mut recipe_registry: ResMut<RecipeRegistry>,
    mut area_registry: ResMut<AreaRegistry>,
    mut quest_registry: ResMut<QuestRegistry>,
    mut equipment_registry: ResMut<EquipmentRegistry>,
    mut facility_registry: ResMut<FacilityRegistry>,
    mut book_registry: ResMut<BookRegistry>,
    mut achievement_registry: ResMut<AchievementRegistry>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    info!("[Data] populating registries…");

    items::populate_items(&mut item_registry);
    info!("  items: {}", item_registry.items.len());

    recipes::populate_recipes(&mut recipe_registry);
    info!("  recipes: {}", recipe_registry.recipes.len());

    areas::populate_areas(&mut area_registry);
    info!("  areas: {}", area_registry.areas.len());

    quests::populate_quests(&mut quest_registry);
    info!("  quest templates: {}", quest_registry.quests.len());

    equipment::populate_equipment(&mut equipment_registry);
    info!("  equipment: {}", equipment_registry.equipment.len());

    facilities::populate_facilities(&mut facility_registry);
    info!("  facilities: {}", facility_registry.facilities.len());

    books::populate_books(&mut book_registry);
    info!("  recipe books: {}", book_registry.books.len());

    achievements::populate_achievements(&mut achievement_registry);
    info!("  achievements: {}", achievement_registry.achievements.len());

    info!("[Data] registries populated, transitioning to MainMenu");
    next_state.set(AppState::MainMenu);
}
