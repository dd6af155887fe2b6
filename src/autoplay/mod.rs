//! Autoplay driver: a simple priority policy that plays the game
//! unattended. Used by the headless binary for long-run simulation and
//! by tests as a whole-game smoke check.

use crate::calendar;
use crate::crafting::{self, CraftContext};
use crate::economy::{self, shop};
use crate::expedition;
use crate::presentation::{self, PresentationSequence};
use crate::quests;
use crate::shared::balance::*;
use crate::shared::*;
use bevy::app::AppExit;
use bevy::prelude::*;
use rand::Rng;

const REST_STAMINA_THRESHOLD: u32 = 30;
const MONEY_RESERVE: u32 = 100;
const MAX_ACTIVE_QUESTS: usize = 3;
const EXPEDITION_LENGTH: u32 = 2;

pub struct AutoplayPlugin;

impl Plugin for AutoplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Autoplay>().add_systems(
            Update,
            run_autoplay.run_if(in_state(AppState::Playing).and(autoplay_enabled)),
        );
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct Autoplay {
    pub enabled: bool,
    pub max_day: u32,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self {
            enabled: false,
            max_day: FINAL_DAY,
        }
    }
}

fn autoplay_enabled(autoplay: Res<Autoplay>) -> bool {
    autoplay.enabled
}

/// Read-only registries bundled so the step function stays callable from
/// plain tests.
#[derive(Clone, Copy)]
pub struct Registries<'a> {
    pub items: &'a ItemRegistry,
    pub recipes: &'a RecipeRegistry,
    pub areas: &'a AreaRegistry,
    pub quests: &'a QuestRegistry,
    pub equipment: &'a EquipmentRegistry,
    pub facilities: &'a FacilityRegistry,
    pub books: &'a BookRegistry,
    pub achievements: &'a AchievementRegistry,
}

impl<'a> Registries<'a> {
    fn craft_ctx(&self) -> CraftContext<'a> {
        CraftContext {
            items: self.items,
            recipes: self.recipes,
            equipment: self.equipment,
            facilities: self.facilities,
        }
    }
}

/// One tick of unattended play. Returns false once the run is over.
pub fn autoplay_step(
    state: &mut GameState,
    mods: &mut ModifierState,
    seq: &mut PresentationSequence,
    world: &Registries,
    rng: &mut impl Rng,
    max_day: u32,
) -> bool {
    if state.phase == GamePhase::Ending || state.day > max_day {
        return false;
    }

    // Acknowledge whatever the presentation layer is waiting on, then let
    // the sequence advance one beat.
    state.pending_day_transition = None;
    state.pending_dialogue = None;
    if state.is_action_unlocked(ActionType::Inventory) && !state.stats.inventory_opened {
        state.stats.inventory_opened = true;
    }
    if !seq.is_idle() || presentation::try_begin_sequence(state, seq, world.achievements) {
        let mut out = presentation::PresentationOutput::default();
        presentation::advance_sequence_step(state, seq, world.achievements, &mut out);
        return true;
    }

    if state.phase == GamePhase::Morning {
        calendar::start_action_phase(state);
        return true;
    }

    take_action(state, mods, world, rng);
    true
}

fn end_turn(state: &mut GameState, world: &Registries, rng: &mut impl Rng, days: u32) {
    calendar::end_turn(
        state,
        world.items,
        world.areas,
        world.quests,
        world.equipment,
        world.books,
        rng,
        days,
    );
}

fn take_action(state: &mut GameState, mods: &mut ModifierState, world: &Registries, rng: &mut impl Rng) {
    // Deliveries are free; always cash in finished work first.
    let deliverable: Option<String> = state
        .active_quests
        .iter()
        .map(|q| q.quest_id.clone())
        .find(|id| quests::can_deliver(state, world.quests, id));
    if let Some(quest_id) = deliverable {
        let _ = quests::deliver_quest(state, world.quests, world.equipment, &quest_id);
        return;
    }

    if state.stamina < REST_STAMINA_THRESHOLD {
        economy::rest(state);
        end_turn(state, world, rng, 1);
        return;
    }

    if state.is_action_unlocked(ActionType::Alchemy) {
        if let Some(recipe_id) = pick_recipe(state, world) {
            let ctx = world.craft_ctx();
            let outcome = crafting::craft_multiple(state, &ctx, mods, &recipe_id, 1, rng);
            end_turn(state, world, rng, outcome.total_days.max(1));
            return;
        }
    }

    if try_buy_material(state, world, rng) {
        return;
    }

    if state.is_action_unlocked(ActionType::Expedition) && state.expedition.is_none() {
        let affordable: Option<String> = {
            let mut areas: Vec<&AreaDef> = world
                .areas
                .areas
                .values()
                .filter(|a| {
                    state.alchemy_level >= a.required_level
                        && state.money
                            >= expedition::expedition_cost(a, EXPEDITION_LENGTH) + MONEY_RESERVE
                })
                .collect();
            areas.sort_by_key(|a| std::cmp::Reverse(a.cost_per_day));
            areas.first().map(|a| a.id.clone())
        };
        if let Some(area_id) = affordable {
            let _ = expedition::dispatch_expedition(state, world.areas, &area_id, EXPEDITION_LENGTH);
            end_turn(state, world, rng, 1);
            return;
        }
    }

    if state.is_action_unlocked(ActionType::Quest) && state.active_quests.len() < MAX_ACTIVE_QUESTS {
        let next: Option<String> = state.available_quests.first().cloned();
        if let Some(quest_id) = next {
            let _ = quests::accept_quest(state, world.quests, &quest_id);
            return;
        }
    }

    let unread: Option<String> = state
        .owned_books
        .iter()
        .find(|id| {
            world
                .books
                .get(id)
                .map_or(false, |b| b.recipe_ids.iter().any(|r| !state.knows_recipe(r)))
        })
        .cloned();
    if let Some(book_id) = unread {
        if state.stamina >= STUDY_COST {
            if let Ok(outcome) =
                economy::study_book(state, world.books, world.recipes, world.equipment, &book_id)
            {
                end_turn(state, world, rng, outcome.days_spent.max(1));
                return;
            }
        }
    }

    economy::rest(state);
    end_turn(state, world, rng, 1);
}

/// Craftable recipe preference: feed an active quest if possible,
/// otherwise take the biggest exp payout.
fn pick_recipe(state: &GameState, world: &Registries) -> Option<String> {
    let ctx = world.craft_ctx();
    let wanted: Vec<&str> = state
        .active_quests
        .iter()
        .filter_map(|q| world.quests.get(&q.quest_id))
        .map(|def| def.required_item_id.as_str())
        .collect();

    let mut craftable: Vec<&RecipeDef> = world
        .recipes
        .recipes
        .values()
        .filter(|r| crafting::can_craft_recipe(state, &ctx, r))
        .collect();
    craftable.sort_by_key(|r| std::cmp::Reverse(r.exp_reward));

    craftable
        .iter()
        .find(|r| wanted.contains(&r.result_item_id.as_str()))
        .or(craftable.first())
        .map(|r| r.id.clone())
}

/// Buys one missing ingredient for a known recipe, if the shop carries it
/// and there is coin to spare.
fn try_buy_material(state: &mut GameState, world: &Registries, rng: &mut impl Rng) -> bool {
    if !state.is_action_unlocked(ActionType::Shop) || state.money <= MONEY_RESERVE {
        return false;
    }
    let ctx = world.craft_ctx();
    let assortment = shop::shop_assortment(state);

    let mut to_buy: Option<String> = None;
    'recipes: for recipe in world.recipes.recipes.values() {
        if !state.knows_recipe(&recipe.id)
            || state.alchemy_level < recipe.required_level
            || crafting::count_available_attempts(state, &ctx, recipe) >= 1
        {
            continue;
        }
        for (ingredient, needed) in crafting::required_slots(state, &ctx, recipe) {
            let have = state
                .inventory
                .iter()
                .filter(|i| crafting::matches_ingredient(world.items, &ingredient, i))
                .count() as u32;
            if have >= needed {
                continue;
            }
            let candidate = match (&ingredient.item_id, ingredient.category) {
                (Some(id), _) if assortment.contains(&id.as_str()) => Some(id.clone()),
                (None, Some(category)) => assortment
                    .iter()
                    .filter(|id| world.items.category_of(id) == Some(category))
                    .min_by_key(|id| world.items.get(id).map_or(u32::MAX, |i| i.base_price))
                    .map(|id| id.to_string()),
                _ => None,
            };
            if candidate.is_some() {
                to_buy = candidate;
                break 'recipes;
            }
        }
    }

    match to_buy {
        Some(item_id) => shop::buy_item(state, world.items, world.equipment, &item_id, rng).is_ok(),
        None => false,
    }
}

// ─── System wrapper ────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn run_autoplay(
    mut state: ResMut<GameState>,
    mut mods: ResMut<ModifierState>,
    mut seq: ResMut<PresentationSequence>,
    mut autoplay: ResMut<Autoplay>,
    items: Res<ItemRegistry>,
    recipes: Res<RecipeRegistry>,
    areas: Res<AreaRegistry>,
    quest_registry: Res<QuestRegistry>,
    equipment: Res<EquipmentRegistry>,
    facilities: Res<FacilityRegistry>,
    books: Res<BookRegistry>,
    achievement_registry: Res<AchievementRegistry>,
    mut exit: EventWriter<AppExit>,
) {
    let world = Registries {
        items: &items,
        recipes: &recipes,
        areas: &areas,
        quests: &quest_registry,
        equipment: &equipment,
        facilities: &facilities,
        books: &books,
        achievements: &achievement_registry,
    };
    let mut rng = rand::thread_rng();
    if !autoplay_step(&mut state, &mut mods, &mut seq, &world, &mut rng, autoplay.max_day) {
        info!(
            "[Autoplay] run finished on {} (level {}, {} coins, {} quests done)",
            calendar::format_date(state.day.min(FINAL_DAY)),
            state.alchemy_level,
            state.money,
            state.completed_quest_count
        );
        autoplay.enabled = false;
        exit.send(AppExit::Success);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════
