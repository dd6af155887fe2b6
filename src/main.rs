use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use mosswick::autoplay::{Autoplay, AutoplayPlugin};
use mosswick::calendar::CalendarPlugin;
use mosswick::crafting::CraftingPlugin;
use mosswick::data::DataPlugin;
use mosswick::presentation::PresentationPlugin;
use mosswick::save::SavePlugin;
use mosswick::shared::balance::FINAL_DAY;
use mosswick::shared::*;

fn main() {
    App::new()
        .add_plugins((MinimalPlugins, StatesPlugin, LogPlugin::default()))
        // App state
        .init_state::<AppState>()
        // Shared resources
        .init_resource::<GameState>()
        .init_resource::<ItemRegistry>()
        .init_resource::<RecipeRegistry>()
        .init_resource::<AreaRegistry>()
        .init_resource::<QuestRegistry>()
        .init_resource::<EquipmentRegistry>()
        .init_resource::<FacilityRegistry>()
        .init_resource::<BookRegistry>()
        .init_resource::<AchievementRegistry>()
        // Domain plugins
        .add_plugins(CalendarPlugin)
        .add_plugins(CraftingPlugin)
        .add_plugins(PresentationPlugin)
        .add_plugins(SavePlugin)
        .add_plugins(AutoplayPlugin)
        // Data loading
        .add_plugins(DataPlugin)
        // Headless run: play a full year unattended.
        .insert_resource(Autoplay {
            enabled: true,
            max_day: FINAL_DAY + 1,
        })
        .add_systems(OnEnter(AppState::MainMenu), start_new_game)
        .run();
}

fn start_new_game(mut state: ResMut<GameState>, mut next_state: ResMut<NextState<AppState>>) {
    *state = GameState::new_game("Mel");
    info!("[Main] new game started for {}", state.player_name);
    next_state.set(AppState::Playing);
}
