//! Save domain: slot-based JSON persistence of the whole game state.
//!
//! Each slot is one pretty-printed JSON file under `saves/`. Loading
//! replaces the `GameState` resource wholesale and resets transient
//! crafting modifiers, which are deliberately not persisted.

use crate::shared::balance::*;
use crate::shared::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SAVE_VERSION: u32 = 1;

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            .add_systems(
                Update,
                (handle_save_requests, handle_load_requests).run_if(in_state(AppState::Playing)),
            );
    }
}

/// Slot summary shown on the load screen without parsing the full state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMeta {
    pub slot: usize,
    pub saved_at_day: u32,
    pub alchemy_level: u32,
    pub money: u32,
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub meta: SaveMeta,
    pub state: GameState,
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn slot_path(dir: &Path, slot: usize) -> PathBuf {
    dir.join(format!("slot_{slot}.json"))
}

pub fn write_slot_at(dir: &Path, state: &GameState, slot: usize) -> Result<(), String> {
    if slot >= NUM_SAVE_SLOTS {
        return Err(format!("Slot {slot} is out of range."));
    }
    let data = SaveData {
        version: SAVE_VERSION,
        meta: SaveMeta {
            slot,
            saved_at_day: state.day,
            alchemy_level: state.alchemy_level,
            money: state.money,
            player_name: state.player_name.clone(),
        },
        state: state.clone(),
    };
    fs::create_dir_all(dir).map_err(|e| format!("Could not create save directory: {e}"))?;
    let json = serde_json::to_string_pretty(&data).map_err(|e| format!("Serialization failed: {e}"))?;
    fs::write(slot_path(dir, slot), json).map_err(|e| format!("Could not write save file: {e}"))
}

pub fn read_slot_at(dir: &Path, slot: usize) -> Result<SaveData, String> {
    if slot >= NUM_SAVE_SLOTS {
        return Err(format!("Slot {slot} is out of range."));
    }
    let path = slot_path(dir, slot);
    let json = fs::read_to_string(&path).map_err(|e| format!("Could not read save file: {e}"))?;
    let data: SaveData =
        serde_json::from_str(&json).map_err(|e| format!("Save file is corrupt: {e}"))?;
    if data.version != SAVE_VERSION {
        return Err(format!(
            "Save version mismatch: file is v{}, expected v{SAVE_VERSION}.",
            data.version
        ));
    }
    Ok(data)
}

pub fn read_slot_meta_at(dir: &Path, slot: usize) -> Option<SaveMeta> {
    read_slot_at(dir, slot).ok().map(|data| data.meta)
}

pub fn write_slot(state: &GameState, slot: usize) -> Result<(), String> {
    write_slot_at(&default_save_dir(), state, slot)
}

pub fn read_slot(slot: usize) -> Result<SaveData, String> {
    read_slot_at(&default_save_dir(), slot)
}

pub fn read_slot_meta(slot: usize) -> Option<SaveMeta> {
    read_slot_meta_at(&default_save_dir(), slot)
}

// ─── Systems ───────────────────────────────────────────────────────────

fn handle_save_requests(
    mut requests: EventReader<SaveRequestEvent>,
    mut completions: EventWriter<SaveCompleteEvent>,
    state: Res<GameState>,
) {
    for request in requests.read() {
        let result = write_slot(&state, request.slot);
        match &result {
            Ok(()) => info!("[Save] wrote slot {}", request.slot),
            Err(message) => warn!("[Save] slot {} failed: {message}", request.slot),
        }
        completions.send(SaveCompleteEvent {
            slot: request.slot,
            success: result.is_ok(),
            error_message: result.err(),
        });
    }
}

fn handle_load_requests(
    mut requests: EventReader<LoadRequestEvent>,
    mut completions: EventWriter<LoadCompleteEvent>,
    mut state: ResMut<GameState>,
    mut mods: ResMut<ModifierState>,
) {
    for request in requests.read() {
        match read_slot(request.slot) {
            Ok(data) => {
                *state = data.state;
                *mods = ModifierState::default();
                info!("[Save] loaded slot {} (day {})", request.slot, state.day);
                completions.send(LoadCompleteEvent {
                    slot: request.slot,
                    success: true,
                    error_message: None,
                });
            }
            Err(message) => {
                warn!("[Save] load of slot {} failed: {message}", request.slot);
                completions.send(LoadCompleteEvent {
                    slot: request.slot,
                    success: false,
                    error_message: Some(message),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mosswick_save_test_{tag}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn round_trips_a_full_state() {
        let dir = temp_dir("roundtrip");
        let mut state = GameState::new_game("Rowan");
        state.day = 42;
        state.money = 1234;
        state.learn_recipe("potion_01");
        state.add_item(OwnedItem::new("ore_01", 77));
        state.active_quests.push(ActiveQuest {
            quest_id: "quest_potion_basic".to_string(),
            accepted_day: 40,
        });

        write_slot_at(&dir, &state, 3).unwrap();
        let loaded = read_slot_at(&dir, 3).unwrap();

        assert_eq!(loaded.version, SAVE_VERSION);
        assert_eq!(loaded.meta.player_name, "Rowan");
        assert_eq!(loaded.meta.saved_at_day, 42);
        assert_eq!(loaded.state.money, 1234);
        assert!(loaded.state.knows_recipe("potion_01"));
        assert_eq!(loaded.state.active_quests.len(), 1);
        assert_eq!(loaded.state.inventory.len(), state.inventory.len());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn meta_reads_without_touching_gameplay() {
        let dir = temp_dir("meta");
        let state = GameState::new_game("Wren");
        write_slot_at(&dir, &state, 0).unwrap();

        let meta = read_slot_meta_at(&dir, 0).unwrap();
        assert_eq!(meta.slot, 0);
        assert_eq!(meta.alchemy_level, 1);
        assert!(read_slot_meta_at(&dir, 1).is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn out_of_range_slots_are_rejected() {
        let dir = temp_dir("range");
        let state = GameState::new_game("t");
        assert!(write_slot_at(&dir, &state, NUM_SAVE_SLOTS).is_err());
        assert!(read_slot_at(&dir, NUM_SAVE_SLOTS).is_err());
    }

    #[test]
    fn version_mismatch_is_an_error() {
        let dir = temp_dir("version");
        let state = GameState::new_game("t");
        write_slot_at(&dir, &state, 2).unwrap();

        let path = dir.join("slot_2.json");
        let mangled = fs::read_to_string(&path)
            .unwrap()
            .replacen("\"version\": 1", "\"version\": 99", 1);
        fs::write(&path, mangled).unwrap();

        let err = read_slot_at(&dir, 2).unwrap_err();
        assert!(err.contains("version"), "{err}");

        let _ = fs::remove_dir_all(&dir);
    }
}
