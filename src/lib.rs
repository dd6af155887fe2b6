//! Mosswick library crate — re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the headless simulation entry point.
//! This library crate exposes the same modules so that `tests/`
//! integration tests can import game types, systems, and resources.

pub mod shared;
pub mod data;
pub mod effects;
pub mod crafting;
pub mod calendar;
pub mod quests;
pub mod expedition;
pub mod economy;
pub mod achievements;
pub mod presentation;
pub mod save;
pub mod autoplay;
