//! Enemies module - enemy data, controller, behavior states and spawning.

mod ai;
pub mod animation;
mod components;
pub mod controller;
pub mod data;
mod error;
pub mod io;
mod plugin;
mod spawning;
pub mod states;

#[cfg(test)]
mod tests;

pub use components::*;
pub use controller::EnemyController;
pub use data::{load_encounter, EncounterTable, EnemyRegistry};
pub use error::EnemyDataError;
pub use plugin::{EnemyPlugin, EnemySet};
