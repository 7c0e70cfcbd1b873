//! Dreadhouse - a 2D side-scrolling horror brawler in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, the state machine engine, easing
//! - **Combat**: Health model, screen shake, damage flash
//! - **Enemies**: Enemy data, controller, behavior states, spawning
//! - **Player**: Side-scrolling movement, attacks, player health
//! - **UI**: Health bars, HUD, pause and game over screens

pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct DreadhousePlugin;

impl Plugin for DreadhousePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
