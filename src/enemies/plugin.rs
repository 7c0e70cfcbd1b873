//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::animation;
use super::data::{load_encounter, load_enemy_definitions, EnemyRegistry};
use super::spawning::{spawn_arena, spawn_enemies};
use crate::combat::CombatSet;
use crate::core::GameState;

/// System set for enemy AI; anything that reacts to enemy strikes or health
/// events runs after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnemySet;

/// Enemy plugin - handles data loading, spawning, AI and animation.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            // Data first, then the arena that depends on the encounter table
            .add_systems(
                Startup,
                (load_enemy_definitions, load_encounter, spawn_arena).chain(),
            )
            .add_systems(OnEnter(GameState::InGame), spawn_enemies)
            // AI runs during gameplay, before combat feedback reads its events
            .add_systems(
                Update,
                (
                    ai::translate_sensor_contacts,
                    ai::drive_enemies,
                    animation::animate_sprites,
                )
                    .chain()
                    .in_set(EnemySet)
                    .before(CombatSet::Feedback)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
