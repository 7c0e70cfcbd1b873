//! Player plugin - spawning, movement, attacks and death.

use bevy::prelude::*;

use super::components::*;
use super::movement;
use crate::combat::CombatSet;
use crate::core::GameState;
use crate::enemies::{load_encounter, EnemySet};

/// Player plugin - handles the player body, input and incoming strikes.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<PlayerConfig>()
            // Needs the encounter table for the start position
            .add_systems(Startup, movement::spawn_player.after(load_encounter))
            .add_systems(
                Update,
                (movement::player_movement, movement::player_attack)
                    .before(EnemySet)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                movement::receive_enemy_strikes
                    .after(EnemySet)
                    .before(CombatSet::Publish)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                movement::check_player_death
                    .after(CombatSet::Publish)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
