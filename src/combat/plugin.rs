//! Combat plugin - health events and hit feedback.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles health publishing, screen shake and damage flash.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
