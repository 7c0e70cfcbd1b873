//! UI plugin - health bars, HUD and menus.

use bevy::prelude::*;

use super::health_bar;
use super::hud;
use super::menus;
use crate::combat::CombatSet;
use crate::core::GameState;
use crate::enemies::EnemySet;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        menus::setup_menu_systems(app);

        app
            .add_systems(PreStartup, health_bar::load_health_bar_config)

            // Bars observe published health events, then ease and redraw
            .add_systems(
                Update,
                (
                    health_bar::attach_enemy_health_bars,
                    health_bar::observe_health,
                    health_bar::tick_health_bars,
                    health_bar::render_world_bars,
                    health_bar::release_orphaned_bars,
                )
                    .chain()
                    .after(EnemySet)
                    .after(CombatSet::Publish)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
