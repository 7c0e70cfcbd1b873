//! Dreadhouse - Entry Point
//!
//! Controls:
//! - A/D: Move
//! - Space: Jump
//! - J: Attack
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Dreadhouse".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                // Pixel art
                .set(ImagePlugin::default_nearest()),
        )

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))

        // Our game plugin
        .add_plugins(dreadhouse::DreadhousePlugin)

        .run();
}
