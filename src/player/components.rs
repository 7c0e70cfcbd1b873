//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Which way the player is looking (`1.0` right, `-1.0` left).
#[derive(Component)]
pub struct Facing(pub f32);

impl Default for Facing {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Time until the player may swing again.
#[derive(Component, Default)]
pub struct AttackCooldown(pub f32);

/// Configuration for the side-scrolling player controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Horizontal speed in pixels per second
    pub move_speed: f32,
    /// Upward speed applied on jump
    pub jump_speed: f32,
    pub max_health: i32,
    /// Damage dealt per swing
    pub attack_damage: i32,
    /// Reach of a swing in front of the player
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Speed of the push received from an enemy strike
    pub knockback: f32,
    pub half_size: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 180.0,
            jump_speed: 420.0,
            max_health: 10,
            attack_damage: 1,
            attack_range: 48.0,
            attack_cooldown: 0.35,
            knockback: 160.0,
            half_size: Vec2::new(10.0, 18.0),
        }
    }
}
