//! Collaborators the enemy core talks to.
//!
//! The controller and states never touch engine components directly; each
//! tick they receive an [`EnemyIo`] that hands out these narrow interfaces.
//! A missing animator, body or camera is `None` and the caller degrades.

use bevy::prelude::*;

use crate::combat::CameraShake;

/// Normalized progress at which a one-shot clip counts as complete.
pub const ANIMATION_COMPLETE: f32 = 0.95;

/// Sprite animation playback.
pub trait Animator {
    fn play(&mut self, clip: &str);

    /// Progress of the current clip in `[0, 1]`.
    fn normalized_progress(&self) -> f32;

    fn has_clip(&self, clip: &str) -> bool;

    /// Mirror the sprite horizontally (`true` = facing left).
    fn set_flip_x(&mut self, flip: bool);

    /// Animation-complete signal derived from progress.
    fn is_finished(&self) -> bool {
        self.normalized_progress() >= ANIMATION_COMPLETE
    }
}

/// Rigid body and colliders of an enemy.
pub trait PhysicsBody {
    fn set_velocity_zero(&mut self);

    fn set_velocity(&mut self, velocity: Vec2);

    /// Change horizontal speed, leaving vertical motion to gravity.
    fn set_horizontal_velocity(&mut self, vx: f32);

    fn enable_colliders(&mut self, enabled: bool);

    /// Keep the body grounded and non-rotating.
    fn lock_upright(&mut self);

    /// Pin the body where it is. Gravity and contacts no longer move it.
    fn freeze(&mut self);
}

/// The scene object backing an enemy.
pub trait SceneObject {
    /// Fire-and-forget removal of the entity.
    fn request_destroy(&mut self);
}

/// Everything an enemy can reach during one call into its controller.
pub trait EnemyIo {
    fn animator(&mut self) -> Option<&mut dyn Animator>;

    fn body(&mut self) -> Option<&mut dyn PhysicsBody>;

    fn scene(&mut self) -> &mut dyn SceneObject;

    fn camera(&mut self) -> Option<&mut dyn CameraShake>;

    /// Own world position.
    fn position(&self) -> Vec2;

    /// World position of `target`, `None` if it no longer exists.
    fn target_position(&self, target: Entity) -> Option<Vec2>;

    /// The player, looked up by tag. Assumes a single player.
    fn find_player(&self) -> Option<Entity>;

    /// Deal `damage` to `target`; `direction` is the travel direction of the blow.
    fn strike(&mut self, target: Entity, damage: i32, direction: Vec2);
}
