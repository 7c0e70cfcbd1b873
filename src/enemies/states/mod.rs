//! Enemy behavior states.
//!
//! One parametrized family serves every enemy type: clip names, timings and
//! damage come from the [`EnemyProfile`] and [`EnemyParams`], never from
//! per-type code.

mod attack;
mod chase;
mod dead;
mod hit;
mod idle;
mod patrol;

use bevy::prelude::*;

pub use attack::AttackState;
pub use chase::ChaseState;
pub use dead::DeadState;
pub use hit::HitState;
pub use idle::IdleState;
pub use patrol::PatrolState;

use super::components::{EnemyParams, EnemyStateId};
use super::data::EnemyProfile;
use super::io::{EnemyIo, ANIMATION_COMPLETE};
use crate::combat::Health;
use crate::core::fsm::State;

/// What a state can see and touch while it runs.
pub struct EnemyContext<'a> {
    pub params: &'a mut EnemyParams,
    pub health: &'a Health,
    pub io: &'a mut dyn EnemyIo,
    /// Seconds since the last tick (0 outside of ticks).
    pub dt: f32,
}

/// Stored state type of the enemy state machine.
pub type DynEnemyState = dyn for<'a> State<EnemyStateId, EnemyContext<'a>> + Send + Sync;

/// Build the long-lived instance for `id`.
pub fn build(id: EnemyStateId, profile: &EnemyProfile) -> Box<DynEnemyState> {
    let clips = &profile.clips;
    match id {
        EnemyStateId::Idle => Box::new(IdleState::new(&clips.idle, profile.idle_dwell)),
        EnemyStateId::Patrol => Box::new(PatrolState::new(&clips.walk)),
        EnemyStateId::Chase => Box::new(ChaseState::new(&clips.chase)),
        EnemyStateId::Attack => Box::new(AttackState::new(
            &clips.attack,
            profile.attack_hit_frame,
            profile.attack_duration,
        )),
        EnemyStateId::Hit => Box::new(HitState::new(
            &clips.hurt,
            profile.hurt_duration,
            profile.knockback,
        )),
        EnemyStateId::Dead => Box::new(DeadState::new(&clips.death, profile.death)),
    }
}

/// Horizontal distance under which a waypoint counts as reached.
pub(crate) const ARRIVE_TOLERANCE: f32 = 4.0;

/// Progress source for a one-shot clip.
///
/// Uses the animator when the clip is present; otherwise falls back to the
/// elapsed time over `fallback` seconds, or never completes when there is no
/// fallback.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ClipClock {
    elapsed: f32,
    fallback: Option<f32>,
    animated: bool,
}

impl ClipClock {
    pub fn start(io: &mut dyn EnemyIo, clip: &str, fallback: Option<f32>) -> Self {
        Self {
            elapsed: 0.0,
            fallback,
            animated: play_clip(io, clip),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn progress(&self, io: &mut dyn EnemyIo) -> f32 {
        if self.animated {
            if let Some(animator) = io.animator() {
                return animator.normalized_progress();
            }
        }

        match self.fallback {
            Some(duration) if duration > 0.0 => (self.elapsed / duration).min(1.0),
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    pub fn finished(&self, io: &mut dyn EnemyIo) -> bool {
        if self.animated {
            if let Some(animator) = io.animator() {
                return animator.is_finished();
            }
        }
        self.progress(io) >= ANIMATION_COMPLETE
    }
}

/// Play `clip` if the animator has it. Returns whether it is playing.
pub(crate) fn play_clip(io: &mut dyn EnemyIo, clip: &str) -> bool {
    match io.animator() {
        Some(animator) if animator.has_clip(clip) => {
            animator.play(clip);
            true
        }
        Some(_) => {
            warn!(clip, "Animation clip missing, skipping");
            false
        }
        None => {
            warn!(clip, "No animator attached, skipping clip");
            false
        }
    }
}

/// Turn to face along `dx` (no change when `dx` is zero).
pub(crate) fn face(ctx: &mut EnemyContext, dx: f32) {
    if dx == 0.0 {
        return;
    }
    ctx.params.facing_left = dx < 0.0;
    if let Some(animator) = ctx.io.animator() {
        animator.set_flip_x(ctx.params.facing_left);
    }
}

/// Set horizontal speed if there is a body to move.
pub(crate) fn move_horizontally(ctx: &mut EnemyContext, vx: f32) {
    if let Some(body) = ctx.io.body() {
        body.set_horizontal_velocity(vx);
    }
}

pub(crate) fn stop(ctx: &mut EnemyContext) {
    if let Some(body) = ctx.io.body() {
        body.set_velocity_zero();
    }
}
