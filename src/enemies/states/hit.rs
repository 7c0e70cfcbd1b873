//! Hit: hurt reaction after non-fatal damage.
//!
//! Health was already reduced by the controller before entering; this state
//! only plays the reaction and decides what comes next once it finishes.

use bevy::prelude::*;

use super::{face, ClipClock, EnemyContext};
use crate::core::fsm::State;
use crate::enemies::components::EnemyStateId;

pub struct HitState {
    clip: String,
    fallback_duration: f32,
    knockback: f32,
    clock: ClipClock,
}

impl HitState {
    pub fn new(clip: &str, fallback_duration: f32, knockback: f32) -> Self {
        Self {
            clip: clip.to_string(),
            fallback_duration,
            knockback,
            clock: ClipClock::default(),
        }
    }
}

impl<'a> State<EnemyStateId, EnemyContext<'a>> for HitState {
    fn name(&self) -> &'static str {
        "Hit"
    }

    fn on_enter(&mut self, ctx: &mut EnemyContext<'a>) {
        // Re-entering Hit from Hit runs on_exit first, which clears the flag.
        ctx.params.is_hit = true;

        let direction = ctx.params.last_hit_direction;
        // Turn toward the attacker, who sits opposite the blow's travel.
        face(ctx, -direction.x);

        let knockback = direction * self.knockback;
        if let Some(body) = ctx.io.body() {
            body.set_velocity(knockback);
        }

        self.clock = ClipClock::start(ctx.io, &self.clip, Some(self.fallback_duration));
    }

    fn on_update(&mut self, ctx: &mut EnemyContext<'a>) -> Option<EnemyStateId> {
        self.clock.advance(ctx.dt);

        if !self.clock.finished(ctx.io) {
            return None;
        }

        if ctx.health.is_dead() {
            return Some(EnemyStateId::Dead);
        }

        ctx.params.is_hit = false;
        ctx.params.target = ctx.io.find_player();
        if ctx.params.target.is_none() {
            warn!("No player found after hit reaction");
        }

        Some(EnemyStateId::Chase)
    }

    fn on_exit(&mut self, ctx: &mut EnemyContext<'a>) {
        ctx.params.is_hit = false;
    }
}
