//! Attack: play the attack clip, strike on the hit frame, then cool down.

use bevy::prelude::*;

use super::{face, stop, ClipClock, EnemyContext};
use crate::core::fsm::State;
use crate::enemies::components::EnemyStateId;

pub struct AttackState {
    clip: String,
    hit_frame: f32,
    fallback_duration: f32,
    clock: ClipClock,
    struck: bool,
}

impl AttackState {
    pub fn new(clip: &str, hit_frame: f32, fallback_duration: f32) -> Self {
        Self {
            clip: clip.to_string(),
            hit_frame,
            fallback_duration,
            clock: ClipClock::default(),
            struck: false,
        }
    }

    /// Apply damage if the target is still inside the attack area.
    fn strike(ctx: &mut EnemyContext) {
        let Some(target) = ctx.params.target else {
            return;
        };
        let Some(target_position) = ctx.io.target_position(target) else {
            return;
        };

        let position = ctx.io.position();
        if !ctx.params.in_attack_reach(position, target_position) {
            debug!(?target, "Attack whiffed");
            return;
        }

        let direction = (target_position - position).normalize_or_zero();
        let damage = ctx.params.damage;
        ctx.io.strike(target, damage, direction);
    }
}

impl<'a> State<EnemyStateId, EnemyContext<'a>> for AttackState {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn on_enter(&mut self, ctx: &mut EnemyContext<'a>) {
        self.struck = false;
        stop(ctx);

        if let Some(target_position) = ctx.params.target.and_then(|t| ctx.io.target_position(t)) {
            let dx = target_position.x - ctx.io.position().x;
            face(ctx, dx);
        }

        self.clock = ClipClock::start(ctx.io, &self.clip, Some(self.fallback_duration));
    }

    fn on_update(&mut self, ctx: &mut EnemyContext<'a>) -> Option<EnemyStateId> {
        self.clock.advance(ctx.dt);

        if !self.struck && self.clock.progress(ctx.io) >= self.hit_frame {
            self.struck = true;
            Self::strike(ctx);
        }

        if !self.clock.finished(ctx.io) {
            return None;
        }

        if ctx.params.target.is_some() {
            Some(EnemyStateId::Chase)
        } else {
            Some(EnemyStateId::Idle)
        }
    }

    fn on_exit(&mut self, ctx: &mut EnemyContext<'a>) {
        // Interrupted attacks still cost the full cooldown.
        ctx.params.start_cooldown();
    }
}
