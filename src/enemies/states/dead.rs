//! Dead: terminal state.
//!
//! Colliders go off and the body is pinned in place on entry. Destruction is requested
//! once, when the death clip has finished after the minimum delay or when the
//! hard ceiling runs out, whichever comes first.

use bevy::prelude::*;

use super::{ClipClock, EnemyContext};
use crate::core::fsm::State;
use crate::enemies::components::{DeathTimer, EnemyStateId};
use crate::enemies::data::DeathConfig;

pub struct DeadState {
    clip: String,
    config: DeathConfig,
    timer: DeathTimer,
    clock: ClipClock,
}

impl DeadState {
    pub fn new(clip: &str, config: DeathConfig) -> Self {
        Self {
            clip: clip.to_string(),
            config,
            timer: DeathTimer::new(config.destroy_delay, config.max_destroy_time),
            clock: ClipClock::default(),
        }
    }
}

impl<'a> State<EnemyStateId, EnemyContext<'a>> for DeadState {
    fn name(&self) -> &'static str {
        "Dead"
    }

    fn on_enter(&mut self, ctx: &mut EnemyContext<'a>) {
        match ctx.io.body() {
            Some(body) => {
                body.enable_colliders(false);
                body.set_velocity_zero();
                // Without colliders the floor no longer holds the corpse.
                body.freeze();
            }
            None => warn!("No physics body on dying enemy"),
        }

        // No fallback: a missing death clip leaves only the ceiling.
        self.clock = ClipClock::start(ctx.io, &self.clip, None);
        self.timer = DeathTimer::new(self.config.destroy_delay, self.config.max_destroy_time);
    }

    fn on_update(&mut self, ctx: &mut EnemyContext<'a>) -> Option<EnemyStateId> {
        let complete = self.clock.finished(ctx.io);

        if self.timer.advance(ctx.dt, complete) {
            debug!(elapsed = self.timer.elapsed, "Requesting destroy");
            ctx.io.scene().request_destroy();
        }
        None
    }

    fn on_exit(&mut self, _ctx: &mut EnemyContext<'a>) {
        error!("Dead state exited; dead enemies must be destroyed, not transitioned");
    }
}
