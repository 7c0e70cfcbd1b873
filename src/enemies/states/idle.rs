//! Idle: stand still for a dwell time, then patrol if there is a route.

use super::{play_clip, stop, EnemyContext};
use crate::core::fsm::State;
use crate::enemies::components::EnemyStateId;

pub struct IdleState {
    clip: String,
    dwell: f32,
    elapsed: f32,
}

impl IdleState {
    pub fn new(clip: &str, dwell: f32) -> Self {
        Self {
            clip: clip.to_string(),
            dwell,
            elapsed: 0.0,
        }
    }
}

impl<'a> State<EnemyStateId, EnemyContext<'a>> for IdleState {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn on_enter(&mut self, ctx: &mut EnemyContext<'a>) {
        self.elapsed = 0.0;
        stop(ctx);
        play_clip(ctx.io, &self.clip);
    }

    fn on_update(&mut self, ctx: &mut EnemyContext<'a>) -> Option<EnemyStateId> {
        self.elapsed += ctx.dt;

        if self.elapsed >= self.dwell && !ctx.params.waypoints.is_empty() {
            return Some(EnemyStateId::Patrol);
        }
        None
    }
}
