//! Patrol: walk the waypoint loop at patrol speed.

use super::{face, move_horizontally, play_clip, EnemyContext, ARRIVE_TOLERANCE};
use crate::core::fsm::State;
use crate::enemies::components::EnemyStateId;

pub struct PatrolState {
    clip: String,
}

impl PatrolState {
    pub fn new(clip: &str) -> Self {
        Self {
            clip: clip.to_string(),
        }
    }
}

impl<'a> State<EnemyStateId, EnemyContext<'a>> for PatrolState {
    fn name(&self) -> &'static str {
        "Patrol"
    }

    fn on_enter(&mut self, ctx: &mut EnemyContext<'a>) {
        play_clip(ctx.io, &self.clip);
    }

    fn on_update(&mut self, ctx: &mut EnemyContext<'a>) -> Option<EnemyStateId> {
        let count = ctx.params.waypoints.len();
        if count == 0 {
            return Some(EnemyStateId::Idle);
        }

        let index = ctx.params.waypoint_index % count;
        let waypoint = ctx.params.waypoints[index];
        let dx = waypoint.x - ctx.io.position().x;

        if dx.abs() <= ARRIVE_TOLERANCE {
            ctx.params.waypoint_index = (index + 1) % count;
            move_horizontally(ctx, 0.0);
            return None;
        }

        face(ctx, dx);
        let speed = ctx.params.patrol_speed;
        move_horizontally(ctx, dx.signum() * speed);
        None
    }
}
