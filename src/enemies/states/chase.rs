//! Chase: run at the target and attack once it is in reach.

use bevy::prelude::*;

use super::{face, move_horizontally, play_clip, EnemyContext};
use crate::core::fsm::State;
use crate::enemies::components::EnemyStateId;

pub struct ChaseState {
    clip: String,
}

impl ChaseState {
    pub fn new(clip: &str) -> Self {
        Self {
            clip: clip.to_string(),
        }
    }
}

impl<'a> State<EnemyStateId, EnemyContext<'a>> for ChaseState {
    fn name(&self) -> &'static str {
        "Chase"
    }

    fn on_enter(&mut self, ctx: &mut EnemyContext<'a>) {
        play_clip(ctx.io, &self.clip);
    }

    fn on_update(&mut self, ctx: &mut EnemyContext<'a>) -> Option<EnemyStateId> {
        let Some(target) = ctx.params.target else {
            return Some(EnemyStateId::Idle);
        };

        let Some(target_position) = ctx.io.target_position(target) else {
            warn!(?target, "Chase target no longer exists, dropping it");
            ctx.params.target = None;
            return Some(EnemyStateId::Patrol);
        };

        let position = ctx.io.position();
        let dx = target_position.x - position.x;
        face(ctx, dx);

        if ctx.params.in_attack_reach(position, target_position) {
            move_horizontally(ctx, 0.0);
            if ctx.params.cooldown_ready() {
                return Some(EnemyStateId::Attack);
            }
            return None;
        }

        let speed = ctx.params.chase_speed;
        move_horizontally(ctx, dx.signum() * speed);
        None
    }
}
