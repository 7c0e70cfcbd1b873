//! Enemy controller - owns one enemy's health, parameters and state machine.
//!
//! The controller is plain Rust. Everything it needs from the engine comes in
//! through an [`EnemyIo`] on each call, so the same code runs under the ECS
//! systems and under the mocks in the tests.

use bevy::prelude::*;

use super::components::{EnemyParams, EnemyStateId};
use super::data::{EnemyDefinition, EnemyProfile};
use super::io::EnemyIo;
use super::states::{self, DynEnemyState, EnemyContext};
use crate::combat::{Health, HealthEvent};
use crate::core::fsm::StateMachine;

/// Per-enemy orchestrator.
#[derive(Component)]
pub struct EnemyController {
    kind: String,
    health: Health,
    params: EnemyParams,
    profile: EnemyProfile,
    machine: StateMachine<EnemyStateId, DynEnemyState>,
    /// Cleared on death; an inactive controller only advances its Dead state.
    active: bool,
    initialized: bool,
}

impl EnemyController {
    /// Build a controller with its full state table. No state is entered until
    /// [`initialize`](Self::initialize).
    pub fn new(
        kind: impl Into<String>,
        health: Health,
        params: EnemyParams,
        profile: EnemyProfile,
    ) -> Self {
        let machine = StateMachine::from_fn(|id| states::build(id, &profile));
        Self {
            kind: kind.into(),
            health,
            params,
            profile,
            machine,
            active: false,
            initialized: false,
        }
    }

    pub fn from_definition(definition: &EnemyDefinition, waypoints: Vec<Vec2>) -> Self {
        Self::new(
            definition.name.clone(),
            Health::new(definition.max_health),
            definition.to_params(waypoints),
            definition.to_profile(),
        )
    }

    /// Lock the body upright and enter Idle. Later calls do nothing.
    pub fn initialize(&mut self, io: &mut dyn EnemyIo) {
        if self.initialized {
            return;
        }

        match io.body() {
            Some(body) => body.lock_upright(),
            None => warn!(enemy = %self.kind, "No physics body to lock upright"),
        }

        self.initialized = true;
        self.active = true;
        self.transition_state(EnemyStateId::Idle, io);
    }

    /// Switch states, unless the guard rejects the request.
    ///
    /// Once health is dead only Dead may be entered, and once Dead is current
    /// nothing may be entered at all. Returns whether the switch happened.
    pub fn transition_state(&mut self, to: EnemyStateId, io: &mut dyn EnemyIo) -> bool {
        let from = self.machine.current();

        if from == Some(EnemyStateId::Dead) {
            warn!(enemy = %self.kind, ?to, "Transition rejected: already dead");
            return false;
        }
        if self.health.is_dead() && to != EnemyStateId::Dead {
            warn!(enemy = %self.kind, ?from, ?to, "Transition rejected: health is dead");
            return false;
        }

        debug!(enemy = %self.kind, ?from, ?to, "State transition");

        let mut ctx = EnemyContext {
            params: &mut self.params,
            health: &self.health,
            io,
            dt: 0.0,
        };
        self.machine.transition_to(to, &mut ctx);
        true
    }

    /// Advance one frame.
    pub fn per_frame_tick(&mut self, io: &mut dyn EnemyIo, dt: f32) {
        if !self.initialized {
            return;
        }

        if self.health.is_dead() {
            if self.active {
                // Died without going through take_damage.
                self.active = false;
                if self.machine.current() != Some(EnemyStateId::Dead) {
                    self.transition_state(EnemyStateId::Dead, io);
                }
                return;
            }
            if self.machine.current() != Some(EnemyStateId::Dead) {
                return;
            }
        } else if !self.active {
            return;
        }

        self.params.tick_cooldown(dt);

        let mut ctx = EnemyContext {
            params: &mut self.params,
            health: &self.health,
            io: &mut *io,
            dt,
        };
        let requested = self.machine.tick(&mut ctx);

        if let Some(next) = requested {
            self.transition_state(next, io);
        }
    }

    /// Apply an incoming attack. `direction` is the travel direction of the blow.
    pub fn take_damage(&mut self, amount: i32, direction: Vec2, io: &mut dyn EnemyIo) {
        if self.health.is_dead() {
            return;
        }

        self.params.is_hit = true;
        self.params.last_hit_direction = direction.normalize_or_zero();

        let shake = self.profile.shake;
        match io.camera() {
            Some(camera) => camera.shake(shake.intensity, shake.duration),
            None => warn!(enemy = %self.kind, "No camera to shake"),
        }

        self.health.take_damage(amount);

        if self.health.is_dead() {
            self.active = false;
            self.transition_state(EnemyStateId::Dead, io);
        } else {
            self.transition_state(EnemyStateId::Hit, io);
        }
    }

    /// A target walked into the proximity trigger.
    pub fn on_target_enter_sense(&mut self, target: Option<Entity>, io: &mut dyn EnemyIo) {
        if self.health.is_dead() {
            return;
        }
        let Some(target) = target else {
            warn!(enemy = %self.kind, "Sense enter without a target");
            return;
        };

        self.params.target = Some(target);

        match self.machine.current() {
            Some(EnemyStateId::Attack) => {}
            Some(EnemyStateId::Idle | EnemyStateId::Patrol | EnemyStateId::Chase) => {
                self.transition_state(EnemyStateId::Chase, io);
            }
            _ => {
                self.transition_state(EnemyStateId::Idle, io);
            }
        }
    }

    /// A target left the proximity trigger. Keep chasing while it is within
    /// sight, otherwise drop it and go back to patrolling.
    pub fn on_target_exit_sense(&mut self, target: Option<Entity>, io: &mut dyn EnemyIo) {
        if self.health.is_dead() {
            return;
        }
        let Some(target) = target else {
            warn!(enemy = %self.kind, "Sense exit without a target");
            return;
        };

        let in_sight = io
            .target_position(target)
            .is_some_and(|position| io.position().distance(position) <= self.params.sight_radius);

        let current = self.machine.current();
        // Attack and Hit finish on their own and pick their follow-up then.
        let busy = matches!(current, Some(EnemyStateId::Attack | EnemyStateId::Hit));

        if in_sight {
            self.params.target = Some(target);
            if !busy && current != Some(EnemyStateId::Chase) {
                self.transition_state(EnemyStateId::Chase, io);
            }
        } else {
            self.params.target = None;
            if !busy && current != Some(EnemyStateId::Patrol) {
                self.transition_state(EnemyStateId::Patrol, io);
            }
        }
    }

    /// Restore health. Ignored once dead.
    pub fn heal(&mut self, amount: i32) {
        self.health.heal(amount);
    }

    /// Change maximum health. Dropping it to zero kills the enemy on the next tick.
    pub fn set_max_health(&mut self, max: i32) {
        self.health.set_max(max);
    }

    pub fn drain_health_events(&mut self) -> Vec<HealthEvent> {
        self.health.drain_events()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn params(&self) -> &EnemyParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut EnemyParams {
        &mut self.params
    }

    pub fn profile(&self) -> &EnemyProfile {
        &self.profile
    }

    pub fn current_state(&self) -> Option<EnemyStateId> {
        self.machine.current()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
