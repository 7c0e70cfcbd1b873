//! Health model shared by enemies and the player.
//!
//! `Health` is the single source of truth for whether an entity is alive.
//! None of its operations fail: out-of-range inputs are clamped. Every
//! mutation queues [`HealthEvent`]s that the owner drains and publishes.

use bevy::prelude::*;

/// Lifecycle notification emitted by [`Health`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthEvent {
    /// Current or maximum health changed.
    Changed { current: i32, max: i32 },
    /// Damage was applied (amount as requested, after clamping to >= 0).
    DamageTaken { amount: i32 },
    /// Health was restored (amount actually restored).
    Healed { amount: i32 },
    /// Health reached zero. Emitted at most once per entity.
    Died,
}

impl HealthEvent {
    /// Forward this event to the matching observer callback.
    pub fn dispatch(&self, observer: &mut impl HealthObserver) {
        match *self {
            HealthEvent::Changed { current, max } => observer.on_health_changed(current, max),
            HealthEvent::DamageTaken { amount } => observer.on_damage_taken(amount),
            HealthEvent::Healed { amount } => observer.on_healed(amount),
            HealthEvent::Died => observer.on_death(),
        }
    }
}

/// Receiver of health notifications. All callbacks default to no-ops.
pub trait HealthObserver {
    fn on_health_changed(&mut self, _current: i32, _max: i32) {}
    fn on_damage_taken(&mut self, _amount: i32) {}
    fn on_healed(&mut self, _amount: i32) {}
    fn on_death(&mut self) {}
}

/// Published when a [`Health`] emits an event, tagged with its owner.
#[derive(Event, Debug, Clone, Copy)]
pub struct HealthUpdate {
    pub entity: Entity,
    pub event: HealthEvent,
}

/// Current and maximum health. Invariant: `0 <= current <= max`.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: i32,
    max: i32,
    pending: Vec<HealthEvent>,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: max,
            max,
            pending: Vec::new(),
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// `current / max`, or 0 when `max` is 0.
    pub fn percentage(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Apply damage. No-op once dead.
    pub fn take_damage(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }

        let amount = amount.max(0);
        self.current = (self.current - amount).max(0);

        self.pending.push(HealthEvent::Changed {
            current: self.current,
            max: self.max,
        });
        self.pending.push(HealthEvent::DamageTaken { amount });

        if self.current == 0 {
            self.pending.push(HealthEvent::Died);
        }
    }

    /// Restore health up to the maximum. No-op once dead.
    pub fn heal(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }

        let before = self.current;
        self.current = self.current.saturating_add(amount.max(0)).min(self.max);

        self.pending.push(HealthEvent::Changed {
            current: self.current,
            max: self.max,
        });
        self.pending.push(HealthEvent::Healed {
            amount: self.current - before,
        });
    }

    /// Replace the maximum, clamping current health into range.
    pub fn set_max(&mut self, new_max: i32) {
        let was_dead = self.is_dead();

        self.max = new_max.max(0);
        self.current = self.current.min(self.max);

        self.pending.push(HealthEvent::Changed {
            current: self.current,
            max: self.max,
        });

        if !was_dead && self.is_dead() {
            self.pending.push(HealthEvent::Died);
        }
    }

    /// Raise (or lower, for negative `delta`) the maximum.
    pub fn increase_max(&mut self, delta: i32) {
        self.set_max(self.max.saturating_add(delta));
    }

    /// Take the events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<HealthEvent> {
        std::mem::take(&mut self.pending)
    }
}
