//! Global events used for cross-system communication.
//!
//! Sensor and attack events are produced by collision code and consumed by
//! the enemy systems; strikes travel the other way, from an enemy's attack
//! frame to whoever was hit.

use bevy::prelude::*;

/// Sent when an attack reaches an entity that can take damage.
///
/// This is the `OnIncomingAttack` sensor event.
#[derive(Event, Debug, Clone, Copy)]
pub struct IncomingAttack {
    /// Entity receiving the attack
    pub target: Entity,
    /// Damage before any clamping
    pub amount: i32,
    /// Direction the attack travels, from the attacker toward the target
    pub direction: Vec2,
}

/// Whether a target entered or left a sense area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenseKind {
    Enter,
    Exit,
}

/// Sent when a target crosses an enemy's proximity trigger.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetSensed {
    /// Enemy owning the sense area
    pub enemy: Entity,
    /// Entity that entered or left
    pub target: Entity,
    pub kind: SenseKind,
}

/// Sent when an enemy's attack animation reaches its hit frame with the
/// target in reach.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackLanded {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: i32,
    pub direction: Vec2,
}
