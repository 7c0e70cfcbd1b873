//! Enemy-related components and the runtime parameters shared by the
//! controller and its states.

use bevy::prelude::*;

use crate::core::fsm::StateId;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Identifier of an enemy behavior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyStateId {
    /// Standing still for a dwell time.
    Idle,
    /// Walking the waypoint loop.
    Patrol,
    /// Performing an attack.
    Attack,
    /// Moving toward the target.
    Chase,
    /// Playing the hurt reaction.
    Hit,
    /// Terminal: death animation, then destruction.
    Dead,
}

impl StateId for EnemyStateId {
    const ALL: &'static [Self] = &[
        EnemyStateId::Idle,
        EnemyStateId::Patrol,
        EnemyStateId::Attack,
        EnemyStateId::Chase,
        EnemyStateId::Hit,
        EnemyStateId::Dead,
    ];
}

/// Per-enemy tunables and live references.
///
/// Shared by the controller and every state of one enemy. Only one state
/// runs at a time, so no locking is involved.
#[derive(Debug, Clone)]
pub struct EnemyParams {
    pub patrol_speed: f32,
    pub chase_speed: f32,
    /// Patrol loop, in world coordinates.
    pub waypoints: Vec<Vec2>,
    pub waypoint_index: usize,
    /// Current target, if any.
    pub target: Option<Entity>,
    /// Attack centre relative to the enemy when facing right.
    pub attack_offset: Vec2,
    pub attack_radius: f32,
    pub sight_radius: f32,
    pub damage: i32,
    pub attack_cooldown: f32,
    pub cooldown_remaining: f32,
    /// Set while a hit reaction is pending or playing.
    pub is_hit: bool,
    pub facing_left: bool,
    /// Travel direction of the last incoming attack.
    pub last_hit_direction: Vec2,
}

impl Default for EnemyParams {
    fn default() -> Self {
        Self {
            patrol_speed: 60.0,
            chase_speed: 110.0,
            waypoints: Vec::new(),
            waypoint_index: 0,
            target: None,
            attack_offset: Vec2::new(24.0, 0.0),
            attack_radius: 20.0,
            sight_radius: 220.0,
            damage: 1,
            attack_cooldown: 1.2,
            cooldown_remaining: 0.0,
            is_hit: false,
            facing_left: false,
            last_hit_direction: Vec2::ZERO,
        }
    }
}

impl EnemyParams {
    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown_remaining = self.attack_cooldown;
    }

    pub fn cooldown_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    /// World-space centre of the attack area, mirrored by facing.
    pub fn attack_point(&self, position: Vec2) -> Vec2 {
        let x = if self.facing_left {
            -self.attack_offset.x
        } else {
            self.attack_offset.x
        };
        position + Vec2::new(x, self.attack_offset.y)
    }

    pub fn in_attack_reach(&self, position: Vec2, target: Vec2) -> bool {
        self.attack_point(position).distance(target) <= self.attack_radius
    }
}

/// Countdown from entering the Dead state to the destroy request.
///
/// Destruction is requested exactly once, when the hard ceiling is reached or
/// when the death animation has completed after the minimum delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathTimer {
    pub elapsed: f32,
    pub destroy_delay: f32,
    pub max_destroy_time: f32,
    is_destroying: bool,
}

impl DeathTimer {
    pub fn new(destroy_delay: f32, max_destroy_time: f32) -> Self {
        Self {
            elapsed: 0.0,
            destroy_delay,
            max_destroy_time,
            is_destroying: false,
        }
    }

    pub fn is_destroying(&self) -> bool {
        self.is_destroying
    }

    /// Advance by `dt`. Returns `true` on the single tick that should request
    /// destruction; every later call returns `false`.
    pub fn advance(&mut self, dt: f32, animation_complete: bool) -> bool {
        if self.is_destroying {
            return false;
        }

        self.elapsed += dt;

        let ready = self.elapsed >= self.max_destroy_time
            || (self.elapsed >= self.destroy_delay && animation_complete);

        if ready {
            self.is_destroying = true;
        }
        ready
    }
}

/// Proximity trigger collider, child of an enemy.
#[derive(Component)]
pub struct SenseArea {
    pub owner: Entity,
}

/// Every collider belonging to an enemy (its body and its sense area).
#[derive(Component, Default)]
pub struct EnemyColliders(pub Vec<Entity>);
