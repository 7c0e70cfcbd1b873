//! Enemy AI driving systems.
//!
//! Bridges the ECS to the engine-agnostic controller: builds an
//! [`EnemyWorldIo`] per enemy, feeds it sensor and attack events, ticks it,
//! then turns what the controller asked for into commands and events.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashMap;

use super::animation::SpriteAnimator;
use super::components::{Enemy, EnemyColliders, SenseArea};
use super::controller::EnemyController;
use super::io::{Animator, EnemyIo, PhysicsBody, SceneObject};
use crate::combat::{CameraShake, HealthUpdate, ScreenShake};
use crate::core::{AttackLanded, IncomingAttack, SenseKind, TargetSensed};
use crate::player::Player;

/// Rapier rigid body of one enemy.
pub(crate) struct RapierBody<'a> {
    velocity: Mut<'a, Velocity>,
    locked: Option<Mut<'a, LockedAxes>>,
    /// Collider toggle requested this frame, applied with commands afterwards.
    colliders: Option<bool>,
    frozen: bool,
}

impl PhysicsBody for RapierBody<'_> {
    fn set_velocity_zero(&mut self) {
        *self.velocity = Velocity::zero();
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.linvel = velocity;
    }

    fn set_horizontal_velocity(&mut self, vx: f32) {
        self.velocity.linvel.x = vx;
    }

    fn enable_colliders(&mut self, enabled: bool) {
        self.colliders = Some(enabled);
    }

    fn lock_upright(&mut self) {
        self.velocity.angvel = 0.0;
        if let Some(locked) = self.locked.as_mut() {
            **locked = LockedAxes::ROTATION_LOCKED;
        }
    }

    fn freeze(&mut self) {
        *self.velocity = Velocity::zero();
        self.frozen = true;
    }
}

/// Destroy latch for the enemy entity.
#[derive(Default)]
pub(crate) struct DestroyRequest(bool);

impl SceneObject for DestroyRequest {
    fn request_destroy(&mut self) {
        self.0 = true;
    }
}

/// Per-enemy view of the world handed to the controller.
pub(crate) struct EnemyWorldIo<'a> {
    position: Vec2,
    animator: Option<Mut<'a, SpriteAnimator>>,
    body: Option<RapierBody<'a>>,
    camera: Option<&'a mut ScreenShake>,
    locate: &'a dyn Fn(Entity) -> Option<Vec2>,
    player: Option<Entity>,
    destroy: DestroyRequest,
    strikes: Vec<(Entity, i32, Vec2)>,
}

impl EnemyIo for EnemyWorldIo<'_> {
    fn animator(&mut self) -> Option<&mut dyn Animator> {
        self.animator
            .as_mut()
            .map(|animator| &mut **animator as &mut dyn Animator)
    }

    fn body(&mut self) -> Option<&mut dyn PhysicsBody> {
        self.body.as_mut().map(|body| body as &mut dyn PhysicsBody)
    }

    fn scene(&mut self) -> &mut dyn SceneObject {
        &mut self.destroy
    }

    fn camera(&mut self) -> Option<&mut dyn CameraShake> {
        self.camera
            .as_mut()
            .map(|shake| &mut **shake as &mut dyn CameraShake)
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn target_position(&self, target: Entity) -> Option<Vec2> {
        (self.locate)(target)
    }

    fn find_player(&self) -> Option<Entity> {
        self.player
    }

    fn strike(&mut self, target: Entity, damage: i32, direction: Vec2) {
        self.strikes.push((target, damage, direction));
    }
}

/// Turn Rapier sensor contacts between a sense area and the player into
/// `TargetSensed` events.
pub fn translate_sensor_contacts(
    mut collisions: EventReader<CollisionEvent>,
    sense_areas: Query<&SenseArea>,
    players: Query<(), With<Player>>,
    mut sensed: EventWriter<TargetSensed>,
) {
    for event in collisions.read() {
        let (a, b, kind) = match *event {
            CollisionEvent::Started(a, b, _) => (a, b, SenseKind::Enter),
            CollisionEvent::Stopped(a, b, _) => (a, b, SenseKind::Exit),
        };

        for (sensor, other) in [(a, b), (b, a)] {
            let Ok(area) = sense_areas.get(sensor) else {
                continue;
            };
            if players.get(other).is_err() {
                continue;
            }
            sensed.send(TargetSensed {
                enemy: area.owner,
                target: other,
                kind,
            });
        }
    }
}

/// Feed events to every controller, tick it, and apply its requests.
#[allow(clippy::too_many_arguments)]
pub fn drive_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut shake: Option<ResMut<ScreenShake>>,
    mut incoming: EventReader<IncomingAttack>,
    mut sensed: EventReader<TargetSensed>,
    mut landed: EventWriter<AttackLanded>,
    mut updates: EventWriter<HealthUpdate>,
    players: Query<Entity, With<Player>>,
    transforms: Query<&Transform>,
    mut enemies: Query<
        (
            Entity,
            &mut EnemyController,
            Option<&mut SpriteAnimator>,
            Option<&mut Velocity>,
            Option<&mut LockedAxes>,
            Option<&EnemyColliders>,
        ),
        With<Enemy>,
    >,
) {
    let dt = time.delta_secs();

    let mut attacks: HashMap<Entity, Vec<IncomingAttack>> = HashMap::new();
    for attack in incoming.read() {
        attacks.entry(attack.target).or_default().push(*attack);
    }
    let mut senses: HashMap<Entity, Vec<TargetSensed>> = HashMap::new();
    for event in sensed.read() {
        senses.entry(event.enemy).or_default().push(*event);
    }

    // Single-player game: the first tagged player is the target.
    let player = players.iter().next();
    let locate = |entity: Entity| transforms.get(entity).ok().map(|t| t.translation.truncate());

    for (entity, mut controller, animator, velocity, locked, colliders) in enemies.iter_mut() {
        let Some(position) = locate(entity) else {
            continue;
        };

        let mut io = EnemyWorldIo {
            position,
            animator,
            body: velocity.map(|velocity| RapierBody {
                velocity,
                locked,
                colliders: None,
                frozen: false,
            }),
            camera: shake.as_mut().map(|shake| &mut **shake),
            locate: &locate,
            player,
            destroy: DestroyRequest::default(),
            strikes: Vec::new(),
        };

        controller.initialize(&mut io);

        for event in senses.remove(&entity).unwrap_or_default() {
            // A despawned target reaches the controller as a null target.
            let target = locate(event.target).map(|_| event.target);
            match event.kind {
                SenseKind::Enter => controller.on_target_enter_sense(target, &mut io),
                SenseKind::Exit => controller.on_target_exit_sense(target, &mut io),
            }
        }

        for attack in attacks.remove(&entity).unwrap_or_default() {
            controller.take_damage(attack.amount, attack.direction, &mut io);
        }

        controller.per_frame_tick(&mut io, dt);

        for event in controller.drain_health_events() {
            updates.send(HealthUpdate { entity, event });
        }

        for (target, damage, direction) in io.strikes.drain(..) {
            landed.send(AttackLanded {
                attacker: entity,
                target,
                damage,
                direction,
            });
        }

        if let Some(enabled) = io.body.as_ref().and_then(|body| body.colliders) {
            for &collider in colliders.map(|c| c.0.as_slice()).unwrap_or(&[]) {
                if enabled {
                    commands.entity(collider).remove::<ColliderDisabled>();
                } else {
                    commands.entity(collider).try_insert(ColliderDisabled);
                }
            }
        }

        if io.body.as_ref().is_some_and(|body| body.frozen) {
            commands.entity(entity).insert(RigidBody::Fixed);
        }

        if io.destroy.0 {
            info!(enemy = controller.kind(), "Enemy destroyed");
            commands.entity(entity).despawn_recursive();
        }
    }
}
