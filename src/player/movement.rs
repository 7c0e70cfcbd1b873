//! Side-scrolling player movement, attacks and taking hits.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::combat::{CameraShake, Health, HealthEvent, HealthUpdate, ScreenShake, ShakeOffset};
use crate::core::{AttackLanded, GameState, IncomingAttack};
use crate::enemies::{EncounterTable, Enemy};

/// Spawn the player with a following camera.
pub fn spawn_player(
    mut commands: Commands,
    config: Res<PlayerConfig>,
    encounter: Res<EncounterTable>,
) {
    let start = Vec2::new(encounter.player_start.0, encounter.player_start.1);

    let player = commands
        .spawn((
            Player,
            Facing::default(),
            AttackCooldown::default(),
            Health::new(config.max_health),
            Sprite::from_color(Color::srgb(0.75, 0.72, 0.6), config.half_size * 2.0),
            Transform::from_translation(start.extend(2.0)),
            // Rapier physics components
            RigidBody::Dynamic,
            Collider::cuboid(config.half_size.x, config.half_size.y),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
        ))
        .id();

    // Camera follows as a child; the shake offset is applied on top
    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Camera2d,
            ShakeOffset::default(),
            Transform::from_xyz(0.0, 60.0, 0.0),
        ));
    });

    info!("Spawned player at {:?}", start);
}

/// Handle A/D movement and jumping.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(Entity, &Transform, &mut Velocity, &mut Facing, &mut Sprite), With<Player>>,
) {
    let Ok((player_entity, transform, mut velocity, mut facing, mut sprite)) = player_query.get_single_mut() else {
        return;
    };

    let mut direction = 0.0;
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += 1.0;
    }

    if direction != 0.0 {
        facing.0 = direction;
        sprite.flip_x = direction < 0.0;
    }
    velocity.linvel.x = direction * config.move_speed;

    // Ground check using a short raycast below the collider
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation.truncate() - Vec2::Y * (config.half_size.y - 1.0);
        context
            .cast_ray(
                ray_origin,
                Vec2::NEG_Y,
                4.0,
                true,
                QueryFilter::default()
                    .exclude_collider(player_entity)
                    .exclude_sensors(),
            )
            .is_some()
    } else {
        true
    };

    if is_grounded && keyboard.just_pressed(KeyCode::Space) {
        velocity.linvel.y = config.jump_speed;
    }
}

/// Swing at enemies in front of the player.
pub fn player_attack(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(&Transform, &Facing, &mut AttackCooldown), With<Player>>,
    enemy_query: Query<(Entity, &Transform), (With<Enemy>, Without<Player>)>,
    mut attacks: EventWriter<IncomingAttack>,
) {
    let Ok((transform, facing, mut cooldown)) = player_query.get_single_mut() else {
        return;
    };

    cooldown.0 = (cooldown.0 - time.delta_secs()).max(0.0);
    if cooldown.0 > 0.0 || !keyboard.just_pressed(KeyCode::KeyJ) {
        return;
    }
    cooldown.0 = config.attack_cooldown;

    let origin = transform.translation.truncate();
    let direction = Vec2::new(facing.0, 0.0);
    let reach = origin + direction * config.attack_range * 0.5;

    for (enemy, enemy_transform) in enemy_query.iter() {
        if enemy_transform.translation.truncate().distance(reach) <= config.attack_range * 0.5 {
            attacks.send(IncomingAttack {
                target: enemy,
                amount: config.attack_damage,
                direction,
            });
        }
    }
}

/// Apply enemy strikes to the player.
pub fn receive_enemy_strikes(
    config: Res<PlayerConfig>,
    mut strikes: EventReader<AttackLanded>,
    mut shake: Option<ResMut<ScreenShake>>,
    mut player_query: Query<(&mut Health, &mut Velocity), With<Player>>,
) {
    for strike in strikes.read() {
        let Ok((mut health, mut velocity)) = player_query.get_mut(strike.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }

        health.take_damage(strike.damage);
        velocity.linvel += strike.direction * config.knockback;

        if let Some(shake) = shake.as_mut() {
            shake.shake(4.0, 0.2);
        }
    }
}

/// Move to game over once the player's health reaches zero.
pub fn check_player_death(
    mut updates: EventReader<HealthUpdate>,
    players: Query<(), With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let player_died = updates
        .read()
        .any(|update| update.event == HealthEvent::Died && players.contains(update.entity));

    if player_died {
        info!("Player died");
        next_state.set(GameState::GameOver);
    }
}
