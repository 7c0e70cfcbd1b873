//! Arena and enemy spawning from the encounter table.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::animation::SpriteAnimator;
use super::components::{Enemy, EnemyColliders, EnemyType, SenseArea};
use super::controller::EnemyController;
use super::data::{EncounterTable, EnemyDefinition, EnemyRegistry, EnemySpawn};

/// Marker for level geometry.
#[derive(Component)]
pub struct Floor;

const FLOOR_THICKNESS: f32 = 20.0;

/// Spawn the floor every enemy and the player stand on.
pub fn spawn_arena(mut commands: Commands, encounter: Res<EncounterTable>) {
    let half_width = encounter.floor_half_width;

    commands.spawn((
        Floor,
        Sprite::from_color(
            Color::srgb(0.18, 0.16, 0.2),
            Vec2::new(half_width * 2.0, FLOOR_THICKNESS),
        ),
        Transform::from_xyz(0.0, encounter.floor_y, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(half_width, FLOOR_THICKNESS / 2.0),
    ));
}

/// Spawn every enemy listed in the encounter table.
///
/// Runs on entering `InGame`, which also happens when unpausing, so it only
/// spawns the first time.
pub fn spawn_enemies(
    mut commands: Commands,
    mut spawned: Local<bool>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    registry: Res<EnemyRegistry>,
    encounter: Res<EncounterTable>,
) {
    if *spawned {
        return;
    }
    *spawned = true;

    let mut count = 0;
    for spawn in &encounter.spawns {
        let Some(definition) = registry.get(&spawn.enemy_type) else {
            warn!("Unknown enemy type in encounter: {}", spawn.enemy_type);
            continue;
        };

        spawn_enemy(&mut commands, &asset_server, &mut layouts, definition, spawn);
        count += 1;
    }

    info!("Spawned {} enemies", count);
}

/// Spawn one enemy with its body, sprite and proximity trigger.
pub fn spawn_enemy(
    commands: &mut Commands,
    asset_server: &AssetServer,
    layouts: &mut Assets<TextureAtlasLayout>,
    definition: &EnemyDefinition,
    spawn: &EnemySpawn,
) -> Entity {
    let sheet = &definition.sprite;
    let layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(sheet.frame_size.0, sheet.frame_size.1),
        sheet.columns,
        sheet.rows,
        None,
        None,
    ));
    let first_frame = sheet
        .clips
        .get(&definition.clips.idle)
        .map_or(0, |clip| clip.first);

    let collider = definition.collider;
    let mut sense_area = Entity::PLACEHOLDER;

    let enemy = commands
        .spawn((
            Enemy,
            EnemyType(spawn.enemy_type.clone()),
            EnemyController::from_definition(definition, spawn.waypoints()),
            SpriteAnimator::new(sheet.clips.clone()),
            Sprite::from_atlas_image(
                asset_server.load(sheet.image.clone()),
                TextureAtlas { layout, index: first_frame },
            ),
            Transform::from_translation(spawn.position().extend(1.0)),
            RigidBody::Dynamic,
            Collider::cuboid(collider.half_width, collider.half_height),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
        ))
        .with_children(|parent| {
            sense_area = parent
                .spawn((
                    Collider::ball(definition.sense_radius),
                    Sensor,
                    ActiveEvents::COLLISION_EVENTS,
                    Transform::default(),
                ))
                .id();
        })
        .id();

    commands
        .entity(sense_area)
        .insert(SenseArea { owner: enemy });
    commands
        .entity(enemy)
        .insert(EnemyColliders(vec![enemy, sense_area]));

    debug!(enemy = %definition.name, ?enemy, "Spawned enemy");
    enemy
}
