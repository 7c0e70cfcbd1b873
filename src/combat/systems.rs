//! Combat systems - health publishing and hit feedback.

use bevy::prelude::*;

use super::feedback::{DamageFlash, ScreenShake, ShakeOffset};
use super::health::{Health, HealthEvent, HealthUpdate};
use crate::core::GameState;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Health models drain their queued events into `HealthUpdate`
    Publish,
    /// Shake, flash and other reactions to published events
    Feedback,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        .init_resource::<ScreenShake>()

        .add_event::<HealthUpdate>()

        .configure_sets(
            Update,
            (CombatSet::Publish, CombatSet::Feedback)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )

        .add_systems(Update, publish_health_events.in_set(CombatSet::Publish))

        .add_systems(
            Update,
            (
                start_damage_flash,
                update_damage_flash,
                update_screen_shake,
            )
                .chain()
                .in_set(CombatSet::Feedback),
        );
}

/// Publish events queued on standalone `Health` components (the player).
pub fn publish_health_events(
    mut query: Query<(Entity, &mut Health)>,
    mut updates: EventWriter<HealthUpdate>,
) {
    for (entity, mut health) in query.iter_mut() {
        for event in health.drain_events() {
            updates.send(HealthUpdate { entity, event });
        }
    }
}

/// Restart the blink on every sprite that just took damage.
fn start_damage_flash(
    mut commands: Commands,
    mut updates: EventReader<HealthUpdate>,
    sprites: Query<(), With<Sprite>>,
) {
    for update in updates.read() {
        if !matches!(update.event, HealthEvent::DamageTaken { .. }) {
            continue;
        }
        if sprites.get(update.entity).is_ok() {
            commands.entity(update.entity).try_insert(DamageFlash::default());
        }
    }
}

/// Blink flashing sprites and restore them when the flash ends.
fn update_damage_flash(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DamageFlash, &mut Sprite)>,
) {
    for (entity, mut flash, mut sprite) in query.iter_mut() {
        match flash.tick(time.delta_secs()) {
            Some(alpha) => sprite.color.set_alpha(alpha),
            None => {
                sprite.color.set_alpha(1.0);
                commands.entity(entity).remove::<DamageFlash>();
            }
        }
    }
}

/// Apply the screen shake offset to the camera, undoing last frame's offset.
fn update_screen_shake(
    time: Res<Time>,
    mut screen_shake: ResMut<ScreenShake>,
    mut camera_query: Query<(&mut Transform, &mut ShakeOffset), With<Camera2d>>,
) {
    let offset = screen_shake.update(time.delta_secs());

    for (mut transform, mut applied) in camera_query.iter_mut() {
        transform.translation -= applied.0.extend(0.0);
        transform.translation += offset.extend(0.0);
        applied.0 = offset;
    }
}
