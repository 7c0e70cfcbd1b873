//! Two-layer health bars that observe a [`Health`](crate::combat::Health).
//!
//! The top layer snaps to the new width at once; the bottom layer trails
//! behind it, easing down so the lost chunk stays visible for a moment.
//! On death the bar hides instead of animating to zero.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

use crate::combat::{HealthObserver, HealthUpdate};
use crate::core::tween::Easing;
use crate::enemies::EnemyController;

const CONFIG_PATH: &str = "assets/data/ui/health_bar.ron";

/// Look of the bars, loaded from assets/data/ui/health_bar.ron.
#[derive(Resource, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct HealthBarConfig {
    /// Width of a full enemy bar in world units
    pub full_width: f32,
    pub height: f32,
    /// Height above the enemy's origin
    pub offset_y: f32,
    /// Width of the player's HUD bar in pixels
    pub hud_width: f32,
    pub hud_height: f32,
    pub ease_rate: f32,
    pub epsilon: f32,
    pub background: (f32, f32, f32),
    pub top_color: (f32, f32, f32),
    pub bottom_color: (f32, f32, f32),
}

impl Default for HealthBarConfig {
    fn default() -> Self {
        Self {
            full_width: 40.0,
            height: 4.0,
            offset_y: 30.0,
            hud_width: 150.0,
            hud_height: 12.0,
            ease_rate: 6.0,
            epsilon: 0.05,
            background: (0.1, 0.1, 0.1),
            top_color: (0.8, 0.2, 0.2),
            bottom_color: (0.9, 0.8, 0.3),
        }
    }
}

impl HealthBarConfig {
    pub fn from_ron(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(contents)
    }

    /// Load the config, falling back to defaults.
    pub fn load() -> Self {
        let contents = match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read {}: {}. Using defaults.", CONFIG_PATH, e);
                return Self::default();
            }
        };

        match Self::from_ron(&contents) {
            Ok(config) => {
                info!("Loaded health bar config");
                config
            }
            Err(e) => {
                warn!("Parse error in {}: {}. Using defaults.", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    fn color(rgb: (f32, f32, f32)) -> Color {
        Color::srgb(rgb.0, rgb.1, rgb.2)
    }
}

/// System to load the bar config at startup.
pub fn load_health_bar_config(mut commands: Commands) {
    commands.insert_resource(HealthBarConfig::load());
}

/// Health-bar observer state for one observed entity.
#[derive(Component, Debug, Clone)]
pub struct HealthBar {
    /// Entity whose health this bar shows
    pub target: Entity,
    full_width: f32,
    top_width: f32,
    bottom: Easing,
    visible: bool,
}

impl HealthBar {
    /// A bar already showing `percentage` of `full_width`.
    pub fn new(target: Entity, full_width: f32, percentage: f32, rate: f32, epsilon: f32) -> Self {
        let width = percentage.clamp(0.0, 1.0) * full_width;
        Self {
            target,
            full_width,
            top_width: width,
            bottom: Easing::new(width, rate, epsilon),
            visible: true,
        }
    }

    pub fn top_width(&self) -> f32 {
        self.top_width
    }

    pub fn bottom_width(&self) -> f32 {
        self.bottom.value
    }

    pub fn is_easing(&self) -> bool {
        self.bottom.is_active()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Advance the bottom layer by one frame.
    pub fn tick(&mut self, dt: f32) {
        self.bottom.tick(dt);
    }
}

impl HealthObserver for HealthBar {
    fn on_health_changed(&mut self, current: i32, max: i32) {
        let percentage = if max <= 0 {
            0.0
        } else {
            (current as f32 / max as f32).clamp(0.0, 1.0)
        };
        let width = percentage * self.full_width;

        self.top_width = width;
        self.bottom.restart(width);
    }

    fn on_death(&mut self) {
        self.visible = false;
        self.bottom.cancel();
    }
}

/// Which layer of a bar an entity draws.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarLayer {
    Top,
    Bottom,
}

/// Root of a world-space bar, child of the enemy it shows.
#[derive(Component)]
pub struct WorldHealthBar;

/// Give every new enemy a bar floating above it.
pub fn attach_enemy_health_bars(
    mut commands: Commands,
    config: Res<HealthBarConfig>,
    enemies: Query<(Entity, &EnemyController), Added<EnemyController>>,
) {
    for (enemy, controller) in enemies.iter() {
        let bar = HealthBar::new(
            enemy,
            config.full_width,
            controller.health().percentage(),
            config.ease_rate,
            config.epsilon,
        );
        let size = Vec2::new(config.full_width, config.height);
        let left = -config.full_width / 2.0;

        commands.entity(enemy).with_children(|parent| {
            parent
                .spawn((
                    WorldHealthBar,
                    bar,
                    Transform::from_xyz(left, config.offset_y, 5.0),
                    Visibility::default(),
                ))
                .with_children(|layers| {
                    for (color, layer, z) in [
                        (config.background, None, 0.0),
                        (config.bottom_color, Some(BarLayer::Bottom), 0.1),
                        (config.top_color, Some(BarLayer::Top), 0.2),
                    ] {
                        let mut layer_entity = layers.spawn((
                            Sprite {
                                color: HealthBarConfig::color(color),
                                custom_size: Some(size),
                                anchor: Anchor::CenterLeft,
                                ..default()
                            },
                            Transform::from_xyz(0.0, 0.0, z),
                        ));
                        if let Some(layer) = layer {
                            layer_entity.insert(layer);
                        }
                    }
                });
        });
    }
}

/// Forward published health events to the bars observing them.
pub fn observe_health(mut updates: EventReader<HealthUpdate>, mut bars: Query<&mut HealthBar>) {
    let mut by_entity: HashMap<Entity, Vec<HealthUpdate>> = HashMap::new();
    for update in updates.read() {
        by_entity.entry(update.entity).or_default().push(*update);
    }
    if by_entity.is_empty() {
        return;
    }

    for mut bar in bars.iter_mut() {
        let Some(events) = by_entity.get(&bar.target) else {
            continue;
        };
        for update in events {
            update.event.dispatch(&mut *bar);
        }
    }
}

pub fn tick_health_bars(time: Res<Time>, mut bars: Query<&mut HealthBar>) {
    for mut bar in bars.iter_mut() {
        if bar.is_easing() {
            bar.tick(time.delta_secs());
        }
    }
}

/// Size the sprite layers of world bars.
pub fn render_world_bars(
    mut bars: Query<(&HealthBar, &Children, &mut Visibility), With<WorldHealthBar>>,
    mut layers: Query<(&BarLayer, &mut Sprite)>,
) {
    for (bar, children, mut visibility) in bars.iter_mut() {
        if !bar.is_visible() {
            *visibility = Visibility::Hidden;
            continue;
        }

        for &child in children.iter() {
            let Ok((layer, mut sprite)) = layers.get_mut(child) else {
                continue;
            };
            let width = match layer {
                BarLayer::Top => bar.top_width(),
                BarLayer::Bottom => bar.bottom_width(),
            };
            if let Some(size) = sprite.custom_size.as_mut() {
                size.x = width;
            }
        }
    }
}

/// Despawn bars whose observed entity no longer exists.
pub fn release_orphaned_bars(
    mut commands: Commands,
    bars: Query<(Entity, &HealthBar)>,
    targets: Query<()>,
) {
    for (entity, bar) in bars.iter() {
        if targets.get(bar.target).is_err() {
            debug!(?entity, "Releasing health bar of despawned entity");
            commands.entity(entity).despawn_recursive();
        }
    }
}
