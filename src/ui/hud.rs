//! In-game HUD - the player's health bar.

use bevy::prelude::*;

use super::health_bar::{BarLayer, HealthBar, HealthBarConfig};
use crate::combat::Health;
use crate::core::GameState;
use crate::player::Player;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(Update, render_hud_bar.run_if(in_state(GameState::InGame)));
}

/// Spawn the HUD UI.
fn spawn_hud(
    mut commands: Commands,
    config: Res<HealthBarConfig>,
    player_query: Query<(Entity, &Health), With<Player>>,
) {
    let Ok((player, health)) = player_query.get_single() else {
        warn!("No player to show a health bar for");
        return;
    };

    let bar = HealthBar::new(
        player,
        config.hud_width,
        health.percentage(),
        config.ease_rate,
        config.epsilon,
    );

    // HUD root container (bottom-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|row| {
                    // Label
                    row.spawn((
                        Text::new("Health"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.8, 0.8)),
                        Node {
                            width: Val::Px(60.0),
                            ..default()
                        },
                    ));

                    // Bar background, holding the observer
                    row.spawn((
                        Node {
                            width: Val::Px(config.hud_width),
                            height: Val::Px(config.hud_height),
                            ..default()
                        },
                        BackgroundColor(rgb(config.background)),
                        bar,
                    ))
                    .with_children(|bg| {
                        spawn_fill(bg, &config, BarLayer::Bottom, config.bottom_color);
                        spawn_fill(bg, &config, BarLayer::Top, config.top_color);
                    });
                });
        });
}

fn rgb(color: (f32, f32, f32)) -> Color {
    Color::srgb(color.0, color.1, color.2)
}

/// Absolutely positioned fill so both layers overlap from the left edge.
fn spawn_fill(parent: &mut ChildBuilder, config: &HealthBarConfig, layer: BarLayer, color: (f32, f32, f32)) {
    parent.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            width: Val::Px(config.hud_width),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(rgb(color)),
        layer,
    ));
}

/// Size the fill nodes from the bar model.
fn render_hud_bar(
    mut bar_query: Query<(&HealthBar, &Children, &mut Visibility), With<Node>>,
    mut fill_query: Query<(&BarLayer, &mut Node)>,
) {
    for (bar, children, mut visibility) in bar_query.iter_mut() {
        if !bar.is_visible() {
            *visibility = Visibility::Hidden;
            continue;
        }

        for &child in children.iter() {
            let Ok((layer, mut node)) = fill_query.get_mut(child) else {
                continue;
            };
            node.width = Val::Px(match layer {
                BarLayer::Top => bar.top_width(),
                BarLayer::Bottom => bar.bottom_width(),
            });
        }
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
