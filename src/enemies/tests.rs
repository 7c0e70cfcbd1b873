use super::components::*;
use super::controller::EnemyController;
use super::data::*;
use super::io::*;
use crate::combat::{CameraShake, Health, HealthEvent};
use bevy::prelude::*;
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Recording collaborators
// ---------------------------------------------------------------------------

struct MockAnimator {
    clips: Vec<String>,
    played: Vec<String>,
    progress: f32,
    flip_x: bool,
}

impl MockAnimator {
    fn with_clips(clips: &[&str]) -> Self {
        Self {
            clips: clips.iter().map(|c| c.to_string()).collect(),
            played: Vec::new(),
            progress: 0.0,
            flip_x: false,
        }
    }
}

impl Animator for MockAnimator {
    fn play(&mut self, clip: &str) {
        self.played.push(clip.to_string());
        self.progress = 0.0;
    }

    fn normalized_progress(&self) -> f32 {
        self.progress
    }

    fn has_clip(&self, clip: &str) -> bool {
        self.clips.iter().any(|c| c == clip)
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }
}

struct MockBody {
    velocity: Vec2,
    colliders_enabled: bool,
    upright: bool,
    frozen: bool,
}

impl Default for MockBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            colliders_enabled: true,
            upright: false,
            frozen: false,
        }
    }
}

impl PhysicsBody for MockBody {
    fn set_velocity_zero(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn set_horizontal_velocity(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    fn enable_colliders(&mut self, enabled: bool) {
        self.colliders_enabled = enabled;
    }

    fn lock_upright(&mut self) {
        self.upright = true;
    }

    fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.frozen = true;
    }
}

#[derive(Default)]
struct MockScene {
    destroy_requests: u32,
}

impl SceneObject for MockScene {
    fn request_destroy(&mut self) {
        self.destroy_requests += 1;
    }
}

#[derive(Default)]
struct MockCamera {
    shakes: Vec<(f32, f32)>,
}

impl CameraShake for MockCamera {
    fn shake(&mut self, intensity: f32, duration: f32) {
        self.shakes.push((intensity, duration));
    }
}

struct MockIo {
    animator: Option<MockAnimator>,
    body: Option<MockBody>,
    scene: MockScene,
    camera: Option<MockCamera>,
    position: Vec2,
    targets: HashMap<Entity, Vec2>,
    player: Option<Entity>,
    strikes: Vec<(Entity, i32, Vec2)>,
}

impl EnemyIo for MockIo {
    fn animator(&mut self) -> Option<&mut dyn Animator> {
        self.animator.as_mut().map(|a| a as &mut dyn Animator)
    }

    fn body(&mut self) -> Option<&mut dyn PhysicsBody> {
        self.body.as_mut().map(|b| b as &mut dyn PhysicsBody)
    }

    fn scene(&mut self) -> &mut dyn SceneObject {
        &mut self.scene
    }

    fn camera(&mut self) -> Option<&mut dyn CameraShake> {
        self.camera.as_mut().map(|c| c as &mut dyn CameraShake)
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn target_position(&self, target: Entity) -> Option<Vec2> {
        self.targets.get(&target).copied()
    }

    fn find_player(&self) -> Option<Entity> {
        self.player
    }

    fn strike(&mut self, target: Entity, damage: i32, direction: Vec2) {
        self.strikes.push((target, damage, direction));
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const ALL_CLIPS: &[&str] = &["idle", "walk", "run", "attack", "hurt", "death"];
const DT: f32 = 0.25;

fn player() -> Entity {
    Entity::from_raw(42)
}

/// Player standing inside the attack area (attack point is at x = 24).
fn io_with_player_at(x: f32) -> MockIo {
    let mut targets = HashMap::new();
    targets.insert(player(), Vec2::new(x, 0.0));
    MockIo {
        animator: Some(MockAnimator::with_clips(ALL_CLIPS)),
        body: Some(MockBody::default()),
        scene: MockScene::default(),
        camera: Some(MockCamera::default()),
        position: Vec2::ZERO,
        targets,
        player: Some(player()),
        strikes: Vec::new(),
    }
}

fn test_io() -> MockIo {
    io_with_player_at(30.0)
}

fn test_profile() -> EnemyProfile {
    EnemyProfile {
        idle_dwell: 1.0,
        attack_hit_frame: 0.5,
        knockback: 120.0,
        ..default()
    }
}

fn controller_with(max_health: i32, params: EnemyParams, io: &mut MockIo) -> EnemyController {
    let mut controller =
        EnemyController::new("goblin", Health::new(max_health), params, test_profile());
    controller.initialize(io);
    controller
}

fn test_controller(max_health: i32, io: &mut MockIo) -> EnemyController {
    controller_with(max_health, EnemyParams::default(), io)
}

fn set_progress(io: &mut MockIo, progress: f32) {
    if let Some(animator) = io.animator.as_mut() {
        animator.progress = progress;
    }
}

fn last_played(io: &MockIo) -> Option<&str> {
    io.animator
        .as_ref()
        .and_then(|a| a.played.last())
        .map(|s| s.as_str())
}

/// Drive a fresh controller into Attack against a player in reach.
fn attacking_controller(io: &mut MockIo) -> EnemyController {
    let mut controller = test_controller(5, io);
    controller.on_target_enter_sense(Some(player()), io);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    controller.per_frame_tick(io, DT);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Attack));
    controller
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

#[test]
fn test_initialize_enters_idle_and_locks_body() {
    let mut io = test_io();
    let controller = test_controller(5, &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Idle));
    assert!(controller.is_active());
    assert!(controller.is_initialized());
    assert!(io.body.as_ref().unwrap().upright);
    assert_eq!(last_played(&io), Some("idle"));
}

#[test]
fn test_initialize_twice_does_not_reenter() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);
    controller.initialize(&mut io);

    assert_eq!(io.animator.as_ref().unwrap().played, vec!["idle".to_string()]);
}

#[test]
fn test_uninitialized_controller_does_nothing() {
    let mut io = test_io();
    let mut controller =
        EnemyController::new("goblin", Health::new(5), EnemyParams::default(), test_profile());

    controller.per_frame_tick(&mut io, DT);

    assert_eq!(controller.current_state(), None);
}

// ---------------------------------------------------------------------------
// Damage and the hit protocol
// ---------------------------------------------------------------------------

#[test]
fn test_non_fatal_hit_goes_to_hit_then_chase() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);
    controller.drain_health_events();

    controller.take_damage(2, Vec2::X, &mut io);

    assert_eq!(
        controller.drain_health_events(),
        vec![
            HealthEvent::Changed { current: 3, max: 5 },
            HealthEvent::DamageTaken { amount: 2 },
        ]
    );
    assert_eq!(controller.current_state(), Some(EnemyStateId::Hit));
    assert!(controller.params().is_hit);
    assert_eq!(io.camera.as_ref().unwrap().shakes.len(), 1);
    assert_eq!(last_played(&io), Some("hurt"));

    // Reaction still playing
    set_progress(&mut io, 0.5);
    controller.per_frame_tick(&mut io, DT);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Hit));

    set_progress(&mut io, 0.95);
    controller.per_frame_tick(&mut io, DT);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    assert!(!controller.params().is_hit);
    assert_eq!(controller.params().target, Some(player()));
}

#[test]
fn test_hit_faces_attacker_and_knocks_back() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);

    // Blow travelling right: the attacker stands to the left
    controller.take_damage(1, Vec2::new(2.0, 0.0), &mut io);

    assert!(controller.params().facing_left);
    assert!(io.animator.as_ref().unwrap().flip_x);
    assert_eq!(io.body.as_ref().unwrap().velocity, Vec2::new(120.0, 0.0));
    assert_eq!(controller.params().last_hit_direction, Vec2::X);
}

#[test]
fn test_hit_during_hit_restarts_reaction() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);

    controller.take_damage(1, Vec2::X, &mut io);
    set_progress(&mut io, 0.9);
    controller.take_damage(1, Vec2::X, &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Hit));
    assert!(controller.params().is_hit);
    assert_eq!(controller.health().current(), 3);
    assert_eq!(io.animator.as_ref().unwrap().progress, 0.0);
}

#[test]
fn test_hit_without_player_still_chases() {
    let mut io = test_io();
    io.player = None;
    let mut controller = test_controller(5, &mut io);

    controller.take_damage(1, Vec2::X, &mut io);
    set_progress(&mut io, 1.0);
    controller.per_frame_tick(&mut io, DT);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    assert_eq!(controller.params().target, None);

    // Chase with no target gives up
    controller.per_frame_tick(&mut io, DT);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Idle));
}

#[test]
fn test_missing_animator_uses_fallback_timing() {
    let mut io = test_io();
    io.animator = None;
    let mut controller = test_controller(5, &mut io);

    controller.take_damage(1, Vec2::X, &mut io);
    controller.per_frame_tick(&mut io, 0.2);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Hit));

    controller.per_frame_tick(&mut io, 0.2);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
}

#[test]
fn test_missing_camera_still_applies_damage() {
    let mut io = test_io();
    io.camera = None;
    let mut controller = test_controller(5, &mut io);

    controller.take_damage(2, Vec2::X, &mut io);

    assert_eq!(controller.health().current(), 3);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Hit));
}

// ---------------------------------------------------------------------------
// Death
// ---------------------------------------------------------------------------

#[test]
fn test_fatal_hit_goes_dead_and_deactivates() {
    let mut io = test_io();
    let mut controller = test_controller(3, &mut io);
    controller.drain_health_events();

    controller.take_damage(5, Vec2::X, &mut io);

    let events = controller.drain_health_events();
    assert_eq!(events.iter().filter(|e| **e == HealthEvent::Died).count(), 1);
    assert_eq!(controller.health().current(), 0);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Dead));
    assert!(!controller.is_active());

    let body = io.body.as_ref().unwrap();
    assert!(!body.colliders_enabled);
    assert!(body.frozen);
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(last_played(&io), Some("death"));
    assert_eq!(io.camera.as_ref().unwrap().shakes.len(), 1);
}

#[test]
fn test_overkill_clamps_to_zero() {
    let mut io = test_io();
    let mut controller = test_controller(10, &mut io);

    controller.take_damage(12, Vec2::X, &mut io);

    assert_eq!(controller.health().current(), 0);
    assert_eq!(controller.health().percentage(), 0.0);
}

#[test]
fn test_dead_rejects_every_transition() {
    let mut io = test_io();
    let mut controller = test_controller(1, &mut io);
    controller.take_damage(1, Vec2::X, &mut io);

    for &id in [
        EnemyStateId::Idle,
        EnemyStateId::Patrol,
        EnemyStateId::Chase,
        EnemyStateId::Attack,
        EnemyStateId::Hit,
        EnemyStateId::Dead,
    ]
    .iter()
    {
        assert!(!controller.transition_state(id, &mut io));
        assert_eq!(controller.current_state(), Some(EnemyStateId::Dead));
    }
}

#[test]
fn test_damage_and_sensors_ignored_after_death() {
    let mut io = test_io();
    let mut controller = test_controller(1, &mut io);
    controller.take_damage(1, Vec2::X, &mut io);
    controller.drain_health_events();

    controller.take_damage(3, Vec2::X, &mut io);
    controller.on_target_enter_sense(Some(player()), &mut io);
    controller.on_target_exit_sense(Some(player()), &mut io);
    controller.heal(5);

    assert!(controller.drain_health_events().is_empty());
    assert_eq!(controller.current_state(), Some(EnemyStateId::Dead));
    assert_eq!(io.camera.as_ref().unwrap().shakes.len(), 1);
}

#[test]
fn test_destroy_at_ceiling_when_death_clip_missing() {
    let mut io = test_io();
    io.animator = Some(MockAnimator::with_clips(&["idle", "walk", "run", "attack", "hurt"]));
    let mut controller = test_controller(1, &mut io);
    controller.take_damage(1, Vec2::X, &mut io);

    // 7 ticks of 0.25 = 1.75s: past the delay, short of the 2.0s ceiling
    for _ in 0..7 {
        controller.per_frame_tick(&mut io, DT);
    }
    assert_eq!(io.scene.destroy_requests, 0);

    controller.per_frame_tick(&mut io, DT);
    assert_eq!(io.scene.destroy_requests, 1);

    for _ in 0..10 {
        controller.per_frame_tick(&mut io, DT);
    }
    assert_eq!(io.scene.destroy_requests, 1);
}

#[test]
fn test_destroy_waits_for_delay_when_clip_done_early() {
    let mut io = test_io();
    let mut controller = test_controller(1, &mut io);
    controller.take_damage(1, Vec2::X, &mut io);
    set_progress(&mut io, 1.0);

    controller.per_frame_tick(&mut io, DT);
    controller.per_frame_tick(&mut io, DT);
    assert_eq!(io.scene.destroy_requests, 0);

    // 0.75s >= 0.6s delay with the clip complete
    controller.per_frame_tick(&mut io, DT);
    assert_eq!(io.scene.destroy_requests, 1);

    controller.per_frame_tick(&mut io, DT);
    assert_eq!(io.scene.destroy_requests, 1);
}

#[test]
fn test_dead_without_body_still_destroys() {
    let mut io = test_io();
    io.body = None;
    let mut controller = test_controller(1, &mut io);
    controller.take_damage(1, Vec2::X, &mut io);

    for _ in 0..8 {
        controller.per_frame_tick(&mut io, DT);
    }

    assert_eq!(io.scene.destroy_requests, 1);
}

#[test]
fn test_death_timer_latches() {
    let mut timer = DeathTimer::new(0.6, 2.0);

    assert!(!timer.advance(0.5, true));
    assert!(timer.advance(0.2, true));
    assert!(timer.is_destroying());
    assert!(!timer.advance(5.0, true));
}

#[test]
fn test_death_timer_ceiling_ignores_animation() {
    let mut timer = DeathTimer::new(0.6, 2.0);

    assert!(!timer.advance(1.0, false));
    assert!(!timer.advance(0.5, false));
    assert!(timer.advance(0.5, false));
}

#[test]
fn test_health_dropping_outside_damage_trips_guard() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);
    controller.drain_health_events();

    controller.set_max_health(0);
    assert!(controller.is_active());

    controller.per_frame_tick(&mut io, DT);

    assert!(!controller.is_active());
    assert_eq!(controller.current_state(), Some(EnemyStateId::Dead));
    let events = controller.drain_health_events();
    assert_eq!(events.iter().filter(|e| **e == HealthEvent::Died).count(), 1);
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

#[test]
fn test_sense_enter_from_idle_or_patrol_chases() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);

    controller.on_target_enter_sense(Some(player()), &mut io);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    assert_eq!(controller.params().target, Some(player()));

    assert!(controller.transition_state(EnemyStateId::Patrol, &mut io));
    controller.on_target_enter_sense(Some(player()), &mut io);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
}

#[test]
fn test_sense_enter_while_chasing_reenters_chase() {
    let mut io = io_with_player_at(100.0);
    let mut controller = test_controller(5, &mut io);
    controller.on_target_enter_sense(Some(player()), &mut io);
    let plays = io.animator.as_ref().unwrap().played.len();

    controller.on_target_enter_sense(Some(player()), &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    assert_eq!(io.animator.as_ref().unwrap().played.len(), plays + 1);
    assert_eq!(last_played(&io), Some("run"));
}

#[test]
fn test_sense_enter_keeps_attack() {
    let mut io = test_io();
    let mut controller = attacking_controller(&mut io);

    controller.on_target_enter_sense(Some(player()), &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Attack));
}

#[test]
fn test_sense_enter_during_hit_resets_to_idle() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);
    controller.take_damage(1, Vec2::X, &mut io);

    controller.on_target_enter_sense(Some(player()), &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Idle));
    assert!(!controller.params().is_hit);
}

#[test]
fn test_sense_without_target_is_skipped() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);

    controller.on_target_enter_sense(None, &mut io);
    controller.on_target_exit_sense(None, &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Idle));
    assert_eq!(controller.params().target, None);
}

#[test]
fn test_sense_exit_within_sight_keeps_chasing() {
    let mut io = io_with_player_at(100.0);
    let mut controller = test_controller(5, &mut io);
    controller.on_target_enter_sense(Some(player()), &mut io);

    controller.on_target_exit_sense(Some(player()), &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    assert_eq!(controller.params().target, Some(player()));
}

#[test]
fn test_sense_exit_out_of_sight_patrols() {
    let mut io = io_with_player_at(100.0);
    let mut controller = test_controller(5, &mut io);
    controller.on_target_enter_sense(Some(player()), &mut io);

    io.targets.insert(player(), Vec2::new(500.0, 0.0));
    controller.on_target_exit_sense(Some(player()), &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Patrol));
    assert_eq!(controller.params().target, None);
}

// ---------------------------------------------------------------------------
// Behavior states
// ---------------------------------------------------------------------------

#[test]
fn test_idle_dwells_then_patrols() {
    let mut io = test_io();
    let params = EnemyParams {
        waypoints: vec![Vec2::new(100.0, 0.0), Vec2::new(-100.0, 0.0)],
        ..default()
    };
    let mut controller = controller_with(5, params, &mut io);

    controller.per_frame_tick(&mut io, 0.5);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Idle));

    controller.per_frame_tick(&mut io, 0.5);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Patrol));
    assert_eq!(last_played(&io), Some("walk"));
}

#[test]
fn test_idle_without_waypoints_stays_idle() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);

    for _ in 0..20 {
        controller.per_frame_tick(&mut io, DT);
    }

    assert_eq!(controller.current_state(), Some(EnemyStateId::Idle));
}

#[test]
fn test_patrol_walks_waypoint_loop() {
    let mut io = test_io();
    let params = EnemyParams {
        waypoints: vec![Vec2::new(100.0, 0.0), Vec2::new(-100.0, 0.0)],
        ..default()
    };
    let mut controller = controller_with(5, params, &mut io);
    assert!(controller.transition_state(EnemyStateId::Patrol, &mut io));

    controller.per_frame_tick(&mut io, DT);
    assert_eq!(io.body.as_ref().unwrap().velocity.x, 60.0);
    assert!(!controller.params().facing_left);

    io.position = Vec2::new(98.0, 0.0);
    controller.per_frame_tick(&mut io, DT);
    assert_eq!(controller.params().waypoint_index, 1);
    assert_eq!(io.body.as_ref().unwrap().velocity.x, 0.0);

    controller.per_frame_tick(&mut io, DT);
    assert_eq!(io.body.as_ref().unwrap().velocity.x, -60.0);
    assert!(controller.params().facing_left);
    assert!(io.animator.as_ref().unwrap().flip_x);
}

#[test]
fn test_chase_moves_toward_distant_target() {
    let mut io = io_with_player_at(-150.0);
    let mut controller = test_controller(5, &mut io);
    controller.on_target_enter_sense(Some(player()), &mut io);

    controller.per_frame_tick(&mut io, DT);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    assert_eq!(io.body.as_ref().unwrap().velocity.x, -110.0);
    assert!(controller.params().facing_left);
    assert_eq!(last_played(&io), Some("run"));
}

#[test]
fn test_chase_drops_vanished_target() {
    let mut io = test_io();
    let mut controller = test_controller(5, &mut io);
    controller.on_target_enter_sense(Some(player()), &mut io);

    io.targets.clear();
    controller.per_frame_tick(&mut io, DT);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Patrol));
    assert_eq!(controller.params().target, None);
}

#[test]
fn test_attack_strikes_once_on_hit_frame() {
    let mut io = test_io();
    let mut controller = attacking_controller(&mut io);

    set_progress(&mut io, 0.4);
    controller.per_frame_tick(&mut io, DT);
    assert!(io.strikes.is_empty());

    set_progress(&mut io, 0.6);
    controller.per_frame_tick(&mut io, DT);
    set_progress(&mut io, 0.7);
    controller.per_frame_tick(&mut io, DT);

    assert_eq!(io.strikes, vec![(player(), 1, Vec2::X)]);
}

#[test]
fn test_attack_whiffs_when_target_steps_away() {
    let mut io = test_io();
    let mut controller = attacking_controller(&mut io);

    io.targets.insert(player(), Vec2::new(200.0, 0.0));
    set_progress(&mut io, 0.6);
    controller.per_frame_tick(&mut io, DT);

    assert!(io.strikes.is_empty());
}

#[test]
fn test_attack_cooldown_gates_next_attack() {
    let mut io = test_io();
    let mut controller = attacking_controller(&mut io);

    set_progress(&mut io, 0.96);
    controller.per_frame_tick(&mut io, DT);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    assert_eq!(controller.params().cooldown_remaining, controller.params().attack_cooldown);

    // In reach but cooling down
    controller.per_frame_tick(&mut io, DT);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
    assert_eq!(io.body.as_ref().unwrap().velocity.x, 0.0);

    controller.per_frame_tick(&mut io, 2.0);
    assert_eq!(controller.current_state(), Some(EnemyStateId::Attack));
}

#[test]
fn test_attack_without_target_returns_to_idle() {
    let mut io = test_io();
    let mut controller = attacking_controller(&mut io);

    controller.params_mut().target = None;
    set_progress(&mut io, 1.0);
    controller.per_frame_tick(&mut io, DT);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Idle));
}

#[test]
fn test_interrupted_attack_still_cools_down() {
    let mut io = test_io();
    let mut controller = attacking_controller(&mut io);

    controller.take_damage(1, Vec2::X, &mut io);

    assert_eq!(controller.current_state(), Some(EnemyStateId::Hit));
    assert!(!controller.params().cooldown_ready());
}

#[test]
fn test_attack_point_mirrors_with_facing() {
    let mut params = EnemyParams::default();
    assert_eq!(params.attack_point(Vec2::ZERO), Vec2::new(24.0, 0.0));

    params.facing_left = true;
    assert_eq!(params.attack_point(Vec2::ZERO), Vec2::new(-24.0, 0.0));
    assert!(params.in_attack_reach(Vec2::ZERO, Vec2::new(-30.0, 0.0)));
    assert!(!params.in_attack_reach(Vec2::ZERO, Vec2::new(30.0, 0.0)));
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

const GOBLIN_RON: &str = r#"(
    name: "Goblin",
    max_health: 4,
    patrol_speed: 50.0,
    chase_speed: 100.0,
    sight_radius: 200.0,
    sense_radius: 120.0,
    attack_offset: (20.0, 0.0),
    attack_radius: 16.0,
    damage: 1,
    attack_cooldown: 1.0,
    attack_hit_frame: 0.5,
    idle_dwell: 1.5,
    death: (destroy_delay: 0.5, max_destroy_time: 1.5),
    sprite: (
        image: "sprites/goblin.png",
        frame_size: (48, 48),
        columns: 8,
        rows: 5,
        clips: {
            "idle": (first: 0, last: 3, fps: 6.0, looping: true),
            "death": (first: 32, last: 37, fps: 10.0),
        },
    ),
)"#;

#[test]
fn test_definition_parses_with_defaults() {
    let definition = EnemyDefinition::from_ron("goblin.ron", GOBLIN_RON).unwrap();

    assert_eq!(definition.name, "Goblin");
    assert_eq!(definition.clips, ClipNames::default());
    assert_eq!(definition.death.destroy_delay, 0.5);
    assert_eq!(definition.hurt_duration, 0.4);
    assert!(!definition.sprite.clips["death"].looping);
    assert!((definition.sprite.clips["death"].duration() - 0.6).abs() < 1e-5);

    let params = definition.to_params(vec![Vec2::ZERO]);
    assert_eq!(params.attack_offset, Vec2::new(20.0, 0.0));
    assert_eq!(params.waypoints.len(), 1);
    assert_eq!(definition.to_profile().death.max_destroy_time, 1.5);
}

#[test]
fn test_definition_rejects_delay_past_ceiling() {
    let ron = GOBLIN_RON.replace("max_destroy_time: 1.5", "max_destroy_time: 0.2");

    let err = EnemyDefinition::from_ron("goblin.ron", &ron).unwrap_err();

    assert!(matches!(err, super::EnemyDataError::Invalid { .. }));
}

#[test]
fn test_definition_reports_parse_errors() {
    let err = EnemyDefinition::from_ron("broken.ron", "(name: ").unwrap_err();
    assert!(matches!(err, super::EnemyDataError::ParseError { .. }));
}

#[test]
fn test_missing_definition_file_is_read_error() {
    let err = load_definition_file(Path::new("assets/data/enemies/nope.ron")).unwrap_err();
    assert!(matches!(err, super::EnemyDataError::ReadError { .. }));
}

#[test]
fn test_shipped_enemy_definitions_load() {
    for name in ["dad", "goblin", "goblin_archer", "mom", "spider"] {
        let path = format!("assets/data/enemies/{}.ron", name);
        let definition = load_definition_file(Path::new(&path))
            .unwrap_or_else(|e| panic!("{}: {}", path, e));
        assert!(definition.sprite.clips.contains_key(&definition.clips.idle));
    }
}

#[test]
fn test_shipped_encounter_loads() {
    let contents = std::fs::read_to_string("assets/data/encounter.ron").unwrap();
    let table = EncounterTable::from_ron("encounter.ron", &contents).unwrap();
    assert!(!table.spawns.is_empty());
}

// ---------------------------------------------------------------------------
// ECS adapter
// ---------------------------------------------------------------------------

mod ecs {
    use super::super::ai::{drive_enemies, translate_sensor_contacts};
    use super::super::components::{Enemy, EnemyColliders, EnemyParams, EnemyStateId, SenseArea};
    use super::super::controller::EnemyController;
    use super::super::data::EnemyProfile;
    use crate::combat::{Health, HealthEvent, HealthUpdate};
    use crate::core::{AttackLanded, IncomingAttack, SenseKind, TargetSensed};
    use crate::player::Player;
    use crate::ui::health_bar::{HealthBar, WorldHealthBar};
    use bevy::prelude::*;
    use bevy::time::TimeUpdateStrategy;
    use bevy_rapier2d::prelude::*;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
    use std::time::Duration;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CollisionEvent>()
            .add_event::<TargetSensed>()
            .add_event::<IncomingAttack>()
            .add_event::<AttackLanded>()
            .add_event::<HealthUpdate>()
            .add_systems(Update, (translate_sensor_contacts, drive_enemies).chain());
        app
    }

    fn spawn_enemy(app: &mut App, max_health: i32) -> Entity {
        let controller = EnemyController::new(
            "goblin",
            Health::new(max_health),
            EnemyParams::default(),
            EnemyProfile::default(),
        );
        let enemy = app
            .world_mut()
            .spawn((Enemy, controller, Transform::default(), Velocity::zero()))
            .id();
        app.world_mut()
            .entity_mut(enemy)
            .insert(EnemyColliders(vec![enemy]));
        enemy
    }

    fn health_updates(app: &App) -> Vec<HealthUpdate> {
        app.world()
            .resource::<Events<HealthUpdate>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    #[test]
    fn test_sensor_contact_with_player_is_translated() {
        let mut app = app();
        let enemy = spawn_enemy(&mut app, 5);
        let player = app.world_mut().spawn((Player, Transform::from_xyz(100.0, 0.0, 0.0))).id();
        let sensor = app.world_mut().spawn(SenseArea { owner: enemy }).id();
        let bystander = app.world_mut().spawn(Transform::default()).id();

        app.world_mut().send_event(CollisionEvent::Started(
            player,
            sensor,
            CollisionEventFlags::SENSOR,
        ));
        app.world_mut().send_event(CollisionEvent::Started(
            sensor,
            bystander,
            CollisionEventFlags::SENSOR,
        ));
        app.update();

        let sensed: Vec<TargetSensed> = app
            .world()
            .resource::<Events<TargetSensed>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(sensed.len(), 1);
        assert_eq!(sensed[0].enemy, enemy);
        assert_eq!(sensed[0].target, player);
        assert_eq!(sensed[0].kind, SenseKind::Enter);

        let controller = app.world().get::<EnemyController>(enemy).unwrap();
        assert_eq!(controller.current_state(), Some(EnemyStateId::Chase));
        assert_eq!(controller.params().target, Some(player));
    }

    #[test]
    fn test_incoming_attack_publishes_health_events() {
        let mut app = app();
        let enemy = spawn_enemy(&mut app, 5);

        app.world_mut().send_event(IncomingAttack {
            target: enemy,
            amount: 2,
            direction: Vec2::X,
        });
        app.update();

        let updates = health_updates(&app);
        assert!(updates.iter().all(|u| u.entity == enemy));
        assert!(updates
            .iter()
            .any(|u| u.event == HealthEvent::Changed { current: 3, max: 5 }));

        let controller = app.world().get::<EnemyController>(enemy).unwrap();
        assert_eq!(controller.current_state(), Some(EnemyStateId::Hit));
    }

    #[test]
    fn test_fatal_attack_disables_colliders() {
        let mut app = app();
        let enemy = spawn_enemy(&mut app, 1);

        app.world_mut().send_event(IncomingAttack {
            target: enemy,
            amount: 3,
            direction: Vec2::X,
        });
        app.update();

        assert!(app.world().get::<ColliderDisabled>(enemy).is_some());
        assert_eq!(app.world().get::<RigidBody>(enemy), Some(&RigidBody::Fixed));
        let controller = app.world().get::<EnemyController>(enemy).unwrap();
        assert_eq!(controller.current_state(), Some(EnemyStateId::Dead));
        assert!(health_updates(&app)
            .iter()
            .any(|u| u.event == HealthEvent::Died));
    }

    #[test]
    fn test_dead_enemy_is_despawned_with_its_bar_at_ceiling() {
        let mut app = app();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        let enemy = spawn_enemy(&mut app, 1);
        let bar = app
            .world_mut()
            .spawn((WorldHealthBar, HealthBar::new(enemy, 40.0, 1.0, 6.0, 0.05)))
            .id();
        app.world_mut().entity_mut(enemy).add_child(bar);

        app.world_mut().send_event(IncomingAttack {
            target: enemy,
            amount: 3,
            direction: Vec2::X,
        });
        app.update();

        // No animator, so only the 2.0s ceiling can end the death window.
        for _ in 0..10 {
            app.update();
        }
        assert!(app.world().entities().contains(enemy));
        let controller = app.world().get::<EnemyController>(enemy).unwrap();
        assert_eq!(controller.current_state(), Some(EnemyStateId::Dead));

        for _ in 0..30 {
            app.update();
        }
        assert!(!app.world().entities().contains(enemy));
        assert!(!app.world().entities().contains(bar));
    }
}
