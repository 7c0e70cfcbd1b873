//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::EnemyParams;
use super::error::EnemyDataError;

const ENEMIES_DIR: &str = "assets/data/enemies";
const ENCOUNTER_PATH: &str = "assets/data/encounter.ron";

/// One named clip on a sprite sheet.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ClipDef {
    /// First atlas index
    pub first: usize,
    /// Last atlas index (inclusive)
    pub last: usize,
    pub fps: f32,
    #[serde(default)]
    pub looping: bool,
}

impl ClipDef {
    pub fn frame_count(&self) -> usize {
        self.last.saturating_sub(self.first) + 1
    }

    /// Clip length in seconds (0 for a clip with no frame rate).
    pub fn duration(&self) -> f32 {
        if self.fps <= 0.0 {
            0.0
        } else {
            self.frame_count() as f32 / self.fps
        }
    }
}

/// Sprite sheet and its clips.
#[derive(Deserialize, Clone, Debug)]
pub struct SpriteSheetDef {
    pub image: String,
    pub frame_size: (u32, u32),
    pub columns: u32,
    pub rows: u32,
    #[serde(default)]
    pub clips: HashMap<String, ClipDef>,
}

/// Which clip each state plays.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClipNames {
    pub idle: String,
    pub walk: String,
    pub chase: String,
    pub attack: String,
    pub hurt: String,
    pub death: String,
}

impl Default for ClipNames {
    fn default() -> Self {
        Self {
            idle: "idle".to_string(),
            walk: "walk".to_string(),
            chase: "run".to_string(),
            attack: "attack".to_string(),
            hurt: "hurt".to_string(),
            death: "death".to_string(),
        }
    }
}

/// Death protocol timings.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct DeathConfig {
    /// Minimum time between death and destruction
    pub destroy_delay: f32,
    /// Destruction happens at this point even if the death clip never finishes
    pub max_destroy_time: f32,
}

impl Default for DeathConfig {
    fn default() -> Self {
        Self {
            destroy_delay: 0.6,
            max_destroy_time: 2.0,
        }
    }
}

/// Camera shake played when this enemy is hit.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct ShakeConfig {
    pub intensity: f32,
    pub duration: f32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            intensity: 3.0,
            duration: 0.15,
        }
    }
}

/// Body collider half extents.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct ColliderConfig {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_width: 12.0,
            half_height: 16.0,
        }
    }
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: i32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub sight_radius: f32,
    /// Radius of the proximity trigger
    pub sense_radius: f32,
    pub attack_offset: (f32, f32),
    pub attack_radius: f32,
    pub damage: i32,
    pub attack_cooldown: f32,
    /// 0.0-1.0, when damage applies during the attack clip
    pub attack_hit_frame: f32,
    /// Seconds spent idle before patrolling
    pub idle_dwell: f32,
    /// Speed of the push applied when hit
    #[serde(default)]
    pub knockback: f32,
    #[serde(default)]
    pub shake: ShakeConfig,
    #[serde(default)]
    pub death: DeathConfig,
    /// Attack length used when the attack clip is unavailable
    #[serde(default = "default_attack_duration")]
    pub attack_duration: f32,
    /// Hurt length used when the hurt clip is unavailable
    #[serde(default = "default_hurt_duration")]
    pub hurt_duration: f32,
    #[serde(default)]
    pub collider: ColliderConfig,
    #[serde(default)]
    pub clips: ClipNames,
    pub sprite: SpriteSheetDef,
}

fn default_attack_duration() -> f32 {
    0.6
}

fn default_hurt_duration() -> f32 {
    0.4
}

/// Per-type behavior settings handed to the states at construction.
#[derive(Clone, Debug)]
pub struct EnemyProfile {
    pub clips: ClipNames,
    pub idle_dwell: f32,
    pub attack_hit_frame: f32,
    pub attack_duration: f32,
    pub hurt_duration: f32,
    pub knockback: f32,
    pub shake: ShakeConfig,
    pub death: DeathConfig,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            clips: ClipNames::default(),
            idle_dwell: 1.5,
            attack_hit_frame: 0.5,
            attack_duration: default_attack_duration(),
            hurt_duration: default_hurt_duration(),
            knockback: 0.0,
            shake: ShakeConfig::default(),
            death: DeathConfig::default(),
        }
    }
}

impl EnemyDefinition {
    /// Parse and validate a definition from RON text.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, EnemyDataError> {
        let definition: Self = ron::from_str(contents).map_err(|e| EnemyDataError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        definition.validate()?;
        Ok(definition)
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<(), EnemyDataError> {
        let invalid = |reason: &str| EnemyDataError::Invalid {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.max_health <= 0 {
            return Err(invalid("max_health must be positive"));
        }
        if self.damage < 0 {
            return Err(invalid("damage must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.attack_hit_frame) {
            return Err(invalid("attack_hit_frame must be within 0.0..=1.0"));
        }
        if self.death.destroy_delay < 0.0 || self.death.max_destroy_time < 0.0 {
            return Err(invalid("death timings must not be negative"));
        }
        if self.death.destroy_delay > self.death.max_destroy_time {
            return Err(invalid("destroy_delay must not exceed max_destroy_time"));
        }
        if self.attack_cooldown < 0.0 || self.idle_dwell < 0.0 {
            return Err(invalid("cooldown and dwell must not be negative"));
        }

        let clips = &self.clips;
        let names = [
            &clips.idle,
            &clips.walk,
            &clips.chase,
            &clips.attack,
            &clips.hurt,
            &clips.death,
        ];
        if names.iter().any(|name| name.is_empty()) {
            return Err(invalid("clip names must not be empty"));
        }

        Ok(())
    }

    /// Behavior settings for the state family.
    pub fn to_profile(&self) -> EnemyProfile {
        EnemyProfile {
            clips: self.clips.clone(),
            idle_dwell: self.idle_dwell,
            attack_hit_frame: self.attack_hit_frame,
            attack_duration: self.attack_duration,
            hurt_duration: self.hurt_duration,
            knockback: self.knockback,
            shake: self.shake,
            death: self.death,
        }
    }

    /// Runtime parameters for one spawned instance.
    pub fn to_params(&self, waypoints: Vec<Vec2>) -> EnemyParams {
        EnemyParams {
            patrol_speed: self.patrol_speed,
            chase_speed: self.chase_speed,
            waypoints,
            attack_offset: Vec2::new(self.attack_offset.0, self.attack_offset.1),
            attack_radius: self.attack_radius,
            sight_radius: self.sight_radius,
            damage: self.damage,
            attack_cooldown: self.attack_cooldown,
            ..default()
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Read and validate one definition file.
pub fn load_definition_file(path: &Path) -> Result<EnemyDefinition, EnemyDataError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| EnemyDataError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    EnemyDefinition::from_ron(&display, &contents)
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(ENEMIES_DIR);

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let enemy_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match load_definition_file(&path) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    registry.definitions.insert(enemy_type, definition);
                }
                Err(e) => error!("{}", e),
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

/// One enemy placement in the encounter.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemySpawn {
    pub enemy_type: String,
    pub position: (f32, f32),
    #[serde(default)]
    pub waypoints: Vec<(f32, f32)>,
}

impl EnemySpawn {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.position.0, self.position.1)
    }

    pub fn waypoints(&self) -> Vec<Vec2> {
        self.waypoints.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }
}

/// Encounter layout loaded from assets/data/encounter.ron.
#[derive(Resource, Deserialize, Clone, Debug)]
pub struct EncounterTable {
    pub floor_y: f32,
    pub floor_half_width: f32,
    pub player_start: (f32, f32),
    #[serde(default)]
    pub spawns: Vec<EnemySpawn>,
}

impl Default for EncounterTable {
    fn default() -> Self {
        Self {
            floor_y: -200.0,
            floor_half_width: 1200.0,
            player_start: (-300.0, -150.0),
            spawns: Vec::new(),
        }
    }
}

impl EncounterTable {
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, EnemyDataError> {
        ron::from_str(contents).map_err(|e| EnemyDataError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Load the encounter table, falling back to an empty arena.
    pub fn load() -> Self {
        let result = fs::read_to_string(ENCOUNTER_PATH)
            .map_err(|e| EnemyDataError::ReadError {
                path: ENCOUNTER_PATH.to_string(),
                details: e.to_string(),
            })
            .and_then(|contents| Self::from_ron(ENCOUNTER_PATH, &contents));

        match result {
            Ok(table) => {
                info!("Loaded encounter with {} spawns", table.spawns.len());
                table
            }
            Err(e) => {
                warn!("{}. Using an empty encounter.", e);
                Self::default()
            }
        }
    }
}

/// System to load the encounter table at startup.
pub fn load_encounter(mut commands: Commands) {
    commands.insert_resource(EncounterTable::load());
}
