//! Game settings and tunables
//!
//! Loaded from JSON; any field left out falls back to its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How an invincible ship behaves after being hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvincibilityPolicy {
    /// Ship keeps moving; invincibility only blocks damage and flickers the body
    #[default]
    MoveWhileInvincible,
    /// Ship is frozen in place until the window ends
    FreezeWhileInvincible,
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ships ===
    pub ship_width: f32,
    pub ship_height: f32,
    /// Vertical speed (units per frame)
    pub player_speed: f32,
    pub starting_lives: u32,
    /// Top-left start corner of player 1
    pub player_one_start: Vec2,
    /// Top-left start corner of player 2
    pub player_two_start: Vec2,
    /// 0xRRGGBB, also used for bullets and "+1" popups
    pub player_one_color: u32,
    pub player_two_color: u32,
    pub invincibility_policy: InvincibilityPolicy,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,

    // === Asteroids ===
    pub asteroid_base_speed: f32,
    pub asteroid_min_size: f32,
    pub asteroid_max_size: f32,
    pub asteroid_spawn_frames: u64,
    pub asteroid_points: u64,

    // === Hearts ===
    pub heart_size: f32,
    pub heart_speed: f32,
    pub heart_spawn_frames: u64,
    /// Chance a heart appears when the heart frame comes around (0.0 - 1.0)
    pub heart_spawn_chance: f64,
    pub heart_max_spin: f32,

    // === Timers (ms) ===
    pub score_interval_ms: f64,
    pub invincibility_ms: f64,
    pub flicker_interval_ms: f64,

    // === Effects ===
    /// Particle bursts on asteroid kills
    pub explosions: bool,
    pub explosion_duration_ms: f64,
    pub explosion_particles: usize,
    /// Background stars (cosmetic, renderer only)
    pub star_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,
            player_one_start: Vec2::new(100.0, 200.0),
            player_two_start: Vec2::new(100.0, 400.0),
            player_one_color: 0x00FF_FF,
            player_two_color: 0xFF00_FF,
            invincibility_policy: InvincibilityPolicy::MoveWhileInvincible,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,

            asteroid_base_speed: ASTEROID_BASE_SPEED,
            asteroid_min_size: ASTEROID_MIN_SIZE,
            asteroid_max_size: ASTEROID_MAX_SIZE,
            asteroid_spawn_frames: ASTEROID_SPAWN_FRAMES,
            asteroid_points: ASTEROID_POINTS,

            heart_size: HEART_SIZE,
            heart_speed: HEART_SPEED,
            heart_spawn_frames: HEART_SPAWN_FRAMES,
            heart_spawn_chance: HEART_SPAWN_CHANCE,
            heart_max_spin: HEART_MAX_SPIN,

            score_interval_ms: SCORE_INTERVAL_MS,
            invincibility_ms: INVINCIBILITY_MS,
            flicker_interval_ms: FLICKER_INTERVAL_MS,

            explosions: true,
            explosion_duration_ms: EXPLOSION_DURATION_MS,
            explosion_particles: EXPLOSION_PARTICLES,
            star_count: STAR_COUNT,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width as f64)?;
        positive("field_height", self.field_height as f64)?;
        positive("ship_width", self.ship_width as f64)?;
        positive("ship_height", self.ship_height as f64)?;
        positive("player_speed", self.player_speed as f64)?;
        positive("bullet_width", self.bullet_width as f64)?;
        positive("bullet_height", self.bullet_height as f64)?;
        positive("bullet_speed", self.bullet_speed as f64)?;
        positive("asteroid_base_speed", self.asteroid_base_speed as f64)?;
        positive("asteroid_min_size", self.asteroid_min_size as f64)?;
        positive("heart_size", self.heart_size as f64)?;
        positive("heart_speed", self.heart_speed as f64)?;
        positive("score_interval_ms", self.score_interval_ms)?;
        positive("invincibility_ms", self.invincibility_ms)?;
        positive("flicker_interval_ms", self.flicker_interval_ms)?;
        positive("explosion_duration_ms", self.explosion_duration_ms)?;

        if self.asteroid_max_size < self.asteroid_min_size {
            return Err(ConfigError::invalid(
                "asteroid_max_size",
                format!(
                    "{} is smaller than asteroid_min_size {}",
                    self.asteroid_max_size, self.asteroid_min_size
                ),
            ));
        }
        if self.asteroid_max_size > self.field_height {
            return Err(ConfigError::invalid(
                "asteroid_max_size",
                "asteroids must fit inside the field height",
            ));
        }
        if self.heart_size > self.field_height {
            return Err(ConfigError::invalid(
                "heart_size",
                "hearts must fit inside the field height",
            ));
        }
        if self.asteroid_spawn_frames == 0 {
            return Err(ConfigError::invalid("asteroid_spawn_frames", "must be at least 1"));
        }
        if self.heart_spawn_frames == 0 {
            return Err(ConfigError::invalid("heart_spawn_frames", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.heart_spawn_chance) {
            return Err(ConfigError::invalid(
                "heart_spawn_chance",
                format!("{} is not a probability", self.heart_spawn_chance),
            ));
        }
        if self.heart_max_spin < 0.0 {
            return Err(ConfigError::invalid("heart_max_spin", "must not be negative"));
        }

        self.check_start("player_one_start", self.player_one_start)?;
        self.check_start("player_two_start", self.player_two_start)?;
        Ok(())
    }

    fn check_start(&self, field: &'static str, start: Vec2) -> Result<(), ConfigError> {
        let max_x = self.field_width - self.ship_width;
        let max_y = self.field_height - self.ship_height;
        if start.x < 0.0 || start.x > max_x || start.y < 0.0 || start.y > max_y {
            return Err(ConfigError::invalid(
                field,
                format!("({}, {}) puts the ship outside the field", start.x, start.y),
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}
