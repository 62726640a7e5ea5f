//! Astro Dodge - a side-scrolling asteroid dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, lives)
//! - `session`: Frame loop, pause/resume, reset and game-over lifecycle
//! - `platform`: Input source and presentation sinks
//! - `settings`: Data-driven game configuration

pub mod error;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SessionError};
pub use session::{Session, SessionBuilder};
pub use settings::{InvincibilityPolicy, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship defaults (units per frame for speeds)
    pub const SHIP_WIDTH: f32 = 50.0;
    pub const SHIP_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 10.0;

    /// Asteroid defaults
    pub const ASTEROID_BASE_SPEED: f32 = 3.0;
    pub const ASTEROID_MIN_SIZE: f32 = 20.0;
    pub const ASTEROID_MAX_SIZE: f32 = 50.0;
    /// Frames between asteroid spawns
    pub const ASTEROID_SPAWN_FRAMES: u64 = 100;
    pub const ASTEROID_POINTS: u64 = 10;

    /// Heart defaults
    pub const HEART_SIZE: f32 = 30.0;
    pub const HEART_SPEED: f32 = 2.0;
    pub const HEART_SPAWN_FRAMES: u64 = 500;
    pub const HEART_SPAWN_CHANCE: f64 = 0.3;
    /// Max heart spin (radians per frame, either direction)
    pub const HEART_MAX_SPIN: f32 = 0.05;

    /// Timers (milliseconds)
    pub const SCORE_INTERVAL_MS: f64 = 500.0;
    /// Points per score-timer tick
    pub const SCORE_TICK_POINTS: u64 = 1;
    pub const INVINCIBILITY_MS: f64 = 2000.0;
    pub const FLICKER_INTERVAL_MS: f64 = 150.0;
    pub const EXPLOSION_DURATION_MS: f64 = 500.0;

    pub const EXPLOSION_PARTICLES: usize = 20;
    pub const STAR_COUNT: usize = 100;

    /// Nominal frame interval for hosts without a display clock (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
