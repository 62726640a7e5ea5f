//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-counted spawning
//! - Injected RNG only
//! - Stable iteration order (player 1 before player 2, entities in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lives;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounded, Kill};
pub use lives::LifeState;
pub use motion::Steer;
pub use state::{
    Asteroid, Bullet, Explosion, GameEvent, GamePhase, GameState, Heart, Particle, PlayerId, Ship,
};
pub use tick::{ShipInput, TickInput, spawn_explosion, tick};
