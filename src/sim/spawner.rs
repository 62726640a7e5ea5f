//! Frame-counted spawning of asteroids and hearts
//!
//! Randomness comes in through `rng` so runs are reproducible with a seeded
//! source.

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, Heart};
use crate::settings::Settings;

/// Spawn an asteroid at the right edge once more than
/// `asteroid_spawn_frames` frames have passed since the last one.
///
/// The caller assigns the id and records `frame_count` as the new spawn frame.
pub fn maybe_spawn_asteroid<R: Rng + ?Sized>(
    rng: &mut R,
    frame_count: u64,
    last_spawn_frame: u64,
    settings: &Settings,
) -> Option<Asteroid> {
    if frame_count.saturating_sub(last_spawn_frame) <= settings.asteroid_spawn_frames {
        return None;
    }

    let size = rng.random_range(settings.asteroid_min_size..=settings.asteroid_max_size);
    let max_y = (settings.field_height - size).max(0.0);
    let y = rng.random_range(0.0..=max_y);
    let speed = settings.asteroid_base_speed * rng.random_range(0.5f32..=1.0);
    let rotation = rng.random_range(0.0..std::f32::consts::TAU);

    Some(Asteroid {
        id: 0,
        pos: Vec2::new(settings.field_width, y),
        size,
        speed,
        rotation,
    })
}

/// Spawn a heart on every `heart_spawn_frames`-th frame, subject to a
/// `heart_spawn_chance` roll.
pub fn maybe_spawn_heart<R: Rng + ?Sized>(
    rng: &mut R,
    frame_count: u64,
    settings: &Settings,
) -> Option<Heart> {
    if frame_count % settings.heart_spawn_frames != 0 {
        return None;
    }
    if !rng.random_bool(settings.heart_spawn_chance) {
        return None;
    }

    let size = settings.heart_size;
    let max_y = (settings.field_height - size).max(0.0);
    let y = rng.random_range(0.0..=max_y);
    let spin = settings.heart_max_spin;
    let rotation_speed = if spin > 0.0 {
        rng.random_range(-spin..=spin)
    } else {
        0.0
    };

    Some(Heart {
        id: 0,
        pos: Vec2::new(settings.field_width, y),
        size,
        speed: settings.heart_speed,
        rotation: 0.0,
        rotation_speed,
    })
}
