//! Per-frame motion for every entity kind
//!
//! Speeds are in units per frame. Anything that leaves the field is dropped.

use super::state::{Asteroid, Bullet, Explosion, Heart, Ship};

/// Vertical stick for one ship
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steer {
    pub up: bool,
    pub down: bool,
}

/// Move a ship along its lane, hard-clamped to the field (no bounce).
/// Dead ships never move.
pub fn move_ship(ship: &mut Ship, steer: Steer, field_height: f32) {
    if !ship.is_alive() {
        return;
    }

    let max_y = field_height - ship.height;
    if steer.up && ship.pos.y > 0.0 {
        ship.pos.y = (ship.pos.y - ship.speed).max(0.0);
    }
    if steer.down && ship.pos.y < max_y {
        ship.pos.y = (ship.pos.y + ship.speed).min(max_y);
    }

    debug_assert!(
        ship.pos.y >= 0.0 && ship.pos.y <= max_y,
        "ship {:?} left the field at y={}",
        ship.player,
        ship.pos.y
    );
}

/// Bullets fly right and die past the right edge
pub fn move_bullets(bullets: &mut Vec<Bullet>, field_width: f32) {
    for bullet in bullets.iter_mut() {
        bullet.pos.x += bullet.speed;
    }
    bullets.retain(|b| b.pos.x <= field_width);
}

/// Asteroids drift left and die once fully past the left edge
pub fn move_asteroids(asteroids: &mut Vec<Asteroid>) {
    for asteroid in asteroids.iter_mut() {
        asteroid.pos.x -= asteroid.speed;
    }
    asteroids.retain(|a| a.pos.x + a.size >= 0.0);
}

/// Hearts drift left while spinning
pub fn move_hearts(hearts: &mut Vec<Heart>) {
    for heart in hearts.iter_mut() {
        heart.pos.x -= heart.speed;
        heart.rotation += heart.rotation_speed;
    }
    hearts.retain(|h| h.pos.x + h.size >= 0.0);
}

/// Advance explosion particles and fade them; finished bursts are removed
pub fn update_explosions(explosions: &mut Vec<Explosion>, now_ms: f64, duration_ms: f64) {
    explosions.retain(|e| now_ms - e.started_ms < duration_ms);
    for explosion in explosions.iter_mut() {
        let progress = ((now_ms - explosion.started_ms) / duration_ms).clamp(0.0, 1.0) as f32;
        for particle in explosion.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.alpha = 1.0 - progress;
        }
    }
}
