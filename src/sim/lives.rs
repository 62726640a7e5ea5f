//! Per-ship life and invincibility tracking
//!
//! A ship is derived to be in one of three states from its lives and the game
//! time of its last hit. Game time excludes paused intervals, so pausing never
//! eats into an invincibility window.

use serde::Serialize;

use super::state::Ship;

/// Life state of a single ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LifeState {
    /// Can be hit
    Vulnerable,
    /// Recently hit; immune until `until_ms` (game time)
    Invincible { until_ms: f64 },
    /// Out of lives (or not playing). Terminal until reset.
    Dead,
}

/// Current state of `ship` at game time `now_ms`
pub fn life_state(ship: &Ship, now_ms: f64, invincibility_ms: f64) -> LifeState {
    if !ship.is_alive() {
        return LifeState::Dead;
    }
    match ship.last_hit_ms {
        Some(hit) if now_ms - hit < invincibility_ms => LifeState::Invincible {
            until_ms: hit + invincibility_ms,
        },
        _ => LifeState::Vulnerable,
    }
}

#[inline]
pub fn is_invincible(ship: &Ship, now_ms: f64, invincibility_ms: f64) -> bool {
    matches!(
        life_state(ship, now_ms, invincibility_ms),
        LifeState::Invincible { .. }
    )
}

#[inline]
pub fn can_be_hit(ship: &Ship, now_ms: f64, invincibility_ms: f64) -> bool {
    life_state(ship, now_ms, invincibility_ms) == LifeState::Vulnerable
}

/// Vulnerable -> Invincible, or Dead on the last life. Returns true on death.
pub fn apply_hit(ship: &mut Ship, now_ms: f64) -> bool {
    ship.lives = ship.lives.saturating_sub(1);
    ship.last_hit_ms = Some(now_ms);
    if ship.lives == 0 {
        log::debug!("{:?} destroyed", ship.player);
        true
    } else {
        log::debug!("{:?} hit, {} lives left", ship.player, ship.lives);
        false
    }
}

/// Extra life from a heart (no upper cap)
pub fn gain_life(ship: &mut Ship) {
    ship.lives = ship.lives.saturating_add(1);
}

/// Whether the ship body is drawn this frame.
///
/// Invincible ships blink on a wall-clock cadence; dead ships are never drawn.
pub fn is_visible(
    ship: &Ship,
    game_ms: f64,
    wall_ms: f64,
    invincibility_ms: f64,
    flicker_interval_ms: f64,
) -> bool {
    match life_state(ship, game_ms, invincibility_ms) {
        LifeState::Dead => false,
        LifeState::Vulnerable => true,
        LifeState::Invincible { .. } => ((wall_ms / flicker_interval_ms).floor() as u64) % 2 == 0,
    }
}
