//! One simulation step
//!
//! Order inside a tick: ships (input) -> motion -> spawning -> collisions.
//! Collisions resolve ship hits, then bullet kills, then heart pickups, each
//! pass visiting player 1 before player 2.

use glam::Vec2;
use rand::Rng;

use super::collision::{bullet_asteroid_collisions, heart_collection, ship_asteroid_collision};
use super::lives;
use super::motion::{self, Steer};
use super::spawner::{maybe_spawn_asteroid, maybe_spawn_heart};
use super::state::{Bullet, Explosion, GameEvent, GamePhase, GameState, Particle, PlayerId};
use crate::settings::{InvincibilityPolicy, Settings};

/// Input for one ship during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipInput {
    pub steer: Steer,
    /// Fire one bullet this tick (already edge-detected)
    pub fire: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Indexed by `PlayerId::index`
    pub ships: [ShipInput; 2],
}

impl TickInput {
    #[inline]
    pub fn ship(&self, player: PlayerId) -> ShipInput {
        self.ships[player.index()]
    }
}

/// Advance the game by one frame. `now_ms` is unpaused game time.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    settings: &Settings,
    rng: &mut R,
) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame_count += 1;

    steer_and_fire(state, input, now_ms, settings);

    for ship in state.ships.iter_mut() {
        motion::move_bullets(&mut ship.bullets, settings.field_width);
    }
    motion::move_asteroids(&mut state.asteroids);
    motion::move_hearts(&mut state.hearts);
    motion::update_explosions(&mut state.explosions, now_ms, settings.explosion_duration_ms);

    spawn(state, settings, rng);

    resolve_collisions(state, now_ms, settings, rng);
}

fn steer_and_fire(state: &mut GameState, input: &TickInput, now_ms: f64, settings: &Settings) {
    for player in PlayerId::ALL {
        let ship_input = input.ship(player);
        let frozen = settings.invincibility_policy == InvincibilityPolicy::FreezeWhileInvincible
            && lives::is_invincible(state.ship(player), now_ms, settings.invincibility_ms);

        if !frozen {
            motion::move_ship(state.ship_mut(player), ship_input.steer, settings.field_height);
        }

        if ship_input.fire && state.ship(player).is_alive() {
            let id = state.next_entity_id();
            let ship = state.ship_mut(player);
            let bullet = Bullet {
                id,
                pos: ship.muzzle(settings.bullet_height),
                size: Vec2::new(settings.bullet_width, settings.bullet_height),
                speed: settings.bullet_speed,
                color: ship.color,
            };
            ship.bullets.push(bullet);
        }
    }
}

fn spawn<R: Rng + ?Sized>(state: &mut GameState, settings: &Settings, rng: &mut R) {
    if let Some(mut asteroid) =
        maybe_spawn_asteroid(rng, state.frame_count, state.last_spawn_frame, settings)
    {
        asteroid.id = state.next_entity_id();
        log::debug!(
            "Frame {}: asteroid {} size {:.1} at y={:.1}",
            state.frame_count,
            asteroid.id,
            asteroid.size,
            asteroid.pos.y
        );
        state.asteroids.push(asteroid);
        state.last_spawn_frame = state.frame_count;
    }

    if let Some(mut heart) = maybe_spawn_heart(rng, state.frame_count, settings) {
        heart.id = state.next_entity_id();
        log::debug!("Frame {}: heart at y={:.1}", state.frame_count, heart.pos.y);
        state.hearts.push(heart);
    }
}

fn resolve_collisions<R: Rng + ?Sized>(
    state: &mut GameState,
    now_ms: f64,
    settings: &Settings,
    rng: &mut R,
) {
    // Ship vs asteroid
    for player in PlayerId::ALL {
        let ship = &mut state.ships[player.index()];
        if ship_asteroid_collision(ship, &mut state.asteroids, now_ms, settings.invincibility_ms)
            .is_some()
        {
            let lives_left = ship.lives;
            state.events.push(GameEvent::ShipHit { player, lives_left });
            if lives_left == 0 {
                state.events.push(GameEvent::ShipDestroyed { player });
            }
        }
    }

    // Bullet vs asteroid
    let kills = bullet_asteroid_collisions(&mut state.ships, &mut state.asteroids);
    for kill in kills {
        let center = kill.asteroid.center();
        let size = kill.asteroid.size;
        state.score += settings.asteroid_points;
        log::debug!(
            "{:?} destroyed asteroid {} (+{})",
            kill.player,
            kill.asteroid.id,
            settings.asteroid_points
        );
        if settings.explosions {
            let explosion = spawn_explosion(rng, center, size, now_ms, settings.explosion_particles);
            state.explosions.push(explosion);
        }
        state.events.push(GameEvent::AsteroidDestroyed {
            player: kill.player,
            center,
            size,
            points: settings.asteroid_points,
        });
    }

    // Ship vs heart
    for player in PlayerId::ALL {
        let ship = &mut state.ships[player.index()];
        let collected = heart_collection(ship, &mut state.hearts);
        for heart in collected {
            log::debug!("{:?} collected a heart, {} lives", player, ship.lives);
            state.events.push(GameEvent::HeartCollected {
                player,
                lives: ship.lives,
                color: ship.color,
                at: heart.pos,
            });
        }
    }
}

/// Particle burst centered on `center`; spread scales with `size`
pub fn spawn_explosion<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec2,
    size: f32,
    now_ms: f64,
    particle_count: usize,
) -> Explosion {
    let spread = size / 20.0;
    let particles = (0..particle_count)
        .map(|_| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(0.5f32..=1.5) * spread;
            Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                size: rng.random_range(1.5..=3.5),
                alpha: 1.0,
            }
        })
        .collect();

    Explosion {
        center,
        size,
        started_ms: now_ms,
        particles,
    }
}
