//! Collision detection and resolution
//!
//! Everything collides as an axis-aligned box. Overlap is half-open: boxes that
//! only share an edge do not touch.

use std::collections::HashSet;

use glam::Vec2;
use serde::Serialize;

use super::lives;
use super::state::{Asteroid, Heart, PlayerId, Ship};

/// Axis-aligned bounding box, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// `A.x < B.x+B.w && A.x+A.w > B.x && A.y < B.y+B.h && A.y+A.h > B.y`
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Anything with a collision box
pub trait Bounded {
    fn aabb(&self) -> Aabb;

    fn overlaps<B: Bounded + ?Sized>(&self, other: &B) -> bool {
        self.aabb().overlaps(&other.aabb())
    }
}

/// A bullet that killed an asteroid this tick
#[derive(Debug, Clone)]
pub struct Kill {
    pub player: PlayerId,
    pub bullet_id: u32,
    pub asteroid: Asteroid,
}

/// Test one ship against every asteroid.
///
/// The first overlapping asteroid costs the ship a life, starts its
/// invincibility window and is removed. At most one hit per ship per call;
/// dead or invincible ships are skipped entirely.
pub fn ship_asteroid_collision(
    ship: &mut Ship,
    asteroids: &mut Vec<Asteroid>,
    now_ms: f64,
    invincibility_ms: f64,
) -> Option<Asteroid> {
    if !lives::can_be_hit(ship, now_ms, invincibility_ms) {
        return None;
    }

    let index = asteroids.iter().position(|a| ship.overlaps(a))?;
    let asteroid = asteroids.remove(index);
    lives::apply_hit(ship, now_ms);
    Some(asteroid)
}

/// Match bullets against asteroids for every live ship, in ship order.
///
/// Each bullet kills at most one asteroid and each asteroid dies to at most
/// one bullet: the first bullet scanned wins. Removal of both sides is
/// deferred until every bullet has been tested.
pub fn bullet_asteroid_collisions(ships: &mut [Ship], asteroids: &mut Vec<Asteroid>) -> Vec<Kill> {
    let mut destroyed: HashSet<u32> = HashSet::new();
    let mut kills = Vec::new();

    for ship in ships.iter_mut() {
        if !ship.is_alive() {
            continue;
        }

        let mut spent: HashSet<u32> = HashSet::new();
        for bullet in &ship.bullets {
            let target = asteroids
                .iter()
                .find(|a| !destroyed.contains(&a.id) && bullet.overlaps(*a));
            if let Some(asteroid) = target {
                destroyed.insert(asteroid.id);
                spent.insert(bullet.id);
                kills.push(Kill {
                    player: ship.player,
                    bullet_id: bullet.id,
                    asteroid: asteroid.clone(),
                });
            }
        }

        if !spent.is_empty() {
            ship.bullets.retain(|b| !spent.contains(&b.id));
        }
    }

    if !destroyed.is_empty() {
        asteroids.retain(|a| !destroyed.contains(&a.id));
    }
    kills
}

/// Collect every heart the ship overlaps, one life each, no cap.
/// Invincibility does not matter here; dead ships collect nothing.
pub fn heart_collection(ship: &mut Ship, hearts: &mut Vec<Heart>) -> Vec<Heart> {
    if !ship.is_alive() {
        return Vec::new();
    }

    let mut collected = Vec::new();
    let mut kept = Vec::with_capacity(hearts.len());
    for heart in hearts.drain(..) {
        if ship.overlaps(&heart) {
            collected.push(heart);
        } else {
            kept.push(heart);
        }
    }
    *hearts = kept;

    for _ in &collected {
        lives::gain_life(ship);
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Bullet;

    fn ship_at(x: f32, y: f32) -> Ship {
        let mut ship = Ship::new(PlayerId::One, &Settings::default(), true);
        ship.pos = Vec2::new(x, y);
        ship
    }

    fn asteroid(id: u32, x: f32, y: f32, size: f32) -> Asteroid {
        Asteroid {
            id,
            pos: Vec2::new(x, y),
            size,
            speed: 2.0,
            rotation: 0.0,
        }
    }

    fn bullet(id: u32, x: f32, y: f32) -> Bullet {
        Bullet {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(10.0, 4.0),
            speed: 10.0,
            color: 0xFFFFFF,
        }
    }

    fn heart(id: u32, x: f32, y: f32) -> Heart {
        Heart {
            id,
            pos: Vec2::new(x, y),
            size: 30.0,
            speed: 2.0,
            rotation: 0.0,
            rotation_speed: 0.01,
        }
    }

    #[test]
    fn test_aabb_overlap_is_half_open() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let inside = Aabb::new(Vec2::new(9.9, 9.9), Vec2::new(10.0, 10.0));
        let below = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&touching));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
        assert_eq!(a.center(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_ship_hit_full_overlap() {
        let mut ship = ship_at(100.0, 300.0);
        let mut asteroids = vec![asteroid(1, 100.0, 300.0, 40.0)];

        let hit = ship_asteroid_collision(&mut ship, &mut asteroids, 1000.0, 2000.0);
        assert_eq!(hit.map(|a| a.id), Some(1));
        assert_eq!(ship.lives, 2);
        assert_eq!(ship.last_hit_ms, Some(1000.0));
        assert!(asteroids.is_empty());
    }

    #[test]
    fn test_ship_hit_at_most_once_per_tick() {
        let mut ship = ship_at(100.0, 300.0);
        let mut asteroids = vec![
            asteroid(1, 100.0, 300.0, 40.0),
            asteroid(2, 110.0, 305.0, 40.0),
        ];

        ship_asteroid_collision(&mut ship, &mut asteroids, 0.0, 2000.0);
        assert_eq!(ship.lives, 2);
        assert_eq!(asteroids.len(), 1);
        assert_eq!(asteroids[0].id, 2);

        // Same tick time again: now invincible
        assert!(ship_asteroid_collision(&mut ship, &mut asteroids, 0.0, 2000.0).is_none());
        assert_eq!(ship.lives, 2);
    }

    #[test]
    fn test_invincibility_window_boundary() {
        let mut ship = ship_at(100.0, 300.0);
        let mut asteroids = vec![asteroid(1, 100.0, 300.0, 40.0)];
        ship_asteroid_collision(&mut ship, &mut asteroids, 500.0, 2000.0);

        asteroids.push(asteroid(2, 100.0, 300.0, 40.0));
        assert!(ship_asteroid_collision(&mut ship, &mut asteroids, 2499.0, 2000.0).is_none());
        assert_eq!(ship.lives, 2);

        assert!(ship_asteroid_collision(&mut ship, &mut asteroids, 2500.0, 2000.0).is_some());
        assert_eq!(ship.lives, 1);
    }

    #[test]
    fn test_dead_ship_is_never_hit() {
        let mut ship = ship_at(100.0, 300.0);
        ship.lives = 0;
        let mut asteroids = vec![asteroid(1, 100.0, 300.0, 40.0)];
        assert!(ship_asteroid_collision(&mut ship, &mut asteroids, 0.0, 2000.0).is_none());
        assert_eq!(ship.lives, 0);
        assert_eq!(asteroids.len(), 1);
    }

    #[test]
    fn test_last_life_clamps_at_zero() {
        let mut ship = ship_at(100.0, 300.0);
        ship.lives = 1;
        let mut asteroids = vec![asteroid(1, 100.0, 300.0, 40.0)];
        ship_asteroid_collision(&mut ship, &mut asteroids, 0.0, 2000.0);
        assert_eq!(ship.lives, 0);
        assert!(!ship.is_alive());
    }

    #[test]
    fn test_two_bullets_one_asteroid_first_wins() {
        let mut ships = [ship_at(100.0, 300.0), ship_at(100.0, 400.0)];
        ships[1].player = PlayerId::Two;
        ships[0].bullets.push(bullet(10, 500.0, 310.0));
        ships[1].bullets.push(bullet(11, 505.0, 312.0));
        let mut asteroids = vec![asteroid(1, 495.0, 300.0, 40.0)];

        let kills = bullet_asteroid_collisions(&mut ships, &mut asteroids);
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].player, PlayerId::One);
        assert_eq!(kills[0].bullet_id, 10);
        assert!(asteroids.is_empty());
        assert!(ships[0].bullets.is_empty());
        // The losing bullet keeps flying
        assert_eq!(ships[1].bullets.len(), 1);
    }

    #[test]
    fn test_one_bullet_one_asteroid() {
        let mut ships = [ship_at(100.0, 300.0), ship_at(100.0, 400.0)];
        ships[0].bullets.push(bullet(10, 500.0, 310.0));
        let mut asteroids = vec![
            asteroid(1, 495.0, 300.0, 40.0),
            asteroid(2, 498.0, 302.0, 40.0),
        ];

        let kills = bullet_asteroid_collisions(&mut ships, &mut asteroids);
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].asteroid.id, 1);
        assert_eq!(asteroids.len(), 1);
        assert_eq!(asteroids[0].id, 2);
    }

    #[test]
    fn test_dead_ship_bullets_do_not_collide() {
        let mut ships = [ship_at(100.0, 300.0), ship_at(100.0, 400.0)];
        ships[0].lives = 0;
        ships[0].bullets.push(bullet(10, 500.0, 310.0));
        ships[1].active = false;
        let mut asteroids = vec![asteroid(1, 495.0, 300.0, 40.0)];

        let kills = bullet_asteroid_collisions(&mut ships, &mut asteroids);
        assert!(kills.is_empty());
        assert_eq!(asteroids.len(), 1);
    }

    #[test]
    fn test_hearts_have_no_cap() {
        let mut ship = ship_at(100.0, 300.0);
        let mut hearts: Vec<Heart> = (0..5).map(|i| heart(i, 105.0, 300.0)).collect();
        hearts.push(heart(99, 800.0, 100.0));

        let collected = heart_collection(&mut ship, &mut hearts);
        assert_eq!(collected.len(), 5);
        assert_eq!(ship.lives, 8);
        assert_eq!(hearts.len(), 1);
        assert_eq!(hearts[0].id, 99);
    }

    #[test]
    fn test_dead_ship_collects_no_hearts() {
        let mut ship = Ship::new(PlayerId::Two, &Settings::default(), true);
        ship.lives = 0;
        let pos = ship.pos;
        let mut hearts = vec![heart(1, pos.x + 5.0, pos.y)];

        let collected = heart_collection(&mut ship, &mut hearts);
        assert!(collected.is_empty());
        assert_eq!(ship.lives, 0);
        assert!(!ship.is_alive());
        assert_eq!(hearts.len(), 1);
    }

    #[test]
    fn test_invincible_ship_still_collects_hearts() {
        let mut ship = ship_at(100.0, 300.0);
        ship.last_hit_ms = Some(0.0);
        ship.lives = 2;
        let mut hearts = vec![heart(1, 100.0, 300.0)];
        heart_collection(&mut ship, &mut hearts);
        assert_eq!(ship.lives, 3);
        assert!(hearts.is_empty());
    }
}
