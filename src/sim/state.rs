//! Game state and core simulation types
//!
//! The session owns everything here exclusively. Entities are plain records
//! with no back-references; cross-entity relations go through ids.

use glam::Vec2;
use serde::Serialize;

use super::collision::{Aabb, Bounded};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation halted, frames only redraw
    Paused,
    /// Run ended, nothing ticks until reset
    GameOver,
}

/// Which player a ship (and its bullets) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// A player ship. `x` is a fixed lane, only `y` moves.
#[derive(Debug, Clone, Serialize)]
pub struct Ship {
    pub player: PlayerId,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Units per frame
    pub speed: f32,
    pub lives: u32,
    /// False for player 2 in single-player mode
    pub active: bool,
    /// Game time (ms) of the last asteroid hit; starts the invincibility window
    pub last_hit_ms: Option<f64>,
    /// 0xRRGGBB
    pub color: u32,
    /// Bullets this ship fired, oldest first
    pub bullets: Vec<Bullet>,
}

impl Ship {
    pub fn new(player: PlayerId, settings: &Settings, active: bool) -> Self {
        let (pos, color) = match player {
            PlayerId::One => (settings.player_one_start, settings.player_one_color),
            PlayerId::Two => (settings.player_two_start, settings.player_two_color),
        };
        Self {
            player,
            pos,
            width: settings.ship_width,
            height: settings.ship_height,
            speed: settings.player_speed,
            lives: settings.starting_lives,
            active,
            last_hit_ms: None,
            color,
            bullets: Vec::new(),
        }
    }

    /// Active and has lives left
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.active && self.lives > 0
    }

    /// Point bullets leave from (nose of the ship)
    pub fn muzzle(&self, bullet_height: f32) -> Vec2 {
        Vec2::new(
            self.pos.x + self.width,
            self.pos.y + self.height / 2.0 - bullet_height / 2.0,
        )
    }
}

impl Bounded for Ship {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }
}

/// A projectile travelling right
#[derive(Debug, Clone, Serialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Owner's color
    pub color: u32,
}

impl Bounded for Bullet {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A square rock drifting left
#[derive(Debug, Clone, Serialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Cosmetic
    pub rotation: f32,
}

impl Asteroid {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

impl Bounded for Asteroid {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

/// An extra-life pickup
#[derive(Debug, Clone, Serialize)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub rotation: f32,
    /// Radians per frame
    pub rotation_speed: f32,
}

impl Bounded for Heart {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

/// A particle for explosion bursts
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per frame
    pub vel: Vec2,
    pub size: f32,
    /// 1.0 when spawned, 0.0 when the explosion ends
    pub alpha: f32,
}

/// A short-lived burst where an asteroid died
#[derive(Debug, Clone, Serialize)]
pub struct Explosion {
    pub center: Vec2,
    pub size: f32,
    /// Game time (ms) the burst started
    pub started_ms: f64,
    pub particles: Vec<Particle>,
}

/// Side effects emitted by the simulation for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A ship took damage (screen flash)
    ShipHit { player: PlayerId, lives_left: u32 },
    /// A ship ran out of lives
    ShipDestroyed { player: PlayerId },
    /// A bullet killed an asteroid
    AsteroidDestroyed {
        player: PlayerId,
        center: Vec2,
        size: f32,
        points: u64,
    },
    /// A ship picked up a heart ("+1" popup in the ship's color)
    HeartCollected {
        player: PlayerId,
        lives: u32,
        color: u32,
        at: Vec2,
    },
    /// The run ended
    GameOver { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub two_player: bool,
    pub score: u64,
    pub phase: GamePhase,
    /// Unpaused ticks since start/reset
    pub frame_count: u64,
    /// Frame of the most recent asteroid spawn
    pub last_spawn_frame: u64,
    /// Indexed by `PlayerId::index`
    pub ships: [Ship; 2],
    pub asteroids: Vec<Asteroid>,
    pub hearts: Vec<Heart>,
    pub explosions: Vec<Explosion>,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh run: ships at their starts, empty field, zero score
    pub fn new(settings: &Settings, two_player: bool) -> Self {
        Self {
            two_player,
            score: 0,
            phase: GamePhase::Playing,
            frame_count: 0,
            last_spawn_frame: 0,
            ships: [
                Ship::new(PlayerId::One, settings, true),
                Ship::new(PlayerId::Two, settings, two_player),
            ],
            asteroids: Vec::new(),
            hearts: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn ship(&self, player: PlayerId) -> &Ship {
        &self.ships[player.index()]
    }

    #[inline]
    pub fn ship_mut(&mut self, player: PlayerId) -> &mut Ship {
        &mut self.ships[player.index()]
    }

    /// Ships taking part in this run (player 2 only in two-player mode)
    pub fn active_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|s| s.active)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Terminal condition: every active ship is out of lives
    pub fn all_ships_dead(&self) -> bool {
        if self.two_player {
            self.ships.iter().all(|s| s.lives == 0)
        } else {
            self.ship(PlayerId::One).lives == 0
        }
    }
}
