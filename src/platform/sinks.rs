//! Presentation seams
//!
//! The session pushes state out through these; nothing flows back.

use serde::Serialize;

use crate::sim::{GameEvent, GamePhase, GameState, PlayerId};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub state: &'a GameState,
    /// Host timestamp (drives flicker and other wall-clock effects)
    pub wall_ms: f64,
    /// Unpaused game time
    pub game_ms: f64,
    /// Per ship, after the invincibility flicker. Indexed by `PlayerId::index`.
    pub ship_visible: [bool; 2],
}

impl RenderFrame<'_> {
    #[inline]
    pub fn paused(&self) -> bool {
        self.state.phase == GamePhase::Paused
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn is_visible(&self, player: PlayerId) -> bool {
        self.ship_visible[player.index()]
    }
}

/// Score and lives for the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    /// Indexed by `PlayerId::index`
    pub lives: [u32; 2],
    pub two_player: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: [state.ships[0].lives, state.ships[1].lives],
            two_player: state.two_player,
        }
    }
}

pub trait RenderSink {
    fn draw(&mut self, frame: &RenderFrame<'_>);
}

pub trait HudSink {
    fn update(&mut self, hud: &HudSnapshot);
}

/// Subscriber for simulation side effects (flashes, sounds, popups)
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&RenderFrame<'_>)> RenderSink for F {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self(frame)
    }
}

impl<F: FnMut(&HudSnapshot)> HudSink for F {
    fn update(&mut self, hud: &HudSnapshot) {
        self(hud)
    }
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw(&mut self, _frame: &RenderFrame<'_>) {}
}

impl HudSink for NullSink {
    fn update(&mut self, _hud: &HudSnapshot) {}
}

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Renderer for headless runs: logs a one-line summary every `every` frames
#[derive(Debug, Clone)]
pub struct LogRenderSink {
    every: u64,
    frames: u64,
}

impl LogRenderSink {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl RenderSink for LogRenderSink {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }
        let state = frame.state;
        log::trace!(
            "frame {} t={:.0}ms: {} asteroids, {} hearts, {} explosions, bullets {}/{}",
            state.frame_count,
            frame.game_ms,
            state.asteroids.len(),
            state.hearts.len(),
            state.explosions.len(),
            state.ships[0].bullets.len(),
            state.ships[1].bullets.len(),
        );
    }
}

/// HUD that logs only when something changed
#[derive(Debug, Clone, Default)]
pub struct LogHudSink {
    last: Option<HudSnapshot>,
}

impl HudSink for LogHudSink {
    fn update(&mut self, hud: &HudSnapshot) {
        if self.last.as_ref() == Some(hud) {
            return;
        }
        if hud.two_player {
            log::debug!(
                "Score {} | P1 lives {} | P2 lives {}",
                hud.score,
                hud.lives[0],
                hud.lives[1]
            );
        } else {
            log::debug!("Score {} | Lives {}", hud.score, hud.lives[0]);
        }
        self.last = Some(*hud);
    }
}

/// Logs every event
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShipHit { player, lives_left } => {
                log::info!("{:?} hit! {} lives left", player, lives_left)
            }
            GameEvent::ShipDestroyed { player } => log::info!("{:?} is out", player),
            GameEvent::AsteroidDestroyed { player, points, .. } => {
                log::debug!("{:?} +{}", player, points)
            }
            GameEvent::HeartCollected { player, lives, .. } => {
                log::info!("{:?} +1 life ({})", player, lives)
            }
            GameEvent::GameOver { score } => log::info!("Game over, final score {}", score),
        }
    }
}
