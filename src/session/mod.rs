//! Session controller
//!
//! Owns the game state and drives it from the host's frame callback:
//! pause/resume with game-time correction, the fixed-rate score timer,
//! game-over detection and reset. Presentation goes out through the sinks.

pub mod clock;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub use clock::{GameClock, IntervalTimer};

use crate::consts::SCORE_TICK_POINTS;
use crate::error::SessionError;
use crate::platform::{
    Action, ActionSet, EventSink, HudSink, HudSnapshot, InputSource, LogEventSink, LogHudSink,
    LogRenderSink, RenderFrame, RenderSink,
};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, PlayerId, ShipInput, Steer, TickInput};

/// Whether the host should keep delivering frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Ticking every frame
    Running,
    /// Halted until resumed; frames only redraw
    Paused,
    /// Game over; nothing ticks until reset
    Stopped,
}

/// Assembles a session. Render and HUD sinks are required.
pub struct SessionBuilder {
    settings: Settings,
    two_player: bool,
    seed: Option<u64>,
    render: Option<Box<dyn RenderSink>>,
    hud: Option<Box<dyn HudSink>>,
    listeners: Vec<Box<dyn EventSink>>,
}

impl SessionBuilder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            two_player: false,
            seed: None,
            render: None,
            hud: None,
            listeners: Vec::new(),
        }
    }

    pub fn two_player(mut self, two_player: bool) -> Self {
        self.two_player = two_player;
        self
    }

    /// Fix the RNG seed (random otherwise)
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn render_sink(mut self, sink: impl RenderSink + 'static) -> Self {
        self.render = Some(Box::new(sink));
        self
    }

    pub fn hud_sink(mut self, sink: impl HudSink + 'static) -> Self {
        self.hud = Some(Box::new(sink));
        self
    }

    /// Subscribe to game events; any number allowed
    pub fn listener(mut self, sink: impl EventSink + 'static) -> Self {
        self.listeners.push(Box::new(sink));
        self
    }

    /// Logging render/HUD/event sinks for headless runs
    pub fn log_sinks(self) -> Self {
        self.render_sink(LogRenderSink::new(60))
            .hud_sink(LogHudSink::default())
            .listener(LogEventSink)
    }

    /// Validate and start the session at host time `start_ms`
    pub fn build(self, start_ms: f64) -> Result<Session, SessionError> {
        self.settings.validate()?;
        let render = self.render.ok_or(SessionError::MissingRenderSink)?;
        let hud = self.hud.ok_or(SessionError::MissingHudSink)?;
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());

        let state = GameState::new(&self.settings, self.two_player);
        let score_timer = IntervalTimer::new(self.settings.score_interval_ms, 0.0);

        log::info!(
            "Session started ({} player, seed {})",
            if self.two_player { 2 } else { 1 },
            seed
        );

        Ok(Session {
            state,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            clock: GameClock::new(start_ms),
            score_timer,
            prev_actions: ActionSet::default(),
            render,
            hud,
            listeners: self.listeners,
            settings: self.settings,
        })
    }
}

/// A running game
pub struct Session {
    settings: Settings,
    state: GameState,
    rng: Pcg32,
    seed: u64,
    clock: GameClock,
    score_timer: IntervalTimer,
    prev_actions: ActionSet,
    render: Box<dyn RenderSink>,
    hud: Box<dyn HudSink>,
    listeners: Vec<Box<dyn EventSink>>,
}

impl Session {
    pub fn builder(settings: Settings) -> SessionBuilder {
        SessionBuilder::new(settings)
    }

    /// Per-frame callback. `now_ms` is the host's monotonic timestamp.
    ///
    /// Returns whether further frames should be scheduled.
    pub fn frame<I: InputSource + ?Sized>(&mut self, now_ms: f64, input: &I) -> Schedule {
        if self.state.phase == GamePhase::GameOver {
            return Schedule::Stopped;
        }

        let actions = ActionSet::sample(input);
        if actions.pressed_since(self.prev_actions, Action::PauseToggle) {
            self.toggle_pause(now_ms);
        }
        let tick_input = self.tick_input(actions);
        self.prev_actions = actions;

        if self.state.phase == GamePhase::Paused {
            self.draw(now_ms);
            return Schedule::Paused;
        }

        let game_ms = self.clock.game_time(now_ms);
        sim::tick(
            &mut self.state,
            &tick_input,
            game_ms,
            &self.settings,
            &mut self.rng,
        );

        let fired = self.score_timer.poll(game_ms);
        self.state.score += fired as u64 * SCORE_TICK_POINTS;

        self.dispatch_events();
        self.hud.update(&HudSnapshot::from_state(&self.state));
        self.check_game_over();
        self.draw(now_ms);

        self.schedule()
    }

    pub fn toggle_pause(&mut self, now_ms: f64) {
        match self.state.phase {
            GamePhase::Playing => self.pause(now_ms),
            GamePhase::Paused => self.resume(now_ms),
            GamePhase::GameOver => {}
        }
    }

    /// Halt ticking and the score timer
    pub fn pause(&mut self, now_ms: f64) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        self.clock.pause(now_ms);
        self.state.phase = GamePhase::Paused;
        log::info!("Paused at {:.0}ms game time", self.clock.game_time(now_ms));
    }

    /// Resume ticking; the paused interval is excluded from game time
    pub fn resume(&mut self, now_ms: f64) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        self.clock.resume(now_ms);
        self.state.phase = GamePhase::Playing;
        log::info!(
            "Resumed ({:.0}ms paused in total)",
            self.clock.paused_total_ms()
        );
    }

    /// Start over: fresh ships and field, zero score, timers restarted.
    /// The RNG stream carries on.
    pub fn reset(&mut self, now_ms: f64) {
        self.state = GameState::new(&self.settings, self.state.two_player);
        self.clock = GameClock::new(now_ms);
        self.score_timer.restart(0.0);
        self.prev_actions = ActionSet::default();
        log::info!("Session reset");

        self.hud.update(&HudSnapshot::from_state(&self.state));
        self.draw(now_ms);
    }

    pub fn schedule(&self) -> Schedule {
        match self.state.phase {
            GamePhase::Playing => Schedule::Running,
            GamePhase::Paused => Schedule::Paused,
            GamePhase::GameOver => Schedule::Stopped,
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios and tooling
    #[inline]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn score_timer_running(&self) -> bool {
        self.score_timer.is_running()
    }

    /// Unpaused time since start/reset
    pub fn game_time(&self, now_ms: f64) -> f64 {
        self.clock.game_time(now_ms)
    }

    /// Fire and pause are edge-triggered; movement follows held keys
    fn tick_input(&self, actions: ActionSet) -> TickInput {
        let ship = |up: Action, down: Action, fire: Action| ShipInput {
            steer: Steer {
                up: actions.contains(up),
                down: actions.contains(down),
            },
            fire: actions.pressed_since(self.prev_actions, fire),
        };
        TickInput {
            ships: [
                ship(Action::ShipOneUp, Action::ShipOneDown, Action::ShipOneFire),
                ship(Action::ShipTwoUp, Action::ShipTwoDown, Action::ShipTwoFire),
            ],
        }
    }

    fn check_game_over(&mut self) {
        if self.state.phase != GamePhase::Playing || !self.state.all_ships_dead() {
            return;
        }
        self.state.phase = GamePhase::GameOver;
        self.score_timer.stop();
        log::info!(
            "Game over after {} frames, score {}",
            self.state.frame_count,
            self.state.score
        );

        let event = GameEvent::GameOver {
            score: self.state.score,
        };
        for listener in self.listeners.iter_mut() {
            listener.on_event(&event);
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            for listener in self.listeners.iter_mut() {
                listener.on_event(&event);
            }
        }
    }

    fn draw(&mut self, now_ms: f64) {
        let game_ms = self.clock.game_time(now_ms);
        let visible = |player: PlayerId| {
            sim::lives::is_visible(
                self.state.ship(player),
                game_ms,
                now_ms,
                self.settings.invincibility_ms,
                self.settings.flicker_interval_ms,
            )
        };
        let frame = RenderFrame {
            state: &self.state,
            wall_ms: now_ms,
            game_ms,
            ship_visible: [visible(PlayerId::One), visible(PlayerId::Two)],
        };
        self.render.draw(&frame);
    }
}
