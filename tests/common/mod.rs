#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use astro_dodge::platform::{EventSink, HudSink, HudSnapshot, RenderFrame, RenderSink};
use astro_dodge::sim::{Asteroid, GameEvent, PlayerId};
use astro_dodge::{Session, Settings};
use glam::Vec2;

/// Shared log of everything the session pushed out
#[derive(Clone, Default)]
pub struct Recorder {
    pub events: Rc<RefCell<Vec<GameEvent>>>,
    /// (ship visibility, paused) per drawn frame
    pub frames: Rc<RefCell<Vec<([bool; 2], bool)>>>,
    pub huds: Rc<RefCell<Vec<HudSnapshot>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn game_overs(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    pub fn hits(&self, player: PlayerId) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShipHit { player: p, .. } if *p == player))
            .count()
    }
}

impl EventSink for Recorder {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

impl RenderSink for Recorder {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self.frames
            .borrow_mut()
            .push((frame.ship_visible, frame.paused()));
    }
}

impl HudSink for Recorder {
    fn update(&mut self, hud: &HudSnapshot) {
        self.huds.borrow_mut().push(*hud);
    }
}

pub fn session(two_player: bool) -> (Session, Recorder) {
    session_with(Settings::default(), two_player)
}

pub fn session_with(settings: Settings, two_player: bool) -> (Session, Recorder) {
    let recorder = Recorder::default();
    let session = Session::builder(settings)
        .two_player(two_player)
        .seed(2024)
        .render_sink(recorder.clone())
        .hud_sink(recorder.clone())
        .listener(recorder.clone())
        .build(0.0)
        .expect("session should build");
    (session, recorder)
}

/// Park a motionless asteroid on top of a ship
pub fn drop_asteroid_on(session: &mut Session, player: PlayerId) -> u32 {
    let state = session.state_mut();
    let pos = state.ship(player).pos;
    let id = state.next_entity_id();
    state.asteroids.push(Asteroid {
        id,
        pos,
        size: 40.0,
        speed: 0.0,
        rotation: 0.0,
    });
    id
}

pub fn place_ship(session: &mut Session, player: PlayerId, x: f32, y: f32) {
    session.state_mut().ship_mut(player).pos = Vec2::new(x, y);
}
