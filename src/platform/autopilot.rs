//! Idle/demo mode: a simple AI that holds keys for every active ship
//!
//! Dodges the most dangerous asteroid in its lane, otherwise drifts toward the
//! nearest heart, and taps fire whenever something is lined up ahead.

use crate::settings::Settings;
use crate::sim::{Bounded, GameState, PlayerId, Ship};

use super::input::{Action, HeldKeys, InputSource};

/// How far ahead (units) an asteroid counts as a threat
const LOOKAHEAD: f32 = 260.0;
/// Extra vertical clearance kept around the ship
const MARGIN: f32 = 12.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    keys: HeldKeys,
    frames: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide which keys to hold for the next frame
    pub fn plan(&mut self, state: &GameState, settings: &Settings) {
        self.frames += 1;
        self.keys.clear();

        for ship in state.ships.iter().filter(|s| s.is_alive()) {
            let (up, down, fire) = match ship.player {
                PlayerId::One => (Action::ShipOneUp, Action::ShipOneDown, Action::ShipOneFire),
                PlayerId::Two => (Action::ShipTwoUp, Action::ShipTwoDown, Action::ShipTwoFire),
            };

            match steer_for(ship, state, settings) {
                Some(true) => self.keys.press(up),
                Some(false) => self.keys.press(down),
                None => {}
            }

            // Release every other frame so fire stays edge-triggered
            if self.frames % 2 == 0 && target_ahead(ship, state) {
                self.keys.press(fire);
            }
        }
    }
}

impl InputSource for Autopilot {
    fn is_held(&self, action: Action) -> bool {
        self.keys.is_held(action)
    }
}

/// `Some(true)` = go up, `Some(false)` = go down
fn steer_for(ship: &Ship, state: &GameState, settings: &Settings) -> Option<bool> {
    let ship_box = ship.aabb();
    let top = ship_box.min.y - MARGIN;
    let bottom = ship_box.max().y + MARGIN;
    let center_y = ship_box.center().y;

    let threat = state
        .asteroids
        .iter()
        .filter(|a| a.pos.x + a.size >= ship_box.min.x && a.pos.x - ship_box.max().x < LOOKAHEAD)
        .filter(|a| a.pos.y < bottom && a.pos.y + a.size > top)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(asteroid) = threat {
        let room_above = ship.pos.y;
        let room_below = settings.field_height - (ship.pos.y + ship.height);
        let asteroid_below = asteroid.center().y > center_y;
        let go_up = if asteroid_below {
            room_above > MARGIN || room_below < MARGIN
        } else {
            !(room_below > MARGIN || room_above < MARGIN)
        };
        return Some(go_up);
    }

    let heart = state.hearts.iter().min_by(|a, b| {
        a.pos
            .x
            .partial_cmp(&b.pos.x)
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;
    let heart_y = heart.pos.y + heart.size / 2.0;
    if (heart_y - center_y).abs() <= ship.speed {
        None
    } else {
        Some(heart_y < center_y)
    }
}

fn target_ahead(ship: &Ship, state: &GameState) -> bool {
    let muzzle_y = ship.pos.y + ship.height / 2.0;
    state
        .asteroids
        .iter()
        .any(|a| a.pos.x > ship.pos.x && a.pos.y <= muzzle_y && a.pos.y + a.size >= muzzle_y)
}
