//! Held-key input
//!
//! The host reports key-down/key-up by browser-style key code; the session
//! samples the resulting action set once per frame.

use std::collections::{HashMap, HashSet};

/// Everything a player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ShipOneUp,
    ShipOneDown,
    ShipOneFire,
    ShipTwoUp,
    ShipTwoDown,
    ShipTwoFire,
    PauseToggle,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::ShipOneUp,
        Action::ShipOneDown,
        Action::ShipOneFire,
        Action::ShipTwoUp,
        Action::ShipTwoDown,
        Action::ShipTwoFire,
        Action::PauseToggle,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Anything that can report which actions are currently held
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
}

/// Snapshot of held actions, used for edge detection between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn sample<I: InputSource + ?Sized>(source: &I) -> Self {
        let mut bits = 0;
        for action in Action::ALL {
            if source.is_held(action) {
                bits |= action.bit();
            }
        }
        Self(bits)
    }

    #[inline]
    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// Held now but not in `previous`
    #[inline]
    pub fn pressed_since(&self, previous: ActionSet, action: Action) -> bool {
        self.contains(action) && !previous.contains(action)
    }
}

/// Key code -> action table
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<String, Action>,
}

impl KeyBindings {
    /// Arrows + Space for the lone ship
    pub fn single_player() -> Self {
        Self::from_pairs(&[
            ("ArrowUp", Action::ShipOneUp),
            ("ArrowDown", Action::ShipOneDown),
            (" ", Action::ShipOneFire),
            ("Space", Action::ShipOneFire),
            ("p", Action::PauseToggle),
            ("Escape", Action::PauseToggle),
        ])
    }

    /// W/S/Space for player 1, arrows/Enter for player 2
    pub fn two_player() -> Self {
        Self::from_pairs(&[
            ("w", Action::ShipOneUp),
            ("s", Action::ShipOneDown),
            (" ", Action::ShipOneFire),
            ("Space", Action::ShipOneFire),
            ("ArrowUp", Action::ShipTwoUp),
            ("ArrowDown", Action::ShipTwoDown),
            ("Enter", Action::ShipTwoFire),
            ("p", Action::PauseToggle),
            ("Escape", Action::PauseToggle),
        ])
    }

    pub fn for_mode(two_player: bool) -> Self {
        if two_player {
            Self::two_player()
        } else {
            Self::single_player()
        }
    }

    fn from_pairs(pairs: &[(&str, Action)]) -> Self {
        Self {
            map: pairs.iter().map(|(k, a)| (k.to_string(), *a)).collect(),
        }
    }

    /// Rebind a key code
    pub fn bind(&mut self, code: impl Into<String>, action: Action) {
        self.map.insert(code.into(), action);
    }

    /// Letter keys match either case
    pub fn action_for(&self, code: &str) -> Option<Action> {
        self.map
            .get(code)
            .or_else(|| self.map.get(&code.to_lowercase()))
            .copied()
    }
}

/// Set of held actions fed by key events
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Action>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Returns the mapped action, if any
    pub fn key_down(&mut self, code: &str, bindings: &KeyBindings) -> Option<Action> {
        let action = bindings.action_for(code)?;
        self.press(action);
        Some(action)
    }

    pub fn key_up(&mut self, code: &str, bindings: &KeyBindings) -> Option<Action> {
        let action = bindings.action_for(code)?;
        self.release(action);
        Some(action)
    }

    /// Drop everything (e.g. on window blur)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl InputSource for HeldKeys {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

/// No keys held
impl InputSource for () {
    fn is_held(&self, _action: Action) -> bool {
        false
    }
}
