//! Platform abstraction layer
//!
//! The seams between the simulation and its host:
//! - Input (held keys / actions)
//! - Presentation sinks (renderer, HUD, event subscribers)
//! - Autopilot input for headless/demo runs

pub mod autopilot;
pub mod input;
pub mod sinks;

pub use autopilot::Autopilot;
pub use input::{Action, ActionSet, HeldKeys, InputSource, KeyBindings};
pub use sinks::{
    EventSink, HudSink, HudSnapshot, LogEventSink, LogHudSink, LogRenderSink, NullSink,
    RenderFrame, RenderSink,
};
