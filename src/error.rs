//! Startup error types
//!
//! The per-frame path is infallible; everything here surfaces while loading
//! settings or assembling a session.

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is outside its allowed range
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Session assembly errors
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("no render sink attached")]
    MissingRenderSink,

    #[error("no HUD sink attached")]
    MissingHudSink,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
