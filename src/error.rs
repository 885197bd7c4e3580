use thiserror::Error;

use crate::events::EventKind;

/// Contract violations detected while resolving options or building a controller.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("A rotation needs at least one pane")]
    NoPanes,
    #[error("Start index {start} is outside the {count} available panes")]
    StartOutOfRange { start: usize, count: usize },
    #[error("Invalid length `{0}`")]
    InvalidLength(String),
    #[error("Invalid color `{0}`")]
    InvalidColor(String),
    #[error("Invalid border `{0}`")]
    InvalidBorder(String),
    #[error("Unknown transition `{0}`")]
    UnknownTransition(String),
    #[error("Unknown placement `{0}`")]
    UnknownPlacement(String),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Error, Debug)]
pub enum RotationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// A listener returned an error; the rest of the dispatch was skipped.
    #[error("`{event}` listener failed: {reason:#}")]
    Listener { event: EventKind, reason: anyhow::Error },
}
