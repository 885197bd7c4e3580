//! Timed rotation of a fixed set of panes inside a container.
//!
//! [`controller::RotationController`] owns the rotation state machine. It talks to the
//! outside world through the [`pane::Pane`] and [`timer::Scheduler`] traits and is resumed
//! by the host with the [`queue::Signal`]s those post. [`slide`] and [`render`] provide a
//! raylib-backed pane and drawing for the bundled binary.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod pane;
pub mod queue;
pub mod render;
pub mod shuffle;
pub mod slide;
pub mod stage;
pub mod state;
pub mod texture_loader;
pub mod timer;
pub mod transition;

#[cfg(test)]
mod testing;

pub use config::{RotationConfig, RotationOptions, TransitionKind};
pub use controller::RotationController;
pub use error::{ConfigurationError, RotationError};
pub use events::{EventKind, Listener, RotationEvent, Snapshot, listener};
pub use pane::{Pane, Position};
pub use queue::{Signal, SignalQueue};
pub use stage::Stage;
pub use timer::{FrameClock, Scheduler};
