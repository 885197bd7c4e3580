use std::time::Duration;

use crate::queue::Completion;

/// Offset of a pane's top-left corner from the container's top-left corner, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A displayable content unit owned by the rotation.
///
/// Effects that take a [`Completion`] must call it exactly once when they end,
/// after the final frame of the effect has been applied.
pub trait Pane {
    fn show(&mut self);
    fn hide(&mut self);
    fn set_z_order(&mut self, z: i32);
    fn z_order(&self) -> i32;
    fn set_position(&mut self, position: Position);
    fn animate_to(&mut self, position: Position, duration: Duration, done: Completion);
    fn fade_in(&mut self, duration: Duration, done: Completion);
    fn fade_out(&mut self, duration: Duration);
}
