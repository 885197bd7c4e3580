use log::debug;

use crate::config::{Placement, RotationConfig, RotationOptions};
use crate::constants::*;
use crate::controller::RotationController;
use crate::error::RotationError;
use crate::pane::Pane;
use crate::queue::SignalQueue;
use crate::shuffle::{PermutationSource, RandomSource};
use crate::timer::Scheduler;

/// The container's rectangle inside the host window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Smallest window that holds the container with a margin on every side.
pub fn window_size(config: &RotationConfig) -> (i32, i32) {
    let width = (config.width.ceil() as i32 + 2 * WINDOW_MARGIN).max(WINDOW_WIDTH);
    let height = (config.height.ceil() as i32 + 2 * WINDOW_MARGIN).max(WINDOW_HEIGHT);
    (width, height)
}

pub fn container_rect(config: &RotationConfig, window_width: i32, window_height: i32) -> ContainerRect {
    let margin = WINDOW_MARGIN as f32;
    let x = match config.placement {
        Placement::Inline | Placement::Left => margin,
        Placement::Right => (window_width as f32 - config.width - margin).max(0.0),
    };
    let y = margin.min((window_height as f32 - config.height).max(0.0));
    ContainerRect {
        x,
        y,
        width: config.width,
        height: config.height,
    }
}

/// The embedding point: holds at most one controller for its container.
pub struct Stage<P: Pane, S: Scheduler> {
    controller: Option<RotationController<P, S>>,
}

impl<P: Pane, S: Scheduler> Stage<P, S> {
    pub fn new() -> Self {
        Self { controller: None }
    }

    /// Builds a controller for this stage. Returns `Ok(false)` and keeps the
    /// existing controller if one is already attached.
    pub fn attach(&mut self, options: RotationOptions, panes: Vec<P>, scheduler: S, queue: SignalQueue) -> Result<bool, RotationError> {
        self.attach_with(options, panes, scheduler, queue, &mut RandomSource::thread())
    }

    pub fn attach_with(
        &mut self,
        options: RotationOptions,
        panes: Vec<P>,
        scheduler: S,
        queue: SignalQueue,
        source: &mut dyn PermutationSource,
    ) -> Result<bool, RotationError> {
        if self.controller.is_some() {
            debug!("Stage already has a rotation attached");
            return Ok(false);
        }
        let controller = RotationController::initialize_with(options, panes, scheduler, queue, source)?;
        self.controller = Some(controller);
        Ok(true)
    }

    pub fn is_attached(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&RotationController<P, S>> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut RotationController<P, S>> {
        self.controller.as_mut()
    }

    /// Disposes the attached controller, if any.
    pub fn detach(&mut self) -> Option<(Vec<P>, S)> {
        self.controller.take().map(RotationController::dispose)
    }

    /// Feeds every queued signal to the attached controller.
    pub fn drain(&mut self, queue: &SignalQueue) -> Result<(), RotationError> {
        while let Some(signal) = queue.pop() {
            if let Some(controller) = self.controller.as_mut() {
                controller.resume(signal)?;
            }
        }
        Ok(())
    }

    pub fn layout(&self, window_width: i32, window_height: i32) -> Option<ContainerRect> {
        self.controller
            .as_ref()
            .map(|c| container_rect(c.config(), window_width, window_height))
    }
}

impl<P: Pane, S: Scheduler> Default for Stage<P, S> {
    fn default() -> Self {
        Self::new()
    }
}
