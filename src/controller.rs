use log::{debug, info};

use crate::config::{RotationConfig, RotationOptions};
use crate::constants::BASE_Z_ORDER;
use crate::error::{ConfigurationError, RotationError};
use crate::events::{EventBus, EventKind, Listener, ListenerId, RotationEvent, Snapshot};
use crate::pane::{Pane, Position};
use crate::queue::{Signal, SignalQueue, Ticket, TimerHandle};
use crate::shuffle::{PermutationSource, RandomSource, shuffle};
use crate::state::{InFlight, PlayState, RotationState};
use crate::timer::Scheduler;
use crate::transition::TransitionEngine;

/// Cycles a fixed sequence of panes on a timer.
///
/// The controller never calls back into the host. Timers and pane effects report
/// through the [`SignalQueue`]; the host hands each signal to [`RotationController::resume`].
pub struct RotationController<P: Pane, S: Scheduler> {
    config: RotationConfig,
    panes: Vec<P>,
    state: RotationState,
    bus: EventBus,
    engine: TransitionEngine,
    scheduler: S,
    queue: SignalQueue,
    next_ticket: u64,
}

impl<P: Pane, S: Scheduler> RotationController<P, S> {
    pub fn initialize(options: RotationOptions, panes: Vec<P>, scheduler: S, queue: SignalQueue) -> Result<Self, RotationError> {
        Self::initialize_with(options, panes, scheduler, queue, &mut RandomSource::thread())
    }

    /// Same as [`RotationController::initialize`] with an explicit shuffle source.
    ///
    /// Shuffling happens before `start` is looked up, so `start` names a slot in
    /// the shuffled order, not a particular pane.
    pub fn initialize_with(
        options: RotationOptions,
        mut panes: Vec<P>,
        scheduler: S,
        queue: SignalQueue,
        source: &mut dyn PermutationSource,
    ) -> Result<Self, RotationError> {
        let config = RotationConfig::resolve(&options)?;
        if panes.is_empty() {
            return Err(ConfigurationError::NoPanes.into());
        }
        if config.start >= panes.len() {
            return Err(ConfigurationError::StartOutOfRange {
                start: config.start,
                count: panes.len(),
            }
            .into());
        }

        let mut bus = EventBus::new();
        for (kind, callback) in options.listeners.0 {
            bus.add_listener(kind, callback);
        }

        for pane in panes.iter_mut() {
            pane.hide();
            pane.set_z_order(BASE_Z_ORDER);
            pane.set_position(Position::ORIGIN);
        }
        if config.shuffle {
            shuffle(&mut panes, source);
        }
        panes[config.start].show();

        let engine = TransitionEngine::new(config.transition, config.transition_speed, config.height);
        let mut controller = Self {
            state: RotationState::new(config.start),
            config,
            panes,
            bus,
            engine,
            scheduler,
            queue,
            next_ticket: 0,
        };

        controller.play()?;
        controller.notify(RotationEvent::Load)?;
        info!(
            "Rotating {} panes with {} every {:?}",
            controller.panes.len(),
            controller.engine.kind(),
            controller.config.delay
        );
        Ok(controller)
    }

    /// Starts auto-rotation. Does nothing while already playing.
    pub fn play(&mut self) -> Result<(), RotationError> {
        if self.state.is_playing() {
            return Ok(());
        }
        self.notify(RotationEvent::BeforePlay)?;
        self.arm_timer();
        self.state.play_state = PlayState::Playing;
        debug!("Playing from pane {}", self.state.current_index);
        Ok(())
    }

    /// Cancels the next scheduled rotation. A rotation already on screen still finishes.
    pub fn stop(&mut self) -> Result<(), RotationError> {
        if !self.state.is_playing() {
            return Ok(());
        }
        self.notify(RotationEvent::BeforeStop)?;
        self.cancel_timer();
        self.state.play_state = PlayState::Stopped;
        debug!("Stopped at pane {}", self.state.current_index);
        Ok(())
    }

    /// Moves `direction` panes away from the current one, wrapping at both ends.
    /// External requests (`internal == false`) stop auto-rotation first.
    pub fn advance(&mut self, direction: isize, internal: bool) -> Result<(), RotationError> {
        let count = self.panes.len() as isize;
        let next = (self.state.current_index as isize + direction).rem_euclid(count) as usize;
        self.rotate_to(next, internal)
    }

    pub fn show_next(&mut self) -> Result<(), RotationError> {
        self.advance(1, false)
    }

    pub fn show_prev(&mut self) -> Result<(), RotationError> {
        self.advance(-1, false)
    }

    /// Stops auto-rotation and rotates straight to `index`.
    pub fn go_to(&mut self, index: usize) -> Result<(), RotationError> {
        self.rotate_to(index, false)
    }

    /// Resumption point for the timer and effect signals posted to the queue.
    /// Signals that no longer match the controller's state are ignored.
    pub fn resume(&mut self, signal: Signal) -> Result<(), RotationError> {
        match signal {
            Signal::TimerFired(handle) => {
                if self.state.pending_timer != Some(handle) {
                    debug!("Ignoring stale timer {:?}", handle);
                    return Ok(());
                }
                self.state.pending_timer = None;
                let result = self.advance(1, true);
                // A refused rotation must not end auto-play.
                if self.state.is_playing() && !self.state.in_transition() && self.state.pending_timer.is_none() {
                    self.arm_timer();
                }
                result
            }
            Signal::EffectCompleted(ticket) => match self.state.in_flight {
                Some(in_flight) if in_flight.ticket == ticket => self.finish_rotation(in_flight),
                _ => {
                    debug!("Ignoring completion of unknown effect {:?}", ticket);
                    Ok(())
                }
            },
        }
    }

    pub fn add_listener(&mut self, kind: EventKind, callback: Listener) -> ListenerId {
        self.bus.add_listener(kind, callback)
    }

    pub fn remove_listener(&mut self, kind: EventKind, id: ListenerId) {
        self.bus.remove_listener(kind, id);
    }

    pub fn remove_callback(&mut self, kind: EventKind, callback: &Listener) {
        self.bus.remove_callback(kind, callback);
    }

    /// Cancels any pending timer and hands the panes and scheduler back.
    /// Signals still queued for this controller are meaningless afterwards.
    pub fn dispose(mut self) -> (Vec<P>, S) {
        self.cancel_timer();
        self.state.in_flight = None;
        info!("Rotation disposed at pane {}", self.state.current_index);
        (self.panes, self.scheduler)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_index: self.state.current_index,
            pane_count: self.panes.len(),
            play_state: self.state.play_state,
            in_transition: self.state.in_transition(),
        }
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn play_state(&self) -> PlayState {
        self.state.play_state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn in_transition(&self) -> bool {
        self.state.in_transition()
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.state.pending_timer
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn panes(&self) -> &[P] {
        &self.panes
    }

    pub fn panes_mut(&mut self) -> &mut [P] {
        &mut self.panes
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn rotate_to(&mut self, next: usize, internal: bool) -> Result<(), RotationError> {
        if !internal {
            self.stop()?;
        }

        if let Some(in_flight) = self.state.in_flight {
            debug!(
                "Dropping rotation to {}: {} -> {} still running",
                next, in_flight.prev, in_flight.next
            );
            return Ok(());
        }
        if next >= self.panes.len() {
            debug!("Ignoring rotation to missing pane {}", next);
            return Ok(());
        }
        if next == self.state.current_index || self.panes.len() < 2 {
            return Ok(());
        }

        self.begin_rotation(next)
    }

    fn begin_rotation(&mut self, next: usize) -> Result<(), RotationError> {
        let prev = self.state.current_index;
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.state.in_flight = Some(InFlight { ticket, prev, next });

        if let Err(e) = self.notify(RotationEvent::BeforeRotate { prev, next }) {
            self.state.in_flight = None;
            return Err(e);
        }

        let done = self.queue.completion(ticket);
        self.engine.run(&mut self.panes, prev, next, done);
        Ok(())
    }

    fn finish_rotation(&mut self, in_flight: InFlight) -> Result<(), RotationError> {
        self.state.in_flight = None;
        self.state.current_index = in_flight.next;
        let result = self.notify(RotationEvent::Rotate {
            prev: in_flight.prev,
            next: in_flight.next,
        });

        if self.state.is_playing() {
            self.arm_timer();
        }
        result
    }

    fn arm_timer(&mut self) {
        self.cancel_timer();
        self.state.pending_timer = Some(self.scheduler.schedule(self.config.delay));
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.state.pending_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn notify(&self, event: RotationEvent) -> Result<(), RotationError> {
        self.bus.trigger(event, &self.snapshot())
    }
}
