//! Test doubles: a pane that records what it is told, and a harness that plays the host's role.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use strum::IntoEnumIterator;

use crate::config::RotationOptions;
use crate::constants::BASE_Z_ORDER;
use crate::controller::RotationController;
use crate::events::{EventKind, RotationEvent, listener};
use crate::pane::{Pane, Position};
use crate::queue::{Completion, SignalQueue};
use crate::shuffle::PermutationSource;
use crate::timer::FrameClock;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Show,
    Hide,
    SetZOrder(i32),
    SetPosition(Position),
    AnimateTo(Position, Duration),
    FadeIn(Duration),
    FadeOut(Duration),
}

#[derive(Debug)]
pub struct RecordingPane {
    pub id: usize,
    pub ops: Vec<Op>,
    pub z: i32,
    pub visible: bool,
    pub position: Position,
    pending: Option<(Completion, Option<Position>)>,
}

impl RecordingPane {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            ops: Vec::new(),
            z: BASE_Z_ORDER,
            visible: false,
            position: Position::ORIGIN,
            pending: None,
        }
    }

    pub fn has_pending_effect(&self) -> bool {
        self.pending.is_some()
    }

    /// Ends the running effect, if any, and reports completion.
    pub fn finish_effect(&mut self) {
        if let Some((done, target)) = self.pending.take() {
            if let Some(target) = target {
                self.position = target;
            }
            done.complete();
        }
    }
}

impl Pane for RecordingPane {
    fn show(&mut self) {
        self.visible = true;
        self.ops.push(Op::Show);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.ops.push(Op::Hide);
    }

    fn set_z_order(&mut self, z: i32) {
        self.z = z;
        self.ops.push(Op::SetZOrder(z));
    }

    fn z_order(&self) -> i32 {
        self.z
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
        self.ops.push(Op::SetPosition(position));
    }

    fn animate_to(&mut self, position: Position, duration: Duration, done: Completion) {
        self.ops.push(Op::AnimateTo(position, duration));
        self.pending = Some((done, Some(position)));
    }

    fn fade_in(&mut self, duration: Duration, done: Completion) {
        self.visible = true;
        self.ops.push(Op::FadeIn(duration));
        self.pending = Some((done, None));
    }

    fn fade_out(&mut self, duration: Duration) {
        self.visible = false;
        self.ops.push(Op::FadeOut(duration));
    }
}

pub type EventLog = Rc<RefCell<Vec<RotationEvent>>>;

/// Options recording every event kind into `log`.
pub fn recording_options(log: &EventLog) -> RotationOptions {
    let mut options = RotationOptions::default();
    for kind in EventKind::iter() {
        let log = Rc::clone(log);
        options.listeners.0.push((
            kind,
            listener(move |event, _| {
                log.borrow_mut().push(*event);
                Ok(())
            }),
        ));
    }
    options
}

/// Keeps every slot in place.
pub struct Identity;

impl PermutationSource for Identity {
    fn pick(&mut self, bound: usize) -> usize {
        bound - 1
    }
}

/// Drives a controller the way the host loop does.
pub struct Harness {
    pub controller: RotationController<RecordingPane, FrameClock>,
    pub queue: SignalQueue,
    pub events: EventLog,
}

impl Harness {
    pub fn new(pane_count: usize, options: RotationOptions) -> Self {
        Self::try_new(pane_count, options).expect("controller should initialize")
    }

    pub fn try_new(pane_count: usize, options: RotationOptions) -> Result<Self, crate::error::RotationError> {
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        let options = recording_options(&events).merge(options);
        let queue = SignalQueue::new();
        let panes: Vec<RecordingPane> = (0..pane_count).map(RecordingPane::new).collect();
        let controller = RotationController::initialize_with(
            options,
            panes,
            FrameClock::new(queue.clone()),
            queue.clone(),
            &mut Identity,
        )?;
        Ok(Self {
            controller,
            queue,
            events,
        })
    }

    /// Feeds every queued signal to the controller.
    pub fn settle(&mut self) {
        while let Some(signal) = self.queue.pop() {
            self.controller.resume(signal).expect("resume should succeed");
        }
    }

    pub fn elapse(&mut self, ms: u64) {
        self.controller.scheduler_mut().tick(Duration::from_millis(ms));
        self.settle();
    }

    /// Completes every running pane effect and lets the controller react.
    pub fn finish_effects(&mut self) {
        for pane in self.controller.panes_mut() {
            pane.finish_effect();
        }
        self.settle();
    }

    pub fn take_events(&mut self) -> Vec<RotationEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn pending_timers(&self) -> usize {
        self.controller.scheduler().pending()
    }

    pub fn running_effects(&self) -> usize {
        self.controller.panes().iter().filter(|p| p.has_pending_effect()).count()
    }
}
