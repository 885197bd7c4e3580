use std::time::Duration;

use crate::config::TransitionKind;
use crate::constants::BASE_Z_ORDER;
use crate::pane::{Pane, Position};
use crate::queue::Completion;

/// One visual strategy for replacing the pane at `from` with the pane at `to`.
pub trait Effect {
    fn run<P: Pane>(&self, panes: &mut [P], from: usize, to: usize, duration: Duration, done: Completion);
}

/// Hides the outgoing pane while revealing the incoming one; done when the reveal ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossFade;

impl Effect for CrossFade {
    fn run<P: Pane>(&self, panes: &mut [P], from: usize, to: usize, duration: Duration, done: Completion) {
        panes[from].fade_out(duration);
        panes[to].fade_in(duration, done);
    }
}

/// Drops the incoming pane from above the container on top of everything else.
/// The outgoing pane stays where it is, covered.
#[derive(Debug, Clone, Copy)]
pub struct SlideOver {
    pub height: f32,
}

impl Effect for SlideOver {
    fn run<P: Pane>(&self, panes: &mut [P], _from: usize, to: usize, duration: Duration, done: Completion) {
        // Always strictly above every pane, so an older top pane can never resurface.
        let top = panes.iter().map(|p| p.z_order()).fold(BASE_Z_ORDER, i32::max);

        let pane = &mut panes[to];
        pane.set_z_order(top.saturating_add(1));
        pane.set_position(Position::new(0.0, -self.height));
        pane.show();
        pane.animate_to(Position::ORIGIN, duration, done);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TransitionEngine {
    kind: TransitionKind,
    duration: Duration,
    height: f32,
}

impl TransitionEngine {
    pub fn new(kind: TransitionKind, duration: Duration, height: f32) -> Self {
        Self { kind, duration, height }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn run<P: Pane>(&self, panes: &mut [P], from: usize, to: usize, done: Completion) {
        log::debug!("{} transition {} -> {} over {:?}", self.kind, from, to, self.duration);
        match self.kind {
            TransitionKind::CrossFade => CrossFade.run(panes, from, to, self.duration, done),
            TransitionKind::SlideOver => SlideOver { height: self.height }.run(panes, from, to, self.duration, done),
        }
    }
}
