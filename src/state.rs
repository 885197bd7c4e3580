use crate::queue::{Ticket, TimerHandle};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlayState {
    Idle,    // Constructed, auto-rotation never started
    Playing, // Delay timer armed (or re-armed after the running rotation)
    Stopped, // Explicitly stopped, no timer pending
}

/// A rotation whose visual effect has not reported completion yet.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct InFlight {
    pub ticket: Ticket,
    pub prev: usize,
    pub next: usize,
}

#[derive(Debug, Clone)]
pub struct RotationState {
    pub current_index: usize,
    pub play_state: PlayState,
    pub in_flight: Option<InFlight>,
    pub pending_timer: Option<TimerHandle>,
}

impl RotationState {
    pub fn new(start: usize) -> Self {
        Self {
            current_index: start,
            play_state: PlayState::Idle,
            in_flight: None,
            pending_timer: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.play_state == PlayState::Playing
    }

    pub fn in_transition(&self) -> bool {
        self.in_flight.is_some()
    }
}
