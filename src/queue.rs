//! The single cooperative queue that timers and pane effects report back through.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub(crate) u64);

impl TimerHandle {
    /// For [`Scheduler`](crate::timer::Scheduler) implementations outside this crate.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    TimerFired(TimerHandle),
    EffectCompleted(Ticket),
}

#[derive(Debug, Clone, Default)]
pub struct SignalQueue {
    signals: Rc<RefCell<VecDeque<Signal>>>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, signal: Signal) {
        self.signals.borrow_mut().push_back(signal);
    }

    pub fn pop(&self) -> Option<Signal> {
        self.signals.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.signals.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.borrow().is_empty()
    }

    pub(crate) fn completion(&self, ticket: Ticket) -> Completion {
        Completion {
            ticket,
            queue: self.clone(),
        }
    }
}

/// Handed to a pane together with an effect. The pane calls [`Completion::complete`]
/// once the effect has finished on screen.
#[derive(Debug)]
pub struct Completion {
    ticket: Ticket,
    queue: SignalQueue,
}

impl Completion {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn complete(self) {
        self.queue.push(Signal::EffectCompleted(self.ticket));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_posts_to_shared_queue() {
        let queue = SignalQueue::new();
        let done = queue.completion(Ticket(7));
        queue.push(Signal::TimerFired(TimerHandle(1)));

        done.complete();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(Signal::TimerFired(TimerHandle(1))));
        assert_eq!(queue.pop(), Some(Signal::EffectCompleted(Ticket(7))));
        assert!(queue.is_empty());
    }
}
