use std::time::Duration;

use crate::queue::{Signal, SignalQueue, TimerHandle};

/// One-shot timers whose expiry is reported as [`Signal::TimerFired`].
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Scheduler driven by frame deltas: the host calls [`FrameClock::tick`] once per frame.
#[derive(Debug)]
pub struct FrameClock {
    queue: SignalQueue,
    elapsed: Duration,
    next_id: u64,
    pending: Vec<(TimerHandle, Duration)>,
}

impl FrameClock {
    pub fn new(queue: SignalQueue) -> Self {
        Self {
            queue,
            elapsed: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Advances the clock and posts every timer that came due, earliest first.
    /// Returns how many fired.
    pub fn tick(&mut self, dt: Duration) -> usize {
        self.elapsed += dt;

        let mut due: Vec<(TimerHandle, Duration)> = Vec::new();
        let elapsed = self.elapsed;
        self.pending.retain(|&(handle, deadline)| {
            if deadline <= elapsed {
                due.push((handle, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(handle, deadline)| (deadline, handle));

        for (handle, _) in due.iter() {
            self.queue.push(Signal::TimerFired(*handle));
        }
        due.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for FrameClock {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push((handle, self.elapsed + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|&(h, _)| h != handle);
    }
}
