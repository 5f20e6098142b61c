use std::time::{Duration, Instant};

/// A cancellable, single-shot deadline used for debounced panel closes.
///
/// The timer never runs on its own. The owner schedules it against a clock
/// reading and later asks whether it has fired, which keeps the whole panel
/// subsystem on the UI thread.
#[derive(Debug, Clone, Copy)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm the timer, replacing any deadline that is already pending.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarm the timer. Returns whether a deadline was pending; cancelling
    /// an idle timer is a no-op.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns true exactly once when `now` has reached the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(140));
        timer.schedule(start);
        assert!(!timer.fire(start + Duration::from_millis(139)));
        assert!(timer.fire(start + Duration::from_millis(140)));
        assert!(!timer.fire(start + Duration::from_millis(500)));
    }

    #[test]
    fn cancel_is_idempotent() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(120));
        assert!(!timer.cancel());
        timer.schedule(start);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.fire(start + Duration::from_secs(1)));
    }

    #[test]
    fn rescheduling_pushes_the_deadline_out() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        timer.schedule(start);
        timer.schedule(start + Duration::from_millis(80));
        assert!(!timer.fire(start + Duration::from_millis(120)));
        assert!(timer.fire(start + Duration::from_millis(180)));
    }
}
