use std::time::{Duration, Instant};

/// Fixed-period tick scheduler.
///
/// The clock never reads the system time itself; callers pass in `now`, so
/// the same code drives both the terminal loop and tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Clock {
    period: Duration,
    next_tick: Option<Instant>,
}

impl Clock {
    /// Create a stopped clock that ticks every `period` once armed
    pub(crate) fn new(period: Duration) -> Clock {
        Clock {
            period,
            next_tick: None,
        }
    }

    /// Return how long until the next tick is due, scheduling one a period
    /// from `now` if none is pending
    pub(crate) fn until_tick(&mut self, now: Instant) -> Duration {
        let when = *self.next_tick.get_or_insert(now + self.period);
        when.saturating_duration_since(now)
    }

    /// Return `true` if a pending tick is due at `now`, in which case the
    /// following tick is scheduled a period after `now`.  At most one tick
    /// fires per call, however late the caller is.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(when) if when <= now => {
                self.next_tick = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Cancel any pending tick
    pub(crate) fn stop(&mut self) {
        self.next_tick = None;
    }
}
