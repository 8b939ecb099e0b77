use std::time::{Duration, Instant};

/// Fixed-period tick source that can be stopped and restarted.
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker { period, next: None }
    }

    /// The first tick fires one full period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    /// How long input may be waited on before the next tick is due.
    /// `None` while stopped.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Consumes a due tick. Periods missed entirely are skipped, not replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        let next = match self.next {
            Some(next) if now >= next => next,
            _ => return false,
        };

        let mut following = next + self.period;
        if following <= now {
            following = now + self.period;
        }
        self.next = Some(following);
        true
    }
}
