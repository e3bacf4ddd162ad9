use std::time::{Duration, Instant};
use tracing::debug;

/// Fixed-period tick scheduler.
///
/// A tick that finishes past its deadline is followed immediately by one
/// overdue tick, then the schedule restarts from now. Missed ticks are not
/// made up in a burst.
#[derive(Debug)]
pub struct Rate {
    period: Duration,
    next: Instant,
    late: u64,
}

impl Rate {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
            late: 0,
        }
    }

    /// How long to wait before the next tick; advances the schedule.
    pub fn next_wait(&mut self) -> Duration {
        let now = Instant::now();
        let deadline = self.next;
        if now > deadline {
            self.late += 1;
            self.next = now + self.period;
            debug!(
                overrun_ms = (now - deadline).as_secs_f64() * 1000.0,
                "tick overran its period"
            );
            Duration::ZERO
        } else {
            self.next = deadline + self.period;
            deadline - now
        }
    }

    pub fn late_ticks(&self) -> u64 {
        self.late
    }
}
