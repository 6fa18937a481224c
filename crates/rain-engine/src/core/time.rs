/// Repeating wall-clock timer driven by polling.
/// Counts how many periods elapsed since the last poll, like a fixed-step accumulator.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    /// Period in milliseconds.
    interval_ms: f64,
    /// Time of the next firing, `None` while stopped.
    next_due: Option<f64>,
}

/// Cap on missed periods caught up in one poll (e.g. after a background tab).
const MAX_CATCH_UP: u32 = 10;

impl IntervalTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due: None,
        }
    }

    /// Arm the timer; the first firing is one period after `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.next_due = Some(now_ms + self.interval_ms);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns the number of periods that elapsed up to `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        if self.interval_ms <= 0.0 {
            return 0;
        }

        let mut fired = 0;
        while due <= now_ms && fired < MAX_CATCH_UP {
            fired += 1;
            due += self.interval_ms;
        }
        // Drop whatever is left of a long stall instead of replaying it later
        if due <= now_ms {
            due = now_ms + self.interval_ms;
        }
        self.next_due = Some(due);
        fired
    }

    /// The timer period.
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut t = IntervalTimer::new(300.0);
        t.start(0.0);
        assert_eq!(t.poll(299.0), 0);
        assert_eq!(t.poll(300.0), 1);
        assert_eq!(t.poll(599.0), 0);
        assert_eq!(t.poll(600.0), 1);
    }

    #[test]
    fn accumulates_missed_periods() {
        let mut t = IntervalTimer::new(100.0);
        t.start(0.0);
        assert_eq!(t.poll(350.0), 3);
        assert_eq!(t.poll(400.0), 1);
    }

    #[test]
    fn caps_at_ten_periods() {
        let mut t = IntervalTimer::new(100.0);
        t.start(0.0);
        assert_eq!(t.poll(60_000.0), 10);
        // Stall is discarded, next firing is one period later
        assert_eq!(t.poll(60_050.0), 0);
        assert_eq!(t.poll(60_100.0), 1);
    }

    #[test]
    fn stopped_timer_never_fires() {
        let mut t = IntervalTimer::new(100.0);
        assert_eq!(t.poll(1000.0), 0);
        t.start(0.0);
        t.stop();
        assert!(!t.is_running());
        assert_eq!(t.poll(1000.0), 0);
    }
}
