/// Running totals for one play session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    /// Packets collected since the session started.
    pub collected_count: u32,
    /// Sum of collected packet values.
    pub total_amount: f64,
    /// Collections since the current grab gesture began.
    pub combo: u32,
    /// Time of the last grab pass that got past the rate limiter.
    pub last_grab_ms: Option<f64>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self, amount: f64) {
        self.collected_count += 1;
        self.total_amount += amount;
    }

    /// Grow the combo streak by a batch of hits. Returns the new streak.
    pub fn add_combo(&mut self, hits: u32) -> u32 {
        self.combo += hits;
        self.combo
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
    }

    /// Zero the totals and the streak. The rate limiter clock is kept.
    pub fn reset(&mut self) {
        self.collected_count = 0;
        self.total_amount = 0.0;
        self.combo = 0;
    }

    /// `(collected_count, total_amount)` for the stats display.
    pub fn snapshot(&self) -> (u32, f64) {
        (self.collected_count, self.total_amount)
    }
}
