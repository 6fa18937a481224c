use std::collections::VecDeque;

use crate::api::config::RainConfig;
use crate::core::time::IntervalTimer;

/// Issues spawn requests: a staggered burst when the rain starts, then one per
/// interval. Requests against a full pool are simply no-ops downstream.
pub struct Spawner {
    active: bool,
    /// Due times of the remaining startup spawns, ascending.
    burst: VecDeque<f64>,
    repeat: IntervalTimer,
    burst_count: u32,
    stagger_ms: f64,
}

impl Spawner {
    pub fn new(config: &RainConfig) -> Self {
        Self {
            active: false,
            burst: VecDeque::with_capacity(config.initial_burst as usize),
            repeat: IntervalTimer::new(config.spawn_interval_ms),
            burst_count: config.initial_burst,
            stagger_ms: config.initial_stagger_ms,
        }
    }

    /// Start the rain. Returns false if it was already running.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.burst.clear();
        for i in 0..self.burst_count {
            self.burst.push_back(now_ms + i as f64 * self.stagger_ms);
        }
        self.repeat.start(now_ms);
        log::info!(
            "rain started: {} staggered spawns, then every {}ms",
            self.burst_count,
            self.repeat.interval_ms()
        );
        true
    }

    /// Halt pool growth. Pending startup spawns are dropped too.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.burst.clear();
        self.repeat.stop();
        log::info!("rain stopped");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of spawn calls due up to `now_ms`.
    pub fn due(&mut self, now_ms: f64) -> u32 {
        if !self.active {
            return 0;
        }
        let mut count = 0;
        while self.burst.front().is_some_and(|&t| t <= now_ms) {
            self.burst.pop_front();
            count += 1;
        }
        count + self.repeat.poll(now_ms)
    }
}
