use crate::api::config::{RainConfig, Viewport};
use crate::api::notify::Notification;
use crate::api::stats::SessionStats;
use crate::core::pool::PacketPool;
use crate::core::schedule::{PacketAction, Schedule};
use crate::core::spawner::Spawner;
use crate::error::RainError;
use crate::gesture::landmarks::HandLandmarks;
use crate::gesture::processor::{GestureProcessor, GestureState};
use crate::input::tracking::TrackingLoop;
use crate::systems::grab::{GrabContext, GrabOutcome, GrabResolver};
use crate::systems::rng::Rng;

/// One play session: the packet pool, gesture signal, score and timers.
///
/// Driven by two independent clocks. `tick` runs once per display frame;
/// `on_hand_results` runs whenever the hand tracker finishes a camera frame.
/// Both take the current wall-clock time in milliseconds.
pub struct RainGame {
    config: RainConfig,
    viewport: Viewport,
    rng: Rng,
    pool: PacketPool,
    gesture: GestureProcessor,
    resolver: GrabResolver,
    stats: SessionStats,
    schedule: Schedule<PacketAction>,
    spawner: Spawner,
    tracking: TrackingLoop,
    simulating: bool,
    notifications: Vec<Notification>,
}

impl RainGame {
    pub fn new(config: RainConfig, seed: u64) -> Self {
        Self {
            viewport: config.viewport(),
            rng: Rng::new(seed),
            pool: PacketPool::new(config.max_packets),
            gesture: GestureProcessor::new(&config),
            resolver: GrabResolver::new(&config),
            stats: SessionStats::new(),
            schedule: Schedule::new(),
            spawner: Spawner::new(&config),
            tracking: TrackingLoop::new(),
            simulating: true,
            notifications: Vec::with_capacity(32),
            config,
        }
    }

    // -- Clocks --

    /// Render tick: fire due timers, spawn, smooth the gesture display value
    /// and advance the falling packets.
    pub fn tick(&mut self, now_ms: f64) {
        self.run_deferred(now_ms);

        for _ in 0..self.spawner.due(now_ms) {
            if self.pool.spawn(&self.viewport, &self.config, &mut self.rng).is_none() {
                log::trace!("spawn skipped, pool full ({})", self.pool.capacity());
            }
        }

        self.gesture.smooth();

        if self.simulating {
            self.pool.step_all(now_ms, &self.viewport, &self.config, &mut self.rng);
        }
    }

    /// Tracker callback: one analyzed camera frame, with or without a hand.
    pub fn on_hand_results(&mut self, now_ms: f64, landmarks: Option<&HandLandmarks>) -> GrabOutcome {
        self.run_deferred(now_ms);

        let update = self.gesture.update(landmarks);
        if update.started {
            // New gesture, new streak, before any hit test this frame
            self.stats.reset_combo();
            self.notifications.push(Notification::GrabChanged { grabbing: true });
        } else if update.released {
            self.notifications.push(Notification::GrabChanged { grabbing: false });
        }

        let ctx = GrabContext {
            pool: &mut self.pool,
            stats: &mut self.stats,
            schedule: &mut self.schedule,
            notifications: &mut self.notifications,
            viewport: self.viewport,
        };
        self.resolver.try_grab(now_ms, self.gesture.state(), ctx)
    }

    fn run_deferred(&mut self, now_ms: f64) {
        for (id, action) in self.schedule.drain_due(now_ms) {
            match action {
                PacketAction::Reset => {
                    if let Some(packet) = self.pool.get_mut(id) {
                        packet.reset(&self.viewport, &self.config, &mut self.rng);
                    }
                }
            }
        }
    }

    // -- Session control --

    /// Start the packet rain (staggered fill, then the interval spawner).
    pub fn start_rain(&mut self, now_ms: f64) {
        self.spawner.start(now_ms);
    }

    /// Stop pool growth. Packets already falling keep falling and recycling.
    pub fn stop_rain(&mut self) {
        self.spawner.stop();
    }

    pub fn is_raining(&self) -> bool {
        self.spawner.is_active()
    }

    /// Pause or resume packet motion, independently of the spawner.
    pub fn set_simulating(&mut self, simulating: bool) {
        self.simulating = simulating;
    }

    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    /// The camera stream is live: begin tracking and start the rain.
    pub fn start_tracking(&mut self, now_ms: f64) {
        if self.tracking.start() {
            self.start_rain(now_ms);
        }
    }

    /// Release the camera. Rain stops growing; the simulation keeps running.
    pub fn stop_tracking(&mut self) {
        self.tracking.stop();
        self.stop_rain();
    }

    /// Camera or tracker acquisition failed for this attempt.
    pub fn camera_failed(&mut self, reason: impl Into<String>) {
        self.tracking.camera_failed(reason);
        self.stop_rain();
    }

    /// Whether a new camera frame may be sent to the tracker now.
    pub fn begin_frame(&mut self) -> bool {
        self.tracking.begin_frame()
    }

    /// The tracker finished with the in-flight frame.
    pub fn end_frame(&mut self) {
        self.tracking.end_frame();
    }

    /// The tracker failed on a frame. The loop carries on.
    pub fn frame_failed(&mut self, err: RainError) {
        self.tracking.frame_failed(&err);
    }

    /// Explicit restart: zero the score, drop pending recycles and
    /// re-randomize the whole pool.
    pub fn restart(&mut self) {
        self.stats.reset();
        self.schedule.cancel_all();
        self.pool.reset_all(&self.viewport, &self.config, &mut self.rng);
        let (count, total) = self.stats.snapshot();
        self.notifications.push(Notification::Stats { count, total });
        log::info!("session restarted with {} packets", self.pool.len());
    }

    /// Follow a window resize. Packets keep their scene positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    // -- Accessors --

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pool(&self) -> &PacketPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut PacketPool {
        &mut self.pool
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn gesture(&self) -> &GestureState {
        self.gesture.state()
    }

    pub fn gesture_processor(&self) -> &GestureProcessor {
        &self.gesture
    }

    pub fn tracking(&self) -> &TrackingLoop {
        &self.tracking
    }

    pub fn pending_resets(&self) -> usize {
        self.schedule.len()
    }

    /// Notifications emitted since the last drain.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Take all pending notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Default for RainGame {
    fn default() -> Self {
        Self::new(RainConfig::default(), 42)
    }
}
