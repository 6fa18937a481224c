use crate::error::RainError;

/// Camera / hand tracker lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingState {
    /// Not started, or stopped by the user.
    Idle,
    /// Camera stream is live and frames may be sent to the tracker.
    Active,
    /// Camera acquisition failed. Terminal for this attempt; the user has to
    /// start again.
    Failed(String),
}

/// Guards the frame loop feeding the hand tracker.
///
/// At most one frame is in flight. Demand while a frame is being analyzed is
/// dropped rather than queued, so the tracker always works on the latest frame.
pub struct TrackingLoop {
    state: TrackingState,
    in_flight: bool,
    frames_sent: u64,
    frames_dropped: u64,
    frames_failed: u64,
}

impl TrackingLoop {
    pub fn new() -> Self {
        Self {
            state: TrackingState::Idle,
            in_flight: false,
            frames_sent: 0,
            frames_dropped: 0,
            frames_failed: 0,
        }
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TrackingState::Active
    }

    /// Camera is live. Returns false if tracking was already active.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = TrackingState::Active;
        self.in_flight = false;
        log::info!("hand tracking started");
        true
    }

    /// Stop sending frames. A frame already in flight may still deliver results.
    pub fn stop(&mut self) {
        if self.is_active() {
            log::info!(
                "hand tracking stopped ({} frames sent, {} dropped, {} failed)",
                self.frames_sent,
                self.frames_dropped,
                self.frames_failed
            );
        }
        self.state = TrackingState::Idle;
        self.in_flight = false;
    }

    /// Camera or tracker could not be acquired. No automatic retry.
    pub fn camera_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("{}", RainError::CameraUnavailable(reason.clone()));
        self.state = TrackingState::Failed(reason);
        self.in_flight = false;
    }

    /// Ask to send a new frame. True when the caller may send one; the frame is
    /// then in flight until `end_frame` or `frame_failed`.
    pub fn begin_frame(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        if self.in_flight {
            self.frames_dropped += 1;
            return false;
        }
        self.in_flight = true;
        self.frames_sent += 1;
        true
    }

    /// The tracker finished with the in-flight frame.
    pub fn end_frame(&mut self) {
        self.in_flight = false;
    }

    /// The tracker threw while analyzing a frame. Logged; the loop carries on
    /// with the next frame.
    pub fn frame_failed(&mut self, err: &RainError) {
        self.frames_failed += 1;
        log::warn!("{}", err);
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// The acquisition failure for this attempt, if any.
    pub fn failure(&self) -> Option<RainError> {
        match &self.state {
            TrackingState::Failed(reason) => Some(RainError::CameraUnavailable(reason.clone())),
            _ => None,
        }
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped
    }
}

impl Default for TrackingLoop {
    fn default() -> Self {
        Self::new()
    }
}
