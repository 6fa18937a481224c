//! Gesture signal processing: openness → gesture value → grab state.
//!
//! Grab detection reads the raw per-frame value so it adds no latency. The
//! smoothed value only drives visual feedback and is advanced by the render
//! tick, independently of when tracker frames arrive.

use glam::Vec2;

use crate::api::config::RainConfig;
use super::landmarks::HandLandmarks;

/// Overlay color for an open hand (#ff4444).
const OPEN_COLOR: [f32; 3] = [255.0, 68.0, 68.0];
/// Overlay color for a closed fist (#ffd700).
const CLOSED_COLOR: [f32; 3] = [255.0, 215.0, 0.0];

/// Latest gesture reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    /// Raw gesture value from the latest hand frame (0 = open, 1 = fist).
    pub target: f32,
    /// Display value easing toward `target`.
    pub smoothed: f32,
    /// Whether the hand currently counts as grabbing.
    pub grabbing: bool,
    /// Normalized hand position, last known.
    pub hand: Vec2,
    /// Whether the latest frame contained a hand.
    pub hand_visible: bool,
}

/// Grab state transitions produced by one tracker frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureUpdate {
    /// The hand just closed.
    pub started: bool,
    /// The hand just opened or was lost.
    pub released: bool,
}

/// Map mean fingertip reach to openness in [0, 1].
pub fn openness(landmarks: &HandLandmarks, min_reach: f32, max_reach: f32) -> f32 {
    let span = (max_reach - min_reach).max(f32::EPSILON);
    ((landmarks.mean_fingertip_reach() - min_reach) / span).clamp(0.0, 1.0)
}

pub struct GestureProcessor {
    state: GestureState,
    grab_threshold: f32,
    smoothing: f32,
    openness_min: f32,
    openness_max: f32,
}

impl GestureProcessor {
    pub fn new(config: &RainConfig) -> Self {
        Self {
            state: GestureState::default(),
            grab_threshold: config.grab_threshold,
            smoothing: config.smoothing,
            openness_min: config.openness_min,
            openness_max: config.openness_max,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Consume one tracker frame. `None` means no hand was detected, which
    /// releases the grab immediately.
    pub fn update(&mut self, landmarks: Option<&HandLandmarks>) -> GestureUpdate {
        let was_grabbing = self.state.grabbing;

        match landmarks {
            Some(hand) => {
                self.state.target = 1.0 - openness(hand, self.openness_min, self.openness_max);
                self.state.hand = hand.anchor();
                self.state.hand_visible = true;
                self.state.grabbing = self.state.target > self.grab_threshold;
            }
            None => {
                self.state.hand_visible = false;
                self.state.grabbing = false;
            }
        }

        GestureUpdate {
            started: self.state.grabbing && !was_grabbing,
            released: !self.state.grabbing && was_grabbing,
        }
    }

    /// Advance the display value one render tick.
    pub fn smooth(&mut self) {
        self.state.smoothed += (self.state.target - self.state.smoothed) * self.smoothing;
    }

    /// Hand overlay color, red when open fading to gold when closed.
    pub fn indicator_color(&self) -> [u8; 3] {
        let t = self.state.smoothed.clamp(0.0, 1.0);
        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            let v = OPEN_COLOR[i] + (CLOSED_COLOR[i] - OPEN_COLOR[i]) * t;
            *channel = v.round() as u8;
        }
        rgb
    }
}
