use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::RainError;

/// Tunable gameplay constants. Every field falls back to its default when
/// missing from a JSON override, so partial configs are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Pool capacity (default: 50). Spawns beyond this are no-ops.
    pub max_packets: usize,
    /// Repeating spawn timer period in milliseconds (default: 300).
    pub spawn_interval_ms: f64,
    /// Number of staggered spawns issued when the rain starts (default: 10).
    pub initial_burst: u32,
    /// Delay between the staggered startup spawns (default: 100ms).
    pub initial_stagger_ms: f64,
    /// Base fall speed in scene units per frame (default: 0.3).
    pub fall_speed: f32,
    /// Grab hit radius in screen pixels, exclusive (default: 80).
    pub grab_radius: f32,
    /// Gesture value above which the hand counts as a fist (default: 0.6).
    pub grab_threshold: f32,
    /// Minimum time between resolved grab passes (default: 100ms).
    pub grab_cooldown_ms: f64,
    /// Delay before a collected packet is recycled (default: 500ms).
    pub reset_delay_ms: f64,
    /// Smallest regular packet value (default: 0.01).
    pub min_amount: f64,
    /// Largest regular packet value (default: 8.88).
    pub max_amount: f64,
    /// Fixed value of a lucky packet (default: 88.88).
    pub lucky_amount: f64,
    /// Probability that a reset produces a lucky packet (default: 0.02).
    pub lucky_chance: f64,
    /// Per-tick exponential smoothing factor for the display gesture value (default: 0.15).
    pub smoothing: f32,
    /// Mean wrist-to-fingertip distance that maps to a closed hand (default: 0.3).
    pub openness_min: f32,
    /// Mean wrist-to-fingertip distance that maps to a fully open hand (default: 0.8).
    pub openness_max: f32,
    /// Initial viewport width in pixels (default: 1280).
    pub viewport_width: f32,
    /// Initial viewport height in pixels (default: 720).
    pub viewport_height: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            max_packets: 50,
            spawn_interval_ms: 300.0,
            initial_burst: 10,
            initial_stagger_ms: 100.0,
            fall_speed: 0.3,
            grab_radius: 80.0,
            grab_threshold: 0.6,
            grab_cooldown_ms: 100.0,
            reset_delay_ms: 500.0,
            min_amount: 0.01,
            max_amount: 8.88,
            lucky_amount: 88.88,
            lucky_chance: 0.02,
            smoothing: 0.15,
            openness_min: 0.3,
            openness_max: 0.8,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl RainConfig {
    /// Parse a config override from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RainError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }
}

/// Screen dimensions in pixels. Scene space is centered on the viewport with y up;
/// screen space has its origin at the top-left with y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert a scene position to screen pixels.
    pub fn to_screen(&self, scene: Vec2) -> Vec2 {
        Vec2::new(scene.x + self.width / 2.0, self.height / 2.0 - scene.y)
    }

    /// Convert a normalized [0, 1] position (tracker space) to screen pixels.
    pub fn normalized_to_screen(&self, normalized: Vec2) -> Vec2 {
        Vec2::new(normalized.x * self.width, normalized.y * self.height)
    }

    /// Scene y of the top viewport edge.
    pub fn top(&self) -> f32 {
        self.height / 2.0
    }

    /// Scene y of the bottom viewport edge.
    pub fn bottom(&self) -> f32 {
        -self.height / 2.0
    }
}
