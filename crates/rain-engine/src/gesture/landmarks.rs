//! Hand landmark frame as delivered by the hand tracker.
//!
//! 21 points in MediaPipe hand topology. x and y are normalized to [0, 1] of the
//! camera frame, z is depth relative to the wrist.

use glam::{Vec2, Vec3};
use crate::error::RainError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// Flat float count of one frame (x, y, z per landmark).
pub const FLAT_LEN: usize = LANDMARK_COUNT * 3;

pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// One validated hand frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Parse `[x0, y0, z0, x1, y1, z1, ...]` as sent across the JS boundary.
    pub fn from_flat(data: &[f32]) -> Result<Self, RainError> {
        if data.len() != FLAT_LEN {
            return Err(RainError::InvalidLandmarks {
                len: data.len(),
                expected: FLAT_LEN,
            });
        }
        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        for (index, chunk) in data.chunks_exact(3).enumerate() {
            let p = Vec3::new(chunk[0], chunk[1], chunk[2]);
            if !p.is_finite() {
                return Err(RainError::NonFiniteLandmark { index });
            }
            points[index] = p;
        }
        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    pub fn points(&self) -> &[Vec3; LANDMARK_COUNT] {
        &self.points
    }

    /// Tracked hand position: the middle finger knuckle. Steadier than the
    /// centroid while fingers curl.
    pub fn anchor(&self) -> Vec2 {
        self.points[MIDDLE_MCP].truncate()
    }

    /// Mean 3D distance from the wrist to the five fingertips.
    pub fn mean_fingertip_reach(&self) -> f32 {
        let wrist = self.points[WRIST];
        let total: f32 = FINGERTIPS
            .iter()
            .map(|&tip| self.points[tip].distance(wrist))
            .sum();
        total / FINGERTIPS.len() as f32
    }
}
