//! Notifications the core emits for the presentation layer.
//!
//! The core pushes these and moves on; popups, coin bursts and combo banners are
//! drawn elsewhere and never block the game loop.

use super::types::{event_kind, GameEvent};

/// Coin burst size for a regular collection.
pub const BURST_NORMAL: u32 = 8;
/// Coin burst size for a lucky collection.
pub const BURST_LUCKY: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// A packet was collected at screen position (x, y).
    Collected { amount: f64, special: bool, x: f32, y: f32 },
    /// The combo streak grew past one.
    Combo { count: u32, x: f32, y: f32 },
    /// Running totals after a successful grab batch or a restart.
    Stats { count: u32, total: f64 },
    /// The hand closed or opened.
    GrabChanged { grabbing: bool },
}

impl Notification {
    /// Encode into the flat wire format.
    pub fn to_event(&self) -> GameEvent {
        match *self {
            Notification::Collected { amount, special, x, y } => GameEvent {
                kind: if special { event_kind::LUCKY_COLLECTED } else { event_kind::COLLECTED },
                a: amount as f32,
                b: x,
                c: y,
            },
            Notification::Combo { count, x, y } => GameEvent {
                kind: event_kind::COMBO,
                a: count as f32,
                b: x,
                c: y,
            },
            Notification::Stats { count, total } => {
                let cents = (total * 100.0).round().max(0.0) as u64;
                GameEvent {
                    kind: event_kind::STATS,
                    a: count as f32,
                    b: (cents / 100) as f32,
                    c: (cents % 100) as f32,
                }
            }
            Notification::GrabChanged { grabbing } => GameEvent {
                kind: event_kind::GRAB_STATE,
                a: if grabbing { 1.0 } else { 0.0 },
                b: 0.0,
                c: 0.0,
            },
        }
    }

    /// Number of coin particles the presentation layer should burst for this
    /// notification. Zero for anything but a collection.
    pub fn burst_size(&self) -> u32 {
        match self {
            Notification::Collected { special: true, .. } => BURST_LUCKY,
            Notification::Collected { special: false, .. } => BURST_NORMAL,
            _ => 0,
        }
    }
}
