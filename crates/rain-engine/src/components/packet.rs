use glam::{Vec2, Vec3};

use crate::api::config::{RainConfig, Viewport};
use crate::api::types::EntityId;
use crate::systems::rng::Rng;

// Spawn band above the top edge (scene units)
const SPAWN_MARGIN: f32 = 100.0;
const SPAWN_DEPTH: f32 = 200.0;
const SPAWN_WIDTH_FRACTION: f32 = 0.8;

// Packets this far below the bottom edge are recycled
const DESPAWN_MARGIN: f32 = 100.0;

// Depth range used only for draw ordering
const MAX_DEPTH: f32 = 10.0;

const TILT_SPREAD: f32 = 0.3;
const FALL_JITTER: f32 = 0.2;
const DRIFT_SPREAD: f32 = 0.5;
const SPIN_SPREAD: f32 = 0.02;

// Horizontal sway
const SWAY_AMPLITUDE: f32 = 0.3;
const SWAY_TIME_FREQ: f64 = 0.002;
const SWAY_HEIGHT_FREQ: f64 = 0.01;

/// Visual scale of a lucky packet.
pub const LUCKY_SCALE: f32 = 1.3;

/// A single falling red packet. Recycled for the whole life of the pool,
/// never destroyed.
#[derive(Debug, Clone)]
pub struct Packet {
    pub id: EntityId,
    /// Scene position; z only orders drawing.
    pub pos: Vec3,
    /// Per-frame velocity, y negative while falling.
    pub vel: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Value rounded to two decimals.
    pub amount: f64,
    /// Lucky packet carrying the fixed lucky amount.
    pub special: bool,
    /// Collected packets are frozen and skipped by hit tests until reset.
    pub collected: bool,
    pub visible: bool,
    pub scale: f32,
}

impl Packet {
    /// Create a packet at the origin. Call `reset` before letting it fall.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            pos: Vec3::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            amount: 0.0,
            special: false,
            collected: false,
            visible: true,
            scale: 1.0,
        }
    }

    // -- Test builders --

    #[cfg(test)]
    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    #[cfg(test)]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    /// Re-randomize position, motion and value, placing the packet in the
    /// spawn band above the viewport.
    pub fn reset(&mut self, viewport: &Viewport, config: &RainConfig, rng: &mut Rng) {
        self.pos = Vec3::new(
            rng.centered(viewport.width * SPAWN_WIDTH_FRACTION),
            viewport.top() + SPAWN_MARGIN + rng.next_f32() * SPAWN_DEPTH,
            rng.next_f32() * MAX_DEPTH,
        );
        self.rotation = rng.centered(TILT_SPREAD);

        self.vel = Vec2::new(
            rng.centered(DRIFT_SPREAD),
            -(config.fall_speed + rng.next_f32() * FALL_JITTER),
        );
        self.rotation_speed = rng.centered(SPIN_SPREAD);

        if rng.chance(config.lucky_chance) {
            self.amount = config.lucky_amount;
            self.special = true;
            self.scale = LUCKY_SCALE;
        } else {
            let raw = config.min_amount + rng.next_f64() * (config.max_amount - config.min_amount);
            self.amount = round_cents(raw);
            self.special = false;
            self.scale = 1.0;
        }

        self.collected = false;
        self.visible = true;
    }

    /// Advance one frame. Returns true when the packet fell out of view and
    /// was recycled.
    pub fn step(&mut self, now_ms: f64, viewport: &Viewport, config: &RainConfig, rng: &mut Rng) -> bool {
        if self.collected {
            return false;
        }

        self.pos.y += self.vel.y;
        self.pos.x += self.vel.x;
        self.rotation += self.rotation_speed;

        let phase = now_ms * SWAY_TIME_FREQ + self.pos.y as f64 * SWAY_HEIGHT_FREQ;
        self.pos.x += phase.sin() as f32 * SWAY_AMPLITUDE;

        if self.pos.y < viewport.bottom() - DESPAWN_MARGIN {
            self.reset(viewport, config, rng);
            return true;
        }
        false
    }

    /// Take the packet's value. Yields the amount exactly once per reset;
    /// later calls return 0.
    pub fn collect(&mut self) -> f64 {
        if self.collected {
            return 0.0;
        }
        self.collected = true;
        self.visible = false;
        self.amount
    }

    /// Position in screen pixels.
    pub fn screen_pos(&self, viewport: &Viewport) -> Vec2 {
        viewport.to_screen(self.pos.truncate())
    }

    /// Whether the packet is a grab candidate for a hand at `hand_px`.
    /// The radius boundary is exclusive.
    pub fn in_grab_range(&self, viewport: &Viewport, hand_px: Vec2, radius: f32) -> bool {
        !self.collected && self.screen_pos(viewport).distance(hand_px) < radius
    }
}

/// Round to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Viewport, RainConfig, Rng) {
        let config = RainConfig::default();
        (Viewport::new(1000.0, 800.0), config, Rng::new(42))
    }

    #[test]
    fn reset_lands_in_spawn_band() {
        let (vp, config, mut rng) = setup();
        let mut p = Packet::new(EntityId(1));
        for _ in 0..1000 {
            p.collected = true;
            p.visible = false;
            p.reset(&vp, &config, &mut rng);
            assert!(!p.collected);
            assert!(p.visible);
            assert!(p.pos.x >= -400.0 && p.pos.x < 400.0, "x = {}", p.pos.x);
            assert!(p.pos.y >= 500.0 && p.pos.y < 700.0, "y = {}", p.pos.y);
            assert!(p.pos.z >= 0.0 && p.pos.z < 10.0);
            assert!(p.rotation >= -0.15 && p.rotation < 0.15);
            assert!(p.vel.y <= -config.fall_speed && p.vel.y > -(config.fall_speed + 0.2));
        }
    }

    #[test]
    fn amounts_respect_bounds_and_lucky_ratio() {
        let (vp, config, mut rng) = setup();
        let mut p = Packet::new(EntityId(1));
        let mut lucky = 0;
        let n = 10_000;
        for _ in 0..n {
            p.reset(&vp, &config, &mut rng);
            if p.special {
                lucky += 1;
                assert_eq!(p.amount, config.lucky_amount);
                assert_eq!(p.scale, LUCKY_SCALE);
            } else {
                assert!(p.amount >= config.min_amount && p.amount <= config.max_amount);
                assert_eq!(p.scale, 1.0);
            }
        }
        let ratio = lucky as f64 / n as f64;
        assert!((ratio - config.lucky_chance).abs() < 0.01, "lucky ratio {}", ratio);
    }

    #[test]
    fn regular_draws_are_whole_cents() {
        let (vp, _, mut rng) = setup();
        let config = RainConfig {
            min_amount: 0.01,
            max_amount: 8.88,
            lucky_chance: 0.0,
            ..RainConfig::default()
        };
        let mut p = Packet::new(EntityId(1));
        for _ in 0..100_000 {
            p.reset(&vp, &config, &mut rng);
            assert!(!p.special);
            assert!(p.amount >= 0.01 && p.amount <= 8.88, "amount {}", p.amount);
            let cents = p.amount * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6, "amount {} is not whole cents", p.amount);
        }
    }

    #[test]
    fn collect_pays_once() {
        let mut p = Packet::new(EntityId(1)).with_amount(3.21);
        assert_eq!(p.collect(), 3.21);
        assert!(p.collected);
        assert!(!p.visible);
        assert_eq!(p.collect(), 0.0);
    }

    #[test]
    fn step_falls_and_recycles_below_bottom() {
        let (vp, config, mut rng) = setup();
        let mut p = Packet::new(EntityId(1));
        p.reset(&vp, &config, &mut rng);
        let y0 = p.pos.y;
        let recycled = p.step(0.0, &vp, &config, &mut rng);
        assert!(!recycled);
        assert!(p.pos.y < y0);

        p.pos.y = vp.bottom() - 99.9;
        p.vel.y = -1.0;
        let recycled = p.step(16.0, &vp, &config, &mut rng);
        assert!(recycled);
        assert!(p.pos.y >= vp.top() + 100.0);
    }

    #[test]
    fn collected_packets_do_not_move() {
        let (vp, config, mut rng) = setup();
        let mut p = Packet::new(EntityId(1)).with_pos(Vec3::new(5.0, 5.0, 0.0));
        p.vel = Vec2::new(1.0, -1.0);
        p.collect();
        p.step(0.0, &vp, &config, &mut rng);
        assert_eq!(p.pos, Vec3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn grab_radius_is_exclusive() {
        let vp = Viewport::new(1000.0, 1000.0);
        let hand = Vec2::new(500.0, 500.0);
        let inside = Packet::new(EntityId(1)).with_pos(Vec3::new(79.99, 0.0, 0.0));
        let outside = Packet::new(EntityId(2)).with_pos(Vec3::new(80.01, 0.0, 0.0));
        assert!(inside.in_grab_range(&vp, hand, 80.0));
        assert!(!outside.in_grab_range(&vp, hand, 80.0));
    }
}
