use glam::Vec2;

use crate::api::config::{RainConfig, Viewport};
use crate::api::notify::Notification;
use crate::api::stats::SessionStats;
use crate::core::pool::PacketPool;
use crate::core::schedule::{PacketAction, Schedule};
use crate::gesture::processor::GestureState;

/// Result of one grab attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrabOutcome {
    /// The hand is not closed.
    Inactive,
    /// Too soon after the previous pass.
    RateLimited,
    /// A hit-test pass ran. `hits` may be zero.
    Resolved { hits: u32, amount: f64 },
}

/// Everything a grab pass reads or mutates.
pub struct GrabContext<'a> {
    pub pool: &'a mut PacketPool,
    pub stats: &'a mut SessionStats,
    pub schedule: &'a mut Schedule<PacketAction>,
    pub notifications: &'a mut Vec<Notification>,
    pub viewport: Viewport,
}

/// Rate-limited collision resolution between the hand and the packet pool.
#[derive(Debug, Clone)]
pub struct GrabResolver {
    radius: f32,
    cooldown_ms: f64,
    reset_delay_ms: f64,
}

impl GrabResolver {
    pub fn new(config: &RainConfig) -> Self {
        Self {
            radius: config.grab_radius,
            cooldown_ms: config.grab_cooldown_ms,
            reset_delay_ms: config.reset_delay_ms,
        }
    }

    /// Collect every packet within the grab radius of the hand.
    ///
    /// The cooldown is global: a pass that clears the limiter blocks the next
    /// one for `cooldown_ms` whether or not it hit anything.
    pub fn try_grab(&self, now_ms: f64, gesture: &GestureState, ctx: GrabContext<'_>) -> GrabOutcome {
        if !gesture.grabbing {
            return GrabOutcome::Inactive;
        }
        if let Some(last) = ctx.stats.last_grab_ms {
            if now_ms - last < self.cooldown_ms {
                log::trace!("grab rate-limited ({:.0}ms since last pass)", now_ms - last);
                return GrabOutcome::RateLimited;
            }
        }
        ctx.stats.last_grab_ms = Some(now_ms);

        let hand_px: Vec2 = ctx.viewport.normalized_to_screen(gesture.hand);
        let mut hits = 0u32;
        let mut amount = 0.0f64;

        for packet in ctx.pool.iter_mut() {
            if !packet.in_grab_range(&ctx.viewport, hand_px, self.radius) {
                continue;
            }
            let value = packet.collect();
            hits += 1;
            amount += value;
            ctx.stats.record_hit(value);

            ctx.notifications.push(Notification::Collected {
                amount: value,
                special: packet.special,
                x: hand_px.x,
                y: hand_px.y,
            });
            ctx.schedule.schedule(packet.id, now_ms + self.reset_delay_ms, PacketAction::Reset);
        }

        if hits > 0 {
            let (count, total) = ctx.stats.snapshot();
            ctx.notifications.push(Notification::Stats { count, total });

            let combo = ctx.stats.add_combo(hits);
            if combo > 1 {
                ctx.notifications.push(Notification::Combo {
                    count: combo,
                    x: hand_px.x,
                    y: hand_px.y,
                });
            }
            log::debug!("grabbed {} packet(s) worth {:.2}, combo {}", hits, amount, combo);
        }

        GrabOutcome::Resolved { hits, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::types::EntityId;
    use crate::systems::rng::Rng;

    struct Fixture {
        config: RainConfig,
        viewport: Viewport,
        pool: PacketPool,
        stats: SessionStats,
        schedule: Schedule<PacketAction>,
        notifications: Vec<Notification>,
        resolver: GrabResolver,
    }

    impl Fixture {
        fn new() -> Self {
            let config = RainConfig::default();
            Self {
                resolver: GrabResolver::new(&config),
                viewport: Viewport::new(1000.0, 1000.0),
                pool: PacketPool::new(config.max_packets),
                stats: SessionStats::new(),
                schedule: Schedule::new(),
                notifications: Vec::new(),
                config,
            }
        }

        /// Spawn a packet whose screen position is (500 + dx, 500 + dy).
        fn packet_at(&mut self, dx: f32, dy: f32, amount: f64) -> EntityId {
            let mut rng = Rng::new(11);
            let id = self.pool.spawn(&self.viewport, &self.config, &mut rng).unwrap();
            let p = self.pool.get_mut(id).unwrap();
            p.pos = Vec3::new(dx, -dy, 0.0);
            p.amount = amount;
            p.special = false;
            id
        }

        fn grab(&mut self, now_ms: f64, gesture: &GestureState) -> GrabOutcome {
            let ctx = GrabContext {
                pool: &mut self.pool,
                stats: &mut self.stats,
                schedule: &mut self.schedule,
                notifications: &mut self.notifications,
                viewport: self.viewport,
            };
            self.resolver.try_grab(now_ms, gesture, ctx)
        }
    }

    fn fist_at_center() -> GestureState {
        GestureState {
            target: 1.0,
            grabbing: true,
            hand: Vec2::new(0.5, 0.5),
            hand_visible: true,
            ..GestureState::default()
        }
    }

    #[test]
    fn open_hand_is_inactive() {
        let mut f = Fixture::new();
        f.packet_at(0.0, 0.0, 1.0);
        let open = GestureState { grabbing: false, ..fist_at_center() };
        assert_eq!(f.grab(0.0, &open), GrabOutcome::Inactive);
        assert_eq!(f.stats.collected_count, 0);
        assert_eq!(f.stats.last_grab_ms, None);
    }

    #[test]
    fn collects_everything_strictly_inside_radius() {
        let mut f = Fixture::new();
        let near = f.packet_at(10.0, 0.0, 1.25);
        let edge = f.packet_at(0.0, 79.0, 2.50);
        let far = f.packet_at(-81.0, 0.0, 4.00);

        let outcome = f.grab(0.0, &fist_at_center());
        assert_eq!(outcome, GrabOutcome::Resolved { hits: 2, amount: 3.75 });
        assert_eq!(f.stats.snapshot(), (2, 3.75));
        assert_eq!(f.stats.combo, 2);
        assert!(f.pool.get(near).unwrap().collected);
        assert!(f.pool.get(edge).unwrap().collected);
        assert!(!f.pool.get(far).unwrap().collected);
        assert!(f.schedule.is_pending(near));
        assert!(!f.schedule.is_pending(far));
    }

    #[test]
    fn notifications_for_batch() {
        let mut f = Fixture::new();
        f.packet_at(0.0, 0.0, 1.0);
        f.packet_at(5.0, 5.0, 2.0);
        f.grab(0.0, &fist_at_center());

        let collected = f
            .notifications
            .iter()
            .filter(|n| matches!(n, Notification::Collected { .. }))
            .count();
        assert_eq!(collected, 2);
        assert!(f.notifications.contains(&Notification::Stats { count: 2, total: 3.0 }));
        assert!(f.notifications.contains(&Notification::Combo { count: 2, x: 500.0, y: 500.0 }));
    }

    #[test]
    fn single_hit_shows_no_combo() {
        let mut f = Fixture::new();
        f.packet_at(0.0, 0.0, 1.0);
        f.grab(0.0, &fist_at_center());
        assert_eq!(f.stats.combo, 1);
        assert!(!f.notifications.iter().any(|n| matches!(n, Notification::Combo { .. })));
    }

    #[test]
    fn rate_limiter_blocks_passes_within_cooldown() {
        let mut f = Fixture::new();
        let fist = fist_at_center();
        assert!(matches!(f.grab(1000.0, &fist), GrabOutcome::Resolved { hits: 0, .. }));

        f.packet_at(0.0, 0.0, 1.0);
        assert_eq!(f.grab(1099.0, &fist), GrabOutcome::RateLimited);
        assert_eq!(f.stats.collected_count, 0);

        assert!(matches!(f.grab(1100.0, &fist), GrabOutcome::Resolved { hits: 1, .. }));
        assert_eq!(f.stats.last_grab_ms, Some(1100.0));
    }

    #[test]
    fn collected_packets_are_not_grabbed_twice() {
        let mut f = Fixture::new();
        f.packet_at(0.0, 0.0, 2.0);
        let fist = fist_at_center();
        f.grab(0.0, &fist);
        let before = f.stats.clone();

        let outcome = f.grab(200.0, &fist);
        assert_eq!(outcome, GrabOutcome::Resolved { hits: 0, amount: 0.0 });
        assert_eq!(f.stats.snapshot(), before.snapshot());
        assert_eq!(f.stats.combo, before.combo);
    }

    #[test]
    fn hand_position_scales_to_viewport() {
        let mut f = Fixture::new();
        // Screen (250, 750) is scene (-250, -250)
        let id = f.packet_at(-250.0, 250.0, 1.0);
        let gesture = GestureState { hand: Vec2::new(0.25, 0.75), ..fist_at_center() };
        f.grab(0.0, &gesture);
        assert!(f.pool.get(id).unwrap().collected);
    }
}
