// core/schedule.rs
//
// Deferred actions keyed by EntityId.
// At most one pending action per entity; scheduling again replaces it.
//
// Usage:
//   let mut schedule = Schedule::new();
//   schedule.schedule(id, now + 500.0, PacketAction::Reset);
//   for (id, action) in schedule.drain_due(now) { ... }
//   schedule.cancel_all();  // e.g. on session restart

use std::collections::HashMap;
use crate::api::types::EntityId;

/// Deferred work on a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketAction {
    /// Recycle a collected packet back into the spawn band.
    Reset,
}

#[derive(Debug, Clone, Copy)]
struct Pending<A> {
    due_ms: f64,
    action: A,
}

/// Timers keyed by entity identity, fired by polling.
#[derive(Debug, Clone)]
pub struct Schedule<A> {
    pending: HashMap<EntityId, Pending<A>>,
}

impl<A: Copy> Schedule<A> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Schedule `action` on `id` at `due_ms`, replacing any earlier entry.
    pub fn schedule(&mut self, id: EntityId, due_ms: f64, action: A) {
        self.pending.insert(id, Pending { due_ms, action });
    }

    /// Cancel the pending action for `id`. Returns true if one existed.
    pub fn cancel(&mut self, id: EntityId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Cancel everything.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, id: EntityId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Remove and return every action due at or before `now_ms`, oldest first.
    /// Ties are ordered by id so replays stay deterministic.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<(EntityId, A)> {
        let mut due: Vec<(f64, EntityId)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_ms <= now_ms)
            .map(|(id, p)| (p.due_ms, *id))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        due.into_iter()
            .filter_map(|(_, id)| self.pending.remove(&id).map(|p| (id, p.action)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<A: Copy> Default for Schedule<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_when_due() {
        let mut s = Schedule::new();
        s.schedule(EntityId(1), 500.0, PacketAction::Reset);
        assert!(s.drain_due(499.0).is_empty());
        assert_eq!(s.drain_due(500.0), vec![(EntityId(1), PacketAction::Reset)]);
        assert!(s.is_empty());
    }

    #[test]
    fn drains_in_due_order() {
        let mut s = Schedule::new();
        s.schedule(EntityId(3), 300.0, PacketAction::Reset);
        s.schedule(EntityId(1), 200.0, PacketAction::Reset);
        s.schedule(EntityId(2), 200.0, PacketAction::Reset);
        s.schedule(EntityId(4), 900.0, PacketAction::Reset);
        let ids: Vec<EntityId> = s.drain_due(500.0).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(2), EntityId(3)]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn rescheduling_replaces() {
        let mut s = Schedule::new();
        s.schedule(EntityId(1), 100.0, PacketAction::Reset);
        s.schedule(EntityId(1), 600.0, PacketAction::Reset);
        assert!(s.drain_due(300.0).is_empty());
        assert_eq!(s.drain_due(600.0).len(), 1);
    }

    #[test]
    fn cancel_all_prevents_stale_fires() {
        let mut s = Schedule::new();
        s.schedule(EntityId(1), 100.0, PacketAction::Reset);
        s.schedule(EntityId(2), 100.0, PacketAction::Reset);
        assert!(s.cancel(EntityId(1)));
        assert!(!s.cancel(EntityId(1)));
        s.cancel_all();
        assert!(s.drain_due(1_000.0).is_empty());
    }
}
