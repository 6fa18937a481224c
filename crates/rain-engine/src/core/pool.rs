use crate::api::config::{RainConfig, Viewport};
use crate::api::types::EntityId;
use crate::components::packet::Packet;
use crate::systems::rng::Rng;

/// Fixed-capacity packet storage using a flat Vec.
/// Packets are appended until the pool is full and then recycled forever.
pub struct PacketPool {
    packets: Vec<Packet>,
    capacity: usize,
    next_id: u32,
}

impl PacketPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            packets: Vec::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Add a freshly reset packet. No-op once the pool is full.
    pub fn spawn(&mut self, viewport: &Viewport, config: &RainConfig, rng: &mut Rng) -> Option<EntityId> {
        if self.is_full() {
            return None;
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let mut packet = Packet::new(id);
        packet.reset(viewport, config, rng);
        self.packets.push(packet);
        Some(id)
    }

    /// Advance every live packet one frame. Returns how many were recycled
    /// after falling out of view.
    pub fn step_all(&mut self, now_ms: f64, viewport: &Viewport, config: &RainConfig, rng: &mut Rng) -> usize {
        let mut recycled = 0;
        for packet in &mut self.packets {
            if packet.step(now_ms, viewport, config, rng) {
                recycled += 1;
            }
        }
        recycled
    }

    /// Re-randomize every packet in the pool.
    pub fn reset_all(&mut self, viewport: &Viewport, config: &RainConfig, rng: &mut Rng) {
        for packet in &mut self.packets {
            packet.reset(viewport, config, rng);
        }
    }

    /// Get a reference to a packet by ID.
    pub fn get(&self, id: EntityId) -> Option<&Packet> {
        self.packets.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a packet by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Packet> {
        self.packets.iter_mut().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Packet> {
        self.packets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Packet> {
        self.packets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.packets.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
