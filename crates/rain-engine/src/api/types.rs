use bytemuck::{Pod, Zeroable};

/// Unique identifier for a packet in the pool. Stable across recycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// A game event handed from Rust to the presentation layer through a flat buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}

/// Event kinds written into `GameEvent::kind`.
pub mod event_kind {
    /// a = amount, b = screen x, c = screen y
    pub const COLLECTED: f32 = 1.0;
    /// Same payload as `COLLECTED`, for a lucky packet.
    pub const LUCKY_COLLECTED: f32 = 2.0;
    /// a = combo count, b = screen x, c = screen y
    pub const COMBO: f32 = 3.0;
    /// a = collected count, b = whole units of the total, c = cents of the total.
    /// Split so totals past f32 precision still arrive exact to the cent.
    pub const STATS: f32 = 4.0;
    /// a = 1.0 while grabbing, 0.0 when released
    pub const GRAB_STATE: f32 = 5.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn events_cast_to_flat_floats() {
        let events = [
            GameEvent { kind: event_kind::COMBO, a: 3.0, b: 10.0, c: 20.0 },
            GameEvent { kind: event_kind::STATS, a: 7.0, b: 12.5, c: 0.0 },
        ];
        let flat: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(flat, &[3.0, 3.0, 10.0, 20.0, 4.0, 7.0, 12.5, 0.0]);
    }
}
