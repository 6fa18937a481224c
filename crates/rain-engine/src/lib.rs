pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod gesture;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{RainConfig, Viewport};
pub use api::game::RainGame;
pub use api::notify::Notification;
pub use api::stats::SessionStats;
pub use api::types::{EntityId, GameEvent, event_kind};
pub use components::packet::Packet;
pub use core::pool::PacketPool;
pub use core::schedule::{Schedule, PacketAction};
pub use core::spawner::Spawner;
pub use core::time::IntervalTimer;
pub use error::RainError;
pub use gesture::landmarks::HandLandmarks;
pub use gesture::processor::{GestureProcessor, GestureState, GestureUpdate};
pub use input::tracking::{TrackingLoop, TrackingState};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::traits::FrameRenderer;
pub use systems::grab::{GrabOutcome, GrabResolver};
pub use systems::render::build_render_buffer;
pub use systems::rng::Rng;
