use std::cell::RefCell;

use rain_engine::{
    build_render_buffer, FrameRenderer, GameEvent, GrabOutcome, HandLandmarks, RainConfig,
    RainError, RainGame, RenderBuffer,
};

/// Storage the wasm exports keep their runner in.
pub type RunnerSlot<R> = RefCell<Option<GameRunner<R>>>;

/// Borrow the runner in `slot` for the duration of `f`.
pub fn with_slot<R: FrameRenderer, T>(slot: &RunnerSlot<R>, f: impl FnOnce(&mut GameRunner<R>) -> T) -> T {
    let mut borrow = slot.borrow_mut();
    let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
    f(runner)
}

/// One render frame for the runner in `slot`.
///
/// The renderer is called after the borrow is released, so it can read the
/// buffers and stats back through the accessors.
pub fn tick_slot<R: FrameRenderer>(slot: &RunnerSlot<R>, now_ms: f64) {
    let renderer = with_slot(slot, |r| r.tick(now_ms));
    if let Some(mut renderer) = renderer {
        renderer.render_frame();
        with_slot(slot, |r| r.restore_renderer(renderer));
    }
}

/// Wires the game to the browser's two clocks.
///
/// The wasm exports keep one runner in a `thread_local!` because wasm-bindgen
/// cannot export generic structs directly. `R` is the external renderer hook.
pub struct GameRunner<R: FrameRenderer> {
    game: RainGame,
    renderer: Option<R>,
    render_buffer: RenderBuffer,
    /// Events packed for the current frame, valid until the next tick.
    event_buffer: Vec<GameEvent>,
    seed: u64,
}

impl<R: FrameRenderer> GameRunner<R> {
    pub fn new(config: RainConfig, seed: u64) -> Self {
        let render_buffer = RenderBuffer::with_capacity(config.max_packets);
        Self {
            game: RainGame::new(config, seed),
            renderer: None,
            render_buffer,
            event_buffer: Vec::with_capacity(32),
            seed,
        }
    }

    pub fn set_renderer(&mut self, renderer: R) {
        self.renderer = Some(renderer);
    }

    /// Hand back a renderer taken out by `tick`. A renderer installed while
    /// it was out wins.
    pub fn restore_renderer(&mut self, renderer: R) {
        if self.renderer.is_none() {
            self.renderer = Some(renderer);
        }
    }

    /// Replace the config and rebuild the session. Refused once tracking or
    /// the rain has started, since the rebuild would drop both.
    pub fn load_config(&mut self, json: &str) -> Result<(), RainError> {
        if self.game.is_raining() || self.game.tracking().is_active() {
            return Err(RainError::SessionActive);
        }
        let config = RainConfig::from_json(json)?;
        self.render_buffer = RenderBuffer::with_capacity(config.max_packets);
        self.game = RainGame::new(config, self.seed);
        Ok(())
    }

    /// Render clock: advance the game and pack events and instances.
    /// Returns the renderer, taken out so the caller can draw without holding
    /// the runner; give it back with `restore_renderer`.
    pub fn tick(&mut self, now_ms: f64) -> Option<R> {
        self.game.tick(now_ms);

        // Events from tracker callbacks since the last tick ride along with this frame
        self.event_buffer.clear();
        self.event_buffer
            .extend(self.game.drain_notifications().iter().map(|n| n.to_event()));

        build_render_buffer(self.game.pool().iter(), &mut self.render_buffer);

        self.renderer.take()
    }

    /// Tracker clock: a frame with a hand, as a flat landmark array.
    /// A malformed payload is logged and treated as a frame without a hand.
    /// Either way the in-flight frame is done.
    pub fn hand_results(&mut self, now_ms: f64, flat: &[f32]) -> GrabOutcome {
        let outcome = match HandLandmarks::from_flat(flat) {
            Ok(hand) => self.game.on_hand_results(now_ms, Some(&hand)),
            Err(err) => {
                log::warn!("dropping tracker payload: {}", err);
                self.game.on_hand_results(now_ms, None)
            }
        };
        self.game.end_frame();
        outcome
    }

    /// Tracker clock: a frame without a hand.
    pub fn no_hand(&mut self, now_ms: f64) -> GrabOutcome {
        let outcome = self.game.on_hand_results(now_ms, None);
        self.game.end_frame();
        outcome
    }

    /// The tracker threw on the in-flight frame.
    pub fn frame_failed(&mut self, message: &str) {
        self.game.frame_failed(RainError::TrackingFrame(message.to_string()));
    }

    pub fn game(&self) -> &RainGame {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut RainGame {
        &mut self.game
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn lucky_split(&self) -> u32 {
        self.render_buffer.lucky_split
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn game_events(&self) -> &[GameEvent] {
        &self.event_buffer
    }

    // ---- Stats accessors ----

    pub fn collected_count(&self) -> u32 {
        self.game.stats().collected_count
    }

    pub fn total_amount(&self) -> f64 {
        self.game.stats().total_amount
    }

    pub fn combo(&self) -> u32 {
        self.game.stats().combo
    }

    pub fn gesture_value(&self) -> f32 {
        self.game.gesture().smoothed
    }

    pub fn is_grabbing(&self) -> bool {
        self.game.gesture().grabbing
    }

    /// Hand overlay color packed as 0xRRGGBB.
    pub fn indicator_color(&self) -> u32 {
        let [r, g, b] = self.game.gesture_processor().indicator_color();
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }
}
