//! Browser bridge for the packet rain game.
//!
//! The page owns the camera, the hand tracker and the 3D scene. It calls in on
//! two clocks: `game_tick` from `requestAnimationFrame`, and
//! `game_hand_results` / `game_no_hand` from the tracker callback. All times
//! are `performance.now()` milliseconds.

pub mod runner;

pub use runner::{tick_slot, with_slot, GameRunner, RunnerSlot};

use std::cell::RefCell;

use rain_engine::{FrameRenderer, RainConfig};
use wasm_bindgen::prelude::*;

/// The page's "draw now" callback.
pub struct JsRenderer {
    callback: js_sys::Function,
}

impl JsRenderer {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl FrameRenderer for JsRenderer {
    fn render_frame(&mut self) {
        if let Err(err) = self.callback.call0(&JsValue::NULL) {
            log::warn!("render callback threw");
            // Raw JS value keeps the stack trace in devtools
            web_sys::console::error_1(&err);
        }
    }
}

thread_local! {
    static RUNNER: RunnerSlot<JsRenderer> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner<JsRenderer>) -> R) -> R {
    RUNNER.with(|cell| with_slot(cell, f))
}

#[wasm_bindgen]
pub fn game_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = js_sys::Date::now() as u64;
    let runner = GameRunner::new(RainConfig::default(), seed);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("packet-rain: initialized");
}

/// Apply JSON config overrides before tracking starts. Bad JSON, or a reload
/// mid-session, is logged and the current config kept.
#[wasm_bindgen]
pub fn game_load_config(json: &str) {
    with_runner(|r| {
        if let Err(err) = r.load_config(json) {
            log::warn!("keeping current config: {}", err);
        }
    });
}

#[wasm_bindgen]
pub fn game_set_renderer(callback: js_sys::Function) {
    with_runner(|r| r.set_renderer(JsRenderer::new(callback)));
}

#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    with_runner(|r| r.game_mut().resize(width, height));
}

/// The render callback runs outside the runner borrow and may call any
/// accessor below.
#[wasm_bindgen]
pub fn game_tick(now_ms: f64) {
    RUNNER.with(|cell| tick_slot(cell, now_ms));
}

// ---- Tracking ----

#[wasm_bindgen]
pub fn game_start_tracking(now_ms: f64) {
    with_runner(|r| r.game_mut().start_tracking(now_ms));
}

#[wasm_bindgen]
pub fn game_stop_tracking() {
    with_runner(|r| r.game_mut().stop_tracking());
}

#[wasm_bindgen]
pub fn game_camera_failed(message: &str) {
    with_runner(|r| r.game_mut().camera_failed(message));
}

/// True when the page may send the current camera frame to the tracker.
#[wasm_bindgen]
pub fn game_frame_begin() -> bool {
    with_runner(|r| r.game_mut().begin_frame())
}

/// Tracker results for a frame with a hand: 21 landmarks as flat x, y, z.
#[wasm_bindgen]
pub fn game_hand_results(now_ms: f64, landmarks: &[f32]) {
    with_runner(|r| {
        r.hand_results(now_ms, landmarks);
    });
}

#[wasm_bindgen]
pub fn game_no_hand(now_ms: f64) {
    with_runner(|r| {
        r.no_hand(now_ms);
    });
}

#[wasm_bindgen]
pub fn game_frame_failed(message: &str) {
    with_runner(|r| r.frame_failed(message));
}

// ---- Session ----

#[wasm_bindgen]
pub fn game_restart() {
    with_runner(|r| r.game_mut().restart());
}

#[wasm_bindgen]
pub fn game_set_simulating(simulating: bool) {
    with_runner(|r| r.game_mut().set_simulating(simulating));
}

// ---- Stats accessors ----

#[wasm_bindgen]
pub fn get_collected_count() -> u32 {
    with_runner(|r| r.collected_count())
}

#[wasm_bindgen]
pub fn get_total_amount() -> f64 {
    with_runner(|r| r.total_amount())
}

#[wasm_bindgen]
pub fn get_combo() -> u32 {
    with_runner(|r| r.combo())
}

#[wasm_bindgen]
pub fn get_gesture_value() -> f32 {
    with_runner(|r| r.gesture_value())
}

#[wasm_bindgen]
pub fn get_is_grabbing() -> bool {
    with_runner(|r| r.is_grabbing())
}

#[wasm_bindgen]
pub fn get_indicator_color() -> u32 {
    with_runner(|r| r.indicator_color())
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_lucky_split() -> u32 {
    with_runner(|r| r.lucky_split())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}
