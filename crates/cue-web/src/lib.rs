//! Browser bridge for cue-engine.
//!
//! wasm-bindgen cannot export generic structs, so a single
//! `SimulationRunner` lives in a `thread_local!` and every export is a free
//! function that borrows it.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::SimulationRunner;

thread_local! {
    static RUNNER: RefCell<Option<SimulationRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SimulationRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

fn to_js(err: cue_engine::EngineError) -> JsValue {
    log::warn!("{}", err);
    JsValue::from_str(&err.to_string())
}

/// Create the table. Without a seed, one is drawn from the clock.
#[wasm_bindgen]
pub fn sim_init(seed: Option<f64>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
    let runner = SimulationRunner::new(seed).map_err(to_js)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("cue-web: initialized with seed {}", seed);
    Ok(())
}

#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn sim_set_aim(ball_id: u32, angle_degrees: f32, speed: f32) {
    with_runner(|r| r.set_aim(ball_id, angle_degrees, speed));
}

#[wasm_bindgen]
pub fn sim_clear_aim() {
    with_runner(|r| r.clear_aim());
}

#[wasm_bindgen]
pub fn sim_launch() -> Result<(), JsValue> {
    with_runner(|r| r.launch()).map_err(to_js)
}

#[wasm_bindgen]
pub fn sim_rack() {
    with_runner(|r| r.rack());
}

#[wasm_bindgen]
pub fn sim_start_golf() {
    with_runner(|r| r.start_golf());
}

#[wasm_bindgen]
pub fn sim_stop_golf() {
    with_runner(|r| r.stop_golf());
}

/// Place a resting ball; returns its id.
#[wasm_bindgen]
pub fn sim_add_ball(number: u8, color_hex: Option<String>, x: f32, y: f32) -> Result<u32, JsValue> {
    with_runner(|r| r.add_ball(number, color_hex.as_deref(), x, y)).map_err(to_js)
}

/// Spawn a ball at a random spot with the default speed; returns its id.
#[wasm_bindgen]
pub fn sim_add_random_ball(number: u8, color_hex: Option<String>) -> Result<u32, JsValue> {
    with_runner(|r| r.add_random_ball(number, color_hex.as_deref())).map_err(to_js)
}

#[wasm_bindgen]
pub fn sim_place_ball(ball_id: u32, x: f32, y: f32) -> Result<(), JsValue> {
    with_runner(|r| r.place_ball(ball_id, x, y)).map_err(to_js)
}

#[wasm_bindgen]
pub fn sim_set_config(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.set_config_json(json)).map_err(to_js)
}

#[wasm_bindgen]
pub fn sim_predictions_json() -> Result<String, JsValue> {
    with_runner(|r| r.predictions_json()).map_err(to_js)
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn get_balls_ptr() -> *const f32 {
    with_runner(|r| r.balls_ptr())
}

#[wasm_bindgen]
pub fn get_ball_count() -> u32 {
    with_runner(|r| r.ball_count())
}

#[wasm_bindgen]
pub fn get_captures_ptr() -> *const f32 {
    with_runner(|r| r.captures_ptr())
}

#[wasm_bindgen]
pub fn get_capture_count() -> u32 {
    with_runner(|r| r.capture_count())
}

#[wasm_bindgen]
pub fn get_predictions_ptr() -> *const f32 {
    with_runner(|r| r.predictions_ptr())
}

#[wasm_bindgen]
pub fn get_prediction_count() -> u32 {
    with_runner(|r| r.prediction_count())
}

// ---- Golf accessors ----

#[wasm_bindgen]
pub fn get_golf_shots() -> u32 {
    with_runner(|r| r.golf_shots())
}

#[wasm_bindgen]
pub fn get_golf_complete() -> bool {
    with_runner(|r| r.golf_complete())
}

#[wasm_bindgen]
pub fn get_golf_elapsed_ticks() -> u32 {
    with_runner(|r| r.golf_elapsed_ticks())
}
