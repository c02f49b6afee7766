//! Heart Quiz core crate.
//!
//! A six-question memory quiz; four correct answers unlock a 30 second
//! "find the hearts" mini-game, and collecting all five hearts ends on a
//! confetti victory screen. Engines are plain Rust behind the `View` trait so
//! they run natively under `cargo test`; `web` drives them from the DOM.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod config;
pub mod effects;
pub mod error;
pub mod game;
mod logger;
pub mod pages;
pub mod questions;
pub mod quiz;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod view;
pub mod web;

pub use app::{App, Transition};
pub use config::GameConfig;
pub use error::GameError;
pub use pages::Page;
pub use questions::{QUIZ_ITEMS, QuizItem};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Bind the page and show the intro. Call once after the wasm module loaded.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    web::start_app(GameConfig::default())
}

/// Same as `start_app` with a partial JSON override of `GameConfig`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_app_with_config(json: &str) -> Result<(), JsValue> {
    web::start_app(GameConfig::from_json(json)?)
}

#[wasm_bindgen]
pub fn start_quiz() {
    web::with_app_dispatch(|app| app.start_quiz());
}

#[wasm_bindgen]
pub fn submit_answer(option: usize) {
    web::answer(option);
}

#[wasm_bindgen]
pub fn next_question() {
    web::with_app_dispatch(|app| app.next_question());
}

#[wasm_bindgen]
pub fn restart_quiz() {
    web::with_app_dispatch(|app| app.restart_quiz());
}

#[wasm_bindgen]
pub fn restart_game() {
    web::with_app_dispatch(|app| app.restart_game());
}
