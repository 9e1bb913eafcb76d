//! Customizable dashboard - Yew WASM frontend
//!
//! Cards can be dragged, resized and hidden while customize mode is on.

mod app;
pub mod components;
mod pages;
mod state;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
