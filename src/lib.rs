/// Page Capture - Chrome Extension that captures visible page text
/// Built with Rust + WASM + Yew

mod background;
pub mod capture;
mod chrome;
pub mod config;
mod content;
mod dom;
pub mod error;
pub mod extractor;
pub mod messaging;
pub mod page_node;
pub mod router;
pub mod storage;
pub mod ui;
pub mod visibility;

use wasm_bindgen::prelude::*;

pub use dom::snapshot;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(config::logger_config());
}

// Capture the current page; called by the content script on load or injection
#[wasm_bindgen]
pub fn run_content_script() -> Result<(), JsValue> {
    content::run().map_err(JsValue::from)
}

// Start the message listener and tab coordinator in the service worker
#[wasm_bindgen]
pub fn start_background() {
    background::start();
}

// Pass a runtime message received by the service worker to the coordinator
#[wasm_bindgen]
pub fn deliver_background_message(message: JsValue) -> Result<bool, JsValue> {
    background::deliver(message).map_err(JsValue::from)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
