/// Content script: capture the page the script was injected into

use wasm_bindgen_futures::spawn_local;

use crate::capture::{capture, commit};
use crate::chrome::{ChromeStorage, RuntimeMessenger};
use crate::dom::snapshot;
use crate::error::{describe_js, ExtensionError, Result};
use crate::page_node::PageNode;

/// Extract synchronously, then hand persistence and the redirect request
/// off without waiting for them.
pub fn run() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| ExtensionError::Dom("No window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ExtensionError::Dom("No document".to_string()))?;
    let address = window
        .location()
        .href()
        .map_err(|e| ExtensionError::Dom(format!("Failed to read location: {}", describe_js(&e))))?;

    let root = match document.body() {
        Some(body) => snapshot(&body, &window),
        None => PageNode::Other,
    };
    let captured_at = String::from(js_sys::Date::new_0().to_iso_string());

    let captured = capture(&root, &address, &captured_at);
    log::info!("Extracted {} chars from {}", captured.result.text.len(), address);

    spawn_local(async move {
        if let Err(e) = commit(captured, &ChromeStorage, &RuntimeMessenger).await {
            log::error!("Capture not fully applied: {}", e);
        }
    });

    Ok(())
}
