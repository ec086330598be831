/// Background worker: turns runtime messages into tabs
///
/// `extension/background.js` registers the chrome.runtime.onMessage listener
/// synchronously and buffers messages until the wasm module is ready; it then
/// calls `start` once and `deliver` for every message.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::chrome::ChromeTabs;
use crate::error::{ExtensionError, Result};
use crate::messaging::{channel, BackgroundCoordinator, Inbox};

thread_local! {
    static INBOX: RefCell<Option<Inbox>> = const { RefCell::new(None) };
}

pub fn start() {
    let (sender, receiver) = channel();
    INBOX.with(|inbox| *inbox.borrow_mut() = Some(Inbox::new(sender)));

    spawn_local(async move {
        BackgroundCoordinator::new(ChromeTabs, receiver).run().await;
    });

    log::info!("Background coordinator started");
}

/// Hand one raw runtime message to the coordinator
pub fn deliver(message: JsValue) -> Result<bool> {
    let raw: serde_json::Value = serde_wasm_bindgen::from_value(message)?;
    INBOX.with(|inbox| match inbox.borrow().as_ref() {
        Some(inbox) => inbox.accept(raw),
        None => Err(ExtensionError::Messaging("Background not started".to_string())),
    })
}
