/// Bindings to the extension APIs (storage, runtime messaging, tabs)
///
/// The JS side lives in `extension/bridge.js`; everything here converts
/// between serde types and JS values and maps thrown values to
/// `ExtensionError`.

use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

use crate::config::CONTENT_SCRIPT_FILE;
use crate::error::{describe_js, ExtensionError, Result};
use crate::messaging::{ExtensionMessage, MessageSink, TabOpener};
use crate::storage::KeyValueStore;

// Import JS bridge functions
#[wasm_bindgen(module = "/extension/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn storageGet(keys: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageSet(items: JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn sendRuntimeMessage(message: JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn injectIntoActiveTab(file: &str) -> std::result::Result<(), JsValue>;

}

/// Plain JS objects instead of `Map`s, as chrome.storage and messaging expect
fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// chrome.storage.local
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeStorage;

impl KeyValueStore for ChromeStorage {
    async fn get_items(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let items_js = storageGet(to_js(&keys)?)
            .await
            .map_err(|e| ExtensionError::Storage(format!("Failed to get storage: {}", describe_js(&e))))?;

        if items_js.is_null() || items_js.is_undefined() {
            return Ok(Map::new());
        }
        Ok(serde_wasm_bindgen::from_value(items_js)?)
    }

    async fn set_items(&self, items: Map<String, Value>) -> Result<()> {
        storageSet(to_js(&items)?)
            .await
            .map_err(|e| ExtensionError::Storage(format!("Failed to save storage: {}", describe_js(&e))))
    }
}

/// chrome.runtime.sendMessage, without waiting for a reply
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeMessenger;

impl MessageSink for RuntimeMessenger {
    fn send(&self, message: ExtensionMessage) -> Result<()> {
        sendRuntimeMessage(to_js(&message)?)
            .map_err(|e| ExtensionError::Messaging(format!("Failed to send message: {}", describe_js(&e))))
    }
}

/// chrome.tabs.create, always in the foreground
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

impl TabOpener for ChromeTabs {
    async fn open_tab(&self, url: &str) -> Result<()> {
        createTab(url)
            .await
            .map_err(|e| ExtensionError::Tab(format!("Failed to open {}: {}", url, describe_js(&e))))
    }
}

/// Run the capture content script in the active tab of the current window
pub async fn inject_into_active_tab() -> Result<()> {
    injectIntoActiveTab(CONTENT_SCRIPT_FILE)
        .await
        .map_err(|e| ExtensionError::Tab(format!("Failed to inject script: {}", describe_js(&e))))
}
