/// Key-value persistence for captures and site context
///
/// Mirrors chrome.storage.local: flat string keys, merge-on-write, last
/// write wins. No transactions and no expiry.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ExtensionError, Result};
use crate::extractor::ExtractionResult;
use crate::router::{ContextUpdate, SiteContext};

pub const CLEANED_TEXT: &str = "cleanedText";
pub const LAST_EXTRACTED_URL: &str = "lastExtractedUrl";
pub const LAST_EXTRACTED_TIME: &str = "lastExtractedTime";
pub const SITE_CONTEXT: &str = "siteContext";
pub const ORIGINAL_URL: &str = "originalUrl";

#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Values for the keys that are present; missing keys are left out
    async fn get_items(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// Merge `items` into the store, overwriting existing keys
    async fn set_items(&self, items: Map<String, Value>) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut items = self.get_items(&[key]).await?;
        Ok(items.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut items = Map::new();
        items.insert(key.to_string(), value);
        self.set_items(items).await
    }
}

/// In-memory store for tests and host-free runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get_items(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let entries = self.entries.borrow();
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect())
    }

    async fn set_items(&self, items: Map<String, Value>) -> Result<()> {
        self.entries.borrow_mut().extend(items);
        Ok(())
    }
}

/// Last capture as read back for display. Any key may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredExtraction {
    #[serde(default)]
    pub cleaned_text: Option<String>,
    #[serde(default)]
    pub last_extracted_url: Option<String>,
    #[serde(default)]
    pub last_extracted_time: Option<String>,
}

/// Site context as last written by the router
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredContext {
    #[serde(default)]
    pub site_context: Option<SiteContext>,
    #[serde(default)]
    pub original_url: Option<String>,
}

fn to_items<T: Serialize>(record: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(items) => Ok(items),
        other => Err(ExtensionError::Storage(format!(
            "Expected an object record, got {}",
            other
        ))),
    }
}

/// Overwrite the stored capture. An empty text is written like any other.
pub async fn save_extraction<S: KeyValueStore>(store: &S, result: &ExtractionResult) -> Result<()> {
    store.set_items(to_items(result)?).await
}

pub async fn save_site_context<S: KeyValueStore>(store: &S, update: &ContextUpdate) -> Result<()> {
    store.set_items(to_items(update)?).await
}

pub async fn load_extraction<S: KeyValueStore>(store: &S) -> Result<StoredExtraction> {
    let items = store
        .get_items(&[CLEANED_TEXT, LAST_EXTRACTED_URL, LAST_EXTRACTED_TIME])
        .await?;
    Ok(serde_json::from_value(Value::Object(items))?)
}

pub async fn load_site_context<S: KeyValueStore>(store: &S) -> Result<StoredContext> {
    let items = store.get_items(&[SITE_CONTEXT, ORIGINAL_URL]).await?;
    Ok(serde_json::from_value(Value::Object(items))?)
}
