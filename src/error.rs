/// Error type shared by the storage, messaging and browser glue layers
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("Tab error: {0}")]
    Tab(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, ExtensionError>;

impl From<serde_wasm_bindgen::Error> for ExtensionError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        ExtensionError::Serialization(e.to_string())
    }
}

impl From<ExtensionError> for JsValue {
    fn from(e: ExtensionError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Render a thrown JS value for an error message
pub fn describe_js(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
