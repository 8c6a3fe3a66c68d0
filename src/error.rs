//! Structured error types for gridview.
//!
//! The core itself models user-facing failure as a no-op or a canceled hook
//! (see the crate docs); `GridError` only surfaces at collaborator
//! boundaries — row/column ingestion, data source writes, strict HTML parsing.

/// All errors that can occur at gridview's collaborator boundaries.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// XML/HTML parsing error from quick-xml (clipboard fragments).
    #[error("Markup parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON (de)serialization error for row records or configuration.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown column property key.
    #[error("Unknown column: {0}")]
    Column(String),

    /// Row space has no initialized store.
    #[error("No store for row space: {0}")]
    Store(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
