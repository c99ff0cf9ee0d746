//! Error types for stacking
//!
//! Layout itself never fails on bad geometry (unreadable values degrade to
//! zero); these errors cover misconfiguration and DOM access failures.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised by the layout engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A grid needs at least one column
    #[error("column count must be at least 1")]
    NoColumns,
}

/// Errors raised by the stack controller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StackError {
    /// A required option was missing or empty
    #[error("missing required option: {0}")]
    MissingOption(&'static str),

    /// The options value could not be read
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// No element matched the wrapper selector
    #[error("no element matches wrapper selector '{0}'")]
    WrapperNotFound(String),

    /// A selector was rejected by the document
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    /// A DOM read or write failed
    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl StackError {
    /// Wrap a JS exception thrown by a DOM call
    pub fn dom(context: &str, err: JsValue) -> Self {
        StackError::Dom(format!("{}: {:?}", context, err))
    }
}

impl From<StackError> for JsValue {
    fn from(err: StackError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
