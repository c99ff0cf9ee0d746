//! Stack configuration
//!
//! Options arrive from JavaScript as a plain object. Scalar fields are read
//! through serde; `columns` may also be a function, so it is read
//! separately and invoked every time the column count is resolved.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};

use crate::errors::StackError;

/// Column count used when neither the options nor the container say otherwise
pub const DEFAULT_COLUMNS: u32 = 3;

/// Delay before a burst of resize events triggers a re-layout
pub const DEFAULT_RESIZE_DELAY_MS: i32 = 500;

/// Where the column count comes from
#[derive(Clone)]
pub enum ColumnSource {
    Fixed(u32),
    /// Evaluated on every layout pass
    Computed(Rc<dyn Fn() -> Option<u32>>),
}

impl ColumnSource {
    fn value(&self) -> Option<u32> {
        match self {
            ColumnSource::Fixed(n) => Some(*n),
            ColumnSource::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for ColumnSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSource::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            ColumnSource::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Scalar options as they appear on the JS object
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawOptions {
    #[serde(default)]
    pub wrapper_selector: String,
    #[serde(default)]
    pub item_selector: String,
    #[serde(default)]
    pub keep_order: bool,
    #[serde(default)]
    pub fix_heights: bool,
    #[serde(default = "default_true")]
    pub resize: bool,
    #[serde(default = "default_resize_delay")]
    pub resize_delay: i32,
}

fn default_true() -> bool {
    true
}

fn default_resize_delay() -> i32 {
    DEFAULT_RESIZE_DELAY_MS
}

/// Validated stack configuration
#[derive(Clone, Debug)]
pub struct StackOptions {
    pub wrapper_selector: String,
    pub item_selector: String,
    pub columns: Option<ColumnSource>,
    pub keep_order: bool,
    pub fix_heights: bool,
    pub resize: bool,
    pub resize_delay_ms: i32,
}

impl StackOptions {
    /// Options with the required selectors and every other field defaulted
    pub fn new(wrapper_selector: &str, item_selector: &str) -> Self {
        Self {
            wrapper_selector: wrapper_selector.to_string(),
            item_selector: item_selector.to_string(),
            columns: None,
            keep_order: false,
            fix_heights: false,
            resize: true,
            resize_delay_ms: DEFAULT_RESIZE_DELAY_MS,
        }
    }

    /// Validate the scalar options and attach a column source
    pub fn from_raw(raw: RawOptions, columns: Option<ColumnSource>) -> Result<Self, StackError> {
        if raw.wrapper_selector.trim().is_empty() {
            return Err(StackError::MissingOption("wrapperSelector"));
        }
        if raw.item_selector.trim().is_empty() {
            return Err(StackError::MissingOption("itemSelector"));
        }

        Ok(Self {
            wrapper_selector: raw.wrapper_selector,
            item_selector: raw.item_selector,
            columns,
            keep_order: raw.keep_order,
            fix_heights: raw.fix_heights,
            resize: raw.resize,
            resize_delay_ms: raw.resize_delay.max(0),
        })
    }

    /// Read options from a JS object
    pub fn from_js(value: &JsValue) -> Result<Self, StackError> {
        if !value.is_object() {
            return Err(StackError::InvalidOptions("expected an options object".to_string()));
        }

        let raw: RawOptions = serde_wasm_bindgen::from_value(value.clone())
            .map_err(|e| StackError::InvalidOptions(e.to_string()))?;

        let columns = js_sys::Reflect::get(value, &JsValue::from_str("columns"))
            .map_err(|e| StackError::InvalidOptions(format!("columns: {:?}", e)))?;

        Self::from_raw(raw, column_source_from_js(columns))
    }

    /// Resolve the column count for a pass
    pub fn resolve_columns(&self, attribute: Option<&str>) -> u32 {
        resolve_columns(self.columns.as_ref(), attribute)
    }
}

fn column_source_from_js(value: JsValue) -> Option<ColumnSource> {
    if let Some(n) = value.as_f64() {
        return Some(ColumnSource::Fixed(to_column_count(n)));
    }

    let func = value.dyn_into::<js_sys::Function>().ok()?;
    Some(ColumnSource::Computed(Rc::new(move || {
        match func.call0(&JsValue::NULL) {
            Ok(result) => result.as_f64().map(to_column_count),
            Err(e) => {
                log::warn!("columns callback threw: {:?}", e);
                None
            }
        }
    })))
}

fn to_column_count(n: f64) -> u32 {
    if n.is_finite() && n >= 1.0 {
        n.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// First usable column count among the option, the container attribute and
/// the default. Zero counts are skipped.
pub fn resolve_columns(source: Option<&ColumnSource>, attribute: Option<&str>) -> u32 {
    source
        .and_then(ColumnSource::value)
        .filter(|&n| n > 0)
        .or_else(|| {
            attribute
                .and_then(|a| a.trim().parse::<f64>().ok())
                .map(to_column_count)
                .filter(|&n| n > 0)
        })
        .unwrap_or(DEFAULT_COLUMNS)
}
