//! Layout engine exposed to JavaScript
//!
//! Lets callers run the column layout on geometry they measured themselves.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, serialize};
use crate::layout::compute_layout;
use crate::models::ItemBox;

/// Compute column positions for measured items
///
/// # Parameters
/// - `items`: array of `{ naturalTop, naturalLeft, outerHeight, marginBottom }`
/// - `columns`: column count, at least 1
/// - `keep_order`: place item `i` in column `i % columns` instead of the
///   shortest column
///
/// # Returns
/// `{ positions: [{ column, left, top }], containerHeight }`
#[wasm_bindgen(js_name = computeLayout)]
pub fn compute_layout_js(
    items: JsValue,
    columns: u32,
    keep_order: bool,
) -> Result<JsValue, JsValue> {
    let items: Vec<ItemBox> = deserialize(items, "computeLayout items")?;

    let layout = compute_layout(&items, columns, keep_order).map_err(|e| {
        log::error!("computeLayout: {}", e);
        JsValue::from_str(&e.to_string())
    })?;

    serialize(&layout, "computeLayout result")
}
