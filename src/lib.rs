//! StackEm WASM Module
//!
//! Stacks a flat list of variable-height elements into equal-width columns,
//! placing each item under the currently shortest column (or in strict
//! reading order), and re-stacks when the window is resized.

pub mod api;
pub mod errors;
pub mod layout;
pub mod models;
pub mod stack;
pub mod utils;

// Re-export commonly used types
pub use api::StackEm;
pub use errors::{LayoutError, StackError};
pub use layout::{compute_layout, Grid, Layout};
pub use models::{ItemBox, ItemPosition, LeftOffset, StackOptions};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            return;
        }
    }

    log::info!("StackEm WASM module initialized");
}
