//! StackEm WASM API
//!
//! The JavaScript-facing surface:
//!
//! - `stackem`: the `StackEm` class (build, remove, resize binding)
//! - `layout`: `computeLayout` for callers that measure items themselves
//! - `helpers`: serialization and timing shared by the above

pub mod helpers;
pub mod layout;
pub mod stackem;

pub use layout::compute_layout_js;
pub use stackem::StackEm;
