//! Utility modules
//!
//! Helpers that are not specific to layout or the DOM.

pub mod performance;

pub use performance::*;
