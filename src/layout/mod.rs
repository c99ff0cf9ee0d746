//! Column layout
//!
//! Pure computation of column assignments and positions. Nothing in here
//! touches the DOM.

pub mod engine;

pub use engine::{compute_layout, Grid, Layout};
