//! Data models for stacking
//!
//! Item geometry and placement values exchanged with the layout engine,
//! plus the stack configuration.

pub mod item;
pub mod options;

pub use item::{ItemBox, ItemPosition, LeftOffset};
pub use options::{resolve_columns, ColumnSource, RawOptions, StackOptions};
