//! Stack controller and its DOM plumbing
//!
//! - `controller`: host-independent build/remove lifecycle
//! - `dom`: `web-sys` host over a real container element
//! - `resize`: debounce state for resize-triggered re-layout

pub mod controller;
pub mod dom;
pub mod resize;

pub use controller::{StackHost, StackState, Stacker};
pub use dom::DomHost;
pub use resize::{should_relayout, Debounce};
