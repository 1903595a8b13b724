//! Browser bindings (feature `wasm`)
//!
//! [`BrowserCalculator`] is the wasm-bindgen entry point; page scripts
//! forward button clicks and key presses to it. [`DomSink`] renders
//! into the `#display`, `#error` and `#history` elements.

mod browser;
mod dom;

pub use browser::BrowserCalculator;
pub use dom::{DomSink, DISPLAY_ID, ERROR_ID, HISTORY_ID};
