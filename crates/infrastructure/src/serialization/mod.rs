//! Stable JSON for collection and settings files.
//!
//! Output is 2-space indented, UTF-8 without BOM, and ends with a newline.
//! Field order follows the model (`IndexMap` keeps user order), so saving
//! an unchanged collection produces an identical file.

mod json;

pub use json::*;
