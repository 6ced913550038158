//! Output formatting for status replies.
//!
//! - [`terminal`] - Terminal output with colors

mod terminal;

pub use terminal::{format_field, format_status};
