//! Core utilities and types for plugmerge.
//!
//! This crate provides file output and the path/string helpers used across
//! the plugmerge crates.

mod file;
mod paths;
mod utils;

// File operations
pub use file::{File, FileRules, Overwrite, WriteResult};
// Path helpers
pub use paths::{normalize, region_label, to_full_path};
// String utilities
pub use utils::{
    collapse_whitespace, contains_ignore_ascii_case, is_identifier, remove_ignore_ascii_case,
    to_identifier, unquote,
};
