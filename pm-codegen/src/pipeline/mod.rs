//! End-to-end merge: scan, classify in parallel, create, write.
//!
//! - [`FileScanner`] / [`ScannedFile`] - source discovery
//! - [`MergeHandler`] - runs a merge from a resolved configuration
//! - [`write_outputs`] - writes the merged text to every destination

mod handler;
mod scanner;

pub use handler::{MergeHandler, MergeOutput, write_outputs};
pub use scanner::{FileScanner, ScannedFile};
