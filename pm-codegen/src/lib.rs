//! Merging of multi-file Oxide/uMod plugins into a single C# source file.
//!
//! # Module Organization
//!
//! - [`classify`] - per-file role classification (FileSettings, ClassifiedFile, etc.)
//! - [`builder`] - code emission (CodeWriter, IndentStyle)
//! - [`generation`] - header collection (ImportCollector, DirectiveCollector)
//! - [`creator`] - merge orchestration (FileCreator)
//! - [`pipeline`] - scan, classify, create and write (MergeHandler, FileScanner)
//! - [`rename`] - plugin class renaming

pub mod builder;
pub mod classify;
pub mod creator;
mod error;
pub mod generation;
pub mod pipeline;
pub mod rename;

pub use creator::FileCreator;
pub use error::MergeError;
pub use pipeline::{MergeHandler, MergeOutput, write_outputs};
