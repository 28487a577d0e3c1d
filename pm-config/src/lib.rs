//! Merge configuration for plugmerge.
//!
//! A configuration is stored as TOML (default), JSON or YAML, selected by
//! file extension. Parse and validation failures are reported as [`miette`]
//! diagnostics pointing into the configuration source.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod file;
mod parse;
mod platform;
mod validate;

pub use config::{CodeStyle, CreatorMode, MergeConfig, PluginMergeConfig, PreprocessorDirective};
pub use error::{Error, Result, SourceContext};
pub use file::ConfigFile;
pub use parse::{ConfigFormat, parse_config};
pub use platform::{Platform, PlatformSettings};
