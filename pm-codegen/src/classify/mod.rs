//! Per-file classification.
//!
//! A parsed file is sorted into merge roles from its sentinel comments,
//! its attributes and the base lists of its declarations:
//!
//! - [`FileSettings`] - role flags of files and fragments
//! - [`PluginData`] - plugin metadata from attributes or sentinel comments
//! - [`ClassifiedFile`], [`TypeFragment`], [`ImportStatement`] - the classified view
//! - [`classify`] - builds a [`ClassifiedFile`] from a [`ParsedSource`](plugmerge_syntax::ParsedSource)

mod classifier;
mod file;
mod plugin_data;
mod settings;

pub use classifier::{ClassifyOptions, classify};
pub use file::{ClassifiedFile, DEFAULT_ORDER, FragmentKind, ImportStatement, TypeFragment};
pub use plugin_data::PluginData;
pub use settings::FileSettings;

/// Marks a file as a framework.
pub const FRAMEWORK_MARKER: &str = "//Define:Framework";
/// Removes a file from the merge.
pub const EXCLUDE_MARKER: &str = "//Define:ExcludeFile";
/// Marks a type as an extension method holder.
pub const EXTENSION_MARKER: &str = "//Define:ExtensionMethods";
/// Followed by the file's position in the merged body.
pub const FILE_ORDER_PREFIX: &str = "//Define:FileOrder=";
pub const REFERENCE_PREFIX: &str = "//Reference:";
pub const REQUIRES_PREFIX: &str = "//Requires:";
