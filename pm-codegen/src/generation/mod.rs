//! Collection of the merged file header.
//!
//! - [`ImportCollector`] - `using` directive deduplication and filtering
//! - [`DirectiveCollector`] - `//Requires:`, `//Reference:` and `#define` deduplication

mod imports;

pub use imports::{DirectiveCollector, ImportCollector};
