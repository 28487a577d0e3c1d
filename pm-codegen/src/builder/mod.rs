//! Code emission building blocks.
//!
//! - [`CodeWriter`] - append-only writer for merged C# code
//! - [`IndentStyle`] - indentation configuration

mod code_writer;
mod indent;

pub use code_writer::CodeWriter;
pub use indent::IndentStyle;
