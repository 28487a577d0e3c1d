//! Structural C# parsing for plugmerge.
//!
//! [`SourceParser`] turns source text into a [`ParsedSource`]: imports,
//! top-level declarations with byte spans, and the comment/directive stream
//! tagged with its syntactic parent. [`CSharpParser`] implements it with the
//! tree-sitter C# grammar.

mod csharp;
mod error;
mod model;

pub use csharp::CSharpParser;
pub use error::{Result, SyntaxError};
pub use model::{
    DeclarationKind, ImportKind, ParsedAttribute, ParsedImport, ParsedSource, ParsedType, Span,
    Trivia, TriviaKind, TriviaParent,
};

/// Parses one source file into its structural model.
pub trait SourceParser {
    fn parse(&mut self, text: &str) -> Result<ParsedSource>;
}
