use thiserror::Error;

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, SyntaxError>;

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("failed to load C# grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no syntax tree")]
    ParseFailed,
}
