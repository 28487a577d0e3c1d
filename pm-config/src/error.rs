use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for configuration operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the raw configuration text and its filename so that every
/// diagnostic can point back into the file the user edited.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "merge.toml");
/// ctx.validation_error_at("indent_amount must be greater than zero", None);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a json error.
    ///
    /// serde_json reports 1-based line/column pairs; they are converted to a
    /// byte offset so miette can underline the failing position.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = offset_of(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 0)));
        Box::new(Error::Json {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a yaml error.
    pub fn yaml_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|location| SourceSpan::from((location.index(), 0)));
        Box::new(Error::Yaml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error pointing at a span of the source.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }
}

fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (index, text) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let column = column.saturating_sub(1).min(text.len());
            return Some(offset + column);
        }
        offset += text.len();
    }
    None
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'plugmerge init' to create a merge configuration"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration already exists at '{path}'")]
    #[diagnostic(
        code(plugmerge::already_exists),
        help("remove the file or choose another name with --filename")
    )]
    AlreadyExists { path: PathBuf },

    #[error("failed to parse merge configuration")]
    #[diagnostic(code(plugmerge::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse merge configuration")]
    #[diagnostic(code(plugmerge::parse_error))]
    Json {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse merge configuration")]
    #[diagnostic(code(plugmerge::parse_error))]
    Yaml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize merge configuration: {message}")]
    #[diagnostic(code(plugmerge::serialize_error))]
    Serialize { message: String },

    #[error("{message}")]
    #[diagnostic(code(plugmerge::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} '{name}'")]
    #[diagnostic(help(
        "use only letters, numbers, and underscores, starting with a letter or underscore"
    ))]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a valid C# identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },
}
