use std::path::PathBuf;

use plugmerge_syntax::SyntaxError;
use thiserror::Error;

/// Failures that abort a merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// No scanned file declares a class deriving from a plugin base.
    #[error("no plugin found in the merged files")]
    NoPluginFound,

    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },

    #[error("failed to initialize the C# parser: {0}")]
    Parser(String),
}
