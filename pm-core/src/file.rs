use std::path::{Path, PathBuf};

use eyre::{Context, Result};

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Outcome of [`File::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// The file already held exactly this content
    Unchanged,
    /// The file exists and the rules forbid replacing it
    Skipped,
}

/// Text destined for one path on disk.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// A file that replaces whatever is at `path`.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Returns true if the file on disk already holds this content.
    pub fn is_current(&self) -> bool {
        std::fs::read_to_string(&self.path).is_ok_and(|existing| existing == self.content)
    }

    /// Write according to the rules, creating parent directories.
    ///
    /// Identical content is never rewritten, so plugin hosts watching the
    /// destination do not reload an unchanged plugin.
    pub fn write(&self) -> Result<WriteResult> {
        match self.rules.overwrite {
            Overwrite::IfMissing if self.exists() => Ok(WriteResult::Skipped),
            _ if self.is_current() => Ok(WriteResult::Unchanged),
            _ => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
        }
    }
}

/// Controls how [`File::write`] treats an existing file.
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl FileRules {
    /// Never replace an existing file.
    pub fn if_missing() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Merged output
    #[default]
    Always,
    /// Configuration files
    IfMissing,
}
