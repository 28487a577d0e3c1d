use std::path::{Path, PathBuf};

use plugmerge_core::{File, FileRules, WriteResult};

use crate::{ConfigFormat, Error, PluginMergeConfig, Result};

/// A merge configuration file on disk and its parsed contents.
pub struct ConfigFile {
    path: PathBuf,
    config: PluginMergeConfig,
}

impl ConfigFile {
    /// Open, parse and validate a configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let format = ConfigFormat::from_path(&path);
        let filename = path.display().to_string();
        let config = PluginMergeConfig::from_str_with_format(&content, format, &filename)?;

        Ok(Self { path, config })
    }

    /// Write a default configuration to `path`.
    ///
    /// Fails with [`Error::AlreadyExists`] rather than overwriting an existing file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = ConfigFormat::from_path(&path);
        let config = PluginMergeConfig::default();
        let content = config.to_string_with_format(format)?;

        let file = File::new(&path, content.as_str()).with_rules(FileRules::if_missing());
        match file.write() {
            Ok(WriteResult::Written | WriteResult::Unchanged) => {}
            Ok(WriteResult::Skipped) => {
                return Err(Box::new(Error::AlreadyExists { path }));
            }
            Err(e) => {
                return Err(Box::new(Error::Write {
                    source: std::io::Error::other(e.to_string()),
                    path,
                }));
            }
        }

        Ok(Self { path, config })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that relative paths in the configuration are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Parsed configuration with every path made absolute.
    pub fn resolved(&self) -> PluginMergeConfig {
        let mut config = self.config.clone();
        config.resolve_paths(self.base_dir());
        config
    }
}
