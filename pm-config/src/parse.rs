//! Configuration parsing and serialization.

use std::{path::Path, str::FromStr};

use crate::{Error, PluginMergeConfig, Result, SourceContext};

/// On-disk format of a merge configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file extension: `.json`, `.yml`/`.yaml`, else TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Toml,
        }
    }
}

impl FromStr for PluginMergeConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, ConfigFormat::Toml, "merge.toml")
    }
}

impl PluginMergeConfig {
    /// Parse a configuration from a string with a filename for error reporting.
    pub fn from_str_with_format(content: &str, format: ConfigFormat, filename: &str) -> Result<Self> {
        parse_config(content, format, filename)
    }

    /// Serialize the configuration in the given format.
    pub fn to_string_with_format(&self, format: ConfigFormat) -> Result<String> {
        let serialized = match format {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
        };
        serialized.map_err(|message| Box::new(Error::Serialize { message }))
    }
}

/// Parse and validate a configuration.
pub fn parse_config(content: &str, format: ConfigFormat, filename: &str) -> Result<PluginMergeConfig> {
    let ctx = SourceContext::new(content, filename);
    let config: PluginMergeConfig = match format {
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| ctx.toml_error(e))?,
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| ctx.json_error(e))?,
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| ctx.yaml_error(e))?,
    };
    config.validate(&ctx)?;
    Ok(config)
}
