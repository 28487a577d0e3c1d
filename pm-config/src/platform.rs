//! Target plugin platforms.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Plugin host the merged file is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Oxide
    #[default]
    Oxide,
    /// uMod
    Umod,
}

impl Platform {
    /// Returns the platform identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Oxide => "oxide",
            Platform::Umod => "umod",
        }
    }

    /// Namespace plugins live in on this platform.
    pub fn namespace(&self) -> &'static str {
        match self {
            Platform::Oxide => "Oxide.Plugins",
            Platform::Umod => "uMod.Plugins",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "oxide" => Ok(Platform::Oxide),
            "umod" => Ok(Platform::Umod),
            _ => Err(format!(
                "unknown platform '{}', expected 'oxide' or 'umod'",
                s
            )),
        }
    }
}

/// Resolved per-platform settings used while merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSettings {
    namespace: String,
}

impl PlatformSettings {
    /// Suffix of a base type that marks a class as the root plugin class.
    pub const PLUGIN_BASE_SUFFIX: &'static str = "Plugin";

    /// Settings for `platform`, with an optional namespace override.
    ///
    /// An empty override falls back to the platform namespace.
    pub fn new(platform: Platform, namespace_override: &str) -> Self {
        let namespace = match namespace_override.trim() {
            "" => platform.namespace().to_string(),
            custom => custom.to_string(),
        };
        Self { namespace }
    }

    /// Namespace the merged plugin is written into.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns true if a base type name marks its class as a plugin.
    pub fn is_plugin_base(&self, base_type: &str) -> bool {
        base_type.ends_with(Self::PLUGIN_BASE_SUFFIX)
    }
}
