//! Merge configuration model.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use plugmerge_core::to_full_path;
use serde::{Deserialize, Serialize};

use crate::{Platform, PlatformSettings};

/// Root of a merge configuration file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PluginMergeConfig {
    /// Platform the merged plugin targets
    pub platform: Platform,

    /// Merge settings
    pub merge: MergeConfig,
}

impl PluginMergeConfig {
    /// Platform settings with the namespace override applied.
    pub fn platform_settings(&self) -> PlatformSettings {
        PlatformSettings::new(self.platform, &self.merge.namespace_override)
    }

    /// Resolve every configured path against `base` (the config file's directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        let merge = &mut self.merge;
        for paths in [
            &mut merge.input_paths,
            &mut merge.output_paths,
            &mut merge.ignore_paths,
            &mut merge.ignore_files,
        ] {
            for path in paths.iter_mut() {
                *path = to_full_path(base, path.as_path());
            }
        }
    }
}

/// Kind of file produced by a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatorMode {
    /// A standalone plugin
    #[default]
    Plugin,
    /// A framework meant to be bundled into other plugins
    Framework,
    /// A framework that is merged into a plugin as a partial class
    MergeFramework,
}

impl CreatorMode {
    /// Returns the mode identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatorMode::Plugin => "plugin",
            CreatorMode::Framework => "framework",
            CreatorMode::MergeFramework => "merge_framework",
        }
    }

    /// Framework modes comment out the plugin attributes.
    pub fn is_framework(&self) -> bool {
        matches!(self, CreatorMode::Framework | CreatorMode::MergeFramework)
    }
}

impl fmt::Display for CreatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CreatorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "plugin" => Ok(CreatorMode::Plugin),
            "framework" => Ok(CreatorMode::Framework),
            "merge_framework" | "mergeframework" => Ok(CreatorMode::MergeFramework),
            _ => Err(format!(
                "unknown creator mode '{}', expected 'plugin', 'framework' or 'merge_framework'",
                s
            )),
        }
    }
}

/// Settings controlling what is merged and how.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Name of the merged plugin class (and output file)
    pub plugin_name: String,
    pub creator_mode: CreatorMode,
    /// Replaces the platform namespace when non-empty
    pub namespace_override: String,
    /// Directories scanned for source files
    pub input_paths: Vec<PathBuf>,
    /// Directories the merged file is written to
    pub output_paths: Vec<PathBuf>,
    /// `//Reference:` directives
    pub references: Vec<String>,
    /// `//Requires:` directives
    pub requires: Vec<String>,
    /// `#define` symbols
    pub defines: Vec<String>,
    pub ignore_paths: Vec<PathBuf>,
    pub ignore_files: Vec<PathBuf>,
    /// Namespace prefixes whose imports are dropped
    pub ignore_namespaces: Vec<String>,
    /// Leading path segments removed from region labels
    pub region_path_trim_left: usize,
    /// Trailing path segments removed from region labels
    pub region_path_trim_right: usize,
    pub code_style: CodeStyle,
    pub preprocessor_directives: Vec<PreprocessorDirective>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            plugin_name: "MyPluginName".to_string(),
            creator_mode: CreatorMode::default(),
            namespace_override: String::new(),
            input_paths: vec![PathBuf::from("./")],
            output_paths: vec![PathBuf::from("./build")],
            references: Vec::new(),
            requires: Vec::new(),
            defines: vec!["DEBUG".to_string()],
            ignore_paths: vec![PathBuf::from("./IgnoreThisPath")],
            ignore_files: vec![PathBuf::from("./IgnoreThisFile.cs")],
            ignore_namespaces: vec!["IgnoreThisNameSpace".to_string()],
            region_path_trim_left: 0,
            region_path_trim_right: 0,
            code_style: CodeStyle::default(),
            preprocessor_directives: vec![PreprocessorDirective::default()],
        }
    }
}

impl MergeConfig {
    /// Directives that must be defined for the merged plugin to compile.
    pub fn enabled_directives(&self) -> Vec<&PreprocessorDirective> {
        self.preprocessor_directives
            .iter()
            .filter(|d| d.enabled)
            .collect()
    }

    /// Full paths of the files a merge of `plugin_name` writes, one per output directory.
    pub fn final_files(&self, plugin_name: &str) -> Vec<PathBuf> {
        let file_name = format!("{plugin_name}.cs");
        self.output_paths
            .iter()
            .map(|dir| dir.join(&file_name))
            .collect()
    }
}

/// Formatting of the merged output.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodeStyle {
    /// Character repeated for each indent
    pub indent_char: char,
    /// Characters written per indent level
    pub indent_amount: usize,
    /// Levels added or removed per brace
    pub indent_multiplier: usize,
    pub new_line: String,
    /// Wrap each merged file in a `#region` named after its path
    pub write_file_region: bool,
    pub keep_comments: bool,
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            indent_char: ' ',
            indent_amount: 4,
            indent_multiplier: 1,
            new_line: "\n".to_string(),
            write_file_region: true,
            keep_comments: true,
        }
    }
}

/// A conditional compilation symbol the merged plugin requires.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreprocessorDirective {
    pub directive: String,
    /// Compiler error shown when the directive is missing
    pub message: String,
    pub enabled: bool,
}

impl Default for PreprocessorDirective {
    fn default() -> Self {
        Self {
            directive: "OXIDE".to_string(),
            message: "This plugin requires OXIDE".to_string(),
            enabled: false,
        }
    }
}
