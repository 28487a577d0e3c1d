//! Renaming of plugin classes, used to align a framework with the plugin it
//! is bundled into.

use std::path::Path;

use eyre::{Context, Result};
use plugmerge_config::PlatformSettings;
use plugmerge_core::File;
use plugmerge_syntax::{CSharpParser, DeclarationKind, ParsedSource, SourceParser};
use tracing::info;

/// Replace the identifier of every class deriving from a plugin base with `new_name`.
///
/// Returns `None` when `text` declares no such class.
pub fn rename_plugin_class(
    text: &str,
    parsed: &ParsedSource,
    platform: &PlatformSettings,
    new_name: &str,
) -> Option<String> {
    let mut spans: Vec<_> = parsed
        .types
        .iter()
        .filter(|ty| ty.kind == DeclarationKind::Class)
        .filter(|ty| ty.base_types.iter().any(|b| platform.is_plugin_base(b)))
        .map(|ty| ty.name_span)
        .collect();
    if spans.is_empty() {
        return None;
    }

    spans.sort_by_key(|span| std::cmp::Reverse(span.start));
    let mut renamed = text.to_string();
    for span in spans {
        if text.get(span.start..span.end).is_some() {
            renamed.replace_range(span.start..span.end, new_name);
        }
    }
    Some(renamed)
}

/// Rename the plugin class declared in `path` in place.
///
/// Returns false, leaving the file untouched, when it declares no plugin class.
pub fn rename_file(path: &Path, new_name: &str, platform: &PlatformSettings) -> Result<bool> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
    let parsed = CSharpParser::new()?
        .parse(&text)
        .wrap_err_with(|| format!("failed to parse '{}'", path.display()))?;

    let Some(renamed) = rename_plugin_class(&text, &parsed, platform, new_name) else {
        return Ok(false);
    };
    File::new(path, renamed).write()?;
    info!("Renamed plugin class in {} to {}", path.display(), new_name);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use plugmerge_config::Platform;
    use tempfile::TempDir;

    use super::*;

    fn platform() -> PlatformSettings {
        PlatformSettings::new(Platform::Oxide, "")
    }

    fn rename(text: &str, name: &str) -> Option<String> {
        let parsed = CSharpParser::new().unwrap().parse(text).unwrap();
        rename_plugin_class(text, &parsed, &platform(), name)
    }

    #[test]
    fn test_rename_plugin_class() {
        let text = "namespace Oxide.Plugins\n{\n    public partial class Framework : RustPlugin\n    {\n        class Framework2 { }\n    }\n}\n";
        let renamed = rename(text, "MyPlugin").unwrap();
        assert_eq!(
            renamed,
            "namespace Oxide.Plugins\n{\n    public partial class MyPlugin : RustPlugin\n    {\n        class Framework2 { }\n    }\n}\n"
        );
    }

    #[test]
    fn test_rename_leaves_other_classes() {
        let text = "namespace Oxide.Plugins\n{\n    public class Config { }\n    public class Lib : CovalencePlugin { }\n}\n";
        let renamed = rename(text, "Markers").unwrap();
        assert!(renamed.contains("public class Config { }"));
        assert!(renamed.contains("public class Markers : CovalencePlugin { }"));
    }

    #[test]
    fn test_rename_without_plugin_class() {
        assert!(rename("namespace Oxide.Plugins { class Config { } }", "Markers").is_none());
    }

    #[test]
    fn test_rename_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Framework.cs");
        std::fs::write(&path, "namespace Oxide.Plugins { public class Lib : RustPlugin { } }").unwrap();

        assert!(rename_file(&path, "Markers", &platform()).unwrap());
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "namespace Oxide.Plugins { public class Markers : RustPlugin { } }");

        let other = temp.path().join("Config.cs");
        std::fs::write(&other, "class Config { }").unwrap();
        assert!(!rename_file(&other, "Markers", &platform()).unwrap());
    }
}
