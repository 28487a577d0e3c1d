use indexmap::{IndexMap, IndexSet};

use super::buckets::Buckets;
use crate::classify::ClassifiedFile;

/// Merged-output locations of the type names extension code may reference.
#[derive(Debug, Clone, Default)]
pub(crate) struct AliasTable {
    /// Type name -> fully qualified location, first declaration wins
    targets: IndexMap<String, String>,
}

impl AliasTable {
    /// Collect every non-extension, non-plugin type name except `plugin_name`.
    ///
    /// Types end up nested in the plugin class, except data files in
    /// merge-framework mode which are written at namespace level.
    pub fn build(
        files: &[ClassifiedFile],
        buckets: &Buckets,
        namespace: &str,
        plugin_name: &str,
        data_at_namespace_level: bool,
    ) -> Self {
        let mut targets = IndexMap::new();
        for (file_index, file) in files.iter().enumerate() {
            let nested = !(data_at_namespace_level && buckets.is_data(file_index));
            for ty in &file.types {
                if ty.is_extension() || ty.is_plugin() || ty.name == plugin_name {
                    continue;
                }
                targets.entry(ty.name.clone()).or_insert_with(|| {
                    if nested {
                        format!("{namespace}.{plugin_name}.{}", ty.name)
                    } else {
                        format!("{namespace}.{}", ty.name)
                    }
                });
            }
        }
        Self { targets }
    }

    /// Aliases needed by the extension fragments, each name once.
    ///
    /// A name is needed when the text of a file holding an extension
    /// fragment contains it.
    pub fn resolve<'a>(
        &'a self,
        extension_texts: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(&'a str, &'a str)> {
        let mut emitted: IndexSet<&str> = IndexSet::new();
        let mut aliases = Vec::new();
        for text in extension_texts {
            for (name, target) in &self.targets {
                if text.contains(name.as_str()) && emitted.insert(name.as_str()) {
                    aliases.push((name.as_str(), target.as_str()));
                }
            }
        }
        aliases
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
