//! Import and directive collection for the merged file header.

use std::collections::{BTreeMap, BTreeSet, btree_map};

use indexmap::IndexMap;
use plugmerge_syntax::ImportKind;

use crate::classify::ImportStatement;

/// Deduplicates `using` directives across files.
///
/// File-scoped imports are grouped by kind, always in the order default,
/// static, alias. Each group is sorted on the directive without its `;`, so
/// `using System;` precedes `using System.Linq;`. Namespace-scoped imports
/// are kept in a separate block.
///
/// # Example
///
/// ```
/// use plugmerge_codegen::generation::ImportCollector;
/// use plugmerge_syntax::ImportKind;
///
/// let mut imports = ImportCollector::new();
/// imports.add_text(ImportKind::Default, "using System.Linq;");
/// imports.add_text(ImportKind::Default, "using System;");
/// imports.add_text(ImportKind::Default, "using System.Linq;");
///
/// let defaults: Vec<&str> = imports.group(ImportKind::Default).collect();
/// assert_eq!(defaults, vec!["using System;", "using System.Linq;"]);
/// ```
#[derive(Debug, Clone)]
pub struct ImportCollector {
    /// Import kind -> sort key -> normalized directive
    groups: IndexMap<ImportKind, BTreeMap<String, String>>,
    namespace_scoped: BTreeSet<String>,
    /// Namespace prefixes whose imports are dropped
    ignore_prefixes: Vec<String>,
    /// Namespaces dropped outright
    excluded: BTreeSet<String>,
}

impl Default for ImportCollector {
    fn default() -> Self {
        let groups = [ImportKind::Default, ImportKind::Static, ImportKind::Alias]
            .into_iter()
            .map(|kind| (kind, BTreeMap::new()))
            .collect();
        Self {
            groups,
            namespace_scoped: BTreeSet::new(),
            ignore_prefixes: Vec::new(),
            excluded: BTreeSet::new(),
        }
    }
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop imports whose name starts with any of `prefixes`.
    pub fn with_ignore_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_prefixes = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.is_empty())
            .collect();
        self
    }

    /// Drop imports whose name equals `namespace`.
    pub fn exclude(&mut self, namespace: &str) {
        self.excluded.insert(namespace.to_string());
    }

    /// Returns true if an import of `name` would be dropped.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.excluded.contains(name)
            || self
                .ignore_prefixes
                .iter()
                .any(|p| name.starts_with(p.as_str()))
    }

    /// Add a classified import. Returns false if it was filtered out.
    pub fn add(&mut self, import: &ImportStatement) -> bool {
        if self.is_ignored(&import.name) {
            return false;
        }
        if import.namespace_scoped {
            self.namespace_scoped.insert(import.text.clone());
        } else {
            self.add_text(import.kind, &import.text);
        }
        true
    }

    /// Add a file-scoped directive without filtering.
    pub fn add_text(&mut self, kind: ImportKind, text: &str) {
        self.groups
            .entry(kind)
            .or_default()
            .insert(sort_key(text).to_string(), text.to_string());
    }

    /// Add every import in `imports`.
    pub fn extend<'a>(&mut self, imports: impl IntoIterator<Item = &'a ImportStatement>) {
        for import in imports {
            self.add(import);
        }
    }

    /// Sorted directives of one file-scoped group.
    pub fn group(&self, kind: ImportKind) -> impl Iterator<Item = &str> {
        self.groups
            .get(&kind)
            .into_iter()
            .flat_map(BTreeMap::values)
            .map(String::as_str)
    }

    /// File-scoped groups in output order.
    pub fn groups(
        &self,
    ) -> impl Iterator<Item = (ImportKind, btree_map::Values<'_, String, String>)> {
        self.groups.iter().map(|(kind, group)| (*kind, group.values()))
    }

    fn is_file_scoped(&self, text: &str) -> bool {
        self.groups
            .values()
            .any(|group| group.get(sort_key(text)).is_some_and(|t| t == text))
    }

    /// Namespace-scoped directives not already written at file scope.
    pub fn namespace_block(&self) -> impl Iterator<Item = &str> {
        self.namespace_scoped
            .iter()
            .filter(|text| !self.is_file_scoped(text))
            .map(String::as_str)
    }
}

fn sort_key(text: &str) -> &str {
    text.trim_end().trim_end_matches(';').trim_end()
}

/// Deduplicated, sorted header directives (`//Requires:`, `//Reference:`, `#define`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveCollector {
    requires: BTreeSet<String>,
    references: BTreeSet<String>,
    defines: BTreeSet<String>,
}

impl DirectiveCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_requires<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::insert_all(&mut self.requires, values);
    }

    pub fn add_references<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::insert_all(&mut self.references, values);
    }

    pub fn add_defines<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::insert_all(&mut self.defines, values);
    }

    fn insert_all<I, S>(set: &mut BTreeSet<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        set.extend(
            values
                .into_iter()
                .map(|v| v.as_ref().trim().to_string())
                .filter(|v| !v.is_empty()),
        );
    }

    pub fn requires(&self) -> impl Iterator<Item = &str> {
        self.requires.iter().map(String::as_str)
    }

    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(String::as_str)
    }

    pub fn defines(&self) -> impl Iterator<Item = &str> {
        self.defines.iter().map(String::as_str)
    }
}
