//! Classified view of a scanned source file.

use std::path::PathBuf;

use plugmerge_syntax::{ImportKind, ParsedImport, Span};

use super::{FileSettings, PluginData};

/// Default position of a file in the merged body.
pub const DEFAULT_ORDER: i32 = 1000;

/// Whether a fragment is a type or a delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Type,
    Delegate,
}

/// A top-level declaration sliced out of its file on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFragment {
    pub name: String,
    pub namespace: String,
    pub kind: FragmentKind,
    pub span: Span,
    /// Interior of the braces
    pub body: Option<Span>,
    pub settings: FileSettings,
}

impl TypeFragment {
    /// Code of the fragment within `text`, trimmed.
    ///
    /// Plugin fragments yield only the interior of their braces so their
    /// members can be written into the merged plugin class.
    pub fn code<'a>(&self, text: &'a str) -> &'a str {
        let span = match self.body {
            Some(body) if self.is_plugin() => body,
            _ => self.span,
        };
        span.slice(text).trim()
    }

    pub fn has_code(&self, text: &str) -> bool {
        !self.code(text).is_empty()
    }

    pub fn add_settings(&mut self, settings: FileSettings) {
        self.settings |= settings;
    }

    pub fn is_plugin(&self) -> bool {
        self.settings.is_plugin()
    }

    pub fn is_extension(&self) -> bool {
        self.settings.is_extension()
    }
}

/// A `using` directive of a classified file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportStatement {
    /// Normalized directive, e.g. `using System.Linq;`
    pub text: String,
    /// Referenced namespace or type
    pub name: String,
    pub kind: ImportKind,
    pub namespace_scoped: bool,
}

impl From<&ParsedImport> for ImportStatement {
    fn from(import: &ParsedImport) -> Self {
        Self {
            text: import.text.clone(),
            name: import.name.clone(),
            kind: import.kind,
            namespace_scoped: import.namespace_scoped,
        }
    }
}

/// A source file with its declarations sorted into merge roles.
#[derive(Debug, Clone)]
pub struct ClassifiedFile {
    pub path: PathBuf,
    /// Label of the `#region` wrapping the file in merged output
    pub region_label: String,
    /// Position in scan order
    pub index: usize,
    pub text: String,
    pub settings: FileSettings,
    pub order: i32,
    pub plugin_data: Option<PluginData>,
    pub types: Vec<TypeFragment>,
    pub imports: Vec<ImportStatement>,
    pub defines: Vec<String>,
    pub references: Vec<String>,
    pub requires: Vec<String>,
}

impl ClassifiedFile {
    pub fn new(path: PathBuf, region_label: String, index: usize, text: String) -> Self {
        Self {
            path,
            region_label,
            index,
            text,
            settings: FileSettings::NONE,
            order: DEFAULT_ORDER,
            plugin_data: None,
            types: Vec::new(),
            imports: Vec::new(),
            defines: Vec::new(),
            references: Vec::new(),
            requires: Vec::new(),
        }
    }

    pub fn is_plugin(&self) -> bool {
        self.settings.is_plugin()
    }

    pub fn is_framework(&self) -> bool {
        self.settings.is_framework()
    }

    pub fn is_excluded(&self) -> bool {
        self.settings.is_excluded()
    }

    /// Trimmed code of every non-extension fragment that has any.
    pub fn writable_code(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .filter(|t| !t.is_extension())
            .map(|t| t.code(&self.text))
            .filter(|code| !code.is_empty())
    }

    /// Returns true if the file contributes a region to the merged body.
    pub fn has_writable_code(&self) -> bool {
        let any_code = self.types.iter().any(|t| t.has_code(&self.text));
        let all_extensions = self.types.iter().all(|t| t.is_extension());
        any_code && !all_extensions
    }
}
