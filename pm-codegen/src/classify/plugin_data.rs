use plugmerge_core::unquote;

/// Metadata of a plugin or framework, taken from its `Info`/`Description`
/// attributes or their commented-out forms.
///
/// Attribute arguments are kept as written, quotes included, so constants
/// and verbatim strings are emitted unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginData {
    pub title: String,
    pub author: String,
    pub version: String,
    pub description: String,
    /// Namespace of the plugin class
    pub namespace: String,
    /// Name of the plugin class
    pub class_name: String,
    /// Base list of the plugin class, as written
    pub base_types: Vec<String>,
}

impl PluginData {
    pub fn set_info(&mut self, title: &str, author: &str, version: &str) {
        self.title = title.to_string();
        self.author = author.to_string();
        self.version = version.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn set_plugin_type(&mut self, namespace: &str, class_name: &str, base_types: &[String]) {
        self.namespace = namespace.to_string();
        self.class_name = class_name.to_string();
        self.base_types = base_types.to_vec();
    }

    /// The title without its string literal quotes.
    pub fn display_title(&self) -> &str {
        unquote(&self.title)
    }

    /// Both a title and a description are known.
    pub fn has_metadata(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}
