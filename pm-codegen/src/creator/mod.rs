//! Merge orchestration.
//!
//! [`FileCreator`] locates the plugin file, buckets the classified files and
//! drives a [`CodeWriter`] through the sections of the merged plugin.

mod aliases;
mod buckets;

use plugmerge_config::{CreatorMode, PlatformSettings, PluginMergeConfig, PreprocessorDirective};
use plugmerge_core::to_identifier;
use plugmerge_syntax::ImportKind;
use tracing::debug;

use self::{aliases::AliasTable, buckets::Buckets};
use crate::{
    builder::CodeWriter,
    classify::{ClassifiedFile, EXTENSION_MARKER, PluginData},
    error::MergeError,
    generation::{DirectiveCollector, ImportCollector},
};

/// Version written into the header comment of merged files.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the merged plugin source from classified files.
pub struct FileCreator<'c> {
    config: &'c PluginMergeConfig,
    platform: PlatformSettings,
    plugin_name: String,
}

impl<'c> FileCreator<'c> {
    pub fn new(config: &'c PluginMergeConfig) -> Self {
        Self {
            config,
            platform: config.platform_settings(),
            plugin_name: config.merge.plugin_name.trim().to_string(),
        }
    }

    /// Name of the merged plugin class.
    ///
    /// Empty until [`create`](Self::create) has resolved it when none is configured.
    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    /// Merge `files` into one source text.
    ///
    /// `files` must be in merge order with excluded files removed. The
    /// fragment declaring the plugin class is flagged as a plugin fragment.
    pub fn create(&mut self, files: &mut [ClassifiedFile]) -> Result<String, MergeError> {
        let plugin = find_plugin(files)?;
        if self.plugin_name.is_empty() {
            self.plugin_name = resolve_plugin_name(files, &plugin);
            debug!("Resolved plugin name: {}", self.plugin_name);
        }

        let buckets = Buckets::sort(files, &plugin);
        debug!(
            "Bucketed files: {} plugin, {} data, {} framework, {} extension types",
            buckets.plugin.len(),
            buckets.data.len(),
            buckets.framework.len(),
            buckets.extensions.len()
        );

        let emitter = Emitter {
            config: self.config,
            mode: self.config.merge.creator_mode,
            namespace: self.platform.namespace(),
            plugin_name: &self.plugin_name,
            plugin: &plugin,
            files,
            buckets: &buckets,
            writer: CodeWriter::new(&self.config.merge.code_style, &self.plugin_name),
        };
        Ok(emitter.emit())
    }
}

/// Metadata of the first plugin file in scan order.
fn find_plugin(files: &[ClassifiedFile]) -> Result<PluginData, MergeError> {
    let first = files
        .iter()
        .filter(|f| f.is_plugin())
        .min_by_key(|f| f.index)
        .ok_or(MergeError::NoPluginFound)?;
    for other in files.iter().filter(|f| f.is_plugin() && f.index != first.index) {
        debug!(
            "Ignoring plugin class in {}; using {}",
            other.path.display(),
            first.path.display()
        );
    }
    first.plugin_data.clone().ok_or(MergeError::NoPluginFound)
}

/// Plugin name derived from the first file carrying a title and description.
fn resolve_plugin_name(files: &[ClassifiedFile], plugin: &PluginData) -> String {
    files
        .iter()
        .filter_map(|f| f.plugin_data.as_ref())
        .find(|data| data.has_metadata())
        .map(|data| match to_identifier(data.display_title()) {
            name if name.is_empty() => data.class_name.clone(),
            name => name,
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| plugin.class_name.clone())
}

/// Write the Info and Description attributes that `data` carries.
fn write_metadata(writer: &mut CodeWriter, data: &PluginData, commented: bool) {
    if !data.title.is_empty() {
        writer.write_info_attribute(&data.title, &data.author, &data.version, commented);
    }
    if !data.description.is_empty() {
        writer.write_description_attribute(&data.description, commented);
    }
}

struct Emitter<'a> {
    config: &'a PluginMergeConfig,
    mode: CreatorMode,
    namespace: &'a str,
    plugin_name: &'a str,
    plugin: &'a PluginData,
    files: &'a [ClassifiedFile],
    buckets: &'a Buckets,
    writer: CodeWriter,
}

impl Emitter<'_> {
    fn emit(mut self) -> String {
        let config = self.config;
        let directives = config.merge.enabled_directives();

        self.write_header(&directives);
        self.write_imports();

        self.writer
            .write_comment(&format!(
                "{} created with plugmerge v({VERSION})",
                self.plugin_name
            ))
            .write_namespace(self.namespace)
            .write_start_bracket();
        if self.mode == CreatorMode::MergeFramework {
            self.writer.write_framework();
        }

        self.write_plugin_class();
        if self.mode == CreatorMode::MergeFramework {
            let buckets = self.buckets;
            for &index in &buckets.data {
                self.write_file(index);
            }
        }
        self.write_frameworks();
        self.writer.write_end_bracket();

        self.write_extensions();

        if !directives.is_empty() {
            self.writer
                .write_preprocessor_errors(&directives)
                .write_end_preprocessor();
        }
        self.writer.into_code()
    }

    fn write_header(&mut self, directives: &[&PreprocessorDirective]) {
        let merge = &self.config.merge;
        let mut collected = DirectiveCollector::new();
        collected.add_requires(&merge.requires);
        collected.add_references(&merge.references);
        collected.add_defines(&merge.defines);
        for file in self.files {
            collected.add_requires(&file.requires);
            collected.add_references(&file.references);
            collected.add_defines(&file.defines);
        }

        self.writer
            .write_requires(collected.requires())
            .write_references(collected.references());
        if !directives.is_empty() {
            self.writer.write_preprocessor_guard(directives);
        }
        self.writer.write_defines(collected.defines());
    }

    fn write_imports(&mut self) {
        let mut imports = ImportCollector::new()
            .with_ignore_prefixes(self.config.merge.ignore_namespaces.iter().cloned());
        for &(file, ty) in &self.buckets.extensions {
            imports.exclude(&self.files[file].types[ty].namespace);
        }
        for file in self.files {
            imports.extend(&file.imports);
        }
        if !self.buckets.extensions.is_empty() {
            let text = format!("using {};", self.extension_namespace());
            imports.add_text(ImportKind::Default, &text);
        }

        for (_, group) in imports.groups() {
            self.writer.write_usings(group);
        }
        self.writer.write_usings(imports.namespace_block());
    }

    fn write_plugin_class(&mut self) {
        write_metadata(&mut self.writer, self.plugin, self.mode.is_framework());
        self.writer.write_start_class(self.plugin_name, &self.plugin.base_types, true);

        let body = match self.mode {
            CreatorMode::MergeFramework => self.buckets.plugin_files(self.files),
            CreatorMode::Plugin | CreatorMode::Framework => self.buckets.body(self.files),
        };
        for index in body {
            self.write_file(index);
        }

        self.writer.write_end_bracket().write_line();
    }

    /// Write one file's fragments wrapped in its region.
    fn write_file(&mut self, index: usize) {
        let file = &self.files[index];
        if !file.has_writable_code() {
            return;
        }

        debug!("Writing file: {}", file.path.display());
        self.writer.write_start_region(&file.region_label);
        for code in file.writable_code() {
            for line in code.lines() {
                self.writer.write_code(line.trim());
            }
        }
        self.writer.write_end_region().write_line();
    }

    fn write_frameworks(&mut self) {
        for &index in &self.buckets.framework {
            let file = &self.files[index];
            debug!("Writing framework file: {}", file.path.display());

            let title = match &file.plugin_data {
                Some(data) if !data.title.is_empty() => data.display_title(),
                _ => file.region_label.as_str(),
            };
            if let Some(data) = &file.plugin_data {
                write_metadata(&mut self.writer, data, true);
            }
            self.writer
                .write_start_region(&format!("Merged Framework {title}"))
                .write_start_class(self.plugin_name, &[], true);
            for code in file.writable_code() {
                for line in code.lines() {
                    self.writer.write_code(line.trim());
                }
            }
            self.writer
                .write_end_bracket()
                .write_end_region()
                .write_line();
        }
    }

    fn write_extensions(&mut self) {
        if self.buckets.extensions.is_empty() {
            return;
        }

        let namespace = self.extension_namespace();
        self.writer
            .write_line()
            .write_namespace(&namespace)
            .write_start_bracket();

        let table = AliasTable::build(
            self.files,
            self.buckets,
            self.namespace,
            self.plugin_name,
            self.mode == CreatorMode::MergeFramework,
        );
        if !table.is_empty() {
            let files = self.files;
            let texts = self
                .buckets
                .extensions
                .iter()
                .map(|&(file, _)| files[file].text.as_str());
            for (name, target) in table.resolve(texts) {
                self.writer.write_using_alias(name, target);
            }
        }
        self.writer.write_line();

        for &(file, ty) in &self.buckets.extensions {
            let file = &self.files[file];
            let fragment = &file.types[ty];
            debug!("Writing extension type: {}", fragment.name);

            if self.mode.is_framework() {
                self.writer.write_line().write_definition(EXTENSION_MARKER);
            }
            for line in fragment.code(&file.text).lines() {
                self.writer.write_code(line.trim());
            }
        }
        self.writer.write_end_bracket();
    }

    fn extension_namespace(&self) -> String {
        format!("{}.{}Extensions", self.namespace, self.plugin_name)
    }
}
