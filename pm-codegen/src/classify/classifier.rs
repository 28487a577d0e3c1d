use std::sync::LazyLock;

use plugmerge_config::{PlatformSettings, PluginMergeConfig};
use plugmerge_syntax::{ParsedSource, ParsedType, Trivia, TriviaKind, TriviaParent};
use regex::Regex;

use super::{
    ClassifiedFile, EXCLUDE_MARKER, EXTENSION_MARKER, FILE_ORDER_PREFIX, FRAMEWORK_MARKER,
    FileSettings, FragmentKind, ImportStatement, REFERENCE_PREFIX, REQUIRES_PREFIX, TypeFragment,
};
use crate::pipeline::ScannedFile;

static INFO_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\s*//\[Info\(\s*(?P<title>".*")\s*,\s*(?P<author>".*")\s*,\s*(?P<version>".*")\s*\)\]$"#,
    )
    .expect("valid regex")
});

static DESCRIPTION_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*//\[Description\(\s*(?P<description>".*")\s*\)\]$"#).expect("valid regex")
});

/// Settings shared by every file of a merge.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    pub platform: PlatformSettings,
    /// Leading path segments removed from region labels
    pub region_trim_left: usize,
    /// Trailing path segments removed from region labels
    pub region_trim_right: usize,
}

impl ClassifyOptions {
    pub fn from_config(config: &PluginMergeConfig) -> Self {
        Self {
            platform: config.platform_settings(),
            region_trim_left: config.merge.region_path_trim_left,
            region_trim_right: config.merge.region_path_trim_right,
        }
    }
}

/// Classify one parsed file.
///
/// `index` is the file's position in scan order and `text` the source the
/// parse was produced from.
pub fn classify(
    scanned: &ScannedFile,
    index: usize,
    text: String,
    parsed: &ParsedSource,
    options: &ClassifyOptions,
) -> ClassifiedFile {
    let region_label = plugmerge_core::region_label(
        &scanned.path,
        &scanned.root,
        options.region_trim_left,
        options.region_trim_right,
    );
    let mut file = ClassifiedFile::new(scanned.path.clone(), region_label, index, text);

    read_trivia(&mut file, &parsed.trivia);
    if file.is_excluded() {
        return file;
    }

    read_imports(&mut file, parsed, &options.platform);
    read_types(&mut file, parsed, &options.platform);
    file
}

fn is_declaration_trivia(trivia: &Trivia) -> bool {
    trivia.parent != TriviaParent::Other
}

fn read_trivia(file: &mut ClassifiedFile, trivia: &[Trivia]) {
    for item in trivia.iter().filter(|t| is_declaration_trivia(t)) {
        match item.kind {
            TriviaKind::LineComment => {
                if !read_comment(file, &item.text) {
                    return;
                }
            }
            TriviaKind::Define => {
                if let Some(name) = item
                    .text
                    .strip_prefix("#define")
                    .and_then(|rest| rest.split_whitespace().next())
                {
                    file.defines.push(name.to_string());
                }
            }
            TriviaKind::BlockComment => {}
        }
    }
}

/// Apply one line comment to `file`. Returns false once the file is excluded.
fn read_comment(file: &mut ClassifiedFile, comment: &str) -> bool {
    if comment == FRAMEWORK_MARKER {
        file.settings |= FileSettings::FRAMEWORK;
    } else if comment == EXCLUDE_MARKER {
        file.settings |= FileSettings::EXCLUDE;
        return false;
    } else if let Some(order) = comment.strip_prefix(FILE_ORDER_PREFIX) {
        if let Ok(order) = order.trim().parse::<i32>() {
            file.order = order;
        }
    } else if let Some(value) = strip_prefix_ignore_case(comment, REFERENCE_PREFIX) {
        file.references.push(value.trim().to_string());
    } else if let Some(value) = strip_prefix_ignore_case(comment, REQUIRES_PREFIX) {
        file.requires.push(value.trim().to_string());
    } else if comment.starts_with("//[Info") {
        if let Some(caps) = INFO_COMMENT.captures(comment) {
            file.plugin_data
                .get_or_insert_default()
                .set_info(&caps["title"], &caps["author"], &caps["version"]);
        }
    } else if comment.starts_with("//[Description(") {
        if let Some(caps) = DESCRIPTION_COMMENT.captures(comment) {
            file.plugin_data
                .get_or_insert_default()
                .set_description(&caps["description"]);
        }
    }
    true
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn read_imports(file: &mut ClassifiedFile, parsed: &ParsedSource, platform: &PlatformSettings) {
    file.imports.extend(
        parsed
            .imports
            .iter()
            .filter(|import| import.name != platform.namespace())
            .map(ImportStatement::from),
    );
}

fn read_types(file: &mut ClassifiedFile, parsed: &ParsedSource, platform: &PlatformSettings) {
    for ty in &parsed.types {
        if ty.kind.is_delegate() {
            file.types.push(fragment(ty, FragmentKind::Delegate, FileSettings::NONE));
            continue;
        }

        let mut settings = FileSettings::NONE;
        if file.is_framework() {
            settings |= FileSettings::FRAMEWORK;
        }
        if has_extension_marker(ty, &parsed.trivia) {
            settings |= FileSettings::EXTENSION;
        }
        file.types.push(fragment(ty, FragmentKind::Type, settings));

        if !file.is_framework() && ty.base_types.iter().any(|b| platform.is_plugin_base(b)) {
            file.settings |= FileSettings::PLUGIN;
            file.plugin_data
                .get_or_insert_default()
                .set_plugin_type(&ty.namespace, &ty.name, &ty.base_types);
            read_attributes(file, ty);
        }
    }
}

fn fragment(ty: &ParsedType, kind: FragmentKind, settings: FileSettings) -> TypeFragment {
    TypeFragment {
        name: ty.name.clone(),
        namespace: ty.namespace.clone(),
        kind,
        span: ty.span,
        body: ty.body,
        settings,
    }
}

fn has_extension_marker(ty: &ParsedType, trivia: &[Trivia]) -> bool {
    trivia.iter().any(|t| {
        t.kind == TriviaKind::LineComment && t.text == EXTENSION_MARKER && ty.extent.contains(t.span)
    })
}

fn read_attributes(file: &mut ClassifiedFile, ty: &ParsedType) {
    let data = file.plugin_data.get_or_insert_default();
    for attribute in &ty.attributes {
        match (attribute.name.as_str(), attribute.args.as_slice()) {
            ("Info", [title, author, version, ..]) => {
                data.set_info(title, author, version);
            }
            ("Description", [description]) => data.set_description(description),
            _ => {}
        }
    }
}
