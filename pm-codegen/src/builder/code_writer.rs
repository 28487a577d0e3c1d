//! Stateful text sink that assembles the merged plugin.

use plugmerge_config::{CodeStyle, PreprocessorDirective};
use plugmerge_core::{contains_ignore_ascii_case, remove_ignore_ascii_case};

use super::IndentStyle;
use crate::classify::{FRAMEWORK_MARKER, REFERENCE_PREFIX, REQUIRES_PREFIX};

/// Append-only writer for merged C# code.
///
/// Every operation is infallible and returns `&mut Self` for chaining.
/// Braces written through [`write_start_bracket`](Self::write_start_bracket),
/// [`write_end_bracket`](Self::write_end_bracket) and [`write_code`](Self::write_code)
/// drive the indentation depth.
///
/// # Example
///
/// ```
/// use plugmerge_codegen::builder::CodeWriter;
/// use plugmerge_config::CodeStyle;
///
/// let mut writer = CodeWriter::new(&CodeStyle::default(), "MyPlugin");
/// writer
///     .write_namespace("Oxide.Plugins")
///     .write_start_bracket()
///     .write_code("private int _count;")
///     .write_end_bracket();
///
/// assert_eq!(
///     writer.code(),
///     "namespace Oxide.Plugins\n{\n    private int _count;\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeWriter {
    depth: usize,
    indent: IndentStyle,
    new_line: String,
    keep_comments: bool,
    write_regions: bool,
    /// `<PluginName>.` prefix stripped from merged code
    self_reference: Option<String>,
    in_block_comment: bool,
    buffer: String,
}

impl CodeWriter {
    pub fn new(style: &CodeStyle, plugin_name: &str) -> Self {
        let self_reference = (!plugin_name.is_empty()).then(|| format!("{plugin_name}."));
        Self {
            depth: 0,
            indent: IndentStyle::from_style(style),
            new_line: style.new_line.clone(),
            keep_comments: style.keep_comments,
            write_regions: style.write_file_region,
            self_reference,
            in_block_comment: false,
            buffer: String::new(),
        }
    }

    /// Current indentation depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The code written so far.
    pub fn code(&self) -> &str {
        &self.buffer
    }

    pub fn into_code(self) -> String {
        self.buffer
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Write a newline.
    pub fn write_line(&mut self) -> &mut Self {
        self.buffer.push_str(&self.new_line);
        self
    }

    /// Write `text` at the current indentation, followed by a newline.
    pub fn write_indented(&mut self, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(text);
        self.write_line()
    }

    /// Write `//<comment>`.
    pub fn write_comment(&mut self, comment: &str) -> &mut Self {
        self.write_indented(&format!("//{comment}"))
    }

    /// Write a sentinel line such as `//Define:Framework` verbatim.
    pub fn write_definition(&mut self, definition: &str) -> &mut Self {
        self.write_indented(definition)
    }

    pub fn write_start_bracket(&mut self) -> &mut Self {
        self.write_indented("{");
        self.indent();
        self
    }

    pub fn write_end_bracket(&mut self) -> &mut Self {
        self.dedent();
        self.write_indented("}")
    }

    /// Write `#region <name>`; nothing when file regions are disabled.
    ///
    /// Starts a new file, so an unterminated block comment in the previous
    /// one stops suppressing code here.
    pub fn write_start_region(&mut self, name: &str) -> &mut Self {
        self.in_block_comment = false;
        if self.write_regions {
            self.write_indented(&format!("#region {name}"));
        }
        self
    }

    /// Write `#endregion`; nothing when file regions are disabled.
    pub fn write_end_region(&mut self) -> &mut Self {
        if self.write_regions {
            self.write_indented("#endregion");
        }
        self
    }

    // =========================================================================
    // File header
    // =========================================================================

    /// Write `//Requires: <name>` for each entry, sorted.
    pub fn write_requires<I, S>(&mut self, requires: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_sorted(REQUIRES_PREFIX, requires)
    }

    /// Write `//Reference: <name>` for each entry, sorted.
    pub fn write_references<I, S>(&mut self, references: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_sorted(REFERENCE_PREFIX, references)
    }

    /// Write `#define <name>` for each entry, sorted.
    pub fn write_defines<I, S>(&mut self, defines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_sorted("#define", defines)
    }

    fn write_sorted<I, S>(&mut self, prefix: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values: Vec<S> = values.into_iter().collect();
        values.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
        for value in values {
            self.buffer.push_str(prefix);
            self.buffer.push(' ');
            self.buffer.push_str(value.as_ref());
            self.write_line();
        }
        self
    }

    /// Write each complete using directive, then a blank line if any were written.
    pub fn write_usings<I, S>(&mut self, usings: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut wrote = false;
        for using in usings {
            wrote = true;
            self.write_indented(using.as_ref());
        }
        if wrote {
            self.write_line();
        }
        self
    }

    /// Write `using <name>;`.
    pub fn write_using(&mut self, name: &str) -> &mut Self {
        self.write_indented(&format!("using {name};"))
    }

    /// Write `using <alias> = <target>;`.
    pub fn write_using_alias(&mut self, alias: &str, target: &str) -> &mut Self {
        self.write_indented(&format!("using {alias} = {target};"))
    }

    /// Open the `#if (A && B)` guard.
    pub fn write_preprocessor_guard(&mut self, directives: &[&PreprocessorDirective]) -> &mut Self {
        let condition = directives
            .iter()
            .map(|d| d.directive.as_str())
            .collect::<Vec<_>>()
            .join(" && ");
        self.buffer.push_str(&format!("#if ({condition})"));
        self.write_line()
    }

    /// Write the `#elif`/`#else` branches raising each directive's error.
    pub fn write_preprocessor_errors(&mut self, directives: &[&PreprocessorDirective]) -> &mut Self {
        for (index, directive) in directives.iter().enumerate() {
            if index + 1 < directives.len() {
                self.buffer.push_str(&format!("#elif !{}", directive.directive));
            } else {
                self.buffer.push_str("#else");
            }
            self.write_line();
            self.buffer.push_str(&format!("#error {}", directive.message));
            self.write_line();
        }
        self
    }

    pub fn write_end_preprocessor(&mut self) -> &mut Self {
        self.buffer.push_str("#endif");
        self.write_line()
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Write `namespace <name>`; open the body with [`write_start_bracket`](Self::write_start_bracket).
    pub fn write_namespace(&mut self, namespace: &str) -> &mut Self {
        self.write_indented(&format!("namespace {namespace}"))
    }

    /// Write a class declaration and its opening brace.
    pub fn write_start_class(&mut self, name: &str, base_types: &[String], partial: bool) -> &mut Self {
        let mut declaration = String::from("public ");
        if partial {
            declaration.push_str("partial ");
        }
        declaration.push_str("class ");
        declaration.push_str(name);
        if !base_types.is_empty() {
            declaration.push_str(" : ");
            declaration.push_str(&base_types.join(", "));
        }
        self.write_indented(&declaration);
        self.write_start_bracket()
    }

    /// Write `[Info(title, author, version)]`, commented out when `commented`.
    ///
    /// Arguments are C# expressions and are written as given, so string
    /// literals must carry their quotes.
    pub fn write_info_attribute(
        &mut self,
        title: &str,
        author: &str,
        version: &str,
        commented: bool,
    ) -> &mut Self {
        let prefix = if commented { "//" } else { "" };
        self.write_indented(&format!(
            "{prefix}[Info({title}, {author}, {version})]"
        ))
    }

    /// Write `[Description(description)]`, commented out when `commented`.
    pub fn write_description_attribute(&mut self, description: &str, commented: bool) -> &mut Self {
        let prefix = if commented { "//" } else { "" };
        self.write_indented(&format!("{prefix}[Description({description})]"))
    }

    /// Mark the output as a framework.
    pub fn write_framework(&mut self) -> &mut Self {
        self.write_definition(FRAMEWORK_MARKER)
    }

    // =========================================================================
    // Merged code
    // =========================================================================

    /// Write one trimmed line of merged source.
    ///
    /// Comments and regions are filtered according to the code style, the
    /// `<PluginName>.` self-reference is removed, and the depth follows the
    /// braces on the line: a closing brace alone dedents before writing, an
    /// opening brace alone indents after.
    pub fn write_code(&mut self, line: &str) -> &mut Self {
        if !self.keep_comments && self.skip_comment(line) {
            return self;
        }

        let is_region = line.starts_with("#region") || line.starts_with("#endregion");
        if is_region && !self.write_regions {
            return self;
        }

        let opens = line.contains('{');
        let closes = line.contains('}');
        if closes && !opens {
            self.dedent();
        }

        if !line.is_empty() {
            self.write_indent();
        }
        match &self.self_reference {
            Some(prefix) if !is_region && contains_ignore_ascii_case(line, prefix) => {
                let stripped = remove_ignore_ascii_case(line, prefix);
                self.buffer.push_str(&stripped);
            }
            _ => self.buffer.push_str(line),
        }
        self.write_line();

        if opens && !closes {
            self.indent();
        }
        self
    }

    /// Returns true if `line` is (part of) a comment that must be dropped.
    fn skip_comment(&mut self, line: &str) -> bool {
        if self.in_block_comment {
            if line.ends_with("*/") {
                self.in_block_comment = false;
            }
            return true;
        }
        if line.starts_with("//") {
            return true;
        }
        if line.starts_with("/*") {
            if !line.contains("*/") {
                self.in_block_comment = true;
                return true;
            }
            return line.ends_with("*/");
        }
        false
    }

    fn write_indent(&mut self) {
        if self.depth > 0 {
            let indent = self.indent.render(self.depth);
            self.buffer.push_str(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += self.indent.step();
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(self.indent.step());
    }
}
