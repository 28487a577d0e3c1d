//! Validation of a parsed merge configuration.

use miette::SourceSpan;
use plugmerge_core::is_identifier;

use crate::{MergeConfig, PluginMergeConfig, Result, SourceContext};

/// Find the span of a configuration key in the raw source.
///
/// Matches TOML (`key =`, `key=`), JSON (`"key":`, `"key" :`) and YAML
/// (`key:`) spellings.
/// Returns `None` when the key is not written out (it took its default).
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let patterns = [
        (format!("{} =", key), 0usize),
        (format!("{}=", key), 0usize),
        (format!("\"{}\":", key), 1usize),
        (format!("\"{}\" :", key), 1usize),
        (format!("{}:", key), 0usize),
    ];

    for (pattern, skip) in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            let at_line_start = pos == 0 || !is_key_char(src.as_bytes()[pos - 1]);
            if *skip == 1 || at_line_start {
                return Some(SourceSpan::from((pos + skip, key.len())));
            }
        }
    }
    None
}

fn is_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

impl PluginMergeConfig {
    /// Validate the configuration after parsing.
    pub fn validate(&self, ctx: &SourceContext) -> Result<()> {
        self.merge.validate(ctx)
    }
}

impl MergeConfig {
    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        let src = ctx.src();

        if !self.plugin_name.is_empty() && !is_identifier(&self.plugin_name) {
            return Err(ctx.invalid_identifier_error(
                &self.plugin_name,
                "plugin name",
                find_key_span(src, "plugin_name"),
            ));
        }

        let style = &self.code_style;
        if style.indent_amount == 0 {
            return Err(ctx.validation_error_at(
                "indent_amount must be greater than zero",
                find_key_span(src, "indent_amount"),
            ));
        }
        if style.indent_multiplier == 0 {
            return Err(ctx.validation_error_at(
                "indent_multiplier must be greater than zero",
                find_key_span(src, "indent_multiplier"),
            ));
        }
        if style.new_line.is_empty() {
            return Err(ctx.validation_error_at(
                "new_line must not be empty",
                find_key_span(src, "new_line"),
            ));
        }

        for directive in self.enabled_directives() {
            if directive.directive.trim().is_empty() {
                return Err(ctx.validation_error_at(
                    "enabled preprocessor directive has no name",
                    find_key_span(src, "directive"),
                ));
            }
        }

        Ok(())
    }
}
