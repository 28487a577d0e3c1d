//! Indentation configuration for emitted code.

use plugmerge_config::CodeStyle;

/// Indentation style for merged code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStyle {
    ch: char,
    /// Characters written per depth unit
    width: usize,
    /// Depth units added or removed per brace
    step: usize,
}

impl IndentStyle {
    /// 4-space indentation.
    pub const SPACES: Self = Self::new(' ', 4, 1);

    /// Tab indentation.
    pub const TAB: Self = Self::new('\t', 1, 1);

    pub const fn new(ch: char, width: usize, step: usize) -> Self {
        Self { ch, width, step }
    }

    pub fn from_style(style: &CodeStyle) -> Self {
        Self::new(style.indent_char, style.indent_amount, style.indent_multiplier)
    }

    /// Depth units per brace.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Render the indentation for `depth`.
    pub fn render(&self, depth: usize) -> String {
        std::iter::repeat_n(self.ch, depth * self.width).collect()
    }
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::SPACES
    }
}
