//! Structural model of a parsed C# source file.
//!
//! Only what merging needs is kept: imports, top-level declarations with
//! byte spans into the original text, and the comment/directive stream.

/// Byte range into a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice the span out of `text`.
    ///
    /// Out-of-range spans and spans not on char boundaries yield an empty string.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or_default()
    }
}

/// Form of a `using` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportKind {
    /// `using System.Linq;`
    Default,
    /// `using static System.Math;`
    Static,
    /// `using Timer = System.Timers.Timer;`
    Alias,
}

/// A `using` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    /// Directive text with whitespace collapsed, e.g. `using System.Linq;`
    pub text: String,
    /// Referenced namespace or type (the target for aliases)
    pub name: String,
    pub kind: ImportKind,
    /// Declared inside a namespace rather than at file scope
    pub namespace_scoped: bool,
}

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
    Delegate,
}

impl DeclarationKind {
    /// Map a tree-sitter node kind to a declaration kind.
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(Self::Class),
            "struct_declaration" => Some(Self::Struct),
            "interface_declaration" => Some(Self::Interface),
            "enum_declaration" => Some(Self::Enum),
            "record_declaration" | "record_struct_declaration" => Some(Self::Record),
            "delegate_declaration" => Some(Self::Delegate),
            _ => None,
        }
    }

    pub fn is_delegate(&self) -> bool {
        matches!(self, Self::Delegate)
    }
}

/// An attribute applied to a declaration, e.g. `[Info("Title", "Author", "1.0.0")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAttribute {
    pub name: String,
    /// Raw argument texts, in order
    pub args: Vec<String>,
}

/// A top-level type or delegate declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedType {
    pub name: String,
    /// Span of the identifier
    pub name_span: Span,
    /// Enclosing namespace (empty at file scope)
    pub namespace: String,
    pub kind: DeclarationKind,
    /// The declaration itself, attributes included
    pub span: Span,
    /// Interior of the body braces
    pub body: Option<Span>,
    /// The declaration plus the comments directly preceding it
    pub extent: Span,
    /// Base list entries as written
    pub base_types: Vec<String>,
    pub attributes: Vec<ParsedAttribute>,
}

/// Kind of a trivia item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    /// `// ...`
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `#define NAME`
    Define,
}

/// Syntactic context a trivia item was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaParent {
    CompilationUnit,
    Namespace,
    Type,
    AttributeList,
    Import,
    /// Member bodies, statements and everything else
    Other,
}

/// A comment or preprocessor directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    /// Text with surrounding whitespace trimmed
    pub text: String,
    pub span: Span,
    pub parent: TriviaParent,
}

/// Everything extracted from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSource {
    pub imports: Vec<ParsedImport>,
    pub types: Vec<ParsedType>,
    /// Comments and directives in source order
    pub trivia: Vec<Trivia>,
    /// The parser recovered from syntax errors
    pub has_errors: bool,
}
