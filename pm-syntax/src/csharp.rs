//! tree-sitter backed C# parser.

use plugmerge_core::collapse_whitespace;
use tree_sitter::{Node, Parser};

use crate::{
    DeclarationKind, ImportKind, ParsedAttribute, ParsedImport, ParsedSource, ParsedType, Result,
    SourceParser, Span, SyntaxError, Trivia, TriviaKind, TriviaParent,
};

/// C# parser using the tree-sitter grammar.
///
/// A parser holds mutable tree-sitter state, so each worker thread needs its own.
pub struct CSharpParser {
    parser: Parser,
}

impl CSharpParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_c_sharp::LANGUAGE.into())?;
        Ok(Self { parser })
    }
}

impl SourceParser for CSharpParser {
    fn parse(&mut self, text: &str) -> Result<ParsedSource> {
        let tree = self
            .parser
            .parse(text, None)
            .ok_or(SyntaxError::ParseFailed)?;
        let root = tree.root_node();

        let mut visitor = Visitor {
            src: text,
            out: ParsedSource {
                has_errors: root.has_error(),
                ..ParsedSource::default()
            },
        };
        visitor.visit_scope(root, "", false);
        visitor.collect_trivia(root);
        Ok(visitor.out)
    }
}

struct Visitor<'s> {
    src: &'s str,
    out: ParsedSource,
}

impl<'s> Visitor<'s> {
    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.src.as_bytes()).unwrap_or_default()
    }

    /// Visit the members of a compilation unit, namespace or namespace body.
    fn visit_scope(&mut self, node: Node, namespace: &str, namespace_scoped: bool) {
        // A file-scoped namespace applies to every member after it, whether the
        // grammar nests them inside the declaration or leaves them as siblings.
        let mut namespace = namespace.to_string();
        let mut namespace_scoped = namespace_scoped;

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "using_directive" => {
                    if let Some(import) = parse_import(self.text(child), namespace_scoped) {
                        self.out.imports.push(import);
                    }
                }
                "namespace_declaration" => {
                    let name = self.qualified_namespace(child, &namespace);
                    if let Some(body) = body_node(child) {
                        self.visit_scope(body, &name, true);
                    }
                }
                "file_scoped_namespace_declaration" => {
                    namespace = self.qualified_namespace(child, &namespace);
                    namespace_scoped = true;
                    self.visit_scope(child, &namespace, true);
                }
                kind => {
                    if let Some(kind) = DeclarationKind::from_node_kind(kind) {
                        self.push_type(child, kind, &namespace);
                    }
                }
            }
        }
    }

    fn qualified_namespace(&self, node: Node, outer: &str) -> String {
        let name = node
            .child_by_field_name("name")
            .map(|n| collapse_whitespace(self.text(n)).replace(' ', ""))
            .unwrap_or_default();
        match (outer.is_empty(), name.is_empty()) {
            (true, _) => name,
            (false, true) => outer.to_string(),
            (false, false) => format!("{outer}.{name}"),
        }
    }

    fn push_type(&mut self, node: Node, kind: DeclarationKind, namespace: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };

        let span = node_span(node);
        let mut base_types = Vec::new();
        let mut attributes = Vec::new();

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "base_list" => {
                    let mut inner = child.walk();
                    base_types.extend(
                        child
                            .named_children(&mut inner)
                            .filter(|n| n.kind() != "comment")
                            .map(|n| collapse_whitespace(self.text(n))),
                    );
                }
                "attribute_list" => self.collect_attributes(child, &mut attributes),
                _ => {}
            }
        }

        self.out.types.push(ParsedType {
            name: self.text(name_node).to_string(),
            name_span: node_span(name_node),
            namespace: namespace.to_string(),
            kind,
            span,
            body: body_node(node).and_then(brace_interior),
            extent: Span::new(leading_comment_start(node), span.end),
            base_types,
            attributes,
        });
    }

    fn collect_attributes(&self, list: Node, attributes: &mut Vec<ParsedAttribute>) {
        let mut cursor = list.walk();
        for attribute in list.named_children(&mut cursor) {
            if attribute.kind() != "attribute" {
                continue;
            }
            let name = attribute
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string())
                .unwrap_or_default();

            let mut args = Vec::new();
            let mut inner = attribute.walk();
            if let Some(arg_list) = attribute
                .named_children(&mut inner)
                .find(|n| n.kind() == "attribute_argument_list")
            {
                let mut arg_cursor = arg_list.walk();
                args.extend(
                    arg_list
                        .named_children(&mut arg_cursor)
                        .filter(|n| n.kind() == "attribute_argument")
                        .map(|n| self.text(n).trim().to_string()),
                );
            }
            attributes.push(ParsedAttribute { name, args });
        }
    }

    /// Record every comment and `#define` in the tree, in source order.
    fn collect_trivia(&mut self, root: Node) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let kind = node.kind();
            if kind == "comment" {
                let text = self.text(node).trim();
                let trivia_kind = if text.starts_with("//") {
                    TriviaKind::LineComment
                } else {
                    TriviaKind::BlockComment
                };
                self.push_trivia(node, trivia_kind, text);
                continue;
            }
            if kind.starts_with("preproc") {
                let text = self.text(node).trim();
                if text.starts_with("#define") {
                    self.push_trivia(node, TriviaKind::Define, first_line(text));
                    continue;
                }
            }

            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    fn push_trivia(&mut self, node: Node, kind: TriviaKind, text: &str) {
        self.out.trivia.push(Trivia {
            kind,
            text: text.to_string(),
            span: node_span(node),
            parent: trivia_parent(node),
        });
    }
}

fn node_span(node: Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

/// The `{ ... }` list of a namespace or type declaration.
fn body_node(node: Node) -> Option<Node> {
    if let Some(body) = node.child_by_field_name("body") {
        return Some(body);
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|n| {
        matches!(
            n.kind(),
            "declaration_list" | "enum_member_declaration_list"
        )
    })
}

/// Span between the opening and closing brace of a body node.
fn brace_interior(body: Node) -> Option<Span> {
    let mut open = None;
    let mut close = None;
    let mut cursor = body.walk();
    for child in body.children(&mut cursor) {
        match child.kind() {
            "{" if open.is_none() => open = Some(child.end_byte()),
            "}" => close = Some(child.start_byte()),
            _ => {}
        }
    }
    match (open, close) {
        (Some(start), Some(end)) if start <= end => Some(Span::new(start, end)),
        _ => None,
    }
}

/// Start of the run of comments directly preceding `node`, or its own start.
fn leading_comment_start(node: Node) -> usize {
    let mut start = node.start_byte();
    let mut current = node.prev_sibling();
    while let Some(sibling) = current {
        if sibling.kind() != "comment" {
            break;
        }
        start = sibling.start_byte();
        current = sibling.prev_sibling();
    }
    start
}

fn trivia_parent(node: Node) -> TriviaParent {
    let Some(parent) = node.parent() else {
        return TriviaParent::CompilationUnit;
    };
    match parent.kind() {
        "compilation_unit" => TriviaParent::CompilationUnit,
        "namespace_declaration" | "file_scoped_namespace_declaration" => TriviaParent::Namespace,
        "declaration_list" => match parent.parent().map(|p| p.kind()) {
            Some("namespace_declaration") => TriviaParent::Namespace,
            _ => TriviaParent::Other,
        },
        "attribute_list" | "attribute" | "attribute_argument_list" => TriviaParent::AttributeList,
        "using_directive" => TriviaParent::Import,
        kind if DeclarationKind::from_node_kind(kind).is_some() => TriviaParent::Type,
        _ => TriviaParent::Other,
    }
}

/// Parse the text of a `using` directive.
fn parse_import(text: &str, namespace_scoped: bool) -> Option<ParsedImport> {
    let text = collapse_whitespace(text);
    let body = text.strip_prefix("global ").unwrap_or(&text);
    let body = body.strip_prefix("using ")?.trim_end_matches(';').trim();
    let body = body.strip_prefix("unsafe ").unwrap_or(body);

    let (kind, name) = if let Some(rest) = body.strip_prefix("static ") {
        (ImportKind::Static, rest.trim())
    } else if let Some((_, target)) = body.split_once('=') {
        (ImportKind::Alias, target.trim())
    } else {
        (ImportKind::Default, body)
    };
    let name = name.to_string();

    if name.is_empty() {
        return None;
    }

    let text = if text.ends_with(';') {
        text
    } else {
        format!("{text};")
    };

    Some(ParsedImport {
        text,
        name,
        kind,
        namespace_scoped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedSource {
        CSharpParser::new().unwrap().parse(text).unwrap()
    }

    #[test]
    fn test_parser_creation() {
        assert!(CSharpParser::new().is_ok());
    }

    #[test]
    fn test_parse_import_forms() {
        let default = parse_import("using   System.Linq;", false).unwrap();
        assert_eq!(default.text, "using System.Linq;");
        assert_eq!(default.name, "System.Linq");
        assert_eq!(default.kind, ImportKind::Default);

        let stat = parse_import("using static System.Math;", true).unwrap();
        assert_eq!(stat.kind, ImportKind::Static);
        assert_eq!(stat.name, "System.Math");
        assert!(stat.namespace_scoped);

        let alias = parse_import("using Timer = System.Timers.Timer;", false).unwrap();
        assert_eq!(alias.kind, ImportKind::Alias);
        assert_eq!(alias.text, "using Timer = System.Timers.Timer;");
        assert_eq!(alias.name, "System.Timers.Timer");

        let global = parse_import("global using System;", false).unwrap();
        assert_eq!(global.name, "System");
        assert_eq!(global.text, "global using System;");
    }

    #[test]
    fn test_parse_plugin_class() {
        let src = r#"using System;
using Oxide.Core;

namespace Oxide.Plugins
{
    [Info("My Plugin", "Dev", "1.0.0")]
    [Description("desc")]
    public partial class Foo : RustPlugin
    {
        private void Init() { }
    }
}
"#;
        let parsed = parse(src);

        assert_eq!(parsed.imports.len(), 2);
        assert!(parsed.imports.iter().all(|i| !i.namespace_scoped));

        assert_eq!(parsed.types.len(), 1);
        let ty = &parsed.types[0];
        assert_eq!(ty.name, "Foo");
        assert_eq!(ty.name_span.slice(src), "Foo");
        assert_eq!(ty.namespace, "Oxide.Plugins");
        assert_eq!(ty.kind, DeclarationKind::Class);
        assert_eq!(ty.base_types, vec!["RustPlugin"]);
        assert!(ty.span.slice(src).starts_with("[Info("));
        assert!(ty.span.slice(src).ends_with('}'));
        assert_eq!(
            ty.body.unwrap().slice(src).trim(),
            "private void Init() { }"
        );

        assert_eq!(ty.attributes.len(), 2);
        assert_eq!(ty.attributes[0].name, "Info");
        assert_eq!(
            ty.attributes[0].args,
            vec!["\"My Plugin\"", "\"Dev\"", "\"1.0.0\""]
        );
        assert_eq!(ty.attributes[1].name, "Description");
        assert_eq!(ty.attributes[1].args, vec!["\"desc\""]);
    }

    #[test]
    fn test_parse_trivia_parents() {
        let src = r#"//Define:FileOrder=5
using System;

namespace Oxide.Plugins
{
    //Define:Framework
    public class Bar
    {
        public void Run()
        {
            // inside a method
        }
    }
}
"#;
        let parsed = parse(src);
        let find = |text: &str| parsed.trivia.iter().find(|t| t.text == text).unwrap();

        assert_eq!(find("//Define:FileOrder=5").parent, TriviaParent::CompilationUnit);
        assert_eq!(find("//Define:Framework").parent, TriviaParent::Namespace);
        assert_eq!(find("// inside a method").parent, TriviaParent::Other);
        assert!(
            parsed
                .trivia
                .iter()
                .all(|t| t.kind == TriviaKind::LineComment)
        );
    }

    #[test]
    fn test_leading_comment_in_extent() {
        let src = r#"namespace Oxide.Plugins
{
    //Define:ExtensionMethods
    public static class Helpers
    {
    }
}
"#;
        let parsed = parse(src);
        let ty = &parsed.types[0];
        let marker = parsed
            .trivia
            .iter()
            .find(|t| t.text == "//Define:ExtensionMethods")
            .unwrap();
        assert!(!ty.span.contains(marker.span));
        assert!(ty.extent.contains(marker.span));
    }

    #[test]
    fn test_parse_define() {
        let src = "#define DEBUG\nnamespace Oxide.Plugins { }\n";
        let parsed = parse(src);
        let define = parsed
            .trivia
            .iter()
            .find(|t| t.kind == TriviaKind::Define)
            .unwrap();
        assert_eq!(define.text, "#define DEBUG");
        assert_eq!(define.parent, TriviaParent::CompilationUnit);
    }

    #[test]
    fn test_parse_namespace_scoped_imports_and_delegates() {
        let src = r#"namespace Oxide.Plugins
{
    using System.Collections.Generic;

    public delegate void Callback(int value);

    public enum Mode { A, B }
}
"#;
        let parsed = parse(src);
        assert_eq!(parsed.imports.len(), 1);
        assert!(parsed.imports[0].namespace_scoped);

        let kinds: Vec<_> = parsed.types.iter().map(|t| (t.name.as_str(), t.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("Callback", DeclarationKind::Delegate),
                ("Mode", DeclarationKind::Enum)
            ]
        );
        assert!(parsed.types[0].body.is_none());
        assert_eq!(parsed.types[1].body.unwrap().slice(src).trim(), "A, B");
    }

    #[test]
    fn test_parse_file_scoped_namespace() {
        let src = "namespace Oxide.Plugins;\n\npublic class Data { }\n";
        let parsed = parse(src);
        assert_eq!(parsed.types.len(), 1);
        assert_eq!(parsed.types[0].namespace, "Oxide.Plugins");
    }

    #[test]
    fn test_parse_nested_namespace() {
        let src = "namespace Outer { namespace Inner { class Data { } } }";
        let parsed = parse(src);
        assert_eq!(parsed.types[0].namespace, "Outer.Inner");
    }
}
