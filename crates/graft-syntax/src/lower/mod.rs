//! Lowering from Tree-sitter concrete syntax trees to [`SyntaxTree`].
//!
//! Each supported language has its own pass that classifies top-level and
//! class-level nodes into the closed [`crate::NodeKind`] set. The passes
//! share the sibling walk in this module, which records where each node's
//! leading trivia begins.

mod python;
mod typescript;

use crate::language::SupportedLanguage;
use crate::tree::{NodeKind, Span, SyntaxTree, TreeBuilder};

/// Lowers a Tree-sitter parse of `source` into an owned tree.
pub(crate) fn lower(
    language: SupportedLanguage,
    tree: &tree_sitter::Tree,
    source: &str,
) -> SyntaxTree {
    let mut builder = TreeBuilder::default();
    let root = tree.root_node();
    match language {
        SupportedLanguage::TypeScript => typescript::lower_program(&mut builder, root, source),
        SupportedLanguage::Python => python::lower_module(&mut builder, root, source),
    }
    builder.finish(source, root.has_error())
}

/// A named child of a container together with its trivia boundary.
#[derive(Debug, Clone, Copy)]
struct Member<'t> {
    node: tree_sitter::Node<'t>,
    full_start: usize,
    end: usize,
}

impl Member<'_> {
    fn span(&self) -> Span {
        Span::new(self.node.start_byte(), self.end)
    }
}

/// Collects the named children of `container`.
///
/// `full_start` of each member is the end of the preceding token (named or
/// not), so comments and whitespace in between count as leading trivia. A
/// `;` token directly after a member is folded into the member's span, and
/// so is a comment that starts on the line the member ends on.
fn members(container: tree_sitter::Node<'_>, opening: usize) -> Vec<Member<'_>> {
    let mut cursor = container.walk();
    let children: Vec<_> = container.children(&mut cursor).collect();

    let mut out = Vec::new();
    let mut previous_end = opening;
    let mut iter = children.into_iter().peekable();
    while let Some(child) = iter.next() {
        if child.is_extra() {
            continue;
        }
        if !child.is_named() {
            previous_end = previous_end.max(child.end_byte());
            continue;
        }

        let mut end = child.end_byte();
        let mut end_row = child.end_position().row;
        if let Some(next) = iter.peek()
            && !next.is_named()
            && next.kind() == ";"
        {
            end = end.max(next.end_byte());
            end_row = next.end_position().row;
            iter.next();
        }
        while let Some(next) = iter.peek()
            && next.is_extra()
            && next.start_position().row == end_row
        {
            end = end.max(next.end_byte());
            end_row = next.end_position().row;
            iter.next();
        }

        out.push(Member {
            node: child,
            full_start: previous_end,
            end,
        });
        previous_end = end;
    }
    out
}

fn span_of(node: tree_sitter::Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn text_of<'s>(node: tree_sitter::Node<'_>, source: &'s str) -> Option<&'s str> {
    source.get(node.byte_range())
}

/// Declared name of `node`'s `field`, with string-literal quotes removed.
fn field_name(node: tree_sitter::Node<'_>, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|name| text_of(name, source))
        .map(|text| text.trim_matches(['\'', '"', '`']).to_owned())
}

fn first_named_child<'t>(
    node: tree_sitter::Node<'t>,
    kind: &str,
) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == kind);
    found
}

fn first_token<'t>(node: tree_sitter::Node<'t>, kind: &str) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|child| !child.is_named() && child.kind() == kind);
    found
}

/// Classification for nodes that are neither imports nor classes.
fn fallback_kind(node: tree_sitter::Node<'_>) -> NodeKind {
    if node.is_error() {
        NodeKind::Other
    } else {
        NodeKind::Statement
    }
}
