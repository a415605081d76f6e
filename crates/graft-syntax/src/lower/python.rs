//! Python lowering.
//!
//! Class attributes written as `name = value` at class-body level become
//! field declarations; the class body "opens" at the `:` of the header.
//! A body kept on the header line (`class A: pass`) is not open.

use super::{Member, fallback_kind, first_named_child, first_token, members, span_of, text_of};
use crate::tree::{NodeKind, NodeSpec, Span, TreeBuilder};

const IMPORT_KINDS: &[&str] = &[
    "import_statement",
    "import_from_statement",
    "future_import_statement",
];

const LITERAL_KINDS: &[&str] = &[
    "string",
    "concatenated_string",
    "integer",
    "float",
    "true",
    "false",
    "none",
];

pub(super) fn lower_module(builder: &mut TreeBuilder, module: tree_sitter::Node<'_>, source: &str) {
    for member in members(module, 0) {
        let node = member.node;
        if IMPORT_KINDS.contains(&node.kind()) {
            builder.push(
                None,
                NodeSpec::new(NodeKind::Import, member.span(), member.full_start),
            );
        } else if let Some(class) = class_definition(node) {
            lower_class(builder, &member, class, source);
        } else {
            builder.push(
                None,
                NodeSpec::new(fallback_kind(node), member.span(), member.full_start),
            );
        }
    }
}

fn class_definition(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    match node.kind() {
        "class_definition" => Some(node),
        "decorated_definition" => node
            .child_by_field_name("definition")
            .filter(|definition| definition.kind() == "class_definition"),
        _ => None,
    }
}

fn lower_class(
    builder: &mut TreeBuilder,
    statement: &Member<'_>,
    class: tree_sitter::Node<'_>,
    source: &str,
) {
    let block = class.child_by_field_name("body");
    let colon = first_token(class, ":");
    // A suite written on the header line cannot take another statement, so
    // such a class records no body to insert into.
    let body = colon
        .filter(|token| {
            block.is_none_or(|suite| suite.start_position().row > token.end_position().row)
        })
        .map(|token| {
            let end = block.map_or(token.end_byte(), |suite| suite.end_byte());
            Span::new(token.start_byte(), end)
        });
    let name = class
        .child_by_field_name("name")
        .and_then(|name| text_of(name, source))
        .map(str::to_owned);
    let class_id = builder.push(
        None,
        NodeSpec::new(NodeKind::ClassDecl, statement.span(), statement.full_start)
            .named(name)
            .with_body(body),
    );

    let (Some(suite), Some(header_end)) = (block, colon.map(|token| token.end_byte())) else {
        return;
    };
    for member in members(suite, header_end) {
        let Some((name, value)) = attribute(member.node, source) else {
            builder.push(
                Some(class_id),
                NodeSpec::new(NodeKind::Other, member.span(), member.full_start),
            );
            continue;
        };
        let field_id = builder.push(
            Some(class_id),
            NodeSpec::new(NodeKind::FieldDecl, member.span(), member.full_start)
                .named(Some(name)),
        );
        if let Some(value) = value {
            let kind = if LITERAL_KINDS.contains(&value.kind()) {
                NodeKind::Literal
            } else {
                NodeKind::Other
            };
            builder.push(
                Some(field_id),
                NodeSpec::new(kind, span_of(value), value.start_byte()),
            );
        }
    }
}

/// Recognises `name = value` and `name: annotation [= value]` statements.
fn attribute<'t>(
    statement: tree_sitter::Node<'t>,
    source: &str,
) -> Option<(String, Option<tree_sitter::Node<'t>>)> {
    if statement.kind() != "expression_statement" {
        return None;
    }
    let assignment = first_named_child(statement, "assignment")?;
    let target = assignment
        .child_by_field_name("left")
        .filter(|left| left.kind() == "identifier")?;
    let name = text_of(target, source)?.to_owned();
    Some((name, assignment.child_by_field_name("right")))
}
