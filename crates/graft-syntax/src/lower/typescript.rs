//! TypeScript (TSX grammar) lowering.

use super::{Member, fallback_kind, field_name, first_named_child, members, span_of};
use crate::tree::{NodeId, NodeKind, NodeSpec, Span, TreeBuilder};

const LITERAL_KINDS: &[&str] = &[
    "string",
    "template_string",
    "number",
    "true",
    "false",
    "null",
    "undefined",
    "regex",
];

pub(super) fn lower_program(
    builder: &mut TreeBuilder,
    program: tree_sitter::Node<'_>,
    source: &str,
) {
    for member in members(program, 0) {
        let node = member.node;
        if node.kind() == "import_statement" {
            builder.push(
                None,
                NodeSpec::new(NodeKind::Import, member.span(), member.full_start),
            );
        } else if let Some(class) = class_declaration(node) {
            lower_class(builder, &member, class, source);
        } else {
            builder.push(
                None,
                NodeSpec::new(fallback_kind(node), member.span(), member.full_start),
            );
        }
    }
}

/// Returns the class declaration carried by a top-level statement, looking
/// through `export` wrappers.
fn class_declaration(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    match node.kind() {
        "class_declaration" | "abstract_class_declaration" => Some(node),
        "export_statement" => node
            .child_by_field_name("declaration")
            .filter(|declaration| {
                matches!(
                    declaration.kind(),
                    "class_declaration" | "abstract_class_declaration"
                )
            }),
        _ => None,
    }
}

fn lower_class(
    builder: &mut TreeBuilder,
    statement: &Member<'_>,
    class: tree_sitter::Node<'_>,
    source: &str,
) {
    let body = class.child_by_field_name("body");
    let class_id = builder.push(
        None,
        NodeSpec::new(NodeKind::ClassDecl, statement.span(), statement.full_start)
            .named(field_name(class, "name", source))
            .with_body(body.map(span_of)),
    );

    // Decorators sit on the export statement when the class is exported.
    let mut decorators = decorators_of(statement.node);
    if statement.node.id() != class.id() {
        decorators.extend(decorators_of(class));
    }
    for decorator in decorators {
        lower_decorator(builder, class_id, decorator, source);
    }

    let Some(body) = body else {
        return;
    };
    for member in members(body, body.start_byte()) {
        let node = member.node;
        if node.kind() == "public_field_definition" {
            let field_id = builder.push(
                Some(class_id),
                NodeSpec::new(NodeKind::FieldDecl, member.span(), member.full_start)
                    .named(field_name(node, "name", source)),
            );
            if let Some(value) = node.child_by_field_name("value") {
                push_value(builder, field_id, value);
            }
        } else {
            builder.push(
                Some(class_id),
                NodeSpec::new(NodeKind::Other, member.span(), member.full_start),
            );
        }
    }
}

fn decorators_of(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    let decorators = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .collect();
    decorators
}

/// Lowers the metadata object of `@Decorator({ key: value, ... })`.
fn lower_decorator(
    builder: &mut TreeBuilder,
    class_id: NodeId,
    decorator: tree_sitter::Node<'_>,
    source: &str,
) {
    let Some(object) = first_named_child(decorator, "call_expression")
        .and_then(|call| call.child_by_field_name("arguments"))
        .and_then(|arguments| first_named_child(arguments, "object"))
    else {
        return;
    };

    let mut cursor = object.walk();
    let pairs: Vec<_> = object
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "pair")
        .collect();
    for pair in pairs {
        let Some(value) = pair.child_by_field_name("value") else {
            continue;
        };
        let property_id = builder.push(
            Some(class_id),
            NodeSpec::new(NodeKind::Property, span_of(pair), pair.start_byte())
                .named(field_name(pair, "key", source)),
        );
        push_value(builder, property_id, value);
    }
}

fn push_value(builder: &mut TreeBuilder, parent: NodeId, value: tree_sitter::Node<'_>) {
    if value.kind() != "array" {
        builder.push(
            Some(parent),
            NodeSpec::new(value_kind(value), span_of(value), value.start_byte()),
        );
        return;
    }

    let list_span = span_of(value);
    let list_id = builder.push(
        Some(parent),
        NodeSpec::new(NodeKind::List, list_span, value.start_byte()).with_body(Some(list_span)),
    );
    for element in members(value, value.start_byte()) {
        builder.push(
            Some(list_id),
            NodeSpec::new(
                value_kind(element.node),
                Span::new(element.node.start_byte(), element.node.end_byte()),
                element.full_start,
            ),
        );
    }
}

fn value_kind(node: tree_sitter::Node<'_>) -> NodeKind {
    if LITERAL_KINDS.contains(&node.kind()) {
        NodeKind::Literal
    } else {
        NodeKind::Other
    }
}
