//! Anchor resolution: mapping semantic targets to buffer positions.
//!
//! An [`AnchorResolver`] answers "where does this go?" for a [`Target`]
//! against one [`SyntaxTree`]. Insertion targets always resolve, falling
//! back to a structural default when no node of the wanted kind exists.
//! Targets that need an existing node (a field initializer, a metadata
//! list) resolve to [`Resolution::NotFound`] instead of failing, leaving the
//! caller to decide whether a missing node is an error.
//!
//! Resolution also decides the [`Layout`] of inserted text. When inserting
//! after a node, its leading trivia is inspected: a leading line break plus
//! indentation is reused as the prefix of the new text so it lines up with
//! its siblings. A node with no leading trivia at all starts the document,
//! and the new text simply goes on the next line. Otherwise the new text is
//! wrapped in one leading and one trailing newline.

use std::fmt;

use crate::error::SyntaxError;
use crate::tree::{Node, NodeId, NodeKind, SyntaxTree};

/// A semantic location in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// After the last top-level import.
    LastImport,
    /// After the last field of the first class declaration.
    LastField,
    /// After the last top-level statement of any kind.
    LastStatement,
    /// At the end of the document.
    EndOfFile,
    /// The initializer of the named field of the first class declaration.
    FieldInitializer {
        /// Exact field name.
        name: String,
    },
    /// A new element of the list held by the named decorator metadata
    /// property of the first class declaration.
    ListEntry {
        /// Exact property name, such as `imports`.
        property: String,
    },
}

impl Target {
    /// Creates a [`Target::FieldInitializer`].
    #[must_use]
    pub fn field_initializer(name: impl Into<String>) -> Self {
        Self::FieldInitializer { name: name.into() }
    }

    /// Creates a [`Target::ListEntry`].
    #[must_use]
    pub fn list_entry(property: impl Into<String>) -> Self {
        Self::ListEntry {
            property: property.into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastImport => f.write_str("last import"),
            Self::LastField => f.write_str("last class field"),
            Self::LastStatement => f.write_str("last statement"),
            Self::EndOfFile => f.write_str("end of file"),
            Self::FieldInitializer { name } => write!(f, "initializer of field `{name}`"),
            Self::ListEntry { property } => write!(f, "entry of metadata list `{property}`"),
        }
    }
}

/// How an anchor positions its edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// Insert directly after the reference node.
    AfterNode,
    /// Insert at a structural fallback offset.
    BeforeOffset,
    /// Insert at the end of the document.
    AtEnd,
    /// Replace the reference node, whose span ends at `end`.
    ReplaceNode {
        /// Exclusive end offset of the replaced node.
        end: usize,
    },
}

/// Text wrapped around inserted content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Layout {
    prefix: String,
    suffix: String,
}

impl Layout {
    /// Inserts content unchanged.
    #[must_use]
    pub const fn verbatim() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Surrounds content with one newline on each side.
    #[must_use]
    pub fn wrapped() -> Self {
        Self {
            prefix: "\n".to_owned(),
            suffix: "\n".to_owned(),
        }
    }

    /// Prefixes content with `prefix`.
    #[must_use]
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: String::new(),
        }
    }

    /// Text placed before the content.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text placed after the content.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Applies the layout to `content`.
    #[must_use]
    pub fn render(&self, content: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + content.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(content);
        out.push_str(&self.suffix);
        out
    }

    /// Layout for text inserted after a node with the given leading trivia.
    /// A node without trivia opens the document, so the new text only needs
    /// a line of its own.
    fn after_node(trivia: &str) -> Self {
        if trivia.is_empty() {
            Self::prefixed("\n")
        } else {
            Self::from_probe(trivia)
        }
    }

    /// Chooses the layout from the text that precedes or follows the
    /// insertion point: reuse a leading line break plus indentation, or wrap.
    fn from_probe(probe: &str) -> Self {
        leading_break(probe).map_or_else(Self::wrapped, Self::prefixed)
    }
}

/// A resolved position in the source text of one tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    kind: AnchorKind,
    position: usize,
    reference: Option<NodeId>,
    layout: Layout,
}

impl Anchor {
    /// How the edit is positioned.
    #[must_use]
    pub const fn kind(&self) -> AnchorKind {
        self.kind
    }

    /// Byte offset of the insertion point or replacement start.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The node the anchor was derived from, if any.
    #[must_use]
    pub const fn reference(&self) -> Option<NodeId> {
        self.reference
    }

    /// Decoration applied to inserted content.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }
}

/// Outcome of resolving a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target resolved to an anchor.
    Found(Anchor),
    /// The target needs a node that the document does not contain.
    NotFound,
}

impl Resolution {
    /// Returns the anchor, if any.
    #[must_use]
    pub fn found(self) -> Option<Anchor> {
        match self {
            Self::Found(anchor) => Some(anchor),
            Self::NotFound => None,
        }
    }

    /// Returns the anchor or an [`SyntaxError::AnchorNotFound`] naming
    /// `target`.
    ///
    /// # Errors
    ///
    /// Fails when the resolution is [`Resolution::NotFound`].
    pub fn required(self, target: &Target) -> Result<Anchor, SyntaxError> {
        self.found()
            .ok_or_else(|| SyntaxError::anchor_not_found(target.to_string()))
    }
}

/// Resolves [`Target`]s against a single tree.
#[derive(Debug, Clone, Copy)]
pub struct AnchorResolver<'t> {
    tree: &'t SyntaxTree,
}

impl<'t> AnchorResolver<'t> {
    /// Creates a resolver for `tree`.
    #[must_use]
    pub const fn new(tree: &'t SyntaxTree) -> Self {
        Self { tree }
    }

    /// Resolves `target`.
    #[must_use]
    pub fn resolve(&self, target: &Target) -> Resolution {
        match target {
            Target::LastImport => Resolution::Found(self.last_of(
                self.tree.roots().filter(|node| node.kind() == NodeKind::Import),
                0,
            )),
            Target::LastStatement => Resolution::Found(self.last_of(self.tree.roots(), 0)),
            Target::LastField => self.last_field(),
            Target::EndOfFile => Resolution::Found(self.at_end()),
            Target::FieldInitializer { name } => self.field_initializer(name),
            Target::ListEntry { property } => self.list_entry(property),
        }
    }

    fn last_field(&self) -> Resolution {
        let Some(class) = self.tree.first_class() else {
            return Resolution::NotFound;
        };
        let Some(opening) = class.body().map(|body| body.start() + 1) else {
            return Resolution::NotFound;
        };
        let fields = self
            .tree
            .children(class)
            .filter(|child| child.kind() == NodeKind::FieldDecl);
        Resolution::Found(self.last_of(fields, opening))
    }

    fn field_initializer(&self, name: &str) -> Resolution {
        let initializer = self
            .tree
            .first_class()
            .and_then(|class| self.tree.field(class, name))
            .and_then(|field| self.tree.children(field).next());
        match initializer {
            Some(node) => Resolution::Found(Anchor {
                kind: AnchorKind::ReplaceNode {
                    end: node.span().end(),
                },
                position: node.span().start(),
                reference: Some(node.id()),
                layout: Layout::verbatim(),
            }),
            None => Resolution::NotFound,
        }
    }

    fn list_entry(&self, property: &str) -> Resolution {
        let list = self
            .tree
            .first_class()
            .and_then(|class| self.tree.metadata_list(class, property));
        let Some(list) = list else {
            return Resolution::NotFound;
        };

        match last_by_start(self.tree.children(list)) {
            Some(element) => Resolution::Found(Anchor {
                kind: AnchorKind::AfterNode,
                position: element.span().end(),
                reference: Some(element.id()),
                layout: Layout::prefixed(", "),
            }),
            None => Resolution::Found(Anchor {
                kind: AnchorKind::BeforeOffset,
                position: list.span().start() + 1,
                reference: Some(list.id()),
                layout: Layout::verbatim(),
            }),
        }
    }

    fn at_end(&self) -> Anchor {
        let position = self.tree.root_end();
        Anchor {
            kind: AnchorKind::AtEnd,
            position,
            reference: None,
            layout: Layout::from_probe(self.tree.source().get(position..).unwrap_or_default()),
        }
    }

    /// Anchors after the node with the greatest start offset, or at
    /// `fallback` when there is none.
    fn last_of<'n>(&self, nodes: impl Iterator<Item = &'n Node>, fallback: usize) -> Anchor {
        match last_by_start(nodes) {
            Some(node) => Anchor {
                kind: AnchorKind::AfterNode,
                position: node.span().end(),
                reference: Some(node.id()),
                layout: Layout::after_node(self.tree.leading_trivia(node)),
            },
            None => Anchor {
                kind: AnchorKind::BeforeOffset,
                position: fallback,
                reference: None,
                layout: Layout::from_probe(self.tree.source().get(fallback..).unwrap_or_default()),
            },
        }
    }
}

fn last_by_start<'n>(nodes: impl Iterator<Item = &'n Node>) -> Option<&'n Node> {
    nodes.max_by_key(|node| node.span().start())
}

/// Returns the `\r?\n` line break and all whitespace after it when `probe`
/// starts with one.
fn leading_break(probe: &str) -> Option<&str> {
    let after_cr = probe.strip_prefix('\r').unwrap_or(probe);
    let after_newline = after_cr.strip_prefix('\n')?;
    let indent = after_newline.len() - after_newline.trim_start().len();
    let consumed = probe.len() - after_newline.len() + indent;
    probe.get(..consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\n  title", Some("\n  "))]
    #[case("\r\n\ttitle", Some("\r\n\t"))]
    #[case("\n\n    title", Some("\n\n    "))]
    #[case("", None)]
    #[case(" title", None)]
    #[case("}", None)]
    fn leading_break_matches_newline_plus_indent(
        #[case] probe: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(leading_break(probe), expected);
    }

    #[test]
    fn layout_from_probe_wraps_without_line_break() {
        assert_eq!(Layout::from_probe("}"), Layout::wrapped());
        assert_eq!(Layout::from_probe("\n  x"), Layout::prefixed("\n  "));
        assert_eq!(Layout::wrapped().render("x"), "\nx\n");
    }

    #[test]
    fn node_without_trivia_gets_a_single_line_break() {
        assert_eq!(Layout::after_node(""), Layout::prefixed("\n"));
        assert_eq!(Layout::after_node(" "), Layout::wrapped());
        assert_eq!(Layout::after_node("\n\n  "), Layout::prefixed("\n\n  "));
    }

    #[test]
    fn missing_node_is_reported_only_on_demand() {
        let target = Target::field_initializer("title");
        let error = Resolution::NotFound
            .required(&target)
            .expect_err("resolution is not found");
        assert_eq!(
            error.to_string(),
            "no anchor found for target initializer of field `title`"
        );
    }
}
