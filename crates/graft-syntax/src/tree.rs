//! Owned, language-neutral syntax tree used for anchor resolution.
//!
//! A [`SyntaxTree`] is an arena of [`Node`] values produced by lowering a
//! Tree-sitter parse (see [`crate::Parser`]) or by wrapping unparsed text
//! with [`SyntaxTree::opaque`]. Offsets are byte offsets into the source the
//! tree was built from; a tree never outlives or changes that source.

use std::ops::Range;

/// Half-open byte range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span, swapping the bounds if they arrive reversed.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Inclusive start offset.
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Number of bytes covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns true for zero-width spans.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Converts the span into a standard range.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Index of a node inside its [`SyntaxTree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Closed set of node categories the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An import declaration at the top level of a module.
    Import,
    /// A class declaration, including any decorators and export keyword.
    ClassDecl,
    /// A field (property) declaration inside a class body.
    FieldDecl,
    /// Any other top-level statement.
    Statement,
    /// A literal value such as a string or number.
    Literal,
    /// A named entry of a class decorator's metadata object.
    Property,
    /// An array literal; its children are the elements.
    List,
    /// Anything else worth addressing (non-literal initializers, list
    /// elements, unparseable regions).
    Other,
}

/// A single node of the lowered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    name: Option<String>,
    span: Span,
    full_start: usize,
    body: Option<Span>,
    children: Vec<NodeId>,
}

impl Node {
    /// Identifier of this node within its tree.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Category of the node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Declared name for classes, fields, and properties.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Byte span of the node without leading trivia.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Start offset including leading whitespace and comments.
    #[must_use]
    pub const fn full_start(&self) -> usize {
        self.full_start
    }

    /// Span of a class body, starting at its opening delimiter (`{` or the
    /// `:` of a Python class header).
    #[must_use]
    pub const fn body(&self) -> Option<Span> {
        self.body
    }

    /// Ids of the direct children in source order.
    #[must_use]
    pub fn child_ids(&self) -> &[NodeId] {
        &self.children
    }
}

/// Immutable tree over one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    has_errors: bool,
}

impl SyntaxTree {
    /// Wraps text that has no grammar (templates, prose).
    ///
    /// The resulting tree has no nodes; only end-of-file anchors resolve
    /// against it.
    #[must_use]
    pub fn opaque(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
            has_errors: false,
        }
    }

    /// Source text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Offset past all content.
    #[must_use]
    pub fn root_end(&self) -> usize {
        self.source.len()
    }

    /// Returns whether the parser reported error or missing nodes.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Iterates the top-level nodes in source order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.roots.iter().filter_map(|id| self.node(*id))
    }

    /// Iterates the direct children of `node` in source order.
    pub fn children<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> {
        node.children.iter().filter_map(|id| self.node(*id))
    }

    /// Returns the first class declaration in the document, if any.
    #[must_use]
    pub fn first_class(&self) -> Option<&Node> {
        self.roots().find(|node| node.kind == NodeKind::ClassDecl)
    }

    /// Returns the field named `name` among the direct members of `class`.
    #[must_use]
    pub fn field<'a>(&'a self, class: &'a Node, name: &str) -> Option<&'a Node> {
        self.children(class)
            .find(|child| child.kind == NodeKind::FieldDecl && child.name() == Some(name))
    }

    /// Returns the list held by the decorator metadata property `property`
    /// of `class`, such as the `imports` array of an `@NgModule`.
    #[must_use]
    pub fn metadata_list<'a>(&'a self, class: &'a Node, property: &str) -> Option<&'a Node> {
        self.children(class)
            .find(|child| child.kind == NodeKind::Property && child.name() == Some(property))
            .and_then(|entry| self.children(entry).next())
            .filter(|value| value.kind == NodeKind::List)
    }

    /// Source text covered by `span`, or an empty string when the span does
    /// not fit this tree's source.
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        self.source.get(span.range()).unwrap_or_default()
    }

    /// Source text of `node`.
    #[must_use]
    pub fn text(&self, node: &Node) -> &str {
        self.slice(node.span)
    }

    /// Leading trivia of `node`: the text between its full start and start.
    #[must_use]
    pub fn leading_trivia(&self, node: &Node) -> &str {
        self.slice(Span::new(node.full_start, node.span.start))
    }
}

/// Incremental constructor used by the language lowering passes.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

/// Description of a node about to be added to a [`TreeBuilder`].
#[derive(Debug)]
pub(crate) struct NodeSpec {
    pub(crate) kind: NodeKind,
    pub(crate) name: Option<String>,
    pub(crate) span: Span,
    pub(crate) full_start: usize,
    pub(crate) body: Option<Span>,
}

impl NodeSpec {
    pub(crate) const fn new(kind: NodeKind, span: Span, full_start: usize) -> Self {
        Self {
            kind,
            name: None,
            span,
            full_start,
            body: None,
        }
    }

    pub(crate) fn named(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub(crate) const fn with_body(mut self, body: Option<Span>) -> Self {
        self.body = body;
        self
    }
}

impl TreeBuilder {
    /// Adds a node under `parent`, or as a root when `parent` is `None`.
    pub(crate) fn push(&mut self, parent: Option<NodeId>, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            kind: spec.kind,
            name: spec.name,
            span: spec.span,
            full_start: spec.full_start.min(spec.span.start),
            body: spec.body,
            children: Vec::new(),
        });
        match parent.and_then(|parent_id| self.nodes.get_mut(parent_id.0)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub(crate) fn finish(self, source: &str, has_errors: bool) -> SyntaxTree {
        SyntaxTree {
            source: source.to_owned(),
            nodes: self.nodes,
            roots: self.roots,
            has_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SyntaxTree {
        let source = "class A {\n  x = 1;\n}\n";
        let mut builder = TreeBuilder::default();
        let class = builder.push(
            None,
            NodeSpec::new(NodeKind::ClassDecl, Span::new(0, 20), 0)
                .named(Some("A".to_owned()))
                .with_body(Some(Span::new(8, 20))),
        );
        builder.push(
            Some(class),
            NodeSpec::new(NodeKind::FieldDecl, Span::new(12, 18), 9).named(Some("x".to_owned())),
        );
        builder.finish(source, false)
    }

    #[test]
    fn span_normalises_reversed_bounds() {
        let span = Span::new(9, 4);
        assert_eq!((span.start(), span.end(), span.len()), (4, 9, 5));
    }

    #[test]
    fn opaque_tree_has_no_nodes_and_ends_at_text_length() {
        let tree = SyntaxTree::opaque("<h1>hi</h1>\n");
        assert_eq!(tree.roots().count(), 0);
        assert_eq!(tree.root_end(), 12);
        assert!(tree.first_class().is_none());
    }

    #[test]
    fn field_lookup_is_scoped_to_direct_members() {
        let tree = sample_tree();
        let class = tree.first_class().expect("class");
        let field = tree.field(class, "x").expect("field x");
        assert_eq!(tree.text(field), "x = 1;");
        assert_eq!(tree.leading_trivia(field), "\n  ");
        assert!(tree.field(class, "y").is_none());
    }

    #[test]
    fn builder_clamps_full_start_to_start() {
        let mut builder = TreeBuilder::default();
        let id = builder.push(None, NodeSpec::new(NodeKind::Statement, Span::new(3, 5), 7));
        let tree = builder.finish("abcdefgh", false);
        let node = tree.node(id).expect("node");
        assert_eq!(node.full_start(), 3);
    }
}
