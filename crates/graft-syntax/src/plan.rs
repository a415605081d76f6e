//! Edit planning: turning anchored content into a validated edit list.

use crate::anchor::{Anchor, AnchorKind};
use crate::error::SyntaxError;

/// A concrete buffer operation: delete `delete_len` bytes at `offset`, then
/// insert `insert_text` there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edit {
    offset: usize,
    delete_len: usize,
    insert_text: String,
}

impl Edit {
    /// Creates a pure insertion.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            delete_len: 0,
            insert_text: text.into(),
        }
    }

    /// Creates a replacement of `[offset, offset + delete_len)`.
    #[must_use]
    pub fn replace(offset: usize, delete_len: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            delete_len,
            insert_text: text.into(),
        }
    }

    /// Start offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes removed.
    #[must_use]
    pub const fn delete_len(&self) -> usize {
        self.delete_len
    }

    /// Exclusive end of the removed range.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.delete_len)
    }

    /// Text inserted at the offset.
    #[must_use]
    pub fn insert_text(&self) -> &str {
        &self.insert_text
    }

    /// Returns whether applying both edits to one buffer is ambiguous.
    ///
    /// Ranges conflict when they intersect. Edits sharing a start offset
    /// conflict when either removes text; two insertions at one offset do
    /// not.
    #[must_use]
    pub const fn conflicts_with(&self, other: &Self) -> bool {
        if self.offset == other.offset {
            return self.delete_len > 0 || other.delete_len > 0;
        }
        self.offset < other.end() && other.offset < self.end()
    }
}

/// Pairwise non-overlapping edits in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditList {
    edits: Vec<Edit>,
}

impl EditList {
    /// Validates `edits` and wraps them.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::OverlappingEdits`] for the first conflicting
    /// pair, in declaration order.
    pub fn new(edits: Vec<Edit>) -> Result<Self, SyntaxError> {
        for (index, first) in edits.iter().enumerate() {
            for second in edits.iter().skip(index + 1) {
                if first.conflicts_with(second) {
                    return Err(SyntaxError::overlapping(
                        (first.offset, first.end()),
                        (second.offset, second.end()),
                    ));
                }
            }
        }
        Ok(Self { edits })
    }

    /// Edits in declaration order.
    #[must_use]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Number of edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns true when there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Content bound to an anchor, awaiting planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    anchor: Anchor,
    content: String,
}

impl EditRequest {
    /// Binds `content` to `anchor`.
    #[must_use]
    pub fn new(anchor: Anchor, content: impl Into<String>) -> Self {
        Self {
            anchor,
            content: content.into(),
        }
    }

    /// The anchor the content is bound to.
    #[must_use]
    pub const fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    fn into_edit(self) -> Edit {
        let Self { anchor, content } = self;
        match anchor.kind() {
            AnchorKind::ReplaceNode { end } => Edit::replace(
                anchor.position(),
                end.saturating_sub(anchor.position()),
                content,
            ),
            AnchorKind::AfterNode | AnchorKind::BeforeOffset | AnchorKind::AtEnd => {
                Edit::insert(anchor.position(), anchor.layout().render(&content))
            }
        }
    }
}

/// Plans one edit per request.
///
/// Insertion anchors become zero-length edits carrying the laid-out
/// content; replacement anchors span the referenced node. Requests keep
/// their order.
///
/// # Errors
///
/// Returns [`SyntaxError::OverlappingEdits`] when two requests touch the
/// same region. This signals a bug in the caller's anchor selection.
pub fn plan_edits<I>(requests: I) -> Result<EditList, SyntaxError>
where
    I: IntoIterator<Item = EditRequest>,
{
    EditList::new(requests.into_iter().map(EditRequest::into_edit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Edit::insert(4, "a"), Edit::insert(4, "b"), false)]
    #[case(Edit::insert(4, "a"), Edit::insert(9, "b"), false)]
    #[case(Edit::replace(2, 5, "x"), Edit::insert(4, "b"), true)]
    #[case(Edit::replace(2, 5, "x"), Edit::insert(7, "b"), false)]
    #[case(Edit::replace(2, 5, "x"), Edit::insert(2, "b"), true)]
    #[case(Edit::replace(2, 5, "x"), Edit::replace(6, 2, "y"), true)]
    #[case(Edit::replace(2, 5, "x"), Edit::replace(7, 2, "y"), false)]
    fn conflicts_follow_range_intersection(
        #[case] first: Edit,
        #[case] second: Edit,
        #[case] expected: bool,
    ) {
        assert_eq!(first.conflicts_with(&second), expected);
        assert_eq!(second.conflicts_with(&first), expected);
    }

    #[test]
    fn edit_list_rejects_overlap_and_names_both_ranges() {
        let error = EditList::new(vec![
            Edit::insert(0, "a"),
            Edit::replace(3, 4, "b"),
            Edit::insert(5, "c"),
        ])
        .expect_err("edits overlap");
        assert!(matches!(
            error,
            SyntaxError::OverlappingEdits {
                first_start: 3,
                first_end: 7,
                second_start: 5,
                second_end: 5,
            }
        ));
    }

    #[test]
    fn edit_list_keeps_declaration_order() {
        let list = EditList::new(vec![Edit::insert(9, "late"), Edit::insert(1, "early")])
            .expect("valid list");
        let offsets: Vec<_> = list.edits().iter().map(Edit::offset).collect();
        assert_eq!(offsets, vec![9, 1]);
        assert_eq!(list.len(), 2);
    }
}
