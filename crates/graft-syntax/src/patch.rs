//! Applying an [`EditList`] to source text.
//!
//! Edits are spliced from the highest offset down so that each splice
//! leaves the offsets of the remaining (lower) edits untouched. The input
//! text is never modified; every call builds a fresh buffer.

use crate::error::SyntaxError;
use crate::plan::{Edit, EditList};

/// Applies `edits` to `original` and returns the new text.
///
/// Insertions sharing an offset appear in declaration order, the earliest
/// declared closest to the offset. For edits at distinct offsets the
/// result does not depend on the order of the list.
///
/// # Errors
///
/// Returns [`SyntaxError::EditOutOfBounds`] when an edit reaches past the
/// end of `original`, and [`SyntaxError::NotCharBoundary`] when an edit
/// boundary splits a UTF-8 character. Nothing is applied in either case.
pub fn apply_edits(original: &str, edits: &EditList) -> Result<String, SyntaxError> {
    for edit in edits.edits() {
        check_bounds(original, edit)?;
    }

    // Sort by offset keeping declaration order for ties, then splice back
    // to front.
    let mut ordered: Vec<&Edit> = edits.edits().iter().collect();
    ordered.sort_by_key(|edit| edit.offset());

    let mut text = original.to_owned();
    for edit in ordered.into_iter().rev() {
        text.replace_range(edit.offset()..edit.end(), edit.insert_text());
    }
    Ok(text)
}

fn check_bounds(original: &str, edit: &Edit) -> Result<(), SyntaxError> {
    let (start, end) = (edit.offset(), edit.end());
    if end > original.len() {
        return Err(SyntaxError::EditOutOfBounds {
            start,
            end,
            len: original.len(),
        });
    }
    for offset in [start, end] {
        if !original.is_char_boundary(offset) {
            return Err(SyntaxError::NotCharBoundary { offset });
        }
    }
    Ok(())
}
