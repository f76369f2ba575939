//! The tiny markup used in column and diagram text.

/// The marker pair a sub-heading starts with.
const HEADING_MARKER: &str = "**";

/// Checks whether a paragraph is a sub-heading.
pub(crate) fn is_heading(text: &str) -> bool {
    text.starts_with(HEADING_MARKER)
}

/// Remove every occurrence of the heading marker pair.
pub(crate) fn strip_markers(text: &str) -> String {
    text.replace(HEADING_MARKER, "")
}

/// Split paragraphs into two columns, the first one taking the extra item if there's an odd number.
pub(crate) fn split_columns<T>(items: &[T]) -> (&[T], &[T]) {
    items.split_at(items.len().div_ceil(2))
}
