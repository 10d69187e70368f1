//! Element trees with byte-offset spans
//!
//! A `MarkupTree` is built fresh per parse and discarded after use. It only
//! records what the tag-rename operation needs: where each element starts
//! and ends, and where its open and close tags sit in the source text.

use std::ops::Range;

/// One parsed element and the spans of its tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name exactly as written in the source (case preserved)
    pub name: String,
    /// Byte offset of the `<` of the open tag
    pub start: usize,
    /// Byte offset one past the `>` of the open tag
    pub start_tag_end: Option<usize>,
    /// Byte offset of the `<` of `</name>`; `None` for self-closing,
    /// void, and unclosed elements
    pub end_tag_start: Option<usize>,
    /// Byte offset one past the element
    pub end: usize,
    /// True for `<name .../>` syntax
    pub self_closing: bool,
    /// Child elements, in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Byte ranges of the open-tag name and, if present, the close-tag name.
    ///
    /// The open-tag name immediately follows the `<`; the close-tag name
    /// sits between the two-byte `</` delimiter and the trailing `>`.
    /// Absent tags (self-closing, void, unclosed) yield `None` for their
    /// side, so callers never compute a range into a tag that isn't there.
    pub fn tag_name_spans(&self) -> (Option<Range<usize>>, Option<Range<usize>>) {
        let open = self
            .start_tag_end
            .map(|_| self.start + 1..self.start + 1 + self.name.len());
        let close = self.end_tag_start.map(|s| s + 2..self.end - 1);
        (open, close)
    }

    /// Whether `offset` falls inside this element.
    ///
    /// Containment is half-open at the start: a cursor sitting on the `<`
    /// itself belongs to the enclosing element, not this one.
    pub fn contains(&self, offset: usize) -> bool {
        self.start < offset && offset <= self.end
    }
}

/// A parsed document: the top-level elements plus the source length
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupTree {
    /// Top-level elements, in document order
    pub roots: Vec<Element>,
    /// Length of the parsed source in bytes
    pub len: usize,
}

impl MarkupTree {
    /// Find the smallest element whose span contains `offset`.
    ///
    /// Returns `None` when the offset falls outside every element (plain
    /// text between top-level tags, or an empty document).
    pub fn find_node_at(&self, offset: usize) -> Option<&Element> {
        fn descend(element: &Element, offset: usize) -> &Element {
            for child in &element.children {
                if child.contains(offset) {
                    return descend(child, offset);
                }
            }
            element
        }

        self.roots
            .iter()
            .find(|el| el.contains(offset))
            .map(|el| descend(el, offset))
    }
}
