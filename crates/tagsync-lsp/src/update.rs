//! Tag-name update operation
//!
//! Turns the active selections into a batch of text edits that rename the
//! opening and closing tag names of each selection's enclosing element.
//! The batch is merged and deduplicated so the host can apply it as one
//! transaction: either every replacement lands or none do.

use std::ops::Range as ByteRange;

use tower_lsp::lsp_types::{Range, TextEdit};
use tracing::debug;

use tagsync_markup::{MarkupError, MarkupService};

use crate::position::LineIndex;

/// Computes tag-name edit batches for one document text.
///
/// The parsing service is passed in rather than owned, so callers decide
/// whether they get HTML or XML semantics.
pub struct UpdateTagAnalyzer<'a> {
    text: &'a str,
    index: LineIndex<'a>,
    service: &'a dyn MarkupService,
}

impl<'a> UpdateTagAnalyzer<'a> {
    /// Create an analyzer over `text` backed by `service`
    pub fn new(text: &'a str, service: &'a dyn MarkupService) -> Self {
        Self {
            text,
            index: LineIndex::new(text),
            service,
        }
    }

    /// Ranges occupied by the tag names to update, one pair (or single,
    /// for tags without a close tag) per selection with an enclosing
    /// element. Selections outside any element contribute nothing.
    pub fn update_ranges(&self, selections: &[Range]) -> Result<Vec<Range>, MarkupError> {
        Ok(self
            .byte_ranges(selections)?
            .into_iter()
            .map(|range| {
                Range::new(
                    self.index.position_at(range.start),
                    self.index.position_at(range.end),
                )
            })
            .collect())
    }

    /// The full edit batch: every computed range replaced by `new_name`.
    /// An empty name produces no edits.
    pub fn edits(&self, selections: &[Range], new_name: &str) -> Result<Vec<TextEdit>, MarkupError> {
        if new_name.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .update_ranges(selections)?
            .into_iter()
            .map(|range| TextEdit {
                range,
                new_text: new_name.to_string(),
            })
            .collect())
    }

    fn byte_ranges(&self, selections: &[Range]) -> Result<Vec<ByteRange<usize>>, MarkupError> {
        // Anchor each selection at its start offset; later selections are
        // handled first, mirroring the reverse-document-order contract.
        let mut anchors: Vec<usize> = selections
            .iter()
            .filter_map(|sel| self.index.offset_at(sel.start))
            .collect();
        anchors.sort_unstable();
        anchors.dedup();

        // The document does not change between selections, so one parse
        // serves them all.
        let tree = self.service.parse(self.text)?;

        let mut ranges = Vec::new();
        for offset in anchors.into_iter().rev() {
            let Some(element) = tree.find_node_at(offset) else {
                debug!(offset, "no enclosing element, skipping selection");
                continue;
            };
            let (open, close) = element.tag_name_spans();
            ranges.extend(open);
            ranges.extend(close);
        }

        // Two cursors inside one element find the same spans; the merged
        // batch must not contain overlapping edits.
        ranges.sort_by_key(|r| r.start);
        ranges.dedup();
        Ok(ranges)
    }
}

/// Apply an edit batch to `text`, back to front, and return the result.
///
/// This is the in-memory stand-in for the host's transactional edit
/// primitive, used by the CLI and by tests. Edits must not overlap.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let index = LineIndex::new(text);
    let mut spans: Vec<(ByteRange<usize>, &str)> = edits
        .iter()
        .filter_map(|edit| {
            let start = index.offset_at(edit.range.start)?;
            let end = index.offset_at(edit.range.end)?;
            Some((start..end, edit.new_text.as_str()))
        })
        .collect();
    spans.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut result = text.to_string();
    for (range, replacement) in spans {
        result.replace_range(range, replacement);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagsync_markup::HtmlService;
    use tower_lsp::lsp_types::Position;

    fn cursor(line: u32, character: u32) -> Range {
        let pos = Position::new(line, character);
        Range::new(pos, pos)
    }

    fn rename(text: &str, cursors: &[Range], new_name: &str) -> String {
        let service = HtmlService::new();
        let analyzer = UpdateTagAnalyzer::new(text, &service);
        let edits = analyzer.edits(cursors, new_name).expect("parse succeeds");
        apply_edits(text, &edits)
    }

    #[test]
    fn test_single_cursor_renames_both_tags() {
        assert_eq!(
            rename("<div>text</div>", &[cursor(0, 7)], "span"),
            "<span>text</span>"
        );
    }

    #[test]
    fn test_rename_to_same_name_is_identity() {
        let text = "<div>text</div>";
        assert_eq!(rename(text, &[cursor(0, 7)], "div"), text);
    }

    #[test]
    fn test_empty_name_produces_no_edits() {
        let service = HtmlService::new();
        let analyzer = UpdateTagAnalyzer::new("<div>x</div>", &service);
        let edits = analyzer.edits(&[cursor(0, 6)], "").unwrap();
        assert!(edits.is_empty());
    }

    #[test]
    fn test_multi_cursor_nested_elements() {
        let text = "<div><span>inner</span> outer</div>";
        let result = rename(text, &[cursor(0, 12), cursor(0, 26)], "b");
        assert_eq!(result, "<b><b>inner</b> outer</b>");
    }

    #[test]
    fn test_multi_cursor_edits_do_not_interfere() {
        let text = "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>";
        let result = rename(text, &[cursor(1, 8), cursor(2, 8)], "item");
        assert_eq!(result, "<ul>\n  <item>one</item>\n  <item>two</item>\n</ul>");
    }

    #[test]
    fn test_two_cursors_in_same_element_deduplicate() {
        let service = HtmlService::new();
        let text = "<div>some text</div>";
        let analyzer = UpdateTagAnalyzer::new(text, &service);
        let edits = analyzer
            .edits(&[cursor(0, 6), cursor(0, 10)], "span")
            .unwrap();
        // One open range and one close range, not two of each.
        assert_eq!(edits.len(), 2);
        assert_eq!(apply_edits(text, &edits), "<span>some text</span>");
    }

    #[test]
    fn test_self_closing_renames_single_occurrence() {
        assert_eq!(
            rename("<p>a<br/>b</p>", &[cursor(0, 6)], "hr"),
            "<p>a<hr/>b</p>"
        );
    }

    #[test]
    fn test_void_element_renames_single_occurrence() {
        assert_eq!(
            rename("<p>a<img>b</p>", &[cursor(0, 6)], "input"),
            "<p>a<input>b</p>"
        );
    }

    #[test]
    fn test_unclosed_element_renames_open_tag_only() {
        assert_eq!(rename("<ul><li>one", &[cursor(0, 9)], "item"), "<ul><item>one");
    }

    #[test]
    fn test_cursor_outside_any_element_is_noop() {
        let text = "plain <b>x</b> text";
        assert_eq!(rename(text, &[cursor(0, 2)], "i"), text);
    }

    #[test]
    fn test_mixed_cursors_inside_and_outside() {
        let text = "plain <b>x</b> text";
        assert_eq!(
            rename(text, &[cursor(0, 2), cursor(0, 10)], "i"),
            "plain <i>x</i> text"
        );
    }

    #[test]
    fn test_selection_range_uses_start_position() {
        // A highlighted selection anchors at its start.
        let text = "<div>text</div>";
        let sel = Range::new(Position::new(0, 6), Position::new(0, 9));
        assert_eq!(rename(text, &[sel], "span"), "<span>text</span>");
    }

    #[test]
    fn test_parse_error_propagates() {
        let service = HtmlService::new();
        let analyzer = UpdateTagAnalyzer::new("<div", &service);
        assert!(analyzer.edits(&[cursor(0, 2)], "span").is_err());
    }

    #[test]
    fn test_multiline_rename_positions() {
        let text = "<div>\n  <p>\n    body\n  </p>\n</div>";
        let result = rename(text, &[cursor(2, 6)], "section");
        assert_eq!(result, "<div>\n  <section>\n    body\n  </section>\n</div>");
    }
}
