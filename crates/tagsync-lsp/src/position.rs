//! Byte offset / LSP position conversion
//!
//! The markup tree speaks byte offsets; the protocol speaks line +
//! UTF-16 column. `LineIndex` is built once per document text and
//! translates in both directions.

use tower_lsp::lsp_types::Position;

/// Line-start table over a borrowed document text
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Build the index for `text`
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { text, line_starts }
    }

    /// Byte offset of an LSP position.
    ///
    /// Returns `None` for a line past the end of the document. A column
    /// past the end of its line clamps to the line's content end, matching
    /// how editors treat positions beyond the last character.
    pub fn offset_at(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        let line_text = &self.text[line_start..line_end];

        let mut units = 0u32;
        for (i, ch) in line_text.char_indices() {
            if units >= position.character {
                return Some(line_start + i);
            }
            units += ch.len_utf16() as u32;
        }

        let content = line_text
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line_text);
        Some(line_start + content.len())
    }

    /// LSP position of a byte offset, clamped to the document end.
    ///
    /// An offset inside a multi-byte character rounds down to that
    /// character's start.
    pub fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let character: usize = self.text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();
        Position::new(line as u32, character as u32)
    }
}
