use std::ops::Range;

/// Maps between byte offsets (what `regex` and `str::find` report) and char
/// offsets (what spans and training corpora use).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharIndex {
    // byte offset of every char start, followed by the text's byte length
    boundaries: Vec<usize>,
}

impl CharIndex {
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        boundaries.push(text.len());
        CharIndex { boundaries }
    }

    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Char offset of a byte offset that falls on a char boundary.
    pub fn char_offset(&self, byte: usize) -> Option<usize> {
        self.boundaries.binary_search(&byte).ok()
    }

    pub fn char_range(&self, bytes: Range<usize>) -> Option<Range<usize>> {
        Some(self.char_offset(bytes.start)?..self.char_offset(bytes.end)?)
    }

    pub fn byte_range(&self, start: usize, end: usize) -> Option<Range<usize>> {
        if start > end || end > self.char_len() {
            return None;
        }
        Some(self.boundaries[start]..self.boundaries[end])
    }
}
