/// A logical line under construction.
///
/// Holds one or more physical lines joined by a single space and the scan
/// cursor. The cursor only moves forward while a line is scanned and goes
/// back to 0 when the line is cleared.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkingLine {
    text: String,
    cursor: usize,
    first_line: Option<usize>,
}

impl WorkingLine {
    /// Create an empty working line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            first_line: None,
        }
    }

    /// Accumulated text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Scan position, as a byte offset into [`Self::text`].
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true when nothing has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 1-based number of the physical line this logical line started on.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.first_line.map_or(0, |n| n + 1)
    }

    /// Append a physical line, separated from earlier text by one space.
    pub fn append(&mut self, line: &str, number: usize) {
        if self.first_line.is_none() {
            self.first_line = Some(number);
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }

    /// Replace the whole working line with a single physical line.
    pub fn replace(&mut self, line: &str, number: usize) {
        self.clear();
        self.append(line, number);
    }

    /// Forget the text and reset the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.first_line = None;
    }

    /// Byte under the cursor, or `None` once the cursor is past the end.
    #[must_use]
    pub fn current_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.cursor).copied()
    }

    /// Move the cursor forward by one byte.
    pub const fn advance(&mut self) {
        self.cursor += 1;
    }

    /// Move the cursor to `position`. The cursor never moves backward.
    pub fn seek(&mut self, position: usize) {
        self.cursor = self.cursor.max(position);
    }

    /// Move the cursor past the end, marking the text as consumed.
    pub fn consume_all(&mut self) {
        self.cursor = self.text.len();
    }
}
