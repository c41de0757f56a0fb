use std::io::BufRead;

use crate::error::LexError;

/// One physical input line, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line text without surrounding whitespace or line ending.
    pub text: String,
    /// 0-based position of the line in the input.
    pub number: usize,
}

/// Reads lines one at a time, keeping the following line as lookahead.
///
/// The classifier needs to know whether the *next* line opens a tag before it
/// decides what to do with the current one, so the source always holds two
/// lines: `current` and `next`.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    buffer: String,
    lines_read: usize,
    primed: bool,
    current: Option<Line>,
    next: Option<Line>,
}

impl<R: BufRead> LineSource<R> {
    /// Create a source over `reader`. Nothing is read until [`Self::advance`].
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            lines_read: 0,
            primed: false,
            current: None,
            next: None,
        }
    }

    /// Move the lookahead into the current slot and read a new lookahead.
    ///
    /// Returns `false` once the last line has already been delivered.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::Io`] if reading fails.
    pub fn advance(&mut self) -> Result<bool, LexError> {
        if !self.primed {
            self.primed = true;
            self.next = self.read_physical()?;
        }
        self.current = self.next.take();
        if self.current.is_some() {
            self.next = self.read_physical()?;
        }
        Ok(self.current.is_some())
    }

    /// The line being classified.
    #[must_use]
    pub const fn current(&self) -> Option<&Line> {
        self.current.as_ref()
    }

    /// The line after the current one.
    #[must_use]
    pub const fn peek(&self) -> Option<&Line> {
        self.next.as_ref()
    }

    fn read_physical(&mut self) -> Result<Option<Line>, LexError> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        let mut text = self.buffer.as_str();
        if self.lines_read == 0 {
            text = text.strip_prefix('\u{feff}').unwrap_or(text);
        }
        let line = Line {
            text: text.trim().to_owned(),
            number: self.lines_read,
        };
        self.lines_read += 1;
        Ok(Some(line))
    }
}
