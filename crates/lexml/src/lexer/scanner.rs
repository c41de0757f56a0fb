//! Character-level extraction over a logical line.
//!
//! The lexer walks the line byte by byte and stops at `<`, `>` and `=`.
//! The functions here take it from there: they decide what kind of tag
//! marker a `<` opens, cut out tag names and attributes, and find the text
//! between a start and a stop tag.
//!
//! Every byte access is bounds-checked; a shape the scanner cannot handle is
//! reported as [`LexError::MalformedTag`] or [`LexError::MalformedLine`].

use super::working_line::WorkingLine;
use crate::error::LexError;
use crate::token::TokenKind;

/// Whether the tag being scanned opens or closes an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagDirection {
    /// `<name`
    #[default]
    Start,
    /// `</name`
    Stop,
}

impl TagDirection {
    /// The token kind a tag name is emitted as.
    #[must_use]
    pub const fn token_kind(self) -> TokenKind {
        match self {
            Self::Start => TokenKind::StartTag,
            Self::Stop => TokenKind::EndTag,
        }
    }
}

/// What a `<` introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMarker {
    /// A start or stop tag.
    Tag(TagDirection),
    /// `<!--`: the rest of the logical line is skipped.
    Comment,
}

/// A tag name cut out of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagName<'a> {
    /// The name, without `<` or `</`.
    pub name: &'a str,
    /// Offset of the byte that ended the name.
    pub end: usize,
}

/// An attribute cut out of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Text between the nearest whitespace before `=` and the `=`.
    pub name: &'a str,
    /// Value without its quotes.
    pub value: &'a str,
    /// Offset where scanning continues after the value.
    pub resume: usize,
}

/// Read-only view of a logical line for tag extraction.
#[derive(Debug, Clone, Copy)]
pub struct TagScanner<'a> {
    text: &'a str,
    line: usize,
}

impl<'a> TagScanner<'a> {
    /// Scan the text of `working`.
    #[must_use]
    pub fn new(working: &'a WorkingLine) -> Self {
        Self::from_parts(working.text(), working.line_number())
    }

    /// Scan `text`, reporting errors against 1-based `line`.
    #[must_use]
    pub const fn from_parts(text: &'a str, line: usize) -> Self {
        Self { text, line }
    }

    /// Decide what the `<` at `pos` opens.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::MalformedTag`] when nothing follows the `<`.
    pub fn marker_at(&self, pos: usize) -> Result<TagMarker, LexError> {
        let bytes = self.text.as_bytes();
        match bytes.get(pos + 1) {
            None => Err(self.malformed_tag("`<` at end of line")),
            Some(b'/') => Ok(TagMarker::Tag(TagDirection::Stop)),
            Some(_) if bytes[pos..].starts_with(b"<!--") => Ok(TagMarker::Comment),
            Some(_) => Ok(TagMarker::Tag(TagDirection::Start)),
        }
    }

    /// Cut out the name of the tag whose `<` is at `pos`.
    ///
    /// A `/` right after the `<` is skipped. The name ends at the first
    /// whitespace, `>` or `/`.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::MalformedTag`] when the name is empty or runs past
    /// the end of the line.
    pub fn tag_name_at(&self, pos: usize) -> Result<TagName<'a>, LexError> {
        let bytes = self.text.as_bytes();
        let mut start = pos + 1;
        if bytes.get(start) == Some(&b'/') {
            start += 1;
        }

        let mut end = start;
        loop {
            match bytes.get(end) {
                None => return Err(self.malformed_tag("tag name runs past the end of the line")),
                Some(&b) if b.is_ascii_whitespace() || matches!(b, b'>' | b'/') => break,
                Some(_) => end += 1,
            }
        }

        if end == start {
            return Err(self.malformed_tag("empty tag name"));
        }
        Ok(TagName {
            name: &self.text[start..end],
            end,
        })
    }

    /// Cut out the attribute around the `=` at `eq`.
    ///
    /// The name starts after the nearest whitespace before `=`. A quoted
    /// value runs to the closing quote, or failing that to the next `>`; an
    /// unquoted value runs to the next whitespace or `>`.
    #[must_use]
    pub fn attribute_at(&self, eq: usize) -> Attribute<'a> {
        let before = &self.text[..eq];
        let name_start = before
            .rfind(|c: char| c.is_ascii_whitespace())
            .map_or(0, |space| space + 1);
        let name = before[name_start..].trim_matches('"');

        let open = eq + 1;
        let rest = &self.text[open..];
        let (value, resume) = if let Some(quoted) = rest.strip_prefix('"') {
            let body = open + 1;
            if let Some(close) = quoted.find('"') {
                (&quoted[..close], body + close + 1)
            } else if let Some(gt) = quoted.find('>') {
                (&quoted[..gt], body + gt)
            } else {
                (quoted, self.text.len())
            }
        } else {
            let end = rest
                .char_indices()
                .find(|&(i, c)| c.is_ascii_whitespace() || c == '>' || rest[i..].starts_with("/>"))
                .map_or(rest.len(), |(i, _)| i);
            (&rest[..end], open + end)
        };

        Attribute {
            name,
            value: value.trim_matches('"'),
            resume,
        }
    }

    /// Find the text between a start tag and a stop tag, as in
    /// `<name>text</name>`.
    ///
    /// The text starts after the first `>` that is not the last byte and ends
    /// before the last `<` that is not the first byte. Returns `None` when
    /// either boundary is missing or nothing but whitespace lies between.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::MalformedLine`] when the line holds more than two
    /// `<` or two `>`.
    pub fn text_between_tags(&self) -> Result<Option<&'a str>, LexError> {
        let bytes = self.text.as_bytes();
        let last = bytes.len().saturating_sub(1);
        let (mut opens, mut closes) = (0_usize, 0_usize);
        let mut text_start = None;
        let mut text_stop = None;

        for (pos, &byte) in bytes.iter().enumerate() {
            match byte {
                b'<' => {
                    opens += 1;
                    if pos != 0 {
                        text_stop = Some(pos);
                    }
                }
                b'>' => {
                    closes += 1;
                    if pos != last && text_start.is_none() {
                        text_start = Some(pos + 1);
                    }
                }
                _ => {}
            }
        }

        if opens > 2 || closes > 2 {
            return Err(LexError::MalformedLine {
                line: self.line,
                reason: "more angle brackets than a tag/text/tag line allows",
            });
        }

        match (text_start, text_stop) {
            (Some(start), Some(stop)) if start < stop => {
                let text = self.text[start..stop].trim();
                Ok((!text.is_empty()).then_some(text))
            }
            _ => Ok(None),
        }
    }

    /// Returns true when the line closes its own tag with `/>` or `?>`.
    #[must_use]
    pub fn has_self_closing_marker(&self) -> bool {
        self.text.contains("/>") || self.text.contains("?>")
    }

    const fn malformed_tag(&self, reason: &'static str) -> LexError {
        LexError::MalformedTag {
            line: self.line,
            reason,
        }
    }
}
