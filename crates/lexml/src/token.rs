use core::fmt;

use strum_macros::{Display, EnumIter};

/// The kind of a lexical unit found in the input.
///
/// A start tag `<a>` produces [`TokenKind::StartTag`], a stop tag `</a>` or a
/// self-closing marker `/>` produces [`TokenKind::EndTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TokenKind {
    /// Name of a tag opened with `<`.
    StartTag,
    /// Name of a tag closed with `</`, `/>` or `?>`.
    EndTag,
    /// Attribute name, found in front of an `=`.
    ArgumentName,
    /// Attribute value, found after an `=`, without its quotes.
    ArgumentValue,
    /// Free text lines that belong to no tag, merged into one block.
    Description,
    /// Text between a start and a stop tag on the same logical line.
    JustText,
    /// End of input. Always the last token.
    #[strum(serialize = "EOF")]
    Eof,
}

/// A token handed to a [`TokenSink`](crate::TokenSink).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// What was found.
    pub kind: TokenKind,
    /// The text found, with surrounding whitespace trimmed.
    pub text: String,
}

impl Token {
    /// Create a token, trimming surrounding whitespace from `text`.
    #[must_use]
    pub fn new(kind: TokenKind, text: &str) -> Self {
        Self {
            kind,
            text: text.trim().to_owned(),
        }
    }

    /// Create the end-of-input token.
    #[must_use]
    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "EOF")
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.text)
    }
}
