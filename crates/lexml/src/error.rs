use std::io;

use thiserror::Error;

/// Error type for tokenizing.
///
/// Line numbers are 1-based and point at the first physical line of the
/// logical line being processed.
#[derive(Debug, Error)]
pub enum LexError {
    /// Reading the input failed. Invalid UTF-8 is reported here too.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// Writing tokens to the console failed.
    #[error("failed to write token: {0}")]
    Write(#[source] io::Error),

    /// A tag marker the scanner cannot make sense of.
    #[error("line {line}: malformed tag: {reason}")]
    MalformedTag {
        /// Line the logical line starts on.
        line: usize,
        /// What was wrong with the tag.
        reason: &'static str,
    },

    /// A logical line that does not fit the tag/text/tag pattern.
    #[error("line {line}: malformed line: {reason}")]
    MalformedLine {
        /// Line the logical line starts on.
        line: usize,
        /// What was wrong with the line.
        reason: &'static str,
    },

    /// A line that ends a tag although no tag was opened.
    #[error("line {line}: cannot classify line {text:?}")]
    UnclassifiedLine {
        /// Offending physical line.
        line: usize,
        /// Text of the offending line.
        text: String,
    },

    /// Input ended while a multi-line tag was still open.
    #[error("line {line}: tag is never closed before end of input")]
    UnterminatedTag {
        /// Line the unfinished tag starts on.
        line: usize,
    },

    /// A token was sent after the sink was closed.
    #[error("token sink is already closed")]
    SinkClosed,

    /// The receiving end of a token stream was dropped.
    #[error("token consumer disconnected")]
    ConsumerDisconnected,
}

impl LexError {
    /// Returns true for errors caused by the shape of the input rather than
    /// by I/O or by the sink.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedTag { .. }
                | Self::MalformedLine { .. }
                | Self::UnclassifiedLine { .. }
                | Self::UnterminatedTag { .. }
        )
    }
}
