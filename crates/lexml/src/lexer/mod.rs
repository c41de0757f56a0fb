//! Lexer module.
//!
//! Physical lines flow from the [`source::LineSource`] into the
//! [`classify`] rules, which merge them into a [`working_line::WorkingLine`].
//! Completed logical lines are scanned with the [`scanner::TagScanner`]
//! helpers, and the [`core::Lexer`] state machine drives the whole loop.

/// Line classification rules.
pub mod classify;
/// The lexer state machine.
pub mod core;
/// Helper methods shared by the lexer states.
pub mod helpers;
/// Character-level extraction of tag names, attributes and text.
pub mod scanner;
/// Buffered line reader with one line of lookahead.
pub mod source;
/// The logical line under construction.
pub mod working_line;

use std::io::BufRead;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

pub use self::core::{Lexer, LexerState};

use crate::error::LexError;
use crate::sink::{CollectSink, StreamSink};
use crate::token::Token;

/// Tokenize everything `reader` yields and return the tokens.
///
/// # Errors
///
/// Returns the first read error or malformed-input error.
pub fn tokenize<R: BufRead>(reader: R) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(reader, CollectSink::new());
    lexer.run()?;
    Ok(lexer.into_sink().into_tokens())
}

/// Tokenize a string.
///
/// # Errors
///
/// Returns the first malformed-input error.
pub fn tokenize_str(input: &str) -> Result<Vec<Token>, LexError> {
    tokenize(input.as_bytes())
}

/// Run a lexer over `reader` on its own thread, streaming tokens.
///
/// Every token is handed over through a zero-capacity channel, so the lexer
/// only moves on once the consumer has received the previous token. The
/// receiver yields `None` right after the EOF token. Joining the handle gives
/// the lexer's outcome.
pub fn spawn_stream<R>(reader: R) -> (Receiver<Token>, JoinHandle<Result<(), LexError>>)
where
    R: BufRead + Send + 'static,
{
    let (sink, tokens) = StreamSink::channel();
    let producer = thread::spawn(move || Lexer::new(reader, sink).run());
    (tokens, producer)
}
