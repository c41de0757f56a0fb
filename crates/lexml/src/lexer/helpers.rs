//! Helper methods for the lexer states.
//!
//! This module contains the pieces shared between states:
//! - State transitions and per-line resets
//! - Token emission and stream termination
//! - Warnings

use std::io::BufRead;

use lexml_common::warning::warn_once;

use super::core::{Lexer, LexerState};
use crate::error::LexError;
use crate::sink::TokenSink;
use crate::token::{Token, TokenKind};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<R: BufRead, S: TokenSink> Lexer<R, S> {
    pub(super) const fn switch_to(&mut self, new_state: LexerState) {
        self.state = new_state;
    }

    /// Hand the completed working line to the scanner with fresh per-line
    /// state.
    pub(super) fn begin_scan(&mut self) {
        self.has_attribute = false;
        self.self_closed = false;
        self.tag_name.clear();
        self.switch_to(LexerState::ScanLine);
    }

    /// Drop the rest of the working line and go back for the next physical
    /// line.
    pub(super) fn end_line(&mut self) {
        self.has_attribute = false;
        self.self_closed = false;
        self.tag_name.clear();
        self.working.clear();
        self.switch_to(LexerState::ReadLine);
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl<R: BufRead, S: TokenSink> Lexer<R, S> {
    pub(super) fn emit(&mut self, token: Token) -> Result<(), LexError> {
        self.sink.send(token)
    }

    /// Emit a description block that is still being collected, if any.
    ///
    /// Outside a continuation the working line only ever holds description
    /// text, so anything left there is a block nobody has emitted yet.
    pub(super) fn flush_description(&mut self) -> Result<(), LexError> {
        if self.continuation_open || self.working.is_empty() {
            return Ok(());
        }
        let token = Token::new(TokenKind::Description, self.working.text());
        self.working.clear();
        self.emit(token)
    }

    /// Settle whatever the input left half-finished.
    pub(super) fn finish_input(&mut self) -> Result<(), LexError> {
        if self.continuation_open {
            return Err(LexError::UnterminatedTag {
                line: self.working.line_number(),
            });
        }
        self.flush_description()
    }

    /// Emit the EOF token and close the sink.
    pub(super) fn finish_stream(&mut self) -> Result<(), LexError> {
        let sent = self.sink.send(Token::eof());
        let closed = self.sink.close();
        sent.and(closed)
    }

    /// Terminate the stream after an error.
    pub(super) fn abort(&mut self) {
        if self.state == LexerState::Finished {
            return;
        }
        self.switch_to(LexerState::Finished);
        // The error that got us here is the one returned.
        if let Err(error) = self.finish_stream() {
            warn_once("Lexer", &format!("could not end the token stream: {error}"));
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl<R: BufRead, S: TokenSink> Lexer<R, S> {
    /// Report input the lexer can recover from, against the line the
    /// working line started on.
    pub(super) fn log_warning(&self, message: &str) {
        warn_once(
            "Lexer",
            &format!("line {}: {message}", self.working.line_number()),
        );
    }
}
