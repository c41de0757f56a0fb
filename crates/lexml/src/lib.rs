//! Tokenizer for line-oriented protocol-definition XML.
//!
//! # Scope
//!
//! This crate implements a lexer for a restricted XML dialect where every
//! attribute value is double-quoted and tags carry at most simple
//! tag/attribute/text structure:
//! - **Line source** with one line of lookahead
//! - **Line classification** that merges multi-line tags and free-text
//!   description blocks into logical lines
//! - **Tag scanning** of each logical line into start/end tag, attribute,
//!   text and description tokens
//! - **Token sinks** that stream tokens through a rendezvous channel, print
//!   them, or collect them
//!
//! # Not Implemented
//!
//! - Well-formedness validation
//! - Arbitrarily nested elements on one line
//! - Namespaces and entity decoding
//! - Comments beyond skipping `<!--` lines

/// Errors raised while tokenizing.
pub mod error;
/// The lexer state machine and its components.
pub mod lexer;
/// Destinations for emitted tokens.
pub mod sink;
/// Token types produced by the lexer.
pub mod token;

pub use error::LexError;
pub use lexer::{Lexer, LexerState, spawn_stream, tokenize, tokenize_str};
pub use sink::{CollectSink, ConsoleSink, StreamSink, TokenSink};
pub use token::{Token, TokenKind};
