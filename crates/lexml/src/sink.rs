//! Destinations for tokens.
//!
//! The lexer does not know where its tokens go. A sink is picked once per
//! run and injected into [`Lexer::new`](crate::Lexer::new):
//! - [`StreamSink`] hands each token to a consumer thread through a
//!   zero-capacity channel, so every send waits for the consumer
//! - [`ConsoleSink`] prints each token
//! - [`CollectSink`] keeps the tokens in memory

use std::io::{self, Stdout, Write};
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

use crate::error::LexError;
use crate::token::Token;

/// A destination for tokens.
pub trait TokenSink {
    /// Deliver one token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be delivered.
    fn send(&mut self, token: Token) -> Result<(), LexError>;

    /// Signal that no more tokens will be sent.
    ///
    /// # Errors
    ///
    /// Returns an error if pending output cannot be flushed.
    fn close(&mut self) -> Result<(), LexError> {
        Ok(())
    }
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn send(&mut self, token: Token) -> Result<(), LexError> {
        (**self).send(token)
    }

    fn close(&mut self) -> Result<(), LexError> {
        (**self).close()
    }
}

/// Streams tokens to a consumer over a rendezvous channel.
///
/// The channel has no buffer: `send` blocks until the consumer receives.
/// The channel is closed right after the EOF token has been handed over.
#[derive(Debug)]
pub struct StreamSink {
    sender: Option<SyncSender<Token>>,
}

impl StreamSink {
    /// Create a sink together with the receiver its tokens arrive on.
    #[must_use]
    pub fn channel() -> (Self, Receiver<Token>) {
        let (sender, receiver) = sync_channel(0);
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// Returns true once the channel has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.sender.is_none()
    }
}

impl TokenSink for StreamSink {
    fn send(&mut self, token: Token) -> Result<(), LexError> {
        let sender = self.sender.as_ref().ok_or(LexError::SinkClosed)?;
        let is_eof = token.is_eof();
        sender
            .send(token)
            .map_err(|_| LexError::ConsumerDisconnected)?;
        if is_eof {
            self.sender = None;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), LexError> {
        // Dropping the sender is what closes the channel.
        self.sender = None;
        Ok(())
    }
}

/// Prints each token as it is emitted.
#[derive(Debug)]
pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
}

impl ConsoleSink<Stdout> {
    /// Print to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Print to the given writer.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TokenSink for ConsoleSink<W> {
    fn send(&mut self, token: Token) -> Result<(), LexError> {
        writeln!(self.out, "{:<14}{}", token.kind.to_string(), token.text).map_err(LexError::Write)
    }

    fn close(&mut self) -> Result<(), LexError> {
        self.out.flush().map_err(LexError::Write)
    }
}

/// Keeps every token in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectSink {
    tokens: Vec<Token>,
    closed: bool,
}

impl CollectSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens received so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns true once the sink has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Take the received tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl TokenSink for CollectSink {
    fn send(&mut self, token: Token) -> Result<(), LexError> {
        if self.closed {
            return Err(LexError::SinkClosed);
        }
        self.tokens.push(token);
        Ok(())
    }

    fn close(&mut self) -> Result<(), LexError> {
        self.closed = true;
        Ok(())
    }
}
