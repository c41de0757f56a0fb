use std::io::BufRead;

use strum_macros::{Display, EnumIter};

use super::classify::{LineClass, classify};
use super::scanner::{TagDirection, TagMarker, TagScanner};
use super::source::LineSource;
use super::working_line::WorkingLine;
use crate::error::LexError;
use crate::sink::TokenSink;
use crate::token::{Token, TokenKind};

/// The lexer state machine. Each state is one step of the line loop.
///
/// ```text
/// ReadLine -> ClassifyLine -> ReadLine            (blank or unfinished line)
///                          -> ScanLine            (complete logical line)
/// ScanLine -> TagName -> ScanLine
///          -> Attribute -> ScanLine
///          -> ReadLine                            (end of line or comment)
/// ReadLine -> EndOfInput -> Finished
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum LexerState {
    /// Fetch the next physical line.
    ReadLine,
    /// Decide how the current line joins the working line.
    ClassifyLine,
    /// Walk the working line from the cursor.
    ScanLine,
    /// Cut out the name of the tag at the cursor.
    TagName,
    /// Cut out the attribute whose `=` is at the cursor.
    Attribute,
    /// Input is exhausted; EOF still has to be emitted.
    EndOfInput,
    /// EOF has been emitted and the sink closed.
    Finished,
}

/// Turns lines of protocol-definition XML into tokens.
///
/// The lexer owns all scanning state for one input. Tokens go to the sink
/// chosen by the caller; the EOF token is always the last one, after which
/// the sink is closed.
pub struct Lexer<R, S> {
    pub(super) state: LexerState,
    pub(super) source: LineSource<R>,
    pub(super) working: WorkingLine,
    // A tag spread over several physical lines is being collected.
    pub(super) continuation_open: bool,
    // An `=` was seen on this logical line, so no inter-tag text is extracted.
    pub(super) has_attribute: bool,
    // The self-closing end tag was already emitted for this logical line.
    pub(super) self_closed: bool,
    pub(super) tag_name: String,
    pub(super) tag_direction: TagDirection,
    pub(super) sink: S,
}

impl<R: BufRead, S: TokenSink> Lexer<R, S> {
    /// Create a lexer reading from `reader` and emitting into `sink`.
    #[must_use]
    pub fn new(reader: R, sink: S) -> Self {
        Self {
            state: LexerState::ReadLine,
            source: LineSource::new(reader),
            working: WorkingLine::new(),
            continuation_open: false,
            has_attribute: false,
            self_closed: false,
            tag_name: String::new(),
            tag_direction: TagDirection::Start,
            sink,
        }
    }

    /// The state the next [`Self::step`] will run.
    #[must_use]
    pub const fn state(&self) -> LexerState {
        self.state
    }

    /// The sink tokens are emitted into.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Tokenize the whole input.
    ///
    /// Whatever happens, the EOF token is emitted and the sink closed exactly
    /// once before this returns. Calling `run` again afterwards does nothing.
    ///
    /// # Errors
    ///
    /// Returns the first read, sink or malformed-input error. Scanning stops
    /// at that point.
    pub fn run(&mut self) -> Result<(), LexError> {
        while self.state != LexerState::Finished {
            if let Err(error) = self.step() {
                self.abort();
                return Err(error);
            }
        }
        Ok(())
    }

    /// Run a single state transition and return the new state.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the transition. The lexer is left where
    /// the error happened; use [`Self::run`] to get EOF emitted on errors.
    pub fn step(&mut self) -> Result<LexerState, LexError> {
        match self.state {
            LexerState::ReadLine => self.handle_read_line_state()?,
            LexerState::ClassifyLine => self.handle_classify_line_state()?,
            LexerState::ScanLine => self.handle_scan_line_state()?,
            LexerState::TagName => self.handle_tag_name_state()?,
            LexerState::Attribute => self.handle_attribute_state()?,
            LexerState::EndOfInput => {
                self.switch_to(LexerState::Finished);
                self.finish_stream()?;
            }
            LexerState::Finished => {}
        }
        Ok(self.state)
    }

    fn handle_read_line_state(&mut self) -> Result<(), LexError> {
        if self.source.advance()? {
            self.switch_to(LexerState::ClassifyLine);
        } else {
            self.finish_input()?;
            self.switch_to(LexerState::EndOfInput);
        }
        Ok(())
    }

    /// Merge the current physical line into the working line.
    ///
    /// A completed description block is emitted as one token and then handed
    /// to the scanner already consumed, so text inside a description is never
    /// scanned for tags or attributes.
    fn handle_classify_line_state(&mut self) -> Result<(), LexError> {
        let Some(line) = self.source.current() else {
            self.switch_to(LexerState::ReadLine);
            return Ok(());
        };
        let next = self.source.peek().map(|next| next.text.as_str());
        let class = classify(&line.text, next, self.continuation_open);
        let (text, number) = (line.text.clone(), line.number);

        match class {
            LineClass::Blank => self.switch_to(LexerState::ReadLine),
            LineClass::CompleteTag => {
                if self.continuation_open {
                    self.log_warning(&format!(
                        "unfinished tag {:?} dropped",
                        self.working.text()
                    ));
                    self.continuation_open = false;
                } else {
                    self.flush_description()?;
                }
                self.working.replace(&text, number);
                self.begin_scan();
            }
            LineClass::ContinuationStart => {
                if self.continuation_open {
                    self.log_warning(&format!(
                        "another tag starts on line {} before this one is closed",
                        number + 1
                    ));
                } else {
                    self.flush_description()?;
                }
                self.continuation_open = true;
                self.working.append(&text, number);
                self.switch_to(LexerState::ReadLine);
            }
            LineClass::ContinuationMiddle | LineClass::DescriptionPart => {
                self.working.append(&text, number);
                self.switch_to(LexerState::ReadLine);
            }
            LineClass::ContinuationEnd => {
                self.working.append(&text, number);
                self.continuation_open = false;
                self.begin_scan();
            }
            LineClass::DescriptionEnd => {
                self.working.append(&text, number);
                let token = Token::new(TokenKind::Description, self.working.text());
                self.emit(token)?;
                // The block is consumed; the scanner only resets the line.
                self.working.consume_all();
                self.begin_scan();
            }
            LineClass::Unclassified => {
                return Err(LexError::UnclassifiedLine {
                    line: number + 1,
                    text,
                });
            }
        }
        Ok(())
    }

    fn handle_scan_line_state(&mut self) -> Result<(), LexError> {
        while let Some(byte) = self.working.current_byte() {
            match byte {
                b'<' => {
                    let scanner = TagScanner::new(&self.working);
                    match scanner.marker_at(self.working.cursor())? {
                        TagMarker::Comment => {
                            self.end_line();
                            return Ok(());
                        }
                        TagMarker::Tag(direction) => {
                            if direction == TagDirection::Stop && !self.has_attribute {
                                if let Some(text) = scanner.text_between_tags()? {
                                    let token = Token::new(TokenKind::JustText, text);
                                    self.emit(token)?;
                                }
                            }
                            self.tag_direction = direction;
                            self.switch_to(LexerState::TagName);
                            return Ok(());
                        }
                    }
                }
                b'>' => {
                    if !self.self_closed
                        && TagScanner::new(&self.working).has_self_closing_marker()
                    {
                        self.self_closed = true;
                        let token = Token::new(TokenKind::EndTag, &self.tag_name);
                        self.emit(token)?;
                    }
                    self.working.advance();
                }
                b'=' => {
                    self.has_attribute = true;
                    self.switch_to(LexerState::Attribute);
                    return Ok(());
                }
                _ => self.working.advance(),
            }
        }

        self.end_line();
        Ok(())
    }

    fn handle_tag_name_state(&mut self) -> Result<(), LexError> {
        let tag = TagScanner::new(&self.working).tag_name_at(self.working.cursor())?;
        let end = tag.end;
        self.tag_name.clear();
        self.tag_name.push_str(tag.name);
        self.working.seek(end);

        let token = Token::new(self.tag_direction.token_kind(), &self.tag_name);
        self.emit(token)?;
        self.switch_to(LexerState::ScanLine);
        Ok(())
    }

    fn handle_attribute_state(&mut self) -> Result<(), LexError> {
        let attribute = TagScanner::new(&self.working).attribute_at(self.working.cursor());
        let resume = attribute.resume;
        let name = Token::new(TokenKind::ArgumentName, attribute.name);
        let value = Token::new(TokenKind::ArgumentValue, attribute.value);
        self.working.seek(resume);

        self.emit(name)?;
        self.emit(value)?;
        self.switch_to(LexerState::ScanLine);
        Ok(())
    }
}
