//! Integration tests for the protocol XML lexer.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use lexml::{
    CollectSink, ConsoleSink, LexError, Lexer, LexerState, Token, TokenKind, TokenSink,
    spawn_stream, tokenize, tokenize_str,
};
use lexml_common::warning::warning_count;

/// Helper to tokenize a string that is expected to be well formed
fn lex(input: &str) -> Vec<Token> {
    tokenize_str(input).unwrap()
}

/// Helper to tokenize a string that is expected to be rejected, keeping the
/// tokens emitted before the error
fn lex_err(input: &str) -> (Vec<Token>, LexError) {
    let mut lexer = Lexer::new(input.as_bytes(), CollectSink::new());
    let error = lexer.run().unwrap_err();
    (lexer.into_sink().into_tokens(), error)
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn start(text: &str) -> Token {
    Token::new(TokenKind::StartTag, text)
}

fn end(text: &str) -> Token {
    Token::new(TokenKind::EndTag, text)
}

fn name(text: &str) -> Token {
    Token::new(TokenKind::ArgumentName, text)
}

fn value(text: &str) -> Token {
    Token::new(TokenKind::ArgumentValue, text)
}

fn text(text: &str) -> Token {
    Token::new(TokenKind::JustText, text)
}

fn desc(text: &str) -> Token {
    Token::new(TokenKind::Description, text)
}

#[test]
fn test_empty_input() {
    assert_eq!(lex(""), vec![Token::eof()]);
    assert_eq!(lex("\n\n   \n"), vec![Token::eof()]);
}

#[test]
fn test_start_text_stop() {
    assert_eq!(
        lex("<a>text</a>"),
        vec![start("a"), text("text"), end("a"), Token::eof()]
    );
}

#[test]
fn test_self_closing_tag() {
    assert_eq!(lex("<a/>"), vec![start("a"), end("a"), Token::eof()]);
}

#[test]
fn test_self_closing_end_tag_fires_once_per_line() {
    assert_eq!(
        lex("<a/><b/>"),
        vec![start("a"), end("a"), start("b"), Token::eof()]
    );
}

#[test]
fn test_self_closing_tag_with_attributes() {
    assert_eq!(
        lex(r#"<arg name="state" type="u8"/>"#),
        vec![
            start("arg"),
            name("name"),
            value("state"),
            name("type"),
            value("u8"),
            end("arg"),
            Token::eof(),
        ]
    );
}

#[test]
fn test_tag_split_over_lines() {
    assert_eq!(
        lex("<a\nattr=\"v\">\n</a>"),
        vec![start("a"), name("attr"), value("v"), end("a"), Token::eof()]
    );
}

#[test]
fn test_tag_split_over_many_lines() {
    let input = concat!(
        "<cmd name=\"Flip\" id=\"4\"\n",
        "     content=\"NOTIFICATION\"\n",
        "     buffer=\"NON_ACK\">",
    );
    assert_eq!(
        lex(input),
        vec![
            start("cmd"),
            name("name"),
            value("Flip"),
            name("id"),
            value("4"),
            name("content"),
            value("NOTIFICATION"),
            name("buffer"),
            value("NON_ACK"),
            Token::eof(),
        ]
    );
}

#[test]
fn test_no_text_after_attributes() {
    assert_eq!(
        lex(r#"<cmd name="x">text</cmd>"#),
        vec![start("cmd"), name("name"), value("x"), end("cmd"), Token::eof()]
    );
    assert_eq!(
        lex("<cmd name=\"x\">\n</cmd>"),
        vec![start("cmd"), name("name"), value("x"), end("cmd"), Token::eof()]
    );
}

#[test]
fn test_description_lines_joined() {
    assert_eq!(
        lex("first line\nsecond line\n<a>"),
        vec![desc("first line second line"), start("a"), Token::eof()]
    );
}

#[test]
fn test_description_flushed_at_end_of_input() {
    assert_eq!(lex("just text"), vec![desc("just text"), Token::eof()]);
}

#[test]
fn test_description_flushed_across_blank_line() {
    assert_eq!(
        lex("text one\n\n<a/>"),
        vec![desc("text one"), start("a"), end("a"), Token::eof()]
    );
}

#[test]
fn test_description_is_not_scanned() {
    assert_eq!(
        lex("a = b\n<a/>"),
        vec![desc("a = b"), start("a"), end("a"), Token::eof()]
    );
}

#[test]
fn test_comment_skipped() {
    assert_eq!(
        lex("<!-- note -->\n<a>x</a>"),
        vec![start("a"), text("x"), end("a"), Token::eof()]
    );
}

#[test]
fn test_multi_line_comment_skipped() {
    assert_eq!(lex("<!-- first\nsecond -->"), vec![Token::eof()]);
    assert_eq!(
        lex("<!-- first\nsecond -->\n<a/>"),
        vec![start("a"), end("a"), Token::eof()]
    );
}

#[test]
fn test_xml_declaration_after_byte_order_mark() {
    assert_eq!(
        lex("\u{feff}<?xml version=\"1.0\"?>\n<a/>"),
        vec![
            start("?xml"),
            name("version"),
            value("1.0"),
            end("?xml"),
            start("a"),
            end("a"),
            Token::eof(),
        ]
    );
}

#[test]
fn test_xml_declaration() {
    assert_eq!(
        lex(r#"<?xml version="1.0"?>"#),
        vec![start("?xml"), name("version"), value("1.0"), end("?xml"), Token::eof()]
    );
}

#[test]
fn test_dangling_fragment_replaced() {
    assert_eq!(lex("<a\n<b/>"), vec![start("b"), end("b"), Token::eof()]);
}

#[test]
fn test_unclassified_line() {
    let (tokens, error) = lex_err("<a>\ntext>");
    assert_eq!(tokens, vec![start("a"), Token::eof()]);
    match error {
        LexError::UnclassifiedLine { line, text } => {
            assert_eq!(line, 2);
            assert_eq!(text, "text>");
        }
        other => panic!("Expected UnclassifiedLine, got {other:?}"),
    }
}

#[test]
fn test_empty_tag_name() {
    let (tokens, error) = lex_err("<a><>");
    assert_eq!(tokens, vec![start("a"), Token::eof()]);
    assert!(matches!(error, LexError::MalformedTag { line: 1, .. }));
    assert!(error.is_malformed_input());
}

#[test]
fn test_too_many_brackets() {
    let (tokens, error) = lex_err("<a><b>x</b></a>");
    assert_eq!(tokens, vec![start("a"), start("b"), Token::eof()]);
    assert!(matches!(error, LexError::MalformedLine { line: 1, .. }));
}

#[test]
fn test_unterminated_tag() {
    let (tokens, error) = lex_err("<a\nb=\"1\"");
    assert_eq!(tokens, vec![Token::eof()]);
    assert!(matches!(error, LexError::UnterminatedTag { line: 1 }));
}

#[test]
fn test_invalid_utf8_is_an_io_error() {
    let mut lexer = Lexer::new(&b"<a>\n\xff\xfe\n"[..], CollectSink::new());
    assert!(matches!(lexer.run(), Err(LexError::Io(_))));
    assert_eq!(lexer.sink().tokens().last(), Some(&Token::eof()));
}

#[test]
fn test_borrowed_sink_stays_with_caller() {
    let mut sink = CollectSink::new();
    Lexer::new("<a>x</a>".as_bytes(), &mut sink).run().unwrap();

    assert!(sink.is_closed());
    assert_eq!(
        sink.tokens(),
        [start("a"), text("x"), end("a"), Token::eof()]
    );
}

#[test]
fn test_failed_stream_end_is_reported() {
    struct RejectingSink;

    impl TokenSink for RejectingSink {
        fn send(&mut self, _token: Token) -> Result<(), LexError> {
            Err(LexError::SinkClosed)
        }
    }

    let before = warning_count();
    let mut lexer = Lexer::new("text>".as_bytes(), RejectingSink);
    assert!(matches!(
        lexer.run(),
        Err(LexError::UnclassifiedLine { line: 1, .. })
    ));
    assert_eq!(lexer.state(), LexerState::Finished);
    assert!(warning_count() > before);
}

#[test]
fn test_run_twice_emits_eof_once() {
    let mut lexer = Lexer::new("<a/>".as_bytes(), CollectSink::new());
    lexer.run().unwrap();
    lexer.run().unwrap();
    assert_eq!(lexer.state(), LexerState::Finished);
    assert!(lexer.sink().is_closed());
    assert_eq!(lexer.sink().tokens(), [start("a"), end("a"), Token::eof()]);
}

#[test]
fn test_failed_run_is_not_retried() {
    let mut lexer = Lexer::new("text>".as_bytes(), CollectSink::new());
    assert!(lexer.run().is_err());
    lexer.run().unwrap();
    assert_eq!(lexer.sink().tokens(), [Token::eof()]);
}

#[test]
fn test_step_walks_the_states() {
    let mut lexer = Lexer::new("<a/>".as_bytes(), CollectSink::new());
    assert_eq!(lexer.state(), LexerState::ReadLine);

    let states: Vec<_> = (0..8).map(|_| lexer.step().unwrap()).collect();
    assert_eq!(
        states,
        vec![
            LexerState::ClassifyLine,
            LexerState::ScanLine,
            LexerState::TagName,
            LexerState::ScanLine,
            LexerState::ReadLine,
            LexerState::EndOfInput,
            LexerState::Finished,
            LexerState::Finished,
        ]
    );
}

#[test]
fn test_tokenizing_is_idempotent() {
    let input = "<a x=\"1\">\nsome words\n</a>";
    assert_eq!(lex(input), lex(input));
}

#[test]
fn test_console_sink_output() {
    let mut lexer = Lexer::new("<a>x</a>".as_bytes(), ConsoleSink::new(Vec::new()));
    lexer.run().unwrap();
    let printed = String::from_utf8(lexer.into_sink().into_inner()).unwrap();
    assert_eq!(
        printed,
        "StartTag      a\nJustText      x\nEndTag        a\nEOF           EOF\n"
    );
}

#[test]
fn test_protocol_fixture() {
    let file = File::open(fixture_path("protocol.xml")).unwrap();
    let tokens = tokenize(BufReader::new(file)).unwrap();

    let expected = vec![
        start("?xml"),
        name("version"),
        value("1.0"),
        name("encoding"),
        value("UTF-8"),
        end("?xml"),
        start("project"),
        name("name"),
        value("ardrone3"),
        name("id"),
        value("1"),
        desc("All commands specific to the Bebop."),
        start("class"),
        name("name"),
        value("Piloting"),
        name("id"),
        value("0"),
        desc("All commands related to piloting the drone"),
        start("cmd"),
        name("name"),
        value("FlatTrim"),
        name("id"),
        value("0"),
        start("comment"),
        name("title"),
        value("Do a flat trim"),
        name("desc"),
        value("Do a flat trim of the accelerometer/gyro."),
        name("support"),
        value("0901;090c"),
        name("result"),
        value("Accelerometer and gyroscope are calibrated."),
        end("comment"),
        end("cmd"),
        start("cmd"),
        name("name"),
        value("PCMD"),
        name("id"),
        value("2"),
        name("buffer"),
        value("NON_ACK"),
        start("arg"),
        name("name"),
        value("flag"),
        name("type"),
        value("u8"),
        desc(concat!(
            "Boolean flag: 1 if the roll and pitch values should be taken in consideration.",
            " 0 otherwise",
        )),
        end("arg"),
        start("arg"),
        name("name"),
        value("roll"),
        name("type"),
        value("i8"),
        desc("Roll angle as signed percentage. On copters: roll angle in [-100;100]"),
        end("arg"),
        end("cmd"),
        start("cmd"),
        name("name"),
        value("UserTakeOff"),
        name("id"),
        value("8"),
        start("arg"),
        name("name"),
        value("state"),
        name("type"),
        value("u8"),
        end("arg"),
        end("cmd"),
        start("expectations"),
        start("immediate"),
        text("none"),
        end("immediate"),
        end("expectations"),
        end("class"),
        end("project"),
        Token::eof(),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn test_stream_matches_collect() {
    let file = File::open(fixture_path("protocol.xml")).unwrap();
    let collected = tokenize(BufReader::new(file)).unwrap();

    let file = File::open(fixture_path("protocol.xml")).unwrap();
    let (receiver, producer) = spawn_stream(BufReader::new(file));
    let streamed: Vec<Token> = receiver.iter().collect();
    producer.join().unwrap().unwrap();

    assert_eq!(streamed, collected);
    assert!(receiver.try_recv().is_err());
}

#[test]
fn test_stream_reports_errors_after_eof() {
    let (receiver, producer) = spawn_stream("<a>\ntext>".as_bytes());
    let streamed: Vec<Token> = receiver.iter().collect();

    assert_eq!(streamed, vec![start("a"), Token::eof()]);
    assert!(matches!(
        producer.join().unwrap(),
        Err(LexError::UnclassifiedLine { line: 2, .. })
    ));
}
