//! lexml CLI
//!
//! Tokenizes a protocol-definition XML file and prints one token per line.
//!
//! - `lexml -f file.xml`        # lex on the main thread, print as we go
//! - `lexml -f file.xml -t 1`   # lex on a worker thread, print from a stream

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use lexml::{ConsoleSink, Lexer, TokenSink, spawn_stream};

/// lexml: tokenizer for line-oriented protocol-definition XML
#[derive(Parser, Debug)]
#[command(name = "lexml")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print tokens while lexing
    lexml -f ardrone3.xml

    # Lex on a worker thread and print from the token stream
    lexml --file-name ardrone3.xml --token-output 1
"#)]
struct Cli {
    /// XML file to tokenize
    #[arg(short = 'f', long, visible_alias = "fileName", value_name = "FILE")]
    file_name: PathBuf,

    /// Where tokens go: 0 prints them directly, 1 streams them to a consumer
    #[arg(
        short = 't',
        long,
        visible_alias = "tokenOutput",
        value_enum,
        default_value = "0",
        value_name = "MODE"
    )]
    token_output: TokenOutput,
}

/// Token output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TokenOutput {
    /// Print each token as the lexer emits it.
    #[value(name = "0", alias = "console")]
    Console,
    /// Stream tokens from a lexer thread to the printing main thread.
    #[value(name = "1", alias = "stream")]
    Stream,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let reader = open(&cli.file_name)?;

    match cli.token_output {
        TokenOutput::Console => print_tokens(reader),
        TokenOutput::Stream => stream_tokens(reader),
    }
}

/// Open the input file for buffered reading
fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Lex on the main thread, printing tokens as they are emitted
fn print_tokens(reader: BufReader<File>) -> Result<()> {
    Lexer::new(reader, ConsoleSink::stdout()).run()?;
    Ok(())
}

/// Lex on a worker thread and print what arrives on the stream
fn stream_tokens(reader: BufReader<File>) -> Result<()> {
    let (tokens, producer) = spawn_stream(reader);

    let mut printer = ConsoleSink::stdout();
    let printed = tokens.iter().try_for_each(|token| printer.send(token));
    // Drop the receiver so a producer blocked on a send sees the disconnect.
    drop(tokens);

    let lexed = producer
        .join()
        .map_err(|_| anyhow!("lexer thread panicked"))?;
    printed?;
    lexed?;
    printer.close()?;
    Ok(())
}
