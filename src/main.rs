// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for postman2openapi.
//!
//! This binary reads a Postman collection export, translates it, and writes
//! the resulting OpenAPI document as pretty-printed JSON.

use lexopt::prelude::*;
use postman2openapi::{collection, openapi::Document, translator};
use snafu::prelude::*;
use std::path::{Path, PathBuf};

const DEFAULT_INPUT: &str = "postman_collection.json";
const DEFAULT_OUTPUT: &str = "openapi_output.json";

/// Where to write the translated document.
enum OutputTarget {
    /// Write to the specified file.
    File(PathBuf),
    /// Write to stdout.
    Stdout,
}

struct Cli {
    input: PathBuf,
    output: OutputTarget,
    quiet: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {source}", path.display()))]
    ParseFile {
        path: PathBuf,
        source: collection::ParseError,
    },

    #[snafu(display("failed to translate {}: {source}", path.display()))]
    Translate {
        path: PathBuf,
        source: translator::TranslateError,
    },

    #[snafu(display("failed to serialize OpenAPI document: {source}"))]
    Serialize { source: serde_json::Error },

    #[snafu(display("invalid output path {}: no file name", path.display()))]
    InvalidOutput { path: PathBuf },

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert Postman collection exports to OpenAPI 3 documents

Usage: {name} [OPTIONS] [INPUT]

Arguments:
  [INPUT]  Postman collection JSON file (default: {input})

Options:
  -o, --output <OUTPUT>  Output file, or - for stdout (default: {output})
  -q, --quiet            Suppress the confirmation message
  -h, --help             Print help
  -V, --version          Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        input = DEFAULT_INPUT,
        output = DEFAULT_OUTPUT,
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    let mut input: Option<PathBuf> = None;
    let mut output = OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT));
    let mut quiet = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('o') | Long("output") => {
                let val: PathBuf = parser.value()?.parse()?;
                output = if val == Path::new("-") {
                    OutputTarget::Stdout
                } else {
                    OutputTarget::File(val)
                };
            }
            Short('q') | Long("quiet") => quiet = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) if input.is_none() => input = Some(val.parse()?),
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli {
        input: input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
        output,
        quiet,
    })
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;

    let document = load_document(&cli.input)?;
    let mut json = serde_json::to_string_pretty(&document).context(SerializeSnafu)?;
    json.push('\n');

    match &cli.output {
        OutputTarget::Stdout => print!("{json}"),
        OutputTarget::File(path) => {
            write_atomically(path, &json)?;
            if !cli.quiet {
                println!("OpenAPI JSON saved to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Reads, parses, and translates the collection at `path`.
fn load_document(path: &Path) -> Result<Document, Error> {
    let json = std::fs::read_to_string(path).context(ReadFileSnafu { path })?;
    let collection = collection::parse_collection(&json).context(ParseFileSnafu { path })?;
    translator::translate(&collection).context(TranslateSnafu { path })
}

/// Writes `contents` to a sibling temporary file, then renames it over `path`.
///
/// A failed write leaves any existing file at `path` untouched.
fn write_atomically(path: &Path, contents: &str) -> Result<(), Error> {
    let mut tmp_name = path
        .file_name()
        .context(InvalidOutputSnafu { path })?
        .to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let written = std::fs::write(&tmp_path, contents)
        .and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(source) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(source).context(WriteFileSnafu { path });
    }
    Ok(())
}
