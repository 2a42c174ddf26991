//! tern: tokenize, parse and check source files from the command line.
//!
//! Usage:
//!   tern parse [options] <file>...    print the syntax tree
//!   tern tokens [options] <file>...   print every token, trivia included
//!   tern check [options] <file>...    report diagnostics only

mod dump;
mod error;
mod logging;
mod report;
mod source;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use bumpalo::Bump;
use clap::{Args, Parser as ClapParser, Subcommand};
use rayon::prelude::*;
use tern_ast::LanguageVariant;
use tern_diagnostics::Diagnostic;
use tern_parser::{ParseOptions, Parser};

use crate::error::CliError;
use crate::report::FileReport;
use crate::source::SourceText;

/// Worker stack size. Parsing recurses once per nesting level.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

#[derive(ClapParser, Debug)]
#[command(name = "tern", version, about = "Parse TypeScript-like sources and report syntax errors")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    flags: Flags,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the syntax tree of each file.
    Parse {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Print every token of each file, trivia included.
    Tokens {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Report diagnostics only.
    Check {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

impl Command {
    fn files(&self) -> &[PathBuf] {
        match self {
            Command::Parse { files } | Command::Tokens { files } | Command::Check { files } => files,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct Flags {
    /// Parse every file as JSX (otherwise only .tsx and .jsx files).
    #[arg(long, global = true)]
    jsx: bool,

    /// Accept `if x {}`, `while x {}` and `switch x {}` without parentheses.
    #[arg(long, global = true)]
    loose_parens: bool,

    /// Accept statements on one line without `;` between them.
    #[arg(long, global = true)]
    loose_semicolons: bool,

    /// Accept `try {}` with neither `catch` nor `finally`.
    #[arg(long, global = true)]
    bare_try: bool,

    /// Write diagnostics as JSON to stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Flags {
    fn parse_options(&self, source: &SourceText) -> ParseOptions {
        let language_variant = if self.jsx {
            LanguageVariant::Jsx
        } else {
            source.inferred_variant()
        };
        ParseOptions {
            language_variant,
            allow_omitted_condition_parens: self.loose_parens,
            allow_omitted_semicolons: self.loose_semicolons,
            allow_bare_try: self.bare_try,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Parse,
    Tokens,
    Check,
}

/// Everything one file produced, rendered on the worker that parsed it.
struct FileOutput {
    listing: String,
    diagnostics: Vec<Diagnostic>,
    name: String,
    text: String,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.flags.verbose);

    match run(&cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            print_error(&err.to_string());
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32, CliError> {
    let start = Instant::now();
    let mode = match cli.command {
        Command::Parse { .. } => Mode::Parse,
        Command::Tokens { .. } => Mode::Tokens,
        Command::Check { .. } => Mode::Check,
    };
    let files = cli.command.files();

    let pool = rayon::ThreadPoolBuilder::new().stack_size(WORKER_STACK_SIZE).build()?;
    let outputs: Vec<Result<FileOutput, CliError>> =
        pool.install(|| files.par_iter().map(|path| process_file(path, mode, cli.flags)).collect());

    let use_color = !cli.flags.json && std::io::stderr().is_terminal();
    let mut reports = Vec::new();
    let mut error_count = 0;
    let mut failed = false;

    for output in outputs {
        let output = match output {
            Ok(output) => output,
            Err(err) => {
                print_error(&err.to_string());
                failed = true;
                continue;
            }
        };
        error_count += output.diagnostics.iter().filter(|d| d.is_error()).count();
        if !output.listing.is_empty() {
            print!("{}", output.listing);
        }
        if cli.flags.json {
            reports.push(FileReport::new(output.name, &output.text, &output.diagnostics));
        } else if !output.diagnostics.is_empty() {
            eprint!(
                "{}",
                report::render_diagnostics(&output.name, &output.text, &output.diagnostics, use_color)
            );
        }
    }

    if cli.flags.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    let elapsed = start.elapsed();
    tracing::debug!(files = files.len(), errors = error_count, ?elapsed, "done");

    if error_count > 0 {
        if !cli.flags.json {
            let plural = if error_count == 1 { "" } else { "s" };
            if use_color {
                eprintln!("\n{}Found {} error{}.{}", RED, error_count, plural, RESET);
            } else {
                eprintln!("\nFound {} error{}.", error_count, plural);
            }
        }
        return Ok(2);
    }
    if failed {
        return Ok(1);
    }
    if use_color && mode == Mode::Check {
        eprintln!("{}Checked {} file(s) in {:.2}s.{}", GRAY, files.len(), elapsed.as_secs_f64(), RESET);
    }
    Ok(0)
}

fn process_file(path: &Path, mode: Mode, flags: Flags) -> Result<FileOutput, CliError> {
    let _span = tracing::debug_span!("file", path = %path.display()).entered();
    let source = SourceText::load(path)?;
    let name = source.display_name();

    let (listing, diagnostics) = match mode {
        Mode::Tokens => dump::list_tokens(&source.text),
        Mode::Parse | Mode::Check => {
            let arena = Bump::new();
            let result = Parser::new(&arena, &source.text, flags.parse_options(&source)).parse_source_file();
            let listing = if mode == Mode::Parse {
                dump::dump_tree(result.source_file, &source.text)
            } else {
                String::new()
            };
            (listing, result.diagnostics)
        }
    };

    Ok(FileOutput {
        listing,
        diagnostics,
        name,
        text: source.text,
    })
}

fn print_error(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_map_to_parse_options() {
        let cli = Cli::try_parse_from(["tern", "check", "--loose-parens", "--bare-try", "a.ts"]).unwrap();
        let source = SourceText::from_bytes(Path::new("a.ts"), Vec::new()).unwrap();
        let options = cli.flags.parse_options(&source);
        assert!(options.allow_omitted_condition_parens);
        assert!(options.allow_bare_try);
        assert!(!options.allow_omitted_semicolons);
        assert_eq!(options.language_variant, LanguageVariant::Standard);
        assert_eq!(cli.command.files(), [PathBuf::from("a.ts")]);
    }

    #[test]
    fn test_jsx_flag_overrides_extension() {
        let cli = Cli::try_parse_from(["tern", "parse", "--jsx", "a.ts"]).unwrap();
        let source = SourceText::from_bytes(Path::new("a.ts"), Vec::new()).unwrap();
        assert_eq!(cli.flags.parse_options(&source).language_variant, LanguageVariant::Jsx);
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["tern", "check"]).is_err());
    }
}
