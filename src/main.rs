use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use assign_parser::{parse_source, tokenize};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

/// Parses an assignment program and prints its syntax tree.
#[derive(Debug, Parser)]
#[command(name = "assign_parser")]
struct Cli {
    /// Source file to parse; reads stdin when omitted
    file: Option<PathBuf>,

    /// Print the token sequence instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();

    let source = read_source(cli.file.as_ref()).unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        process::exit(1);
    });

    if cli.tokens {
        match tokenize(&source) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{}", token);
                }
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        }
        return;
    }

    match parse_source(&source) {
        Ok(tree) => print!("{}", tree),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn read_source(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "assign_parser=warn",
        1 => "assign_parser=debug",
        _ => "assign_parser=trace",
    }
}
