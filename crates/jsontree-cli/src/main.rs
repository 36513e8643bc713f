//! `jsontree` CLI — parse, inspect, and query JSON files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Canonical tab-indented rendering (stdin → stdout)
//! echo '{"a":1,"b":[true,null]}' | jsontree tree
//!
//! # Token stream, one token per line, or as JSON
//! jsontree tokens -i data.json
//! jsontree tokens -i data.json --json
//!
//! # Dotted-path lookup
//! jsontree select glossary.GlossDiv.title -i glossary.json
//!
//! # Standard quoted JSON via serde_json
//! jsontree json -i data.json -o pretty.json
//!
//! # Debug logging
//! jsontree -v tree -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsontree::Selection;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsontree",
    version,
    about = "Parse, inspect and query JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical tab-indented rendering of the parsed tree
    Tree {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the significant token stream
    Tokens {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Emit tokens as a JSON array instead of one per line
        #[arg(long)]
        json: bool,
    },
    /// Look up a dotted path such as `glossary.GlossDiv.title`
    Select {
        /// Dot-separated field path
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the tree as standard, pretty-printed JSON
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tree { input, output } => {
            let tree = parse_input(input.as_deref())?;
            write_output(output.as_deref(), &format!("{tree}\n"))?;
        }
        Commands::Tokens { input, json } => {
            let text = read_input(input.as_deref())?;
            let tokens = jsontree::tokenize(&text).context("Failed to tokenize input")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    println!("{}:{}\t{}\t{}", token.line, token.column, token.kind, token.text);
                }
            }
        }
        Commands::Select { path, input } => {
            let tree = parse_input(input.as_deref())?;
            match tree.select(&path) {
                Some(Selection::Text(text)) => println!("{text}"),
                Some(Selection::Array(items)) => {
                    for item in items {
                        println!("{item}");
                    }
                }
                None => anyhow::bail!("Path not found: {}", path),
            }
        }
        Commands::Json { input, output } => {
            let tree = parse_input(input.as_deref())?;
            let pretty = serde_json::to_string_pretty(&tree.to_json())?;
            write_output(output.as_deref(), &format!("{pretty}\n"))?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `-v` flags win over `RUST_LOG`; the default
/// level is `warn`.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_input(path: Option<&str>) -> Result<jsontree::Value> {
    let text = read_input(path)?;
    let tree = jsontree::parse(&text).context("Failed to parse JSON")?;
    info!(root = tree.kind(), "document parsed");
    Ok(tree)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(path, "reading input file");
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
