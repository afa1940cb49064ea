//! # CLI - konkordans
//!
//! Command-line front end for building the bucket table and looking up
//! words in the corpus.
//!
//! ## Commands
//!
//! ```text
//! konkordans build  [--index P] [--table P] [--stride N] [--margin N]
//! konkordans search [WORD] [--index P] [--corpus P] [--table P] [--radius N] [--yes]
//! ```
//!
//! `search` prompts for the word when it is omitted. When a word has more
//! occurrences than the display threshold it asks for Enter before printing
//! them (`--yes` skips the question).
//!
//! ## Configuration
//!
//! Paths and tuning default to the `KONK_*` environment variables (see the
//! `config` crate); flags override them. Log output goes to stderr and is
//! filtered with `RUST_LOG` (default: `info`).
//!
//! ## Example
//!
//! ```text
//! $ konkordans build
//! Bucket table written to index (216000 bytes, 9812 buckets, 1.2s)
//! $ konkordans search amager
//! 2 occurrences of "amager" (search took 310µs)
//! r till Amager igen. På Amager regnade det.
//! ...
//! ```

use anyhow::{Context, Result};
use bucket::{BucketTableBuilder, BuildOptions, TABLE_BYTES};
use clap::{Parser, Subcommand};
use config::Config;
use engine::{Lookup, QueryEngine};
use lexicon::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "konkordans", version, about = "Word lookup over a sorted corpus index")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the bucket table from the sorted word index.
    Build {
        /// Sorted word index [env: KONK_INDEX_PATH]
        #[arg(long)]
        index: Option<PathBuf>,
        /// Output bucket table [env: KONK_TABLE_PATH]
        #[arg(long)]
        table: Option<PathBuf>,
        /// Skip-ahead probe stride in bytes, 0 to scan every record [env: KONK_SKIP_STRIDE]
        #[arg(long)]
        stride: Option<u64>,
        /// Tail of the index always scanned exactly [env: KONK_TRAILING_MARGIN]
        #[arg(long)]
        margin: Option<u64>,
    },
    /// Look up a word and print every occurrence in context.
    Search {
        /// Word to look up; prompted for when omitted.
        word: Option<String>,
        /// Sorted word index [env: KONK_INDEX_PATH]
        #[arg(long)]
        index: Option<PathBuf>,
        /// Corpus [env: KONK_CORPUS_PATH]
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Bucket table [env: KONK_TABLE_PATH]
        #[arg(long)]
        table: Option<PathBuf>,
        /// Corpus bytes shown on each side of a match [env: KONK_CONTEXT_RADIUS]
        #[arg(long)]
        radius: Option<u64>,
        /// Print every occurrence without asking.
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();

    match cli.command {
        Command::Build {
            index,
            table,
            stride,
            margin,
        } => {
            config.index_path = index.unwrap_or(config.index_path);
            config.table_path = table.unwrap_or(config.table_path);
            config.skip_stride = stride.unwrap_or(config.skip_stride);
            config.trailing_margin = margin.unwrap_or(config.trailing_margin);
            build(&config)
        }
        Command::Search {
            word,
            index,
            corpus,
            table,
            radius,
            yes,
        } => {
            config.index_path = index.unwrap_or(config.index_path);
            config.corpus_path = corpus.unwrap_or(config.corpus_path);
            config.table_path = table.unwrap_or(config.table_path);
            config.context_radius = radius.unwrap_or(config.context_radius);
            let word = match word {
                Some(w) => w,
                None => prompt("Enter a search word: ")?,
            };
            search(&config, &word, yes)
        }
    }
}

fn build(config: &Config) -> Result<()> {
    let builder = BucketTableBuilder::new(BuildOptions {
        skip_stride: config.skip_stride,
        trailing_margin: config.trailing_margin,
    });
    let stats = builder
        .build_file(&config.index_path, &config.table_path)
        .with_context(|| format!("building bucket table from {}", config.index_path.display()))?;

    println!(
        "Bucket table written to {} ({} bytes, {} buckets, {:.2?})",
        config.table_path.display(),
        TABLE_BYTES,
        stats.buckets_populated,
        stats.elapsed
    );
    Ok(())
}

fn search(config: &Config, word: &str, yes: bool) -> Result<()> {
    let mut engine = QueryEngine::open(&config.index_path, &config.table_path, &config.corpus_path)
        .context("opening index, table and corpus")?;
    engine.set_context_radius(config.context_radius);

    let word = word.trim();
    let started = Instant::now();
    let occurrences = match engine.lookup(word)? {
        Lookup::Found(occurrences) => occurrences,
        Lookup::NoOccurrences(_) => {
            println!("No occurrences of \"{}\".", word);
            return Ok(());
        }
    };
    println!(
        "{} occurrence{} of \"{}\" (search took {:.2?})",
        occurrences.len(),
        if occurrences.len() == 1 { "" } else { "s" },
        word,
        started.elapsed()
    );

    if occurrences.len() > config.display_threshold && !yes {
        prompt("Press Enter to show the occurrences")?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for &offset in occurrences.offsets() {
        match engine.render(offset, occurrences.word_len()) {
            Ok(line) => writeln!(out, "{}", line)?,
            Err(Error::OutOfBounds { offset, len, size }) => {
                warn!(offset, len, size, "occurrence outside the corpus, skipped");
            }
            Err(e) => return Err(e.into()),
        }
    }
    out.flush()?;
    Ok(())
}

/// Prints `message` and reads one line from stdin.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
