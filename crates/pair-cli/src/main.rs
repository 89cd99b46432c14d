//! `pairs` CLI — find the employees who worked together the longest.
//!
//! ## Usage
//!
//! ```sh
//! # Analyze a CSV file (EmpID, ProjectID, DateFrom, DateTo), JSON on stdout
//! pairs analyze -i assignments.csv
//!
//! # Pipe through stdin, fix "today" for open-ended assignments
//! cat assignments.csv | pairs analyze --as-of 2024-06-01
//!
//! # Show the five longest pairs instead of only the winner
//! pairs analyze -i assignments.csv --top 5
//!
//! # List accepted date layouts
//! pairs formats
//! ```

mod intake;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use pair_engine::{AnalysisOptions, LongestPair, PairAggregate, TieBreak, DATE_FORMATS};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::intake::DEFAULT_MAX_BYTES;

#[derive(Parser)]
#[command(
    name = "pairs",
    version,
    about = "Find the pair of employees who worked together the longest"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug details (dropped rows, counts) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV of project assignments and print the longest pair as JSON
    Analyze {
        /// Input CSV file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Date that open-ended assignments run until (defaults to now)
        #[arg(long, value_parser = parse_as_of)]
        as_of: Option<NaiveDate>,
        /// Rule for choosing between pairs with equal totals
        #[arg(long, value_enum, default_value_t = TieBreakArg::First)]
        tie_break: TieBreakArg,
        /// Also list the N longest pairs
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        top: Option<u32>,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
        /// Reject inputs larger than this many bytes
        #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
        max_bytes: u64,
        /// Field delimiter (single ASCII character)
        #[arg(long, default_value_t = ',', value_parser = parse_delimiter)]
        delimiter: char,
    },
    /// List accepted date layouts, in the order they are tried
    Formats,
}

#[derive(Clone, Copy, ValueEnum)]
enum TieBreakArg {
    /// Keep the pair discovered first
    First,
    /// Keep the pair with the lowest employee ids
    Lowest,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::First => TieBreak::FirstDiscovered,
            TieBreakArg::Lowest => TieBreak::LowestPair,
        }
    }
}

/// Output shape when `--top` is given.
#[derive(Serialize)]
struct RankedOutput<'a> {
    longest: &'a LongestPair,
    ranking: &'a [PairAggregate],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            input,
            output,
            as_of,
            tie_break,
            top,
            compact,
            max_bytes,
            delimiter,
        } => {
            let content = intake::read_input(input.as_deref(), max_bytes)?;
            let rows = intake::read_rows(&content, delimiter as u8)?;
            info!(rows = rows.len(), "lexed CSV input");

            let mut options = AnalysisOptions::default().tie_break(tie_break.into());
            if let Some(date) = as_of {
                options = options.as_of(start_of_day(date));
            }

            let json = match top {
                None => {
                    let pair = pair_engine::analyze_with(&rows, &options)
                        .context("Failed to find the longest working pair")?;
                    to_json(&pair, compact)?
                }
                Some(n) => {
                    let ranking = pair_engine::rank(&rows, &options)
                        .context("Failed to rank employee pairs")?;
                    let longest = ranking.first().context("No employee pairs to rank")?;
                    let shown = &ranking[..ranking.len().min(n as usize)];
                    to_json(
                        &RankedOutput {
                            longest,
                            ranking: shown,
                        },
                        compact,
                    )?
                }
            };

            write_output(output.as_deref(), &json)?;
        }
        Commands::Formats => {
            for format in DATE_FORMATS.iter() {
                println!("{}", format);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays valid JSON. `--verbose` wins over `RUST_LOG`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_as_of(raw: &str) -> std::result::Result<NaiveDate, String> {
    pair_engine::parse_date(raw).ok_or_else(|| {
        let layouts: Vec<&str> = DATE_FORMATS.iter().map(|f| f.layout).collect();
        format!("expected a date in one of: {}", layouts.join(", "))
    })
}

fn parse_delimiter(raw: &str) -> std::result::Result<char, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("delimiter must be a single ASCII character, got '{}'", raw)),
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    pair_engine::overlap::start_of(date)
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

fn write_output(path: Option<&std::path::Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
