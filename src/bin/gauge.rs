//! Find a gauge-block stack for a target length.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin gauge -- 41,3
//! cargo run --bin gauge -- 41.3 --catalog real
//! cargo run --bin gauge -- 6 --blocks "5 3 2 1" --stats
//! cargo run --bin gauge -- 4 --blocks "2 2 1" --by-position
//! ```
//!
//! Exit status: 0 when a stack is found, 1 when none exists or the search
//! was aborted by a limit, 2 on invalid input.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use gauge_stack::catalogs::CatalogKind;
use gauge_stack::input::{parse_catalog, parse_length, parse_target};
use gauge_stack::{
    ByPosition, ByValue, Catalog, InputError, SearchBudget, SearchEngine, SearchOutcome,
    SearchReport, SearchStats, Target, Tolerance, UsageKey, DEFAULT_TOLERANCE,
};

/// Decompose a length into a stack of distinct gauge blocks
#[derive(Parser, Debug)]
#[command(name = "gauge")]
#[command(about = "Find a stack of distinct gauge blocks matching a target length")]
struct Args {
    /// Desired length in mm (a decimal comma is accepted)
    target: String,

    /// Reference set to search
    #[arg(long, value_enum, default_value_t = CatalogKind::Ideal)]
    catalog: CatalogKind,

    /// Custom block list instead of a reference set, e.g. "5 3 2 1"
    #[arg(long, conflicts_with = "blocks_file")]
    blocks: Option<String>,

    /// File holding a custom block list (whitespace or ';' separated, '#' comments)
    #[arg(long)]
    blocks_file: Option<PathBuf>,

    /// Accept tolerance in mm
    #[arg(long, default_value_t = DEFAULT_TOLERANCE.to_string())]
    tolerance: String,

    /// Treat equal lengths at different positions as separate pieces
    #[arg(long)]
    by_position: bool,

    /// Report the measured sum and deviation (default: on for the real set)
    #[arg(long)]
    deviation: bool,

    /// Stop after visiting this many search nodes
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Never stack more than this many blocks
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print search counters to stderr
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("gauge: could not install logger: {err}");
    }

    let result = run(&args);
    if let Err(err) = &result {
        eprintln!("gauge: {err}");
    }
    ExitCode::from(exit_status(&result))
}

/// 0 when a stack was found, 1 for a miss or an aborted search, 2 on bad input.
fn exit_status(result: &Result<SearchOutcome, CliError>) -> u8 {
    match result {
        Ok(SearchOutcome::Found(_)) => 0,
        Ok(SearchOutcome::NotFound | SearchOutcome::Aborted(_)) => 1,
        Err(_) => 2,
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn run(args: &Args) -> Result<SearchOutcome, CliError> {
    let target = parse_target(&args.target)?;
    let tolerance = Tolerance::new(parse_length(&args.tolerance)?)?;
    let catalog = load_catalog(args)?;

    let budget = SearchBudget {
        max_nodes: args.max_nodes,
        max_depth: args.max_depth,
    };
    debug!(
        catalog = %catalog_label(args),
        blocks = catalog.len(),
        %tolerance,
        "searching"
    );

    let (outcome, stats) = if args.by_position {
        search_with::<ByPosition>(target, &catalog, tolerance, budget)
    } else {
        search_with::<ByValue>(target, &catalog, tolerance, budget)
    };

    println!(
        "{}",
        SearchReport::new(target, &outcome).with_deviation(reports_deviation(args))
    );
    if args.stats {
        print_stats(&stats);
    }
    Ok(outcome)
}

fn search_with<K: UsageKey>(
    target: Target,
    catalog: &Catalog,
    tolerance: Tolerance,
    budget: SearchBudget,
) -> (SearchOutcome, SearchStats) {
    SearchEngine::<K>::with_config(tolerance, budget).run(target, catalog)
}

fn is_reference(args: &Args) -> bool {
    args.blocks.is_none() && args.blocks_file.is_none()
}

/// `--deviation`, or on by default when searching the calibrated reference set.
fn reports_deviation(args: &Args) -> bool {
    args.deviation || (is_reference(args) && args.catalog.reports_deviation())
}

fn catalog_label(args: &Args) -> String {
    match (&args.blocks, &args.blocks_file) {
        (Some(_), _) => "custom".to_string(),
        (None, Some(path)) => path.display().to_string(),
        (None, None) => args.catalog.to_string(),
    }
}

fn load_catalog(args: &Args) -> Result<Catalog, CliError> {
    if let Some(list) = &args.blocks {
        return Ok(parse_catalog(list)?);
    }
    if let Some(path) = &args.blocks_file {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        return Ok(parse_catalog(&text)?);
    }
    Ok(args.catalog.catalog())
}

fn print_stats(stats: &SearchStats) {
    eprintln!("nodes visited:    {}", stats.nodes);
    eprintln!("nodes expanded:   {}", stats.expanded);
    eprintln!("branches pruned:  {}", stats.pruned);
    eprintln!("backtracks:       {}", stats.backtracks);
    eprintln!("depth cut-offs:   {}", stats.depth_cutoffs);
    eprintln!("max depth:        {}", stats.max_depth);
}
