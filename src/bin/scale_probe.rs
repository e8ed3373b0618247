//! Scaling probe for the gauge-block search engine.
//!
//! Runs the engine on the reference sets and on seeded random catalogs of
//! growing size, recording wall time, RSS delta and visited nodes, and checks
//! every answer against a brute-force subset enumeration for catalogs up to
//! `--verify-limit` blocks.
//!
//! ```bash
//! cargo run --release --features probe --bin scale_probe -- --format table
//! ```

use std::collections::BTreeMap;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gauge_stack::catalogs::CatalogKind;
use gauge_stack::utils::sequential_sum;
use gauge_stack::{Catalog, Combination, SearchEngine, SearchEngineBuilder, SearchOutcome};

/// Gauge-block search scaling probe
#[derive(Parser, Debug)]
#[command(name = "scale_probe")]
#[command(about = "Measure and verify the gauge-block search on growing catalogs")]
struct Options {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Largest catalog verified by brute force (2^N subsets)
    #[arg(long, default_value = "18")]
    verify_limit: usize,

    /// Node budget per search
    #[arg(long, default_value = "2000000")]
    max_nodes: u64,

    /// Targets per catalog size
    #[arg(long, default_value = "8")]
    targets: usize,

    /// Random seed for catalogs and targets
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn write(self, measurements: &[Measurement]) {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    wall_s: f64,
    rss_delta_kib: u64,
    nodes: u64,
    outcome: &'static str,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

fn main() {
    let options = Options::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("scale_probe: could not install logger: {err}");
    }

    let engine = SearchEngineBuilder::new()
        .with_node_limit(options.max_nodes)
        .build();
    let mut sys = System::new();
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut measurements = Vec::new();

    info!("[1/2] reference sets");
    for kind in CatalogKind::ALL {
        measurements.extend(run_reference(kind, &engine, &options, &mut rng, &mut sys));
    }

    info!("[2/2] random catalogs");
    for size in [4usize, 8, 12, 16, 20, 24, 28, 32] {
        measurements.extend(run_random(size, &engine, &options, &mut rng, &mut sys));
    }

    print_summary(&measurements, &options);
    options.format.write(&measurements);
}

fn run_reference(
    kind: CatalogKind,
    engine: &SearchEngine,
    options: &Options,
    rng: &mut StdRng,
    sys: &mut System,
) -> Vec<Measurement> {
    let catalog = kind.catalog();
    let scenario = match kind {
        CatalogKind::Ideal => "ideal_set",
        CatalogKind::Real => "real_set",
    };
    (0..options.targets)
        .map(|_| {
            let target = reachable_target(&catalog, rng);
            probe(scenario, &catalog, target, engine, options, sys)
        })
        .collect()
}

fn run_random(
    size: usize,
    engine: &SearchEngine,
    options: &Options,
    rng: &mut StdRng,
    sys: &mut System,
) -> Vec<Measurement> {
    let catalog = random_catalog(size, rng);
    (0..options.targets)
        .map(|i| {
            // Alternate reachable targets with arbitrary ones.
            let target = if i % 2 == 0 {
                reachable_target(&catalog, rng)
            } else {
                rng.gen_range(0.5..catalog.total().max(1.0))
            };
            probe("random_catalog", &catalog, target, engine, options, sys)
        })
        .collect()
}

fn probe(
    scenario: &'static str,
    catalog: &Catalog,
    target: f64,
    engine: &SearchEngine,
    options: &Options,
    sys: &mut System,
) -> Measurement {
    let before = rss_kib(sys);
    let start = Instant::now();
    let result = engine.search_with_stats(target, catalog);
    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    let size_desc = format!("n={} target={target:.5}", catalog.len());
    let (outcome, nodes, status, detail) = match result {
        Ok((outcome, stats)) => {
            let (status, detail) = verify(&outcome, catalog, target, engine, options);
            (outcome.label(), stats.nodes, status, detail)
        }
        Err(err) => (
            "invalid",
            0,
            VerificationStatus::Failed,
            Some(err.to_string()),
        ),
    };
    let icon = match status {
        VerificationStatus::Passed => "✓",
        VerificationStatus::Failed => "✗",
        VerificationStatus::NotChecked => "○",
    };
    info!("{icon} {scenario} {size_desc}: {outcome}, nodes={nodes}, time={wall_s:.4}s");

    Measurement {
        scenario,
        size_desc,
        wall_s,
        rss_delta_kib: after.saturating_sub(before),
        nodes,
        outcome,
        verification_status: status,
        verification_detail: detail,
    }
}

fn verify(
    outcome: &SearchOutcome,
    catalog: &Catalog,
    target: f64,
    engine: &SearchEngine,
    options: &Options,
) -> (VerificationStatus, Option<String>) {
    let tolerance = engine.tolerance();
    if let SearchOutcome::Found(stack) = outcome {
        if let Some(problem) = invalid_stack(stack, catalog, target, tolerance.value()) {
            return (VerificationStatus::Failed, Some(problem));
        }
    }
    if catalog.len() > options.verify_limit {
        return match outcome {
            SearchOutcome::Found(_) => (VerificationStatus::Passed, None),
            _ => (VerificationStatus::NotChecked, None),
        };
    }
    let reachable = brute_force_reachable(catalog.blocks(), target, tolerance.value());
    match (outcome, reachable) {
        (SearchOutcome::Found(_), true) | (SearchOutcome::NotFound, false) => {
            (VerificationStatus::Passed, None)
        }
        (SearchOutcome::Aborted(reason), _) => {
            (VerificationStatus::NotChecked, Some(reason.to_string()))
        }
        (_, expected) => (
            VerificationStatus::Failed,
            Some(format!("brute force reachable={expected}, engine={}", outcome.label())),
        ),
    }
}

fn invalid_stack(stack: &Combination, catalog: &Catalog, target: f64, eps: f64) -> Option<String> {
    if (stack.sum() - target).abs() >= eps {
        return Some(format!("sum {} outside tolerance", stack.sum()));
    }
    let mut positions = stack.positions().to_vec();
    positions.sort_unstable();
    positions.dedup();
    if positions.len() != stack.len() {
        return Some("block used twice".to_string());
    }
    let from_catalog = stack
        .positions()
        .iter()
        .zip(stack.blocks())
        .all(|(&idx, &v)| catalog.blocks().get(idx) == Some(&v));
    (!from_catalog).then(|| "block not in catalog".to_string())
}

fn brute_force_reachable(blocks: &[f64], target: f64, eps: f64) -> bool {
    (1u64..(1u64 << blocks.len())).any(|mask| {
        let chosen: Vec<f64> = blocks
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1u64 << *i) != 0)
            .map(|(_, &v)| v)
            .collect();
        (sequential_sum(&chosen) - target).abs() < eps
    })
}

fn reachable_target(catalog: &Catalog, rng: &mut StdRng) -> f64 {
    let picks: Vec<f64> = catalog.iter().filter(|_| rng.gen_bool(0.25)).collect();
    if picks.is_empty() {
        catalog.smallest().unwrap_or(1.0)
    } else {
        sequential_sum(&picks)
    }
}

/// Distinct lengths on a micron grid between 0.5 and 50 mm, largest first.
fn random_catalog(size: usize, rng: &mut StdRng) -> Catalog {
    let mut microns = std::collections::BTreeSet::new();
    while microns.len() < size {
        microns.insert(rng.gen_range(500u32..50_000));
    }
    let blocks = microns.into_iter().rev().map(|m| m as f64 / 1000.0).collect();
    Catalog::new(blocks).unwrap_or_default()
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    let count = |status: VerificationStatus| {
        measurements
            .iter()
            .filter(|m| m.verification_status == status)
            .count()
    };

    eprintln!("\n{}", "=".repeat(72));
    eprintln!("Verification (brute force up to {} blocks):", options.verify_limit);
    eprintln!("  ✓ passed:      {}", count(VerificationStatus::Passed));
    eprintln!("  ✗ failed:      {}", count(VerificationStatus::Failed));
    eprintln!("  ○ not checked: {}", count(VerificationStatus::NotChecked));
    for (scenario, ms) in &by_scenario {
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let max_nodes = ms.iter().map(|m| m.nodes).max().unwrap_or(0);
        let found = ms.iter().filter(|m| m.outcome == "found").count();
        eprintln!(
            "  {scenario}: {} searches, {found} found, max_time={max_time:.4}s, max_nodes={max_nodes}",
            ms.len()
        );
    }
    for m in measurements
        .iter()
        .filter(|m| m.verification_status == VerificationStatus::Failed)
    {
        eprintln!(
            "  ✗ {} ({}): {}",
            m.scenario,
            m.size_desc,
            m.verification_detail.as_deref().unwrap_or("")
        );
    }
    eprintln!("{}\n", "=".repeat(72));
}

fn write_csv(measurements: &[Measurement]) {
    println!("scenario,size_desc,wall_s,rss_delta_kib,nodes,outcome,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{:.6},{},{},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.nodes,
            m.outcome,
            m.verification_status.label(),
            detail
        );
    }
}

fn write_table(measurements: &[Measurement]) {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(0)
        .max("scenario".len());
    let col2 = measurements
        .iter()
        .map(|m| m.size_desc.len())
        .max()
        .unwrap_or(0)
        .max("size".len());

    println!(
        "{:<col1$}  {:<col2$}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}  detail",
        "scenario", "size", "wall_s", "rss_kib", "nodes", "outcome", "status"
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<10}  {:-<10}  {:-<10}  {:-<10}  {:-<12}  {:-<12}",
        "", "", "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>10.6}  {:>10}  {:>10}  {:>10}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.nodes,
            m.outcome,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
        );
    }
}

fn write_json(measurements: &[Measurement]) {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"wall_s\":{:.6},\"rss_delta_kib\":{},\"nodes\":{},\"outcome\":\"{}\",\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.nodes,
            m.outcome,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map(|process| process.memory() / 1024)
        .unwrap_or(0)
}
