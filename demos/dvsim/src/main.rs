//! dvsim — run a distance-vector scenario to quiescence and print the
//! routing tables.
//!
//! The scenario is a JSON file (see `scenarios/triangle.json`); without one,
//! a seeded random topology is generated.  Final tables are checked against
//! Dijkstra on the final links.
//!
//! Run with:
//!   cargo run -p dvsim -- --scenario demos/dvsim/scenarios/triangle.json
//!   RUST_LOG=dv_agent=debug cargo run -p dvsim -- --random 6 --seed 7

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};

use dv_agent::AgentConfig;
use dv_core::{NodeId, SimRng, Topology};
use dv_output::{CsvWriter, TraceObserver};
use dv_sim::{NoopObserver, PathTrace, Scenario, Sim, SimConfig, SimReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_NODES:   usize = 6;
const EXTRA_LINK_P:    f64   = 0.3;
const MAX_LINK_COST:   u32   = 9;
const RIP_INFINITY:    u32   = 16;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "dvsim", about = "Distance-vector routing simulator")]
struct Cli {
    /// JSON scenario file.  Overrides --random.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Node count of the generated topology when no scenario is given.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    random: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Enable poisoned reverse and a RIP-style metric ceiling of 16 for
    /// generated topologies.
    #[arg(long)]
    rip: bool,

    /// Write `vector_updates.csv` and `tick_summaries.csv` into this
    /// directory.
    #[arg(long)]
    trace: Option<PathBuf>,
}

fn load_scenario(cli: &Cli) -> Result<Scenario> {
    if let Some(path) = &cli.scenario {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        return Ok(scenario);
    }

    if cli.random < 2 {
        bail!("--random needs at least 2 nodes");
    }
    let mut rng = SimRng::new(cli.seed);
    let topology = Topology::random(cli.random, EXTRA_LINK_P, MAX_LINK_COST, &mut rng);
    let mut scenario = Scenario::new(topology);
    if cli.rip {
        scenario.config = SimConfig { agent: AgentConfig::rip_like(RIP_INFINITY), ..SimConfig::default() };
    }
    Ok(scenario)
}

fn run(sim: &mut Sim, trace: Option<&Path>) -> Result<SimReport> {
    let Some(dir) = trace else {
        return Ok(sim.run(&mut NoopObserver)?);
    };

    std::fs::create_dir_all(dir)?;
    let mut obs = TraceObserver::new(CsvWriter::new(dir)?);
    let report = sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        warn!("trace output error: {e}");
    }
    Ok(report)
}

/// Compare every agent against Dijkstra on the final links and check that
/// next hops never loop.  Returns the number of disagreeing entries.
fn verify(sim: &Sim) -> usize {
    let reference = sim.topology().shortest_paths();
    let mut mismatches = 0;
    for (agent, expected) in sim.agents().iter().zip(&reference) {
        for (dest, (&got, &want)) in agent.distance_vector().iter().zip(expected).enumerate() {
            if got != want {
                warn!(node = agent.id().0, dest, %got, %want, "distance mismatch");
                mismatches += 1;
            }
        }
    }
    for from in NodeId::all(sim.node_count()) {
        for to in NodeId::all(sim.node_count()) {
            if let PathTrace::Loop(hops) = sim.trace_path(from, to) {
                warn!(?hops, "routing loop");
                mismatches += 1;
            }
        }
    }
    mismatches
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // 1. Scenario.
    let scenario = load_scenario(&cli)?;
    println!("=== dvsim ===");
    println!(
        "Nodes: {}   Links: {}   Scheduled changes: {}",
        scenario.topology.node_count,
        scenario.topology.links.len(),
        scenario.link_changes.len()
    );
    println!(
        "Poisoned reverse: {}   Max metric: {}",
        scenario.config.agent.poisoned_reverse,
        scenario.config.agent.max_metric.map_or_else(|| "none".to_owned(), |m| m.to_string()),
    );
    println!();

    // 2. Build and run.
    let mut sim = scenario.into_builder().build()?;
    let t0 = Instant::now();
    let report = run(&mut sim, cli.trace.as_deref())?;
    let elapsed = t0.elapsed();

    println!("Quiescent at tick {} in {:.3} ms", report.final_tick.0, elapsed.as_secs_f64() * 1e3);
    println!("  packets delivered : {}", report.packets_delivered);
    println!("  packets dropped   : {}", report.packets_dropped);
    println!("  link changes      : {}", report.link_changes_applied);
    println!("  vector changes    : {}", report.vector_changes);
    println!();

    // 3. Final tables.
    for agent in sim.agents() {
        println!("{}", agent.table());
    }

    // 4. Check.
    let mismatches = verify(&sim);
    if mismatches > 0 {
        bail!("{mismatches} entries disagree with shortest paths");
    }
    info!("all tables match shortest paths");
    Ok(())
}
