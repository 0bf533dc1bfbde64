use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use wayfind_core::{Coord, Navigator, TraceEvent, load_scenario, write_trace};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the node file (grid extents, then one cell per line)
    nodes: PathBuf,
    /// Path to the edges file (one undirected edge per line)
    edges: PathBuf,
    /// Path to the objectives file (radius, start, then one objective per line)
    objectives: PathBuf,
    /// Path the trace log is written to
    output: PathBuf,
    /// Also write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Serialize)]
struct RunReport {
    objectives: usize,
    event_count: usize,
    final_position: Coord,
    snapshot_hash: u64,
    events: Vec<TraceEvent>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let scenario = load_scenario(&args.nodes, &args.edges, &args.objectives)
        .context("Failed to load scenario")?;

    let mut navigator = Navigator::new(scenario);
    navigator.run();

    write_trace(&args.output, navigator.trace())
        .with_context(|| format!("Failed to write trace to {}", args.output.display()))?;

    if let Some(report_path) = &args.report {
        let report = RunReport {
            objectives: navigator.objectives().len(),
            event_count: navigator.trace().len(),
            final_position: navigator.position(),
            snapshot_hash: navigator.snapshot_hash(),
            events: navigator.trace().to_vec(),
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
        fs::write(report_path, json)
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
    }

    println!("Run complete.");
    println!("Objectives: {}", navigator.objectives().len());
    println!("Trace events: {}", navigator.trace().len());
    println!("Final position: {}", navigator.position());
    println!("Snapshot Hash: {}", navigator.snapshot_hash());

    Ok(())
}
