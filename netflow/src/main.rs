use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use netflow::{MaxFlow, MaxFlowOptions, MinCostFlow, MinCostFlowOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::parser::{parse_dimacs, ProblemKind};
mod parser;

/// Solve a DIMACS max-flow or min-cost-flow instance.
#[derive(Parser, Debug)]
#[command(name = "netflow", version)]
struct Args {
    /// Instance file (`p max` or `p min`)
    file: PathBuf,

    /// Also print a minimum-cardinality cut (max-flow instances)
    #[arg(long)]
    min_cut: bool,

    /// Flow to route instead of the total supply (min-cost instances)
    #[arg(long)]
    target: Option<i64>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

/// Flag given on the command line that the problem type has no use for.
fn ignored_flag(kind: ProblemKind, args: &Args) -> Option<&'static str> {
    match kind {
        ProblemKind::Max if args.target.is_some() => Some("--target"),
        ProblemKind::Min if args.min_cut => Some("--min-cut"),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let instance = parse_dimacs(&contents)?;
    info!(
        nodes = instance.graph.node_count(),
        edges = instance.graph.edge_count(),
        "instance loaded"
    );

    if let Some(flag) = ignored_flag(instance.kind, &args) {
        warn!(flag, kind = ?instance.kind, "flag does not apply to this problem type; ignored");
    }

    let start = Instant::now();
    match instance.kind {
        ProblemKind::Max => {
            let options = MaxFlowOptions {
                min_cut: args.min_cut,
            };
            let solved = MaxFlow::with_options(&instance.graph, instance.source, instance.sink, &options)?;
            println!("flow = {}", solved.max_flow());
            if let Some(cut) = solved.min_cut_edges() {
                for edge in cut {
                    println!("cut {} {} {}", edge.from + 1, edge.to + 1, edge.initial_capacity);
                }
            }
        }
        ProblemKind::Min => {
            let mut options = MinCostFlowOptions::default();
            options.target_flow = args.target.or(instance.target);
            let solved = MinCostFlow::with_options(&instance.graph, instance.source, instance.sink, &options)?;
            let (flow, cost) = solved.flow_and_cost();
            println!("flow = {flow}, cost = {cost}");
            if options.target_flow.is_some_and(|target| target != flow) {
                println!("status = demand gap");
            }
        }
    }
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "solved");
    Ok(())
}
