//! Search command

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::config::{Config, RunnerKind};
use crate::output::{format_route, to_json, OutputFormat};
use crate::Cli;
use pnba_core::{
    HeuristicKind, Network, SearchOutcome, ShortestPathFinder, TaskRunner, ThreadRunner,
    TokioRunner,
};

#[derive(Args)]
pub struct SearchArgs {
    /// Network file (.json or .toml)
    pub graph: PathBuf,

    /// Start node id
    pub from: String,

    /// End node id
    pub to: String,

    /// Heuristic: unit, manhattan, euclidean (default: from config)
    #[arg(long)]
    pub heuristic: Option<String>,

    /// Runner for the forward direction: thread, tokio (default: from config)
    #[arg(long)]
    pub runner: Option<String>,
}

pub async fn run(args: &SearchArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config_path())?;
    let format = cli.output_format(&config)?;
    let heuristic: HeuristicKind = match &args.heuristic {
        Some(heuristic) => heuristic.parse()?,
        None => config.heuristic,
    };
    let runner_kind: RunnerKind = match &args.runner {
        Some(runner) => runner.parse()?,
        None => config.runner,
    };

    let network = Network::load(&args.graph, heuristic)?;
    tracing::info!(
        "Loaded {:?}: {} nodes, {} edges, {} heuristic",
        args.graph,
        network.node_count(),
        network.edge_count(),
        heuristic
    );

    let runner: Arc<dyn TaskRunner> = match runner_kind {
        RunnerKind::Thread => Arc::new(ThreadRunner::new()),
        RunnerKind::Tokio => Arc::new(TokioRunner::current()?),
    };
    let finder = ShortestPathFinder::new(network).with_runner(runner);

    let (from, to) = (args.from.clone(), args.to.clone());
    let outcome =
        tokio::task::spawn_blocking(move || finder.search_with_stats(&from, &to)).await??;

    tracing::info!(
        "Search expanded {} nodes (forward {}, backward {})",
        outcome.stats.expanded(),
        outcome.stats.forward.expanded,
        outcome.stats.backward.expanded
    );

    match format {
        OutputFormat::Json => println!("{}", to_json(&outcome)?),
        OutputFormat::Table => print_table(args, &outcome, cli.quiet),
    }
    Ok(())
}

fn print_table(args: &SearchArgs, outcome: &SearchOutcome<String>, quiet: bool) {
    let Some(distance) = outcome.distance else {
        println!("No path from {} to {}", args.from, args.to);
        return;
    };

    let hops = outcome.path.len().saturating_sub(1);
    println!(
        "Path from {} to {} ({} hops, distance {}):",
        args.from, args.to, hops, distance
    );
    println!("  {}", format_route(&outcome.path));

    if !quiet {
        let stats = &outcome.stats;
        println!(
            "Expanded {} nodes (forward {}, backward {}), visited {}",
            stats.expanded(),
            stats.forward.expanded,
            stats.backward.expanded,
            stats.visited
        );
    }
}
