//! Check command

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::output::{to_json, OutputFormat};
use crate::Cli;
use pnba_core::{HeuristicKind, Network};

#[derive(Args)]
pub struct CheckArgs {
    /// Network file (.json or .toml)
    pub graph: PathBuf,
}

#[derive(Serialize)]
struct NetworkSummary {
    path: PathBuf,
    nodes: usize,
    edges: usize,
    heuristic: HeuristicKind,
}

pub async fn run(args: &CheckArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config_path())?;
    let network = Network::load(&args.graph, config.heuristic)?;

    let summary = NetworkSummary {
        path: args.graph.clone(),
        nodes: network.node_count(),
        edges: network.edge_count(),
        heuristic: network.heuristic(),
    };

    match cli.output_format(&config)? {
        OutputFormat::Json => println!("{}", to_json(&summary)?),
        OutputFormat::Table => println!(
            "{}: {} nodes, {} edges",
            summary.path.display(),
            summary.nodes,
            summary.edges
        ),
    }
    Ok(())
}
