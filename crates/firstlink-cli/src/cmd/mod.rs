pub mod completions;
pub mod layout;
pub mod scores;

use std::path::Path;

use anyhow::{Context, Result};
use firstlink_core::Network;
use firstlink_core::config::InputConfig;
use firstlink_core::load::load_network;
use tracing::info;

/// Load a network file and reject it early if a node has no successor.
pub fn load_checked(path: &Path, columns: &InputConfig) -> Result<Network> {
    let network = load_network(path, columns)
        .with_context(|| format!("Failed to load network from {}", path.display()))?;

    network
        .graph
        .validate()
        .with_context(|| format!("{} is not a functional graph", path.display()))?;

    info!(
        nodes = network.graph.node_count(),
        edges = network.graph.edge_count(),
        "network loaded"
    );
    Ok(network)
}
