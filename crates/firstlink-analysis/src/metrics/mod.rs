//! Scores over a [`FirstLinkGraph`](firstlink_core::FirstLinkGraph).
//!
//! - **Termination score** (`termination`): how many forward walks close by
//!   revisiting a node. The node with the highest score is the network's
//!   dominant node, n*.
//! - **Termination centrality** (`centrality`): how many shortest paths
//!   toward n* (one per node) pass through a node.
//!
//! Scores are keyed by `NodeIndex` of the graph they were computed on. Use
//! [`labelled`] to turn them into label-keyed maps for output.

use std::collections::{BTreeMap, HashMap};

use firstlink_core::FirstLinkGraph;
use petgraph::stable_graph::NodeIndex;

pub mod centrality;
pub mod termination;

/// Per-node integer score.
pub type NodeScores = HashMap<NodeIndex, usize>;

/// Re-key `scores` by node label.
#[must_use]
pub fn labelled(graph: &FirstLinkGraph, scores: &NodeScores) -> BTreeMap<String, usize> {
    scores
        .iter()
        .filter_map(|(&idx, &score)| graph.label(idx).map(|label| (label.to_string(), score)))
        .collect()
}
