//! Termination walks.
//!
//! # Overview
//!
//! Starting from a node, keep following its successor until the walk steps
//! onto a node it has already visited. That revisited node *closes* the
//! walk. One walk is run per node and each closing node gets +1.
//!
//! In a functional graph every walk ends on a cycle, and the closing node is
//! the first cycle node the walk entered. A node fed by long tails therefore
//! collects many terminations; the maximum is the dominant node n*.
//!
//! Scores always sum to the node count.

use std::collections::HashSet;

use firstlink_core::{FirstLinkGraph, GraphError};
use petgraph::stable_graph::NodeIndex;
use tracing::{debug, instrument};

use super::NodeScores;

/// Count, for every node, how many termination walks close on it.
///
/// # Errors
///
/// Returns [`GraphError::MissingSuccessor`] if any node has no outgoing
/// edge. The graph is checked up front, before any walk starts.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn count_terminations(graph: &FirstLinkGraph) -> Result<NodeScores, GraphError> {
    graph.validate()?;

    let mut counts: NodeScores = graph.nodes().map(|n| (n, 0)).collect();
    let mut visited = HashSet::new();

    for start in graph.nodes() {
        let closing = walk(graph, start, &mut visited)?;
        *counts.entry(closing).or_default() += 1;
    }

    debug!(walks = graph.node_count(), "termination walks complete");
    Ok(counts)
}

/// The node that closes the termination walk starting at `start`.
///
/// # Errors
///
/// Returns [`GraphError::UnknownNode`] for a label not in the graph, or
/// [`GraphError::MissingSuccessor`] if the walk reaches a node with no
/// outgoing edge.
pub fn termination_of(graph: &FirstLinkGraph, start: &str) -> Result<NodeIndex, GraphError> {
    let idx = graph
        .node_index(start)
        .ok_or_else(|| GraphError::UnknownNode(start.to_string()))?;
    walk(graph, idx, &mut HashSet::new())
}

/// The node with the highest score. Ties go to the node inserted first.
///
/// Returns `None` only for an empty graph.
#[must_use]
pub fn dominant_node(graph: &FirstLinkGraph, scores: &NodeScores) -> Option<NodeIndex> {
    let mut best: Option<(NodeIndex, usize)> = None;
    for idx in graph.nodes() {
        let score = scores.get(&idx).copied().unwrap_or(0);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

fn walk(
    graph: &FirstLinkGraph,
    start: NodeIndex,
    visited: &mut HashSet<NodeIndex>,
) -> Result<NodeIndex, GraphError> {
    visited.clear();
    visited.insert(start);
    let mut cursor = start;

    loop {
        let next = graph.successor(cursor).ok_or_else(|| GraphError::MissingSuccessor {
            nodes: graph.label(cursor).map(str::to_string).into_iter().collect(),
        })?;
        if !visited.insert(next) {
            return Ok(next);
        }
        cursor = next;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
