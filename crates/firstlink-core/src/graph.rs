//! Functional directed graph of "first link" relationships.
//!
//! # Overview
//!
//! Every node in a first-link network names a single next node: the first
//! link followed out of its page. [`FirstLinkGraph`] stores the network as a
//! [`petgraph`] stable directed graph so that node indices survive the
//! destructive removal performed while laying out disconnected components.
//!
//! ## Edge Order
//!
//! A node may carry more than one outgoing edge (duplicate scrapes, merged
//! inputs). Each edge is weighted with its insertion rank and the node's
//! *successor* is always the outgoing edge with the lowest rank. Successor
//! lists are returned in rank order. Predecessor lists are ordered by when
//! each source node was first seen, so a source that appeared as a target
//! before its own row comes early. Both orders are independent of
//! petgraph's internal adjacency layout.
//!
//! ## Node Order
//!
//! [`FirstLinkGraph::nodes`] yields nodes in insertion order. All tie-breaks
//! in the analysis crates ("first encountered") refer to this order.
//!
//! ## Cache Invalidation
//!
//! [`FirstLinkGraph::content_hash`] is a BLAKE3 hash of the ordered edge
//! list. Compare it against a stored value to detect a changed network.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// FirstLinkGraph
// ---------------------------------------------------------------------------

/// A directed graph where every node is expected to have a designated
/// successor.
///
/// Nodes are labels (strings). An edge `A → B` means "the first link out of
/// A leads to B". Edge weights are insertion ranks.
#[derive(Debug, Clone, Default)]
pub struct FirstLinkGraph {
    graph: StableDiGraph<String, u64>,
    node_map: HashMap<String, NodeIndex>,
    /// Live nodes in insertion order.
    order: Vec<NodeIndex>,
    /// Insertion sequence number per live node.
    seq: HashMap<NodeIndex, u64>,
    next_seq: u64,
    next_rank: u64,
}

impl FirstLinkGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(source, target)` pairs, in order.
    ///
    /// Nodes are created on first mention, so the node order follows the
    /// order in which labels first appear in `edges`.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for (source, target) in edges {
            graph.add_edge(source.as_ref(), target.as_ref());
        }
        graph
    }

    /// Insert a node labelled `label`, or return the existing one.
    pub fn add_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.node_map.insert(label.to_string(), idx);
        self.order.push(idx);
        self.seq.insert(idx, self.next_seq);
        self.next_seq += 1;
        idx
    }

    /// Insert the edge `source → target`, creating missing endpoints.
    ///
    /// Returns `false` when the edge already existed (petgraph allows
    /// parallel edges, this graph does not).
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let s = self.add_node(source);
        let t = self.add_node(target);
        if self.graph.contains_edge(s, t) {
            return false;
        }
        self.graph.add_edge(s, t, self.next_rank);
        self.next_rank += 1;
        true
    }

    /// Return the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up the `NodeIndex` for a label.
    #[must_use]
    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.node_map.get(label).copied()
    }

    /// Return the label for a node.
    #[must_use]
    pub fn label(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Iterate live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.order.iter().copied()
    }

    /// The designated successor of `idx`: its lowest-ranked outgoing edge.
    #[must_use]
    pub fn successor(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .min_by_key(|edge| *edge.weight())
            .map(|edge| edge.target())
    }

    /// All nodes `idx` links to, in edge insertion order.
    #[must_use]
    pub fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut ranked: Vec<(u64, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        ranked.sort_unstable_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, target)| target).collect()
    }

    /// All nodes that link to `idx`, in node insertion order.
    ///
    /// This is the order the radial layout hands out slices in and the
    /// order the centrality BFS discovers next hops in.
    #[must_use]
    pub fn predecessors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut ranked: Vec<(u64, u64, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|edge| {
                let source = edge.source();
                let seq = self.seq.get(&source).copied().unwrap_or(u64::MAX);
                (seq, *edge.weight(), source)
            })
            .collect();
        ranked.sort_unstable_by_key(|&(seq, rank, _)| (seq, rank));
        ranked.into_iter().map(|(_, _, source)| source).collect()
    }

    /// All edges as `(source, target)` pairs, in insertion order.
    #[must_use]
    pub fn edges(&self) -> Vec<(NodeIndex, NodeIndex)> {
        let mut ranked: Vec<(u64, NodeIndex, NodeIndex)> = self
            .graph
            .edge_references()
            .map(|edge| (*edge.weight(), edge.source(), edge.target()))
            .collect();
        ranked.sort_unstable_by_key(|(rank, _, _)| *rank);
        ranked.into_iter().map(|(_, s, t)| (s, t)).collect()
    }

    /// Check that every node has a successor.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingSuccessor`] listing every node with no
    /// outgoing edge.
    pub fn validate(&self) -> Result<(), GraphError> {
        let missing: Vec<String> = self
            .nodes()
            .filter(|&idx| self.successor(idx).is_none())
            .filter_map(|idx| self.label(idx).map(str::to_string))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GraphError::MissingSuccessor { nodes: missing })
        }
    }

    /// Copy the sub-graph induced by `keep`.
    ///
    /// Node order and relative edge order are preserved. Indices in the
    /// returned graph are fresh; use labels to correlate the two.
    #[must_use]
    pub fn induced_subgraph(&self, keep: &HashSet<NodeIndex>) -> Self {
        let mut sub = Self::new();
        for idx in self.nodes().filter(|idx| keep.contains(idx)) {
            if let Some(label) = self.label(idx) {
                sub.add_node(label);
            }
        }
        for (s, t) in self.edges() {
            if !(keep.contains(&s) && keep.contains(&t)) {
                continue;
            }
            if let (Some(source), Some(target)) = (self.label(s), self.label(t)) {
                sub.add_edge(source, target);
            }
        }
        sub
    }

    /// Remove `nodes` and their incident edges. Unknown indices are ignored.
    ///
    /// Remaining indices stay valid.
    pub fn remove_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        for idx in nodes {
            if let Some(label) = self.graph.remove_node(idx) {
                self.node_map.remove(&label);
                self.seq.remove(&idx);
            }
        }
        let graph = &self.graph;
        self.order.retain(|&idx| graph.contains_node(idx));
    }

    /// BLAKE3 hash of the ordered edge list, formatted as `blake3:<hex>`.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (s, t) in self.edges() {
            hasher.update(self.label(s).unwrap_or_default().as_bytes());
            hasher.update(b"\x00");
            hasher.update(self.label(t).unwrap_or_default().as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
