//! Termination centrality.
//!
//! # Overview
//!
//! Let n* be the node with the most terminations (see
//! [`super::termination`]). For every node n, take one shortest path from n
//! to n* (following outgoing edges, all of them, not only the successor)
//! and give +1 to every node on it, both endpoints included. Nodes that
//! cannot reach n* contribute nothing and, unless some other path crosses
//! them, score 0.
//!
//! # Algorithm
//!
//! Instead of one BFS per source, a single BFS runs from n* over *incoming*
//! edges. The BFS tree records, for each node that can reach n*, its next
//! hop on a shortest path toward n*. Following next hops from n gives a
//! shortest n → n* path. Predecessors are visited in node insertion order,
//! which fixes the tie-break among equal-length paths.
//!
//! Complexity: O(V + E) for the BFS plus O(V · depth) for the tallies.

use std::collections::{HashMap, HashSet, VecDeque};

use firstlink_core::{FirstLinkGraph, GraphError};
use petgraph::stable_graph::NodeIndex;
use tracing::{debug, instrument};

use super::NodeScores;
use super::termination::{count_terminations, dominant_node};

/// Termination scores, the dominant node, and centrality for one graph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminationCentrality {
    /// The node with the most terminations; `None` only for an empty graph.
    pub dominant: Option<NodeIndex>,
    /// Termination score per node.
    pub terminations: NodeScores,
    /// Number of shortest paths toward the dominant node through each node.
    pub scores: NodeScores,
}

impl TerminationCentrality {
    /// Centrality of `idx`; 0 for unknown nodes.
    #[must_use]
    pub fn score(&self, idx: NodeIndex) -> usize {
        self.scores.get(&idx).copied().unwrap_or(0)
    }

    /// Nodes with positive centrality: exactly those that can reach the
    /// dominant node, the dominant node included.
    #[must_use]
    pub fn connected(&self) -> HashSet<NodeIndex> {
        self.scores
            .iter()
            .filter(|&(_, &score)| score > 0)
            .map(|(&idx, _)| idx)
            .chain(self.dominant)
            .collect()
    }
}

/// Next hops on shortest paths toward a single target.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    target: NodeIndex,
    next_hop: HashMap<NodeIndex, NodeIndex>,
}

impl ShortestPaths {
    /// Breadth-first search from `target` over incoming edges.
    #[must_use]
    pub fn toward(graph: &FirstLinkGraph, target: NodeIndex) -> Self {
        let mut next_hop = HashMap::new();
        let mut visited = HashSet::from([target]);
        let mut queue = VecDeque::from([target]);

        while let Some(current) = queue.pop_front() {
            for pred in graph.predecessors(current) {
                if visited.insert(pred) {
                    next_hop.insert(pred, current);
                    queue.push_back(pred);
                }
            }
        }

        Self { target, next_hop }
    }

    /// Whether `from` can reach the target.
    #[must_use]
    pub fn reaches(&self, from: NodeIndex) -> bool {
        from == self.target || self.next_hop.contains_key(&from)
    }

    /// A shortest path `from → … → target`, endpoints included.
    ///
    /// Returns `None` when `from` cannot reach the target.
    #[must_use]
    pub fn path_from(&self, from: NodeIndex) -> Option<Vec<NodeIndex>> {
        if !self.reaches(from) {
            return None;
        }
        let mut path = vec![from];
        let mut cursor = from;
        while cursor != self.target {
            cursor = *self.next_hop.get(&cursor)?;
            path.push(cursor);
        }
        Some(path)
    }
}

/// Compute termination centrality for every node of `graph`.
///
/// # Errors
///
/// Returns [`GraphError::MissingSuccessor`] if any node has no outgoing
/// edge. A node that cannot reach n* is not an error.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn calculate_termination_centrality(
    graph: &FirstLinkGraph,
) -> Result<TerminationCentrality, GraphError> {
    let terminations = count_terminations(graph)?;
    let mut scores: NodeScores = graph.nodes().map(|n| (n, 0)).collect();

    let Some(n_star) = dominant_node(graph, &terminations) else {
        return Ok(TerminationCentrality {
            dominant: None,
            terminations,
            scores,
        });
    };

    let paths = ShortestPaths::toward(graph, n_star);
    let mut unreachable = 0_usize;

    for n in graph.nodes() {
        match paths.path_from(n) {
            Some(path) => {
                for node in path {
                    *scores.entry(node).or_default() += 1;
                }
            }
            None => unreachable += 1,
        }
    }

    debug!(
        dominant = graph.label(n_star).unwrap_or_default(),
        unreachable, "termination centrality computed"
    );

    Ok(TerminationCentrality {
        dominant: Some(n_star),
        terminations,
        scores,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::labelled;

    fn centrality_of(edges: &[(&str, &str)]) -> (FirstLinkGraph, TerminationCentrality) {
        let g = FirstLinkGraph::from_edges(edges.iter().copied());
        let c = calculate_termination_centrality(&g).expect("valid functional graph");
        (g, c)
    }

    #[test]
    fn empty_graph_has_no_dominant() {
        let (_, c) = centrality_of(&[]);
        assert_eq!(c.dominant, None);
        assert!(c.scores.is_empty());
        assert!(c.connected().is_empty());
    }

    #[test]
    fn rho_shape_centrality() {
        // A → B → C → B: paths A→B, B, C→B.
        let (g, c) = centrality_of(&[("A", "B"), ("B", "C"), ("C", "B")]);
        let by_label = labelled(&g, &c.scores);
        assert_eq!(by_label["A"], 1);
        assert_eq!(by_label["B"], 3);
        assert_eq!(by_label["C"], 1);
        assert_eq!(c.dominant, g.node_index("B"));
    }

    #[test]
    fn chain_into_cycle_accumulates_toward_n_star() {
        // D → C → B → A ⇄ Z
        let (g, c) =
            centrality_of(&[("D", "C"), ("C", "B"), ("B", "A"), ("A", "Z"), ("Z", "A")]);
        let by_label = labelled(&g, &c.scores);
        assert_eq!(c.dominant, g.node_index("A"));
        assert_eq!(by_label["D"], 1);
        assert_eq!(by_label["C"], 2);
        assert_eq!(by_label["B"], 3);
        assert_eq!(by_label["A"], 5);
        assert_eq!(by_label["Z"], 1);
    }

    #[test]
    fn other_component_stays_at_zero() {
        // Component 1: A, B, C feed a self-loop on A. Component 2: X ⇄ Y.
        let (g, c) = centrality_of(&[
            ("B", "A"),
            ("C", "A"),
            ("A", "A"),
            ("X", "Y"),
            ("Y", "X"),
        ]);
        let by_label = labelled(&g, &c.scores);
        assert_eq!(c.dominant, g.node_index("A"));
        assert_eq!(by_label["X"], 0);
        assert_eq!(by_label["Y"], 0);

        let connected = c.connected();
        assert_eq!(connected.len(), 3);
        assert!(!connected.contains(&g.node_index("X").expect("X")));
    }

    #[test]
    fn shortest_path_uses_non_successor_edges() {
        // A's successor is B (long way round); A → D is a later, shorter edge.
        let mut g = FirstLinkGraph::new();
        g.add_edge("A", "B");
        g.add_edge("B", "C");
        g.add_edge("C", "D");
        g.add_edge("D", "D");
        g.add_edge("A", "D");
        let paths = ShortestPaths::toward(&g, g.node_index("D").expect("D"));
        let path = paths
            .path_from(g.node_index("A").expect("A"))
            .expect("A reaches D");
        let labels: Vec<&str> = path.iter().filter_map(|&i| g.label(i)).collect();
        assert_eq!(labels, vec!["A", "D"]);
    }

    #[test]
    fn path_from_target_is_just_the_target() {
        let g = FirstLinkGraph::from_edges([("A", "A")]);
        let a = g.node_index("A").expect("A");
        let paths = ShortestPaths::toward(&g, a);
        assert_eq!(paths.path_from(a), Some(vec![a]));
    }

    #[test]
    fn missing_successor_propagates() {
        let g = FirstLinkGraph::from_edges([("A", "B")]);
        assert!(calculate_termination_centrality(&g).is_err());
    }
}
