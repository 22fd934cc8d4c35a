//! Radial "pie" layout around the dominant node.
//!
//! # Overview
//!
//! The dominant node n* sits at the center and owns the full circle
//! `[0, 2π)`. Edges are followed backwards: the nodes that link *into* a
//! node are its branches. A node with branches splits its pie among them,
//! each branch getting a slice proportional to its termination centrality,
//! and each branch is placed one unit away from its parent at the midpoint
//! angle of its slice. Branches then split their own slices the same way.
//!
//! Radius never encodes importance; only the angular share does. Nodes
//! feeding many others get wide slices, so their sub-trees have room.
//!
//! # Algorithm
//!
//! Iterative, with a pending set of `(node, pie)` pairs processed
//! last-in-first-out (depth-first over the predecessor tree):
//!
//! 1. Pop `(node, pie)`. If the node has branches and has not been expanded
//!    yet, mark it expanded and split `pie` among its branches in node
//!    insertion order.
//! 2. Place each branch that has no position yet; an already placed node is
//!    never moved. Record the branch's slice as pending, replacing any slice
//!    it already had pending from another parent (the pending entry keeps
//!    its original stack slot).
//! 3. Stop when nothing is pending.
//!
//! Each node is expanded at most once, so cycles among predecessors
//! terminate.
//!
//! # Weighting
//!
//! Slice widths start from an even split (`width / branch_count`) and are
//! scaled by `importance / mean_importance`. Slices are contiguous from the
//! pie's start but are not renormalised, so they only fill the parent pie
//! exactly when the weights average to one. A branch set whose mean
//! importance is zero falls back to an even split.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use firstlink_core::{FirstLinkGraph, GraphError};
use petgraph::stable_graph::NodeIndex;
use serde::Serialize;
use tracing::{instrument, trace, warn};

use super::Point;
use crate::metrics::centrality::{TerminationCentrality, calculate_termination_centrality};

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// A half-open angular interval `[start, end)` in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pie {
    pub start: f64,
    pub end: f64,
}

impl Pie {
    /// The whole circle, owned by the dominant node.
    pub const FULL: Self = Self {
        start: 0.0,
        end: TAU,
    };

    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    /// Placement angle for the pie's owner.
    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Relative angular weight of each branch: `importance / mean(importance)`.
///
/// If the mean is zero every branch gets weight `1.0` (an even split).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn branch_weights(importance: &[usize]) -> Vec<f64> {
    if importance.is_empty() {
        return Vec::new();
    }

    let total: usize = importance.iter().sum();
    let mean = total as f64 / importance.len() as f64;

    if mean > 0.0 && mean.is_finite() {
        importance.iter().map(|&i| i as f64 / mean).collect()
    } else {
        warn!(
            branches = importance.len(),
            "branch set has zero mean importance; splitting evenly"
        );
        vec![1.0; importance.len()]
    }
}

/// Split `pie` into contiguous slices, one per weight.
///
/// Slice `i` has width `pie.width() / weights.len() * weights[i]` and starts
/// where slice `i - 1` ended.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn split_pie(pie: Pie, weights: &[f64]) -> Vec<Pie> {
    if weights.is_empty() {
        return Vec::new();
    }

    let delta = pie.width() / weights.len() as f64;
    let mut cursor = pie.start;

    weights
        .iter()
        .map(|&weight| {
            let end = delta.mul_add(weight, cursor);
            let slice = Pie::new(cursor, end);
            cursor = end;
            slice
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pending pies
// ---------------------------------------------------------------------------

/// Last-in-first-out set of pending `(node, pie)` pairs.
///
/// Re-inserting a node replaces its pie in place: the entry keeps the stack
/// slot it was first pushed into.
#[derive(Debug, Default)]
struct PieStack {
    entries: Vec<(NodeIndex, Pie)>,
    slots: HashMap<NodeIndex, usize>,
}

impl PieStack {
    fn insert(&mut self, node: NodeIndex, pie: Pie) {
        match self.slots.get(&node) {
            Some(&slot) => {
                if let Some(entry) = self.entries.get_mut(slot) {
                    entry.1 = pie;
                }
            }
            None => {
                self.slots.insert(node, self.entries.len());
                self.entries.push((node, pie));
            }
        }
    }

    fn pop(&mut self) -> Option<(NodeIndex, Pie)> {
        let (node, pie) = self.entries.pop()?;
        self.slots.remove(&node);
        Some((node, pie))
    }
}

// ---------------------------------------------------------------------------
// RadialLayout
// ---------------------------------------------------------------------------

/// Positions for the nodes that reach the dominant node.
///
/// Nodes that were never placed have no entry and must not be drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadialLayout {
    /// The node placed at the center.
    pub dominant: Option<NodeIndex>,
    positions: HashMap<NodeIndex, Point>,
    /// Nodes in the order they were placed.
    order: Vec<NodeIndex>,
}

impl RadialLayout {
    #[must_use]
    pub fn position(&self, idx: NodeIndex) -> Option<Point> {
        self.positions.get(&idx).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Placed nodes and their positions, in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, Point)> + '_ {
        self.order
            .iter()
            .filter_map(|idx| self.positions.get(idx).map(|&p| (*idx, p)))
    }

    /// Largest distance from `center` to any placed node.
    #[must_use]
    pub fn radius_from(&self, center: Point) -> f64 {
        self.positions
            .values()
            .map(|p| p.distance(center))
            .fold(0.0, f64::max)
    }
}

/// Lay out the component of `graph` that reaches its dominant node, with
/// the dominant node at `center`.
///
/// Termination centrality is computed on `graph` itself and used as the
/// importance of each branch.
///
/// # Errors
///
/// Returns [`GraphError::MissingSuccessor`] if any node has no outgoing edge.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn determine_node_positions(
    graph: &FirstLinkGraph,
    center: Point,
) -> Result<RadialLayout, GraphError> {
    let centrality = calculate_termination_centrality(graph)?;
    Ok(layout_with_centrality(graph, &centrality, center))
}

/// Lay out `graph` around `centrality.dominant` using precomputed scores.
#[must_use]
pub fn layout_with_centrality(
    graph: &FirstLinkGraph,
    centrality: &TerminationCentrality,
    center: Point,
) -> RadialLayout {
    let Some(root) = centrality.dominant else {
        return RadialLayout::default();
    };

    let mut layout = RadialLayout {
        dominant: Some(root),
        positions: HashMap::from([(root, center)]),
        order: vec![root],
    };
    let mut expanded: HashSet<NodeIndex> = HashSet::new();
    let mut pending = PieStack::default();
    let mut current = (root, Pie::FULL);

    loop {
        let (node, pie) = current;
        let branches = graph.predecessors(node);

        if !branches.is_empty() && expanded.insert(node) {
            let importance: Vec<usize> = branches.iter().map(|&b| centrality.score(b)).collect();
            let slices = split_pie(pie, &branch_weights(&importance));
            let origin = layout.position(node).unwrap_or(center);

            for (&branch, slice) in branches.iter().zip(slices) {
                if let Entry::Vacant(slot) = layout.positions.entry(branch) {
                    slot.insert(origin.offset(slice.midpoint(), 1.0));
                    layout.order.push(branch);
                }
                pending.insert(branch, slice);
            }

            trace!(
                node = graph.label(node).unwrap_or_default(),
                branches = branches.len(),
                "expanded pie"
            );
        }

        match pending.pop() {
            Some(next) => current = next,
            None => break,
        }
    }

    layout
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
