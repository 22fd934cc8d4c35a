//! Render-ready records handed to an external plotting layer.
//!
//! Nothing in here draws. A [`Scene`] is a list of laid-out components, each
//! with node markers (position, size, shape, color) and edge segments.

use std::collections::{HashMap, HashSet};

use firstlink_core::config::{Shape, StyleConfig};
use serde::Serialize;

use super::Point;

/// Marker hints for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeHints {
    /// Marker area. Termination centrality as-is; 0 means "draw nothing".
    pub size: usize,
    pub shape: Shape,
    pub color: String,
}

/// Chooses presentation hints for a node.
pub trait NodeStyle {
    fn hints(&self, label: &str, importance: usize) -> NodeHints;
}

/// Highlights seed nodes.
///
/// A node is a seed when its label, or the resource link recorded for it,
/// is in the seed set.
#[derive(Debug, Clone, Default)]
pub struct SeedStyle {
    seeds: HashSet<String>,
    links: HashMap<String, String>,
    style: StyleConfig,
}

impl SeedStyle {
    #[must_use]
    pub fn new(seeds: HashSet<String>, style: StyleConfig) -> Self {
        Self {
            seeds,
            links: HashMap::new(),
            style,
        }
    }

    /// Attach label → resource link mappings used for seed matching.
    #[must_use]
    pub fn with_links(mut self, links: HashMap<String, String>) -> Self {
        self.links = links;
        self
    }

    #[must_use]
    pub fn is_seed(&self, label: &str) -> bool {
        self.seeds.contains(label)
            || self
                .links
                .get(label)
                .is_some_and(|link| self.seeds.contains(link))
    }
}

impl NodeStyle for SeedStyle {
    fn hints(&self, label: &str, importance: usize) -> NodeHints {
        let (shape, color) = if self.is_seed(label) {
            (self.style.seed_shape, &self.style.seed_color)
        } else {
            (self.style.default_shape, &self.style.default_color)
        };
        NodeHints {
            size: importance,
            shape,
            color: color.clone(),
        }
    }
}

/// A placed node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub label: String,
    pub position: Point,
    #[serde(flatten)]
    pub hints: NodeHints,
}

/// An edge between two placed nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub from: Point,
    pub to: Point,
    /// Importance of the target, for sizing an arrow head.
    pub target_importance: usize,
}

/// One connected component, laid out around its dominant node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScene {
    pub center: Point,
    pub dominant: Option<String>,
    /// Largest distance from `center` to a node of this component.
    pub radius: f64,
    /// Every node removed from the graph with this component.
    pub members: Vec<String>,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// All components of a network.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub components: Vec<ComponentScene>,
}

impl Scene {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.components.iter().map(|c| c.nodes.len()).sum()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.components.iter().map(|c| c.edges.len()).sum()
    }

    /// Every node record across components, in drawing order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.components.iter().flat_map(|c| c.nodes.iter())
    }

    /// Look up a node record by label.
    #[must_use]
    pub fn node(&self, label: &str) -> Option<&NodeRecord> {
        self.nodes().find(|n| n.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> SeedStyle {
        SeedStyle::new(
            HashSet::from(["https://example.org/plato".to_string(), "Logic".to_string()]),
            StyleConfig::default(),
        )
        .with_links(HashMap::from([(
            "Plato".to_string(),
            "https://example.org/plato".to_string(),
        )]))
    }

    #[test]
    fn seed_by_link() {
        let hints = style().hints("Plato", 4);
        assert_eq!(hints.size, 4);
        assert_eq!(hints.shape, Shape::Diamond);
        assert_eq!(hints.color, "green");
    }

    #[test]
    fn seed_by_label() {
        assert!(style().is_seed("Logic"));
    }

    #[test]
    fn non_seed_gets_default_hints() {
        let hints = style().hints("Reason", 0);
        assert_eq!(hints.size, 0);
        assert_eq!(hints.shape, Shape::Circle);
        assert_eq!(hints.color, "#ffa950");
    }

    #[test]
    fn node_record_serializes_flat() {
        let record = NodeRecord {
            label: "A".to_string(),
            position: Point::new(1.0, 2.0),
            hints: NodeHints {
                size: 3,
                shape: Shape::Circle,
                color: "#ffa950".to_string(),
            },
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["label"], "A");
        assert_eq!(json["position"]["y"], 2.0);
        assert_eq!(json["size"], 3);
        assert_eq!(json["shape"], "circle");
    }
}
