//! Multi-component layout driver.
//!
//! # Overview
//!
//! A first-link network usually splits into several components, each
//! draining into its own cycle. The driver owns a working copy of the graph
//! and peels components off one at a time:
//!
//! 1. Compute termination centrality over what is left of the graph.
//!    `connected` is every node with positive centrality (the nodes that
//!    reach the current dominant node, the dominant node included).
//! 2. Lay out the sub-graph induced by `connected` with the radial engine,
//!    centered at the current center.
//! 3. Record nodes and intra-component edges, then remove `connected`.
//! 4. Move the center by `orbit_factor × radius` in a random direction,
//!    where `radius` is the component's largest distance from its center.
//!
//! Each round removes at least the dominant node, so the loop ends.
//!
//! The random source is injected; seed it for reproducible scenes.

use std::f64::consts::TAU;

use firstlink_core::config::LayoutConfig;
use firstlink_core::{FirstLinkGraph, GraphError};
use rand::Rng;
use tracing::{debug, info, instrument};

use super::Point;
use super::radial::{RadialLayout, determine_node_positions};
use super::scene::{ComponentScene, EdgeRecord, NodeRecord, NodeStyle, Scene};
use crate::metrics::centrality::{TerminationCentrality, calculate_termination_centrality};

/// Lay out every component of `graph`, consuming it.
///
/// # Errors
///
/// Returns [`GraphError::MissingSuccessor`] if any node has no outgoing
/// edge. The check happens before any component is laid out.
#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn visualize<S, R>(
    mut graph: FirstLinkGraph,
    style: &S,
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<Scene, GraphError>
where
    S: NodeStyle + ?Sized,
    R: Rng,
{
    graph.validate()?;

    let mut scene = Scene::default();
    let mut center = Point::ORIGIN;

    while !graph.is_empty() {
        let centrality = calculate_termination_centrality(&graph)?;
        let connected = centrality.connected();
        if connected.is_empty() {
            break;
        }

        let component = graph.induced_subgraph(&connected);
        let layout = determine_node_positions(&component, center)?;
        let record = component_scene(&graph, &centrality, &component, &layout, style, center);

        debug!(
            dominant = record.dominant.as_deref().unwrap_or_default(),
            members = record.members.len(),
            radius = record.radius,
            "component laid out"
        );

        let radius = record.radius;
        scene.components.push(record);
        graph.remove_nodes(connected);

        if graph.is_empty() {
            break;
        }

        let orbit_distance = config.orbit_factor * radius.max(config.min_orbit_radius);
        let orbit_angle = rng.gen_range(0.0..TAU);
        center = center.offset(orbit_angle, orbit_distance);
    }

    info!(
        components = scene.components.len(),
        nodes = scene.node_count(),
        edges = scene.edge_count(),
        "scene complete"
    );
    Ok(scene)
}

/// Build the render records for one component.
///
/// Sizes come from `centrality`, computed over the whole remaining graph;
/// positions come from `layout`, computed over `component`.
fn component_scene<S: NodeStyle + ?Sized>(
    remaining: &FirstLinkGraph,
    centrality: &TerminationCentrality,
    component: &FirstLinkGraph,
    layout: &RadialLayout,
    style: &S,
    center: Point,
) -> ComponentScene {
    let importance = |label: &str| {
        remaining
            .node_index(label)
            .map_or(0, |idx| centrality.score(idx))
    };

    let nodes = layout
        .iter()
        .filter_map(|(idx, position)| {
            let label = component.label(idx)?;
            Some(NodeRecord {
                label: label.to_string(),
                position,
                hints: style.hints(label, importance(label)),
            })
        })
        .collect();

    let edges = component
        .edges()
        .into_iter()
        .filter_map(|(s, t)| {
            let source = component.label(s)?;
            let target = component.label(t)?;
            Some(EdgeRecord {
                source: source.to_string(),
                target: target.to_string(),
                from: layout.position(s)?,
                to: layout.position(t)?,
                target_importance: importance(target),
            })
        })
        .collect();

    ComponentScene {
        center,
        dominant: layout
            .dominant
            .and_then(|idx| component.label(idx))
            .map(str::to_string),
        radius: layout.radius_from(center),
        members: component
            .nodes()
            .filter_map(|idx| component.label(idx))
            .map(str::to_string)
            .collect(),
        nodes,
        edges,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
