use std::collections::HashSet;

use firstlink_analysis::layout::radial::{Pie, branch_weights, determine_node_positions, split_pie};
use firstlink_analysis::layout::Point;
use firstlink_analysis::{SeedStyle, calculate_termination_centrality, count_terminations, visualize};
use firstlink_core::config::LayoutConfig;
use firstlink_core::FirstLinkGraph;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A random functional graph: node `i` links to `successors[i]`.
fn arb_functional_graph() -> impl Strategy<Value = FirstLinkGraph> {
    (1_usize..40).prop_flat_map(|n| {
        prop::collection::vec(0..n, n).prop_map(|successors| {
            FirstLinkGraph::from_edges(
                successors
                    .iter()
                    .enumerate()
                    .map(|(i, &s)| (format!("n{i}"), format!("n{s}"))),
            )
        })
    })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn terminations_sum_to_node_count(g in arb_functional_graph()) {
        let scores = count_terminations(&g).expect("functional graph");
        prop_assert_eq!(scores.values().sum::<usize>(), g.node_count());
        prop_assert_eq!(scores.len(), g.node_count());
    }

    #[test]
    fn connected_nodes_reach_the_dominant_node(g in arb_functional_graph()) {
        let c = calculate_termination_centrality(&g).expect("functional graph");
        let dominant = c.dominant.expect("non-empty graph");
        prop_assert!(c.score(dominant) >= 1);

        for n in g.nodes() {
            // Follow successors; a node reaching n* in a functional graph
            // does so along its successor chain.
            let mut cursor = n;
            let mut seen = HashSet::new();
            let mut reaches = false;
            while seen.insert(cursor) {
                if cursor == dominant {
                    reaches = true;
                    break;
                }
                cursor = g.successor(cursor).expect("functional graph");
            }
            prop_assert_eq!(reaches, c.score(n) > 0);
        }
    }

    #[test]
    fn layout_places_every_connected_node_once(g in arb_functional_graph()) {
        let c = calculate_termination_centrality(&g).expect("functional graph");
        let connected = c.connected();
        let layout = determine_node_positions(&g, Point::ORIGIN).expect("functional graph");

        prop_assert_eq!(layout.len(), connected.len());
        let placed: HashSet<_> = layout.iter().map(|(idx, _)| idx).collect();
        prop_assert_eq!(placed.len(), layout.len());
        prop_assert_eq!(placed, connected);
    }

    #[test]
    fn layout_is_deterministic(g in arb_functional_graph()) {
        let a = determine_node_positions(&g, Point::ORIGIN).expect("functional graph");
        let b = determine_node_positions(&g, Point::ORIGIN).expect("functional graph");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn driver_exhausts_every_node_exactly_once(g in arb_functional_graph(), seed in any::<u64>()) {
        let mut all: Vec<String> = g.nodes().filter_map(|i| g.label(i)).map(str::to_string).collect();
        all.sort_unstable();

        let mut rng = StdRng::seed_from_u64(seed);
        let scene = visualize(g, &SeedStyle::default(), &LayoutConfig::default(), &mut rng)
            .expect("functional graph");

        let mut members: Vec<String> = scene
            .components
            .iter()
            .flat_map(|c| c.members.iter().cloned())
            .collect();
        members.sort_unstable();
        prop_assert_eq!(members, all);
        prop_assert_eq!(scene.node_count(), scene.components.iter().map(|c| c.members.len()).sum::<usize>());
    }

    #[test]
    fn split_slices_are_contiguous(importance in prop::collection::vec(0_usize..50, 1..12)) {
        let slices = split_pie(Pie::FULL, &branch_weights(&importance));
        prop_assert_eq!(slices.len(), importance.len());
        let mut cursor = 0.0;
        for slice in &slices {
            prop_assert!((slice.start - cursor).abs() < 1e-9);
            prop_assert!(slice.width() >= 0.0);
            cursor = slice.end;
        }
    }
}
