#![forbid(unsafe_code)]
//! firstlink-analysis library.
//!
//! Cycle structure, centrality, and radial layout for first-link networks.
//!
//! ```text
//! FirstLinkGraph
//!        ↓  metrics::termination::count_terminations()
//! termination scores → dominant node n*
//!        ↓  metrics::centrality::calculate_termination_centrality()
//! termination centrality (shortest paths toward n*)
//!        ↓  layout::radial::determine_node_positions()
//! positions for the component that reaches n*
//!        ↓  layout::components::visualize()
//! Scene (every component, offset so they do not overlap)
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Input validation fails fast with [`firstlink_core::GraphError`];
//!   unreachable nodes and degenerate weights are absorbed, not surfaced.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod layout;
pub mod metrics;

pub use layout::components::visualize;
pub use layout::radial::determine_node_positions;
pub use layout::scene::{NodeStyle, Scene, SeedStyle};
pub use metrics::centrality::calculate_termination_centrality;
pub use metrics::termination::count_terminations;
