#![forbid(unsafe_code)]
//! firstlink-core library.
//!
//! Holds the functional-graph model that every analysis in `firstlink`
//! operates on, plus the ambient pieces around it: loading a network from
//! delimited text, and project/user configuration.
//!
//! # Conventions
//!
//! - **Errors**: typed errors (`thiserror`) for graph and input failures,
//!   `anyhow::Result` where a caller only needs context (config files).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod load;

pub use error::{GraphError, LoadError};
pub use graph::FirstLinkGraph;
pub use load::Network;
