//! Error types for graph validation and network loading.

use std::path::PathBuf;

/// Maximum number of offending labels quoted in a [`GraphError::MissingSuccessor`]
/// message. The full list is always kept in the variant.
const MAX_QUOTED_LABELS: usize = 5;

/// Input-validation failures on a [`crate::FirstLinkGraph`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// One or more nodes have no outgoing edge, so a termination walk
    /// starting at them has no legal next step.
    #[error("{} node(s) have no outgoing edge: {}", .nodes.len(), quote_labels(.nodes))]
    MissingSuccessor {
        /// Labels of every node without a successor, in insertion order.
        nodes: Vec<String>,
    },

    /// A label was referenced that is not part of the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),
}

/// Failures while reading a network or seed list from delimited text.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is empty: expected a header row")]
    MissingHeader,

    #[error("header has no column named {0:?}")]
    MissingColumn(String),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

fn quote_labels(labels: &[String]) -> String {
    let mut quoted: Vec<&str> = labels
        .iter()
        .take(MAX_QUOTED_LABELS)
        .map(String::as_str)
        .collect();
    if labels.len() > MAX_QUOTED_LABELS {
        quoted.push("...");
    }
    quoted.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_successor_lists_labels() {
        let err = GraphError::MissingSuccessor {
            nodes: vec!["Plato".to_string(), "Aristotle".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "2 node(s) have no outgoing edge: Plato, Aristotle"
        );
    }

    #[test]
    fn missing_successor_truncates_long_lists() {
        let nodes: Vec<String> = (0..8).map(|i| format!("n{i}")).collect();
        let err = GraphError::MissingSuccessor { nodes };
        let msg = err.to_string();
        assert!(msg.starts_with("8 node(s)"), "got: {msg}");
        assert!(msg.ends_with("n4, ..."), "got: {msg}");
    }

    #[test]
    fn malformed_reports_line() {
        let err = LoadError::Malformed {
            line: 7,
            reason: "unterminated quote".to_string(),
        };
        assert_eq!(err.to_string(), "line 7: unterminated quote");
    }
}
