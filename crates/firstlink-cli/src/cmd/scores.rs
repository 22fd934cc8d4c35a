use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use firstlink_analysis::calculate_termination_centrality;
use firstlink_analysis::metrics::termination::termination_of;
use firstlink_core::config::FirstLinkConfig;

use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `firstlink scores`.
#[derive(Args, Debug)]
pub struct ScoresArgs {
    /// Network file (delimited text with a header row).
    #[arg(value_name = "NETWORK")]
    pub network: PathBuf,

    /// Show only the first N rows.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct ScoreRow {
    label: String,
    terminations: usize,
    centrality: usize,
    /// Node that closes the termination walk started here.
    terminates_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct ScoresReport {
    nodes: usize,
    edges: usize,
    content_hash: String,
    dominant: Option<String>,
    rows: Vec<ScoreRow>,
}

/// Execute `firstlink scores`.
///
/// Rows are sorted by centrality, then termination score (both descending),
/// then label.
pub fn run_scores(
    args: &ScoresArgs,
    output: OutputMode,
    config: &FirstLinkConfig,
) -> Result<()> {
    let report = build_report(&args.network, args.top, config)?;
    render_mode(output, &report, render_text, render_pretty)
}

fn build_report(path: &Path, top: Option<usize>, config: &FirstLinkConfig) -> Result<ScoresReport> {
    let network = super::load_checked(path, &config.input)?;
    let graph = &network.graph;
    let centrality = calculate_termination_centrality(graph)?;

    let mut rows: Vec<ScoreRow> = graph
        .nodes()
        .filter_map(|idx| {
            let label = graph.label(idx)?;
            let terminates_at = termination_of(graph, label)
                .ok()
                .and_then(|end| graph.label(end))
                .map(str::to_string);
            Some(ScoreRow {
                label: label.to_string(),
                terminations: centrality.terminations.get(&idx).copied().unwrap_or(0),
                centrality: centrality.score(idx),
                terminates_at,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.centrality
            .cmp(&a.centrality)
            .then_with(|| b.terminations.cmp(&a.terminations))
            .then_with(|| a.label.cmp(&b.label))
    });
    if let Some(n) = top {
        rows.truncate(n);
    }

    Ok(ScoresReport {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        content_hash: graph.content_hash(),
        dominant: centrality
            .dominant
            .and_then(|idx| graph.label(idx))
            .map(str::to_string),
        rows,
    })
}

fn render_text(report: &ScoresReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "label\tterminations\tcentrality\tterminates_at")?;
    for row in &report.rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            row.label,
            row.terminations,
            row.centrality,
            row.terminates_at.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

fn render_pretty(report: &ScoresReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Network")?;
    pretty_kv(w, "Nodes", report.nodes.to_string())?;
    pretty_kv(w, "Edges", report.edges.to_string())?;
    pretty_kv(w, "Dominant", report.dominant.as_deref().unwrap_or("(none)"))?;
    pretty_kv(w, "Hash", &report.content_hash)?;
    writeln!(w)?;

    pretty_section(w, "Scores")?;
    writeln!(
        w,
        "{:<32} {:>12} {:>10}  {}",
        "NODE", "TERMINATIONS", "CENTRALITY", "ENDS AT"
    )?;
    for row in &report.rows {
        writeln!(
            w,
            "{:<32} {:>12} {:>10}  {}",
            row.label,
            row.terminations,
            row.centrality,
            row.terminates_at.as_deref().unwrap_or("-")
        )?;
    }
    pretty_rule(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_network(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("network.csv");
        std::fs::write(&path, body).expect("write network");
        path
    }

    #[test]
    fn report_sorts_by_centrality() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_network(
            &dir,
            "First Node,Second Node\nA,B\nB,C\nC,B\n",
        );
        let report = build_report(&path, None, &FirstLinkConfig::default()).expect("report");

        assert_eq!(report.dominant.as_deref(), Some("B"));
        let labels: Vec<&str> = report.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "C", "A"]);
        assert_eq!(report.rows[0].centrality, 3);
        assert_eq!(report.rows[2].terminates_at.as_deref(), Some("B"));
    }

    #[test]
    fn top_truncates_rows() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_network(&dir, "First Node,Second Node\nA,B\nB,C\nC,B\n");
        let report = build_report(&path, Some(1), &FirstLinkConfig::default()).expect("report");
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.nodes, 3);
    }

    #[test]
    fn sink_node_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_network(&dir, "First Node,Second Node\nA,B\n");
        let err = build_report(&path, None, &FirstLinkConfig::default()).expect_err("B is a sink");
        assert!(format!("{err:#}").contains("no outgoing edge"));
    }
}
