//! Loading first-link networks and seed lists from delimited text.
//!
//! # Format
//!
//! Comma-separated text with a header row. Columns are found by name (see
//! [`InputConfig`]), so extra columns such as a leading row index are
//! ignored. Fields may be double-quoted; inside quotes, commas are literal
//! and `""` is an escaped quote. Unquoted fields are trimmed, quoted ones
//! are kept as written. Blank lines are skipped.
//!
//! A network file contributes one edge `source → target` per row. When the
//! link column is present, its value is recorded as the resource link of
//! the row's source node; if a source has several rows, the last non-empty
//! link wins. A seed file is a single column of identities.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, instrument};

use crate::config::InputConfig;
use crate::error::LoadError;
use crate::graph::FirstLinkGraph;

/// A loaded network: the graph plus per-node resource links.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub graph: FirstLinkGraph,
    /// Node label → resource link (e.g. the page URL the label was read from).
    pub links: HashMap<String, String>,
}

/// Read a network file from disk.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or any parse error
/// from [`parse_network`].
pub fn load_network(path: &Path, columns: &InputConfig) -> Result<Network, LoadError> {
    let text = read(path)?;
    parse_network(&text, columns)
}

/// Read a seed list from disk.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or any parse error
/// from [`parse_seeds`].
pub fn load_seeds(path: &Path, column: &str) -> Result<HashSet<String>, LoadError> {
    let text = read(path)?;
    parse_seeds(&text, column)
}

/// Parse a network from delimited text.
///
/// # Errors
///
/// Returns an error if the header is missing, a required column is absent,
/// a row is malformed, or a row has an empty source or target.
#[instrument(skip(text, columns), fields(bytes = text.len()))]
pub fn parse_network(text: &str, columns: &InputConfig) -> Result<Network, LoadError> {
    let (header, rows) = split_header(text)?;
    let source_col = column_position(&header, &columns.source_column)?;
    let target_col = column_position(&header, &columns.target_column)?;
    let link_col = header.iter().position(|h| h == &columns.link_column);

    let mut network = Network::default();

    for (line, record) in rows {
        let record = record?;
        let source = required_field(&record, source_col, line, &columns.source_column)?;
        let target = required_field(&record, target_col, line, &columns.target_column)?;

        network.graph.add_edge(source, target);

        if let Some(link) = link_col.and_then(|col| record.get(col)).filter(|l| !l.is_empty()) {
            network.links.insert(source.to_string(), link.clone());
        }
    }

    debug!(
        nodes = network.graph.node_count(),
        edges = network.graph.edge_count(),
        "parsed network"
    );
    Ok(network)
}

/// Parse a seed list from delimited text.
///
/// # Errors
///
/// Returns an error if the header is missing, `column` is absent, or a row
/// is malformed. Empty cells are skipped.
pub fn parse_seeds(text: &str, column: &str) -> Result<HashSet<String>, LoadError> {
    let (header, rows) = split_header(text)?;
    let col = column_position(&header, column)?;

    let mut seeds = HashSet::new();
    for (_, record) in rows {
        let record = record?;
        if let Some(value) = record.get(col).filter(|v| !v.is_empty()) {
            seeds.insert(value.clone());
        }
    }
    Ok(seeds)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

type Rows<'a> = Box<dyn Iterator<Item = (usize, Result<Vec<String>, LoadError>)> + 'a>;

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Split `text` into the parsed header and an iterator over the remaining
/// non-blank rows, each tagged with its 1-based line number.
fn split_header(text: &str) -> Result<(Vec<String>, Rows<'_>), LoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (header_line, header_text) = lines.next().ok_or(LoadError::MissingHeader)?;
    let header = split_record(header_text.trim_start_matches('\u{feff}'), header_line)?;

    let rows = lines.map(|(line, text)| (line, split_record(text, line)));
    Ok((header, Box::new(rows)))
}

fn column_position(header: &[String], name: &str) -> Result<usize, LoadError> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn required_field<'a>(
    record: &'a [String],
    col: usize,
    line: usize,
    name: &str,
) -> Result<&'a str, LoadError> {
    match record.get(col).map(String::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoadError::Malformed {
            line,
            reason: format!("empty {name:?} field"),
        }),
    }
}

/// Split one comma-separated record, honouring double quotes.
///
/// Unquoted fields are trimmed. Quoted fields keep their contents verbatim;
/// whitespace between the closing quote and the next comma is dropped.
fn split_record(text: &str, line: usize) -> Result<Vec<String>, LoadError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = text.trim_end_matches('\r').chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if !quoted && field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                quoted = true;
            }
            (',', false) => fields.push(finish_field(&mut field, &mut quoted)),
            (c, false) if quoted && c.is_whitespace() => {}
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(LoadError::Malformed {
            line,
            reason: "unterminated quoted field".to_string(),
        });
    }
    fields.push(finish_field(&mut field, &mut quoted));
    Ok(fields)
}

fn finish_field(field: &mut String, quoted: &mut bool) -> String {
    let value = std::mem::take(field);
    if std::mem::take(quoted) {
        value
    } else {
        value.trim().to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
