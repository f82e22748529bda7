//! Adjacency matrix projection and its exports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};

/// Cell value for "no edge".
pub const NO_EDGE: &str = "0";

/// Square matrix keyed by ascending node ids; a cell holds the weight of the edge
/// `row -> col` or [`NO_EDGE`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    pub node_ids: Vec<u32>,
    pub cells: Vec<Vec<String>>,
}

/// JSON export shape: `{"nodes": [...], "matrix": [[...]]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatrixExport {
    pub nodes: Vec<String>,
    pub matrix: Vec<Vec<String>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub count: usize,
}

impl AdjacencyMatrix {
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }
    /// Cell for the edge `source -> dest` addressed by node id.
    pub fn get(&self, source: u32, dest: u32) -> Option<&str> {
        let i = self.node_ids.binary_search(&source).ok()?;
        let j = self.node_ids.binary_search(&dest).ok()?;
        self.cell(i, j)
    }

    /// Row/column headers: bare ids, or `id:label` when `labels` supplies a label.
    pub fn header_labels(&self, labels: Option<&HashMap<u32, String>>) -> Vec<String> {
        self.node_ids
            .iter()
            .map(|id| match labels.and_then(|m| m.get(id)) {
                Some(label) => format!("{}:{}", id, label),
                None => id.to_string(),
            })
            .collect()
    }

    /// Weights of every present edge, parsed leniently (see [`parse_weight`]).
    pub fn weights(&self) -> Vec<f64> {
        self.cells
            .iter()
            .flatten()
            .filter(|w| w.as_str() != NO_EDGE)
            .map(|w| parse_weight(w))
            .collect()
    }

    pub fn stats(&self) -> WeightStats {
        weight_stats(&self.weights())
    }

    pub fn export(&self, labels: Option<&HashMap<u32, String>>) -> MatrixExport {
        MatrixExport {
            nodes: self.header_labels(labels),
            matrix: self.cells.clone(),
        }
    }

    pub fn to_json_string(&self, labels: Option<&HashMap<u32, String>>) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.export(labels))
    }

    /// CSV with a comment line, a quoted header row and one quoted row header per line.
    /// Cells holding a separator or quote are quoted.
    pub fn write_csv<W: Write>(&self, mut out: W, labels: Option<&HashMap<u32, String>>) -> io::Result<()> {
        let headers = self.header_labels(labels);
        writeln!(
            out,
            "# Directed adjacency matrix (nodes: {}, edges: {})",
            self.len(),
            self.stats().count
        )?;
        let quoted: Vec<String> = headers.iter().map(|h| quote(h)).collect();
        writeln!(out, ",{}", quoted.join(","))?;
        for (i, row) in self.cells.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|c| csv_cell(c)).collect();
            writeln!(out, "{},{}", quoted[i], cells.join(","))?;
        }
        Ok(())
    }

    pub fn to_csv_string(&self, labels: Option<&HashMap<u32, String>>) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_csv(&mut buf, labels);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Weights go out bare unless they would break the row.
fn csv_cell(s: &str) -> String {
    if s.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        quote(s)
    } else {
        s.to_string()
    }
}

/// Weights are free-form strings; numeric ones (either decimal separator) parse as numbers,
/// anything else counts as 1.
pub fn parse_weight(w: &str) -> f64 {
    w.trim().replace(',', ".").parse::<f64>().unwrap_or(1.0)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

pub fn weight_stats(weights: &[f64]) -> WeightStats {
    if weights.is_empty() {
        return WeightStats::default();
    }
    let n = weights.len();
    let mean = weights.iter().sum::<f64>() / n as f64;
    let mut sorted = weights.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    // Most frequent value; ties go to the first one seen.
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &w in weights {
        match counts.iter_mut().find(|(v, _)| *v == w) {
            Some((_, c)) => *c += 1,
            None => counts.push((w, 1)),
        }
    }
    let mut mode = counts[0];
    for &(v, c) in &counts[1..] {
        if c > mode.1 {
            mode = (v, c);
        }
    }
    WeightStats {
        mean: round3(mean),
        median: round3(median),
        mode: round3(mode.0),
        count: n,
    }
}
