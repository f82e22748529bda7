//! Persisted JSON document.
//!
//! Writing is strict serde. Reading is lenient: the root must be an object, but individual
//! node or edge records that are malformed, dangling or duplicated are skipped and counted
//! rather than failing the whole load.

use crate::error::DocumentError;
use crate::graph::Graph;
use crate::model::{Background, Vec2};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u32,
    pub label: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub a: u32,
    pub b: u32,
    pub weight: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_pos: Option<[f32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_scale: Option<f32>,
}

/// What a lenient load had to drop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes_loaded: usize,
    pub edges_loaded: usize,
    pub nodes_skipped: usize,
    pub edges_skipped: usize,
}

fn as_u32(v: Option<&Value>) -> Option<u32> {
    let v = v?;
    if let Some(n) = v.as_u64() {
        return u32::try_from(n).ok();
    }
    // Integral floats ("3.0") are accepted as ids.
    let f = v.as_f64()?;
    (f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64).then_some(f as u32)
}

fn as_f32(v: Option<&Value>) -> Option<f32> {
    v.and_then(Value::as_f64).map(|f| f as f32).filter(|f| f.is_finite())
}

fn as_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn node_record(obj: &Map<String, Value>) -> Option<NodeRecord> {
    let id = as_u32(obj.get("id"))?;
    Some(NodeRecord {
        id,
        label: as_text(obj.get("label")).unwrap_or_else(|| id.to_string()),
        x: as_f32(obj.get("x")).unwrap_or(0.0),
        y: as_f32(obj.get("y")).unwrap_or(0.0),
        radius: obj
            .get("radius")
            .and_then(Value::as_f64)
            .filter(|r| r.is_finite() && *r >= 1.0)
            .map(|r| r.round() as u32),
    })
}

fn edge_record(obj: &Map<String, Value>) -> Option<EdgeRecord> {
    Some(EdgeRecord {
        a: as_u32(obj.get("a"))?,
        b: as_u32(obj.get("b"))?,
        weight: as_text(obj.get("weight")).unwrap_or_default(),
    })
}

fn records<T>(
    root: &Map<String, Value>,
    field: &str,
    parse: fn(&Map<String, Value>) -> Option<T>,
) -> Result<(Vec<T>, usize), DocumentError> {
    let items = match root.get(field) {
        None | Some(Value::Null) => return Ok((Vec::new(), 0)),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(DocumentError::Malformed(format!("'{}' must be an array", field))),
    };
    let mut out = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for (i, item) in items.iter().enumerate() {
        match item.as_object().and_then(parse) {
            Some(r) => out.push(r),
            None => {
                warn!("skipping malformed {} record #{}", field, i);
                skipped += 1;
            }
        }
    }
    Ok((out, skipped))
}

impl Document {
    /// Lenient parse of an already decoded JSON value. Returns the document and the number of
    /// node and edge records dropped as malformed.
    pub fn from_value(v: &Value) -> Result<(Document, LoadReport), DocumentError> {
        let root = v
            .as_object()
            .ok_or_else(|| DocumentError::Malformed("root must be a JSON object".into()))?;
        let (nodes, nodes_skipped) = records(root, "nodes", node_record)?;
        let (edges, edges_skipped) = records(root, "edges", edge_record)?;
        let background = root
            .get("background")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let background_pos = root.get("background_pos").and_then(|p| {
            let arr = p.as_array()?;
            Some([as_f32(arr.first())?, as_f32(arr.get(1))?])
        });
        let background_scale = as_f32(root.get("background_scale"));
        let report = LoadReport {
            nodes_skipped,
            edges_skipped,
            ..LoadReport::default()
        };
        Ok((
            Document {
                nodes,
                edges,
                background,
                background_pos,
                background_scale,
            },
            report,
        ))
    }

    pub fn from_json_str(s: &str) -> Result<(Document, LoadReport), DocumentError> {
        let v: Value = serde_json::from_str(s)?;
        Self::from_value(&v)
    }

    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<(Document, LoadReport), DocumentError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        fs::write(path.as_ref(), self.to_json_string()?)?;
        Ok(())
    }

    /// Snapshot of `graph` (plus optional background metadata).
    pub fn from_graph(graph: &Graph, background: Option<&Background>) -> Document {
        Document {
            nodes: graph
                .nodes()
                .map(|n| NodeRecord {
                    id: n.id,
                    label: n.label.clone(),
                    x: n.position.x,
                    y: n.position.y,
                    radius: Some(n.radius),
                })
                .collect(),
            edges: graph
                .edges()
                .map(|e| EdgeRecord {
                    a: e.key.source,
                    b: e.key.dest,
                    weight: e.weight.clone(),
                })
                .collect(),
            background: background.map(|b| b.path.clone()),
            background_pos: background.map(|b| [b.position.x, b.position.y]),
            background_scale: background.map(|b| b.scale),
        }
    }

    /// Build a fresh graph. Nodes with a repeated id, and edges that dangle or repeat an
    /// ordered pair, are skipped. The id allocator continues after the largest id.
    pub fn to_graph(&self, default_radius: u32, text_visible: bool) -> (Graph, LoadReport) {
        let mut g = Graph::new();
        let mut report = LoadReport::default();
        for n in &self.nodes {
            let radius = n.radius.unwrap_or(default_radius);
            if g.insert_node(n.id, Vec2::new(n.x, n.y), Some(n.label.clone()), radius) {
                report.nodes_loaded += 1;
            } else {
                warn!("skipping node with repeated id {}", n.id);
                report.nodes_skipped += 1;
            }
        }
        for e in &self.edges {
            match g.add_edge_with(e.a, e.b, e.weight.clone(), text_visible) {
                Ok(_) => report.edges_loaded += 1,
                Err(err) => {
                    warn!("skipping edge {}->{}: {}", e.a, e.b, err);
                    report.edges_skipped += 1;
                }
            }
        }
        info!(
            "document loaded: {} nodes, {} edges ({} nodes / {} edges skipped)",
            report.nodes_loaded, report.edges_loaded, report.nodes_skipped, report.edges_skipped
        );
        (g, report)
    }
}

impl LoadReport {
    pub fn merge(self, other: LoadReport) -> LoadReport {
        LoadReport {
            nodes_loaded: self.nodes_loaded + other.nodes_loaded,
            edges_loaded: self.edges_loaded + other.edges_loaded,
            nodes_skipped: self.nodes_skipped + other.nodes_skipped,
            edges_skipped: self.edges_skipped + other.edges_skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_root() {
        assert!(matches!(
            Document::from_value(&json!([1, 2])),
            Err(DocumentError::Malformed(_))
        ));
        assert!(matches!(
            Document::from_value(&json!({"nodes": 3})),
            Err(DocumentError::Malformed(_))
        ));
        assert!(matches!(Document::from_json_str("{nope"), Err(DocumentError::Json(_))));
    }

    #[test]
    fn lenient_fields() {
        let (doc, report) = Document::from_value(&json!({
            "nodes": [
                {"id": 0},
                {"id": 3, "label": "c", "x": 1.5, "y": -2, "radius": 25},
                {"label": "no id"},
                "garbage"
            ],
            "edges": [
                {"a": 0, "b": 3, "weight": 7},
                {"a": 0},
                {"a": 3, "b": 0}
            ],
            "background": null
        }))
        .expect("doc");
        assert_eq!(report.nodes_skipped, 2);
        assert_eq!(report.edges_skipped, 1);
        assert_eq!(doc.nodes[0].label, "0");
        assert_eq!((doc.nodes[0].x, doc.nodes[0].y), (0.0, 0.0));
        assert_eq!(doc.nodes[0].radius, None);
        assert_eq!(doc.nodes[1].radius, Some(25));
        assert_eq!(doc.edges[0].weight, "7");
        assert_eq!(doc.edges[1].weight, "");
        assert_eq!(doc.background, None);
    }

    #[test]
    fn to_graph_skips_dangling_and_duplicate_edges() {
        let (doc, _) = Document::from_value(&json!({
            "nodes": [{"id": 0}, {"id": 5}, {"id": 5, "label": "again"}],
            "edges": [
                {"a": 0, "b": 5, "weight": "1"},
                {"a": 0, "b": 5, "weight": "2"},
                {"a": 0, "b": 9, "weight": "3"}
            ]
        }))
        .expect("doc");
        let (g, report) = doc.to_graph(40, true);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(report.nodes_skipped, 1);
        assert_eq!(report.edges_skipped, 2);
        assert_eq!(g.next_id(), 6);
        assert_eq!(g.node(0).map(|n| n.radius), Some(40));
        assert!(g.check_invariants().is_ok());
    }

    #[test]
    fn serialized_shape_matches_format() {
        let mut g = Graph::new();
        let a = g.add_node(Vec2::new(1.0, 2.0), Some("A".into()), 30);
        g.add_edge(a, a, "w").expect("loop");
        let v: Value = serde_json::from_str(&Document::from_graph(&g, None).to_json_string().expect("json"))
            .expect("parse");
        assert_eq!(v["nodes"][0], json!({"id": 0, "label": "A", "x": 1.0, "y": 2.0, "radius": 30}));
        assert_eq!(v["edges"][0], json!({"a": 0, "b": 0, "weight": "w"}));
        assert_eq!(v["background"], Value::Null);
        assert!(v.get("background_pos").is_none());
    }
}
