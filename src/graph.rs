//! The authoritative directed graph.
//!
//! Nodes and edges live in ordered maps; an incidence index (node id -> incident edge keys)
//! is maintained alongside the edge map so cascading deletes and neighbour queries never scan
//! every edge. Every mutation bumps a monotonic version.

use crate::error::GraphError;
use crate::matrix::{AdjacencyMatrix, NO_EDGE};
use crate::model::{Edge, EdgeKey, Node, Vec2};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Clone, Debug, PartialEq)]
pub struct RemovedNode {
    pub node: Node,
    pub edges: Vec<EdgeKey>,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) nodes: BTreeMap<u32, Node>,
    pub(crate) edges: BTreeMap<EdgeKey, Edge>,
    pub(crate) incidence: HashMap<u32, BTreeSet<EdgeKey>>,
    /// One past the highest id ever handed out; `u64` so `u32::MAX` itself stays allocatable.
    pub(crate) next_id: u64,
    pub(crate) version: u64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    // Nodes
    /// Smallest free id at or above the counter. Once the counter has passed `u32::MAX`
    /// the smallest free id overall is reused.
    fn allocate_id(&self) -> u32 {
        let free = |id: &u32| !self.nodes.contains_key(id);
        let above = u32::try_from(self.next_id)
            .ok()
            .and_then(|start| (start..=u32::MAX).find(free));
        match above {
            Some(id) => id,
            None => (0..=u32::MAX).find(free).unwrap_or(u32::MAX),
        }
    }

    pub fn add_node(&mut self, position: Vec2, label: Option<String>, radius: u32) -> u32 {
        let id = self.allocate_id();
        let inserted = self.insert_node(id, position, label, radius);
        debug_assert!(inserted);
        id
    }

    /// Insert a node under a caller-chosen id. Returns false when the id is taken.
    pub fn insert_node(&mut self, id: u32, position: Vec2, label: Option<String>, radius: u32) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        let label = label.unwrap_or_else(|| id.to_string());
        self.nodes.insert(
            id,
            Node {
                id,
                label,
                position,
                radius,
            },
        );
        self.next_id = self.next_id.max(u64::from(id) + 1);
        self.bump();
        true
    }

    pub fn node(&self, id: u32) -> Option<&Node> {
        self.nodes.get(&id)
    }
    pub fn contains_node(&self, id: u32) -> bool {
        self.nodes.contains_key(&id)
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
    pub fn node_ids(&self) -> Vec<u32> {
        self.nodes.keys().copied().collect()
    }
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn remove_node(&mut self, id: u32) -> Option<RemovedNode> {
        if !self.nodes.contains_key(&id) {
            return None;
        }
        // Edges first so no edge ever refers to a missing node.
        let incident: Vec<EdgeKey> = self
            .incidence
            .get(&id)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        for key in &incident {
            self.remove_edge(key.source, key.dest);
        }
        self.incidence.remove(&id);
        let node = self.nodes.remove(&id)?;
        self.bump();
        Some(RemovedNode {
            node,
            edges: incident,
        })
    }

    pub fn set_node_label(&mut self, id: u32, label: impl Into<String>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(n) => {
                n.label = label.into();
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn set_node_position(&mut self, id: u32, position: Vec2) -> bool {
        if !position.is_finite() {
            return false;
        }
        match self.nodes.get_mut(&id) {
            Some(n) => {
                n.position = position;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn set_node_radius(&mut self, id: u32, radius: u32) -> bool {
        match self.nodes.get_mut(&id) {
            Some(n) => {
                n.radius = radius;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn set_all_radii(&mut self, radius: u32) {
        for n in self.nodes.values_mut() {
            n.radius = radius;
        }
        self.bump();
    }

    // Edges
    pub fn add_edge(
        &mut self,
        source: u32,
        dest: u32,
        weight: impl Into<String>,
    ) -> Result<EdgeKey, GraphError> {
        self.add_edge_with(source, dest, weight, true)
    }

    pub fn add_edge_with(
        &mut self,
        source: u32,
        dest: u32,
        weight: impl Into<String>,
        text_visible: bool,
    ) -> Result<EdgeKey, GraphError> {
        let key = EdgeKey::new(source, dest);
        for id in [source, dest] {
            if !self.nodes.contains_key(&id) {
                return Err(GraphError::MissingNode(id));
            }
        }
        if self.edges.contains_key(&key) {
            return Err(GraphError::DuplicateEdge(key));
        }
        self.edges.insert(
            key,
            Edge {
                key,
                weight: weight.into(),
                text_visible,
            },
        );
        self.incidence.entry(source).or_default().insert(key);
        self.incidence.entry(dest).or_default().insert(key);
        self.bump();
        Ok(key)
    }

    pub fn remove_edge(&mut self, source: u32, dest: u32) -> Option<Edge> {
        let key = EdgeKey::new(source, dest);
        let edge = self.edges.remove(&key)?;
        for id in [source, dest] {
            if let Some(set) = self.incidence.get_mut(&id) {
                set.remove(&key);
                if set.is_empty() {
                    self.incidence.remove(&id);
                }
            }
        }
        self.bump();
        Some(edge)
    }

    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(&key)
    }
    pub fn contains_edge(&self, source: u32, dest: u32) -> bool {
        self.edges.contains_key(&EdgeKey::new(source, dest))
    }
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    /// Edges in (source, dest) order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn set_edge_weight(&mut self, source: u32, dest: u32, weight: impl Into<String>) -> bool {
        match self.edges.get_mut(&EdgeKey::new(source, dest)) {
            Some(e) => {
                e.weight = weight.into();
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn set_text_visible_all(&mut self, visible: bool) {
        for e in self.edges.values_mut() {
            e.text_visible = visible;
        }
        self.bump();
    }

    /// True iff `key` is not a loop and its swapped twin exists.
    pub fn has_reverse_edge(&self, key: EdgeKey) -> bool {
        !key.is_loop() && self.edges.contains_key(&key.reversed())
    }

    pub fn incident_edges(&self, id: u32) -> Vec<EdgeKey> {
        self.incidence
            .get(&id)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn out_edges(&self, id: u32) -> Vec<&Edge> {
        self.incident_iter(id)
            .filter(|e| e.key.source == id)
            .collect()
    }

    pub fn in_edges(&self, id: u32) -> Vec<&Edge> {
        self.incident_iter(id)
            .filter(|e| e.key.dest == id)
            .collect()
    }

    fn incident_iter(&self, id: u32) -> impl Iterator<Item = &Edge> + '_ {
        self.incidence
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(move |k| self.edges.get(k))
    }

    /// Adjacency matrix over ascending node ids.
    pub fn to_matrix(&self) -> AdjacencyMatrix {
        let node_ids = self.node_ids();
        let n = node_ids.len();
        let index: HashMap<u32, usize> = node_ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let mut cells = vec![vec![NO_EDGE.to_string(); n]; n];
        for e in self.edges.values() {
            if let (Some(&i), Some(&j)) = (index.get(&e.key.source), index.get(&e.key.dest)) {
                cells[i][j] = e.weight.clone();
            }
        }
        AdjacencyMatrix { node_ids, cells }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.incidence.clear();
        self.next_id = 0;
        self.bump();
    }

    /// Checks every structural invariant; used by tests and debug assertions.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (key, e) in &self.edges {
            if e.key != *key {
                return Err(format!("edge stored under {} claims key {}", key, e.key));
            }
            for id in [key.source, key.dest] {
                if !self.nodes.contains_key(&id) {
                    return Err(format!("edge {} references missing node {}", key, id));
                }
                if !self.incidence.get(&id).is_some_and(|s| s.contains(key)) {
                    return Err(format!("incidence of {} is missing {}", id, key));
                }
            }
        }
        for (id, set) in &self.incidence {
            if !self.nodes.contains_key(id) {
                return Err(format!("incidence kept for missing node {}", id));
            }
            for key in set {
                if !self.edges.contains_key(key) || !key.touches(*id) {
                    return Err(format!("stale incidence {} on node {}", key, id));
                }
            }
        }
        for (id, n) in &self.nodes {
            if n.id != *id {
                return Err(format!("node stored under {} claims id {}", id, n.id));
            }
            if u64::from(*id) >= self.next_id {
                return Err(format!("node {} not below allocator counter {}", id, self.next_id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn ids_skip_taken_slots_and_do_not_reuse() {
        let mut g = Graph::new();
        assert!(g.insert_node(1, p(0.0, 0.0), None, 40));
        assert_eq!(g.add_node(p(0.0, 0.0), None, 40), 2);
        let mut g = Graph::new();
        let a = g.add_node(p(0.0, 0.0), None, 40);
        let b = g.add_node(p(0.0, 0.0), None, 40);
        assert_eq!((a, b), (0, 1));
        g.remove_node(a);
        assert_eq!(g.add_node(p(0.0, 0.0), None, 40), 2);
        g.clear();
        assert_eq!(g.add_node(p(0.0, 0.0), None, 40), 0);
    }

    #[test]
    fn label_defaults_to_id() {
        let mut g = Graph::new();
        let id = g.add_node(p(0.0, 0.0), None, 40);
        assert_eq!(g.node(id).map(|n| n.label.as_str()), Some("0"));
        let id = g.add_node(p(0.0, 0.0), Some("hub".into()), 40);
        assert_eq!(g.node(id).map(|n| n.label.as_str()), Some("hub"));
    }

    #[test]
    fn add_edge_validates_before_mutating() {
        let mut g = Graph::new();
        let a = g.add_node(p(0.0, 0.0), None, 40);
        let v = g.version();
        assert_eq!(g.add_edge(a, 9, "1"), Err(GraphError::MissingNode(9)));
        assert_eq!(g.version(), v);
        assert_eq!(g.edge_count(), 0);
        assert!(g.incident_edges(a).is_empty());
    }

    #[test]
    fn incidence_tracks_loops_once() {
        let mut g = Graph::new();
        let a = g.add_node(p(0.0, 0.0), None, 40);
        let k = g.add_edge(a, a, "x").expect("loop");
        assert_eq!(g.incident_edges(a), vec![k]);
        assert_eq!(g.out_edges(a).len(), 1);
        assert_eq!(g.in_edges(a).len(), 1);
        assert!(!g.has_reverse_edge(k));
        let removed = g.remove_node(a).expect("removed");
        assert_eq!(removed.edges, vec![k]);
        assert!(g.check_invariants().is_ok());
    }

    #[test]
    fn stale_mutations_are_noops() {
        let mut g = Graph::new();
        assert!(g.remove_node(4).is_none());
        assert!(g.remove_edge(1, 2).is_none());
        assert!(!g.set_node_label(4, "x"));
        assert!(!g.set_edge_weight(1, 2, "x"));
        assert_eq!(g.version(), 0);
    }

    #[test]
    fn non_finite_position_rejected() {
        let mut g = Graph::new();
        let a = g.add_node(p(1.0, 2.0), None, 40);
        assert!(!g.set_node_position(a, p(f32::NAN, 0.0)));
        assert_eq!(g.node(a).map(|n| n.position), Some(p(1.0, 2.0)));
    }
}
