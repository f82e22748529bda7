//! Scene controller: the graph plus everything needed to draw and edit it.
//!
//! The scene owns the [`Graph`] and keeps a cache of edge geometry in step with it. Every
//! structural change (anything visible in the adjacency matrix) is announced once through the
//! [`Notifier`]; geometry-only changes such as moves and resizes only raise the modified flag.

use crate::config::SceneConfig;
use crate::document::{Document, LoadReport};
use crate::error::{DocumentError, GraphError};
use crate::geometry::path::{edge_path, EdgePath};
use crate::geometry::shape::NodeGeometry;
use crate::graph::Graph;
use crate::interaction::InteractionState;
use crate::matrix::AdjacencyMatrix;
use crate::model::{Background, EdgeKey, Rect, Shape, Vec2};
use crate::notify::{GraphChanged, Notifier, SubscriptionId};
use crate::shell::{Notice, Shell};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Multiplicative step of one zoom-in / zoom-out.
pub const ZOOM_STEP: f32 = 1.15;
/// Margin kept around the content when fitting the view.
pub const FIT_MARGIN: f32 = 50.0;

/// Scene-to-screen mapping: `screen = scene * zoom + pan`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform {
            pan: Vec2::default(),
            zoom: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        p * self.zoom + self.pan
    }
    pub fn to_scene(&self, p: Vec2) -> Vec2 {
        (p - self.pan) * (1.0 / self.zoom)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeGeometry {
    Node(NodeGeometry),
    Edge(EdgePath),
}

/// One row of the node info panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: u32,
    pub label: String,
    pub weight: String,
}

/// Summary of the focused node and its connections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: u32,
    pub label: String,
    pub outgoing: Vec<Neighbor>,
    pub incoming: Vec<Neighbor>,
}

impl fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node: {} ({})", self.id, self.label)?;
        for (title, arrow, rows) in [
            ("Outgoing", "->", &self.outgoing),
            ("Incoming", "<-", &self.incoming),
        ] {
            if rows.is_empty() {
                writeln!(f, "{}: (none)", title)?;
                continue;
            }
            writeln!(f, "{}:", title)?;
            for n in rows {
                writeln!(f, "  {} {} ({}) weight: {}", arrow, n.id, n.label, n.weight)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Scene {
    graph: Graph,
    config: SceneConfig,
    default_radius: u32,
    bounds: Rect,
    paths: HashMap<EdgeKey, EdgePath>,
    selection: BTreeSet<Shape>,
    focus: Option<u32>,
    background: Option<Background>,
    view: ViewTransform,
    weights_visible: bool,
    modified: bool,
    notifier: Notifier,
    pub(crate) interaction: InteractionState,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new(SceneConfig::default())
    }
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let default_radius = config.clamp_radius(config.node_radius);
        Scene {
            graph: Graph::new(),
            default_radius,
            bounds: config.bounds,
            paths: HashMap::new(),
            selection: BTreeSet::new(),
            focus: None,
            background: None,
            view: ViewTransform::default(),
            weights_visible: config.weights_visible,
            modified: false,
            notifier: Notifier::new(),
            interaction: InteractionState::default(),
            config,
        }
    }

    // Accessors
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
    /// Area nodes are confined to: the background image while one is set, else the
    /// configured bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
    pub fn default_radius(&self) -> u32 {
        self.default_radius
    }
    pub fn weights_visible(&self) -> bool {
        self.weights_visible
    }
    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }
    pub fn view(&self) -> ViewTransform {
        self.view
    }
    pub fn is_modified(&self) -> bool {
        self.modified
    }
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }
    /// Number of "graph changed" notifications delivered so far.
    pub fn revision(&self) -> u64 {
        self.notifier.revision()
    }

    // Notifications
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&GraphChanged) + 'static,
    {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn changed(&mut self) {
        self.modified = true;
        self.notifier.changed();
    }

    // Edge geometry cache
    fn repath(&mut self, key: EdgeKey) {
        let (Some(source), Some(dest)) = (self.graph.node(key.source), self.graph.node(key.dest)) else {
            self.paths.remove(&key);
            return;
        };
        if !self.graph.contains_edge(key.source, key.dest) {
            self.paths.remove(&key);
            return;
        }
        let reciprocal = self.graph.has_reverse_edge(key);
        let path = edge_path(source, dest, reciprocal, &self.config.path_style());
        self.paths.insert(key, path);
    }

    fn repath_incident(&mut self, id: u32) {
        for key in self.graph.incident_edges(id) {
            self.repath(key);
        }
    }

    fn repath_all(&mut self) {
        self.paths.clear();
        let keys: Vec<EdgeKey> = self.graph.edges().map(|e| e.key).collect();
        for key in keys {
            self.repath(key);
        }
    }

    pub fn edge_path(&self, key: EdgeKey) -> Option<&EdgePath> {
        self.paths.get(&key)
    }

    pub fn node_geometry(&self, id: u32) -> Option<NodeGeometry> {
        self.graph.node(id).map(NodeGeometry::of)
    }

    pub fn shape_geometry(&self, shape: Shape) -> Option<ShapeGeometry> {
        match shape {
            Shape::Node(id) => self.node_geometry(id).map(ShapeGeometry::Node),
            Shape::Edge(key) => self.paths.get(&key).copied().map(ShapeGeometry::Edge),
        }
    }

    /// Recompute the cached geometry of `shape` (for a node: of every incident edge).
    pub fn recompute(&mut self, shape: Shape) -> bool {
        match shape {
            Shape::Node(id) if self.graph.contains_node(id) => {
                self.repath_incident(id);
                true
            }
            Shape::Edge(key) if self.graph.contains_edge(key.source, key.dest) => {
                self.repath(key);
                true
            }
            _ => false,
        }
    }

    // Structural edits
    pub fn create_node(&mut self, position: Vec2, label: Option<String>, radius: Option<u32>) -> u32 {
        let radius = self.config.clamp_radius(radius.unwrap_or(self.default_radius));
        let position = self.bounds.clamp_inset(position, radius as f32);
        let id = self.graph.add_node(position, label, radius);
        debug!("created node {} at {}", id, position);
        self.changed();
        id
    }

    pub fn create_edge(
        &mut self,
        source: u32,
        dest: u32,
        weight: impl Into<String>,
    ) -> Result<EdgeKey, GraphError> {
        let key = self
            .graph
            .add_edge_with(source, dest, weight, self.weights_visible)?;
        self.repath(key);
        if self.graph.has_reverse_edge(key) {
            // The twin starts bowing now that the pair is reciprocal.
            self.repath(key.reversed());
        }
        debug!("created edge {}", key);
        self.changed();
        Ok(key)
    }

    pub fn delete_node(&mut self, id: u32) -> bool {
        let Some(removed) = self.graph.remove_node(id) else {
            return false;
        };
        for key in &removed.edges {
            self.paths.remove(key);
            self.selection.remove(&Shape::Edge(*key));
        }
        self.selection.remove(&Shape::Node(id));
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.interaction.forget_node(id);
        debug!("deleted node {} with {} edges", id, removed.edges.len());
        self.changed();
        true
    }

    pub fn delete_edge(&mut self, key: EdgeKey) -> bool {
        if self.graph.remove_edge(key.source, key.dest).is_none() {
            return false;
        }
        self.paths.remove(&key);
        self.selection.remove(&Shape::Edge(key));
        if self.graph.contains_edge(key.dest, key.source) {
            self.repath(key.reversed());
        }
        debug!("deleted edge {}", key);
        self.changed();
        true
    }

    pub fn set_node_label(&mut self, id: u32, label: impl Into<String>) -> bool {
        if !self.graph.set_node_label(id, label) {
            return false;
        }
        self.changed();
        true
    }

    pub fn set_edge_weight(&mut self, key: EdgeKey, weight: impl Into<String>) -> bool {
        if !self.graph.set_edge_weight(key.source, key.dest, weight) {
            return false;
        }
        self.changed();
        true
    }

    /// Move a node, keeping its whole circle inside the scene bounds. Returns the position
    /// actually applied.
    pub fn move_node(&mut self, id: u32, position: Vec2) -> Option<Vec2> {
        if !position.is_finite() {
            warn!("rejected non-finite position for node {}", id);
            return None;
        }
        let radius = self.graph.node(id)?.radius as f32;
        let clamped = self.bounds.clamp_inset(position, radius);
        if !self.graph.set_node_position(id, clamped) {
            return None;
        }
        self.repath_incident(id);
        self.modified = true;
        Some(clamped)
    }

    /// Set the radius of every node (and of future nodes). Returns the clamped radius.
    pub fn resize_all(&mut self, radius: u32) -> u32 {
        let radius = self.config.clamp_radius(radius);
        self.default_radius = radius;
        self.graph.set_all_radii(radius);
        // Bigger circles may now poke out of the scene.
        let moved: Vec<(u32, Vec2)> = self
            .graph
            .nodes()
            .filter_map(|n| {
                let p = self.bounds.clamp_inset(n.position, radius as f32);
                (p != n.position).then_some((n.id, p))
            })
            .collect();
        for (id, p) in moved {
            self.graph.set_node_position(id, p);
        }
        self.repath_all();
        self.modified = true;
        debug!("node radius set to {}", radius);
        radius
    }

    /// Step the default radius by `delta`; a step that clamps to the current value is a no-op.
    pub fn adjust_radius(&mut self, delta: i32) -> u32 {
        let target = (self.default_radius as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32;
        let target = self.config.clamp_radius(target);
        if target == self.default_radius {
            return target;
        }
        self.resize_all(target)
    }

    /// One `radius_step` up; the menu's "bigger nodes" action.
    pub fn grow_radius(&mut self) -> u32 {
        self.adjust_radius(self.config.radius_step as i32)
    }

    pub fn shrink_radius(&mut self) -> u32 {
        self.adjust_radius(-(self.config.radius_step as i32))
    }

    pub fn set_weights_visible(&mut self, visible: bool) {
        self.weights_visible = visible;
        self.graph.set_text_visible_all(visible);
    }

    // Selection
    pub fn selection(&self) -> impl Iterator<Item = Shape> + '_ {
        self.selection.iter().copied()
    }
    pub fn selected_nodes(&self) -> Vec<u32> {
        self.selection.iter().filter_map(Shape::as_node).collect()
    }
    pub fn is_selected(&self, shape: Shape) -> bool {
        self.selection.contains(&shape)
    }

    fn exists(&self, shape: Shape) -> bool {
        match shape {
            Shape::Node(id) => self.graph.contains_node(id),
            Shape::Edge(key) => self.graph.contains_edge(key.source, key.dest),
        }
    }

    /// Select `shape`, replacing the selection unless `additive`. Stale shapes are ignored.
    pub fn select(&mut self, shape: Shape, additive: bool) -> bool {
        if !self.exists(shape) {
            return false;
        }
        if !additive {
            self.selection.clear();
        }
        self.selection.insert(shape);
        if let Shape::Node(id) = shape {
            self.focus = Some(id);
        }
        true
    }

    pub fn deselect(&mut self, shape: Shape) -> bool {
        let removed = self.selection.remove(&shape);
        if removed && shape.as_node().is_some() && self.focus == shape.as_node() {
            self.focus = None;
        }
        removed
    }

    /// Selects every node; edges are left out.
    pub fn select_all(&mut self) {
        let ids = self.graph.node_ids();
        self.selection.extend(ids.into_iter().map(Shape::Node));
    }

    /// Select the nodes whose centre lies in `rect`. Returns how many matched.
    pub fn select_in_rect(&mut self, rect: Rect, additive: bool) -> usize {
        if !additive {
            self.selection.clear();
        }
        let hits: Vec<u32> = self
            .graph
            .nodes()
            .filter(|n| rect.contains(n.position))
            .map(|n| n.id)
            .collect();
        self.selection.extend(hits.iter().copied().map(Shape::Node));
        if let Some(&last) = hits.last() {
            self.focus = Some(last);
        }
        hits.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.focus = None;
    }

    /// Delete every selected shape, edges before nodes, with a single notification.
    /// Returns the number of shapes actually removed.
    pub fn delete_selected(&mut self) -> usize {
        let shapes: Vec<Shape> = self.selection.iter().copied().collect();
        self.notifier.begin_batch();
        let mut removed = 0;
        for key in shapes.iter().filter_map(Shape::as_edge) {
            if self.delete_edge(key) {
                removed += 1;
            }
        }
        for id in shapes.iter().filter_map(Shape::as_node) {
            if self.delete_node(id) {
                removed += 1;
            }
        }
        self.clear_selection();
        self.notifier.end_batch();
        removed
    }

    /// Connections of the most recently selected node, while it stays selected.
    pub fn info_panel(&self) -> Option<NodeInfo> {
        let id = self.focus?;
        if !self.selection.contains(&Shape::Node(id)) {
            return None;
        }
        let node = self.graph.node(id)?;
        let label_of = |peer: u32| {
            self.graph
                .node(peer)
                .map(|n| n.label.clone())
                .unwrap_or_else(|| peer.to_string())
        };
        let outgoing = self
            .graph
            .out_edges(id)
            .into_iter()
            .map(|e| Neighbor {
                id: e.key.dest,
                label: label_of(e.key.dest),
                weight: e.weight.clone(),
            })
            .collect();
        let incoming = self
            .graph
            .in_edges(id)
            .into_iter()
            .map(|e| Neighbor {
                id: e.key.source,
                label: label_of(e.key.source),
                weight: e.weight.clone(),
            })
            .collect();
        Some(NodeInfo {
            id,
            label: node.label.clone(),
            outgoing,
            incoming,
        })
    }

    /// Shape under `point`. Nodes win over edges; among overlapping nodes the one whose
    /// centre is nearest wins, ties going to the later (higher id, drawn on top) node.
    pub fn pick(&self, point: Vec2) -> Option<Shape> {
        let mut best_node: Option<(f32, u32)> = None;
        for n in self.graph.nodes() {
            let g = NodeGeometry::of(n);
            if !g.contains(point) {
                continue;
            }
            let d = g.center.distance_sq(point);
            if best_node.map_or(true, |(bd, _)| d <= bd) {
                best_node = Some((d, n.id));
            }
        }
        if let Some((_, id)) = best_node {
            return Some(Shape::Node(id));
        }
        let tol = self.config.edge_hit_tolerance;
        let mut best_edge: Option<(f32, EdgeKey)> = None;
        for (key, path) in &self.paths {
            let (d, _) = path.curve.distance_sq(point);
            if d <= tol * tol && best_edge.map_or(true, |(bd, bk)| d < bd || (d == bd && *key > bk)) {
                best_edge = Some((d, *key));
            }
        }
        best_edge.map(|(_, key)| Shape::Edge(key))
    }

    // Projection
    pub fn to_matrix(&self) -> AdjacencyMatrix {
        self.graph.to_matrix()
    }

    pub fn node_labels(&self) -> HashMap<u32, String> {
        self.graph.nodes().map(|n| (n.id, n.label.clone())).collect()
    }

    // Background
    /// Ask the shell for the image at `path` and adopt its size as the scene bounds. On
    /// failure a warning notice is posted and nothing changes.
    pub fn set_background(&mut self, path: &str, shell: &mut dyn Shell) -> bool {
        match shell.load_image(path) {
            Ok(size) if size.width > 0.0 && size.height > 0.0 => {
                self.bounds = Rect::new(0.0, 0.0, size.width, size.height);
                self.background = Some(Background {
                    path: path.to_string(),
                    position: Vec2::default(),
                    scale: 1.0,
                    size,
                });
                self.modified = true;
                info!("background '{}' set ({}x{})", path, size.width, size.height);
                true
            }
            Ok(size) => {
                shell.notify(Notice::warning(
                    "Background image",
                    format!("'{}' has an empty size {}x{}", path, size.width, size.height),
                ));
                false
            }
            Err(msg) => {
                warn!("background '{}' rejected: {}", path, msg);
                shell.notify(Notice::warning("Background image", msg));
                false
            }
        }
    }

    pub fn remove_background(&mut self) -> bool {
        if self.background.take().is_none() {
            return false;
        }
        self.bounds = self.config.bounds;
        self.modified = true;
        true
    }

    // View
    pub fn set_zoom(&mut self, zoom: f32) -> f32 {
        self.view.zoom = zoom.min(self.config.max_zoom).max(self.config.min_zoom);
        self.view.zoom
    }

    /// Scale the zoom by `factor` unless that would leave the configured range.
    pub fn zoom_by(&mut self, factor: f32) -> bool {
        let next = self.view.zoom * factor;
        if !next.is_finite() || next > self.config.max_zoom || next < self.config.min_zoom {
            return false;
        }
        self.view.zoom = next;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(1.0 / ZOOM_STEP)
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.view.pan = self.view.pan + delta;
        }
    }

    /// Union of every node circle and the background image, if any.
    pub fn content_bounds(&self) -> Option<Rect> {
        let nodes = self.graph.nodes().map(|n| NodeGeometry::of(n).bounds);
        let background = self
            .background
            .as_ref()
            .map(|b| Rect::new(b.position.x, b.position.y, b.size.width * b.scale, b.size.height * b.scale));
        nodes.chain(background).reduce(|acc, r| acc.union(&r))
    }

    /// Fit the content (plus a margin) into a `width` x `height` viewport; an empty scene is
    /// centred on the origin.
    pub fn fit_view(&mut self, width: f32, height: f32) {
        let viewport = Vec2::new(width * 0.5, height * 0.5);
        let Some(content) = self.content_bounds() else {
            self.view.pan = viewport;
            return;
        };
        let rect = content.padded(FIT_MARGIN);
        let zoom = (width / rect.width).min(height / rect.height);
        let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };
        self.set_zoom(zoom);
        self.view.pan = viewport - rect.center() * self.view.zoom;
    }

    // Documents
    pub fn to_document(&self) -> Document {
        Document::from_graph(&self.graph, self.background.as_ref())
    }

    /// Empty the scene. The background survives only when `keep_background` is set.
    pub fn clear(&mut self, keep_background: bool) {
        self.graph.clear();
        self.paths.clear();
        self.clear_selection();
        self.interaction.reset();
        if !keep_background {
            self.remove_background();
        }
        info!("scene cleared");
        self.changed();
    }

    /// Replace the whole scene with `doc`: one notification, modified flag cleared.
    pub fn load_document(&mut self, doc: &Document, shell: &mut dyn Shell) -> LoadReport {
        self.notifier.begin_batch();
        self.clear(false);
        let (graph, report) = doc.to_graph(self.default_radius, self.weights_visible);
        self.graph = graph;
        self.repath_all();
        if let Some(path) = doc.background.as_deref() {
            if self.set_background(path, shell) {
                if let Some(bg) = self.background.as_mut() {
                    if let Some([x, y]) = doc.background_pos {
                        bg.position = Vec2::new(x, y);
                    }
                    if let Some(scale) = doc.background_scale.filter(|s| *s > 0.0) {
                        bg.scale = scale;
                    }
                }
            }
        }
        self.changed();
        self.notifier.end_batch();
        self.modified = false;
        report
    }

    /// Parse then load; a document that fails to parse leaves the scene untouched.
    pub fn load_json_str(&mut self, s: &str, shell: &mut dyn Shell) -> Result<LoadReport, DocumentError> {
        let (doc, parsed) = Document::from_json_str(s)?;
        Ok(parsed.merge(self.load_document(&doc, shell)))
    }

    pub fn check_invariants(&self) -> Result<(), String> {
        self.graph.check_invariants()?;
        for key in self.paths.keys() {
            if !self.graph.contains_edge(key.source, key.dest) {
                return Err(format!("cached path for missing edge {}", key));
            }
        }
        if self.paths.len() != self.graph.edge_count() {
            return Err(format!(
                "{} cached paths for {} edges",
                self.paths.len(),
                self.graph.edge_count()
            ));
        }
        for shape in &self.selection {
            if !self.exists(*shape) {
                return Err(format!("stale selection {:?}", shape));
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
    fn reverse_edge_bows_and_straightens() {
        let mut s = Scene::default();
        let a = s.create_node(p(0.0, 0.0), None, None);
        let b = s.create_node(p(200.0, 0.0), None, None);
        let ab = s.create_edge(a, b, "1").expect("ab");
        assert!(!s.edge_path(ab).expect("path").is_curved());
        let ba = s.create_edge(b, a, "2").expect("ba");
        assert!(s.edge_path(ab).expect("path").is_curved());
        assert!(s.edge_path(ba).expect("path").is_curved());
        assert!(s.delete_edge(ba));
        assert!(!s.edge_path(ab).expect("path").is_curved());
        assert!(s.check_invariants().is_ok());
    }

    #[test]
    fn pick_prefers_nodes_then_edges() {
        let mut s = Scene::default();
        let a = s.create_node(p(0.0, 0.0), None, None);
        let b = s.create_node(p(300.0, 0.0), None, None);
        let k = s.create_edge(a, b, "1").expect("edge");
        assert_eq!(s.pick(p(5.0, 5.0)), Some(Shape::Node(a)));
        assert_eq!(s.pick(p(150.0, 3.0)), Some(Shape::Edge(k)));
        assert_eq!(s.pick(p(150.0, 50.0)), None);
    }

    #[test]
    fn zoom_steps_respect_range() {
        let mut s = Scene::default();
        let mut steps = 0;
        while s.zoom_in() {
            steps += 1;
        }
        assert!(steps > 0);
        assert!(s.view().zoom <= s.config().max_zoom);
        assert!(s.view().zoom * ZOOM_STEP > s.config().max_zoom);
        assert_eq!(s.set_zoom(0.0), s.config().min_zoom);
    }

    #[test]
    fn view_transform_inverts() {
        let v = ViewTransform {
            pan: p(10.0, -4.0),
            zoom: 2.0,
        };
        let q = v.to_scene(v.to_screen(p(3.0, 7.0)));
        assert!((q.x - 3.0).abs() < 1e-5 && (q.y - 7.0).abs() < 1e-5);
    }

    #[test]
    fn info_panel_text() {
        let mut s = Scene::default();
        let a = s.create_node(p(0.0, 0.0), Some("A".into()), None);
        let b = s.create_node(p(200.0, 0.0), Some("B".into()), None);
        s.create_edge(a, b, "5").expect("edge");
        assert!(s.select(Shape::Node(a), false));
        let text = s.info_panel().expect("info").to_string();
        assert_eq!(
            text,
            "Node: 0 (A)\nOutgoing:\n  -> 1 (B) weight: 5\nIncoming: (none)\n"
        );
    }

    #[test]
    fn fit_view_centres_content() {
        let mut s = Scene::default();
        s.create_node(p(100.0, 100.0), None, None);
        s.fit_view(800.0, 600.0);
        let c = s.view().to_screen(p(100.0, 100.0));
        assert!((c.x - 400.0).abs() < 1e-3 && (c.y - 300.0).abs() < 1e-3);
    }
}
