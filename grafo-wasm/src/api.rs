use crate::interop::{load_report, node_buffers, to_js};
use crate::{error, Editor};
use grafo::{EdgeKey, KeyCommand, Mode, PointerEvent, Rect, SceneConfig, Shape, Vec2};
use js_sys::Function;
use log::Level;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console and install the panic hook.
#[wasm_bindgen]
pub fn init() {
    set_panic_hook();
    if console_log::init_with_level(Level::Debug).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("grafo: logger already initialised"));
    }
}

#[derive(Serialize)]
struct EdgeView<'a> {
    source: u32,
    dest: u32,
    weight: &'a str,
    text_visible: bool,
    path: Option<&'a grafo::EdgePath>,
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        Editor::rs_new(SceneConfig::default())
    }

    /// Editor with a partial JSON configuration; unknown keys keep their defaults.
    pub fn with_config(json: &str) -> Result<Editor, JsValue> {
        match SceneConfig::from_json_str(json) {
            Ok(cfg) => Ok(Editor::rs_new(cfg)),
            Err(e) => Err(error::fail("invalid_config", e.to_string(), None)),
        }
    }

    pub fn config(&self) -> JsValue {
        to_js(self.scene.borrow().config())
    }

    // Host callbacks
    pub fn set_weight_prompt(&self, f: Option<Function>) {
        self.shell.borrow_mut().weight_prompt = f;
    }
    pub fn set_label_prompt(&self, f: Option<Function>) {
        self.shell.borrow_mut().label_prompt = f;
    }
    pub fn set_notifier(&self, f: Option<Function>) {
        self.shell.borrow_mut().notifier = f;
    }
    pub fn set_image_loader(&self, f: Option<Function>) {
        self.shell.borrow_mut().image_loader = f;
    }

    /// Register a "graph changed" listener; it receives the new revision number.
    pub fn on_change(&self, f: Function) -> u32 {
        self.add_listener(f)
    }
    pub fn off_change(&self, id: u32) -> bool {
        self.remove_listener(id)
    }
    pub fn revision(&self) -> u64 {
        self.scene.borrow().revision()
    }
    pub fn is_modified(&self) -> bool {
        self.scene.borrow().is_modified()
    }
    pub fn mark_saved(&self) {
        self.scene.borrow_mut().mark_saved();
    }

    // Modes and input
    pub fn mode(&self) -> String {
        self.scene.borrow().mode().to_string()
    }
    pub fn set_mode(&self, mode: &str) -> bool {
        match mode.parse::<Mode>() {
            Ok(m) => {
                self.scene.borrow_mut().set_mode(m);
                true
            }
            Err(_) => false,
        }
    }
    pub fn set_mode_res(&self, mode: &str) -> JsValue {
        match mode.parse::<Mode>() {
            Ok(m) => {
                self.scene.borrow_mut().set_mode(m);
                error::ok(JsValue::from_str(m.as_str()))
            }
            Err(e) => error::invalid_mode(&e),
        }
    }
    /// Feed a pointer event `{kind, button?, pos: {x, y}, screen?, additive?}`.
    pub fn pointer_res(&self, event: JsValue) -> JsValue {
        let ev: PointerEvent = match serde_wasm_bindgen::from_value(event) {
            Ok(ev) => ev,
            Err(e) => return error::invalid_event(e.to_string()),
        };
        if let Err(e) = error::scene_point(ev.pos.x, ev.pos.y) {
            return e;
        }
        self.with_shell(|scene, shell| scene.handle_pointer(&ev, shell));
        error::ok(JsValue::UNDEFINED)
    }
    /// `"delete_selected" | "select_all" | "clear_selection"`.
    pub fn key_res(&self, command: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<KeyCommand>(command) {
            Ok(cmd) => {
                self.mutate(|scene| scene.handle_key(cmd));
                error::ok(JsValue::UNDEFINED)
            }
            Err(e) => error::invalid_event(e.to_string()),
        }
    }
    pub fn pending_source(&self) -> Option<u32> {
        self.scene.borrow().pending_source()
    }
    pub fn preview_line(&self) -> JsValue {
        to_js(&self.scene.borrow().preview_line())
    }
    pub fn rubber_band(&self) -> JsValue {
        to_js(&self.scene.borrow().rubber_band())
    }
    pub fn hovered(&self) -> JsValue {
        to_js(&self.scene.borrow().hovered())
    }

    // Nodes
    pub fn create_node(&self, x: f32, y: f32) -> u32 {
        self.mutate(|scene| scene.create_node(Vec2::new(x, y), None, None))
    }
    pub fn create_node_res(&self, x: f32, y: f32, label: Option<String>, radius: Option<u32>) -> JsValue {
        let pos = match error::scene_point(x, y) {
            Ok(pos) => pos,
            Err(e) => return e,
        };
        let id = self.mutate(|scene| scene.create_node(pos, label, radius));
        error::ok(JsValue::from_f64(id as f64))
    }
    pub fn delete_node(&self, id: u32) -> bool {
        self.mutate(|scene| scene.delete_node(id))
    }
    pub fn delete_node_res(&self, id: u32) -> JsValue {
        if !self.scene.borrow().graph().contains_node(id) {
            return error::unknown_node(id);
        }
        error::ok(JsValue::from_bool(self.delete_node(id)))
    }
    /// Move a node; the value is the clamped position actually applied.
    pub fn move_node_res(&self, id: u32, x: f32, y: f32) -> JsValue {
        let pos = match error::scene_point(x, y) {
            Ok(pos) => pos,
            Err(e) => return e,
        };
        match self.mutate(|scene| scene.move_node(id, pos)) {
            Some(p) => error::ok(to_js(&[p.x, p.y])),
            None => error::unknown_node(id),
        }
    }
    pub fn set_node_label_res(&self, id: u32, label: String) -> JsValue {
        if self.mutate(|scene| scene.set_node_label(id, label)) {
            error::ok(JsValue::TRUE)
        } else {
            error::unknown_node(id)
        }
    }
    pub fn get_node(&self, id: u32) -> JsValue {
        to_js(&self.scene.borrow().graph().node(id))
    }
    pub fn node_count(&self) -> u32 {
        self.scene.borrow().graph().node_count() as u32
    }
    /// `{ids, positions, radii}` as typed arrays, ids ascending.
    pub fn get_node_data(&self) -> JsValue {
        node_buffers(self.scene.borrow().graph())
    }

    // Edges
    pub fn create_edge_res(&self, source: u32, dest: u32, weight: String) -> JsValue {
        match self.mutate(|scene| scene.create_edge(source, dest, weight)) {
            Ok(key) => error::ok(to_js(&key)),
            Err(e) => error::graph(&e),
        }
    }
    pub fn delete_edge(&self, source: u32, dest: u32) -> bool {
        self.mutate(|scene| scene.delete_edge(EdgeKey::new(source, dest)))
    }
    pub fn delete_edge_res(&self, source: u32, dest: u32) -> JsValue {
        if self.delete_edge(source, dest) {
            error::ok(JsValue::TRUE)
        } else {
            error::unknown_edge(EdgeKey::new(source, dest))
        }
    }
    pub fn set_edge_weight_res(&self, source: u32, dest: u32, weight: String) -> JsValue {
        if self.mutate(|scene| scene.set_edge_weight(EdgeKey::new(source, dest), weight)) {
            error::ok(JsValue::TRUE)
        } else {
            error::unknown_edge(EdgeKey::new(source, dest))
        }
    }
    pub fn has_reverse_edge(&self, source: u32, dest: u32) -> bool {
        self.scene.borrow().graph().has_reverse_edge(EdgeKey::new(source, dest))
    }
    pub fn edge_count(&self) -> u32 {
        self.scene.borrow().graph().edge_count() as u32
    }
    /// Every edge with its weight and cached path, in (source, dest) order.
    pub fn get_edges(&self) -> JsValue {
        let scene = self.scene.borrow();
        let views: Vec<EdgeView> = scene
            .graph()
            .edges()
            .map(|e| EdgeView {
                source: e.key.source,
                dest: e.key.dest,
                weight: &e.weight,
                text_visible: e.text_visible,
                path: scene.edge_path(e.key),
            })
            .collect();
        to_js(&views)
    }

    // Appearance
    pub fn resize_all(&self, radius: u32) -> u32 {
        self.mutate(|scene| scene.resize_all(radius))
    }
    pub fn adjust_radius(&self, delta: i32) -> u32 {
        self.mutate(|scene| scene.adjust_radius(delta))
    }
    pub fn grow_radius(&self) -> u32 {
        self.mutate(|scene| scene.grow_radius())
    }
    pub fn shrink_radius(&self) -> u32 {
        self.mutate(|scene| scene.shrink_radius())
    }
    pub fn default_radius(&self) -> u32 {
        self.scene.borrow().default_radius()
    }
    pub fn set_weights_visible(&self, visible: bool) {
        self.mutate(|scene| scene.set_weights_visible(visible));
    }

    // Selection
    pub fn select_node(&self, id: u32, additive: bool) -> bool {
        self.scene.borrow_mut().select(Shape::Node(id), additive)
    }
    pub fn select_edge(&self, source: u32, dest: u32, additive: bool) -> bool {
        self.scene
            .borrow_mut()
            .select(Shape::Edge(EdgeKey::new(source, dest)), additive)
    }
    pub fn select_all(&self) {
        self.scene.borrow_mut().select_all();
    }
    pub fn select_in_rect(&self, x: f32, y: f32, width: f32, height: f32, additive: bool) -> u32 {
        self.scene
            .borrow_mut()
            .select_in_rect(Rect::new(x, y, width, height), additive) as u32
    }
    pub fn clear_selection(&self) {
        self.scene.borrow_mut().clear_selection();
    }
    pub fn delete_selected(&self) -> u32 {
        self.mutate(|scene| scene.delete_selected()) as u32
    }
    pub fn get_selection(&self) -> JsValue {
        let shapes: Vec<Shape> = self.scene.borrow().selection().collect();
        to_js(&shapes)
    }
    pub fn info_panel(&self) -> JsValue {
        to_js(&self.scene.borrow().info_panel())
    }
    pub fn info_panel_text(&self) -> Option<String> {
        self.scene.borrow().info_panel().map(|info| info.to_string())
    }
    pub fn pick_res(&self, x: f32, y: f32) -> JsValue {
        let pos = match error::scene_point(x, y) {
            Ok(pos) => pos,
            Err(e) => return e,
        };
        error::ok(to_js(&self.scene.borrow().pick(pos)))
    }

    // Matrix
    /// `{nodes, matrix}`; headers become `id:label` when `labels` is set.
    pub fn to_matrix(&self, labels: bool) -> JsValue {
        let scene = self.scene.borrow();
        let names = labels.then(|| scene.node_labels());
        to_js(&scene.to_matrix().export(names.as_ref()))
    }
    pub fn matrix_csv(&self, labels: bool) -> String {
        let scene = self.scene.borrow();
        let names = labels.then(|| scene.node_labels());
        scene.to_matrix().to_csv_string(names.as_ref())
    }
    pub fn matrix_stats(&self) -> JsValue {
        to_js(&self.scene.borrow().to_matrix().stats())
    }

    // Documents
    pub fn to_json(&self) -> String {
        match self.scene.borrow().to_document().to_json_string() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("serialising document failed: {}", e);
                String::new()
            }
        }
    }
    /// Replace the scene with a JSON document; the value is the load report.
    pub fn load_json_res(&self, text: &str) -> JsValue {
        match self.with_shell(|scene, shell| scene.load_json_str(text, shell)) {
            Ok(report) => error::ok(load_report(&report)),
            Err(e) => error::document(&e),
        }
    }
    pub fn clear(&self, keep_background: bool) {
        self.mutate(|scene| scene.clear(keep_background));
    }

    // Background and view
    pub fn set_background(&self, path: &str) -> bool {
        self.with_shell(|scene, shell| scene.set_background(path, shell))
    }
    pub fn remove_background(&self) -> bool {
        self.scene.borrow_mut().remove_background()
    }
    pub fn get_background(&self) -> JsValue {
        to_js(&self.scene.borrow().background())
    }
    pub fn bounds(&self) -> JsValue {
        to_js(&self.scene.borrow().bounds())
    }
    pub fn zoom_in(&self) -> bool {
        self.scene.borrow_mut().zoom_in()
    }
    pub fn zoom_out(&self) -> bool {
        self.scene.borrow_mut().zoom_out()
    }
    pub fn pan_by(&self, dx: f32, dy: f32) {
        self.scene.borrow_mut().pan_by(Vec2::new(dx, dy));
    }
    pub fn fit_view(&self, width: f32, height: f32) {
        self.scene.borrow_mut().fit_view(width, height);
    }
    pub fn get_view(&self) -> JsValue {
        to_js(&self.scene.borrow().view())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}
