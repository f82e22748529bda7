use grafo_wasm::Editor;
use js_sys::{Float32Array, Function, Reflect, Uint32Array};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn value(v: &JsValue) -> JsValue {
    Reflect::get(v, &JsValue::from_str("value")).unwrap()
}

fn pointer(kind: &str, x: f32, y: f32) -> JsValue {
    let o = js_sys::Object::new();
    Reflect::set(&o, &"kind".into(), &kind.into()).unwrap();
    let pos = js_sys::Object::new();
    Reflect::set(&pos, &"x".into(), &JsValue::from_f64(x as f64)).unwrap();
    Reflect::set(&pos, &"y".into(), &JsValue::from_f64(y as f64)).unwrap();
    Reflect::set(&o, &"pos".into(), &pos).unwrap();
    o.into()
}

#[derive(Deserialize)]
struct MatrixOut {
    nodes: Vec<String>,
    matrix: Vec<Vec<String>>,
}

#[wasm_bindgen_test]
fn nodes_edges_and_render_data() {
    let ed = Editor::new();
    let a = ed.create_node(0.0, 0.0);
    let b = ed.create_node(200.0, 0.0);
    assert_eq!((a, b), (0, 1));
    assert_eq!(ed.node_count(), 2);

    let r = ed.create_edge_res(a, b, "5".into());
    assert_eq!(Reflect::get(&r, &"ok".into()).unwrap(), JsValue::TRUE);
    assert!(!ed.has_reverse_edge(a, b));

    let nd = ed.get_node_data();
    let ids = Uint32Array::new(&Reflect::get(&nd, &"ids".into()).unwrap());
    let pos = Float32Array::new(&Reflect::get(&nd, &"positions".into()).unwrap());
    let radii = Uint32Array::new(&Reflect::get(&nd, &"radii".into()).unwrap());
    assert_eq!(ids.to_vec(), vec![0, 1]);
    assert_eq!(pos.to_vec(), vec![0.0, 0.0, 200.0, 0.0]);
    assert_eq!(radii.length(), 2);

    let edges = js_sys::Array::from(&ed.get_edges());
    assert_eq!(edges.length(), 1);
    let path = Reflect::get(&edges.get(0), &"path".into()).unwrap();
    assert!(path.is_object());

    assert!(ed.delete_edge(a, b));
    assert_eq!(ed.edge_count(), 0);
    assert!(ed.delete_node(b));
    assert_eq!(ed.node_count(), 1);
}

#[wasm_bindgen_test]
fn pointer_events_drive_modes() {
    let ed = Editor::new();
    assert!(ed.set_mode("draw"));
    ed.pointer_res(pointer("press", 50.0, 50.0));
    ed.pointer_res(pointer("release", 50.0, 50.0));
    assert_eq!(ed.node_count(), 1);

    ed.pointer_res(pointer("press", 300.0, 50.0));
    ed.pointer_res(pointer("release", 300.0, 50.0));

    ed.set_weight_prompt(Some(Function::new_with_args("initial", "return '7'")));
    assert!(ed.set_mode("connect"));
    ed.pointer_res(pointer("press", 50.0, 50.0));
    assert_eq!(ed.pending_source(), Some(0));
    ed.pointer_res(pointer("press", 300.0, 50.0));
    assert_eq!(ed.pending_source(), None);
    assert_eq!(ed.edge_count(), 1);

    let m: MatrixOut = serde_wasm_bindgen::from_value(ed.to_matrix(false)).unwrap();
    assert_eq!(m.nodes, vec!["0", "1"]);
    assert_eq!(m.matrix[0][1], "7");
}

#[wasm_bindgen_test]
fn cancelled_prompt_creates_nothing() {
    let ed = Editor::new();
    ed.create_node(0.0, 0.0);
    ed.create_node(200.0, 0.0);
    ed.set_weight_prompt(Some(Function::new_with_args("initial", "return null")));
    ed.set_mode("connect");
    ed.pointer_res(pointer("press", 0.0, 0.0));
    ed.pointer_res(pointer("press", 200.0, 0.0));
    assert_eq!(ed.edge_count(), 0);
}

#[wasm_bindgen_test]
fn listeners_may_read_the_editor() {
    let ed = Rc::new(Editor::new());
    let seen: Rc<RefCell<Vec<u32>>> = Rc::default();
    let (e2, s2) = (ed.clone(), seen.clone());
    let cb = Closure::<dyn FnMut(JsValue)>::new(move |_rev: JsValue| {
        s2.borrow_mut().push(e2.node_count());
    });
    let id = ed.on_change(cb.as_ref().unchecked_ref::<Function>().clone());
    ed.create_node(0.0, 0.0);
    ed.create_node(100.0, 0.0);
    assert_eq!(*seen.borrow(), vec![1, 2]);

    ed.select_all();
    ed.delete_selected();
    assert_eq!(*seen.borrow(), vec![1, 2, 0]);

    assert!(ed.off_change(id));
    ed.create_node(0.0, 0.0);
    assert_eq!(seen.borrow().len(), 3);
    drop(cb);
}

#[wasm_bindgen_test]
fn documents_round_trip() {
    let ed = Editor::new();
    let a = ed.create_node(0.0, 0.0);
    let b = ed.create_node(120.0, 40.0);
    ed.set_node_label_res(a, "start".into());
    ed.create_edge_res(a, b, "3".into());
    ed.create_edge_res(b, a, "4".into());
    assert!(ed.is_modified());
    let json = ed.to_json();

    let other = Editor::new();
    let r = other.load_json_res(&json);
    let report = value(&r);
    assert_eq!(
        Reflect::get(&report, &"edges_loaded".into()).unwrap().as_f64(),
        Some(2.0)
    );
    assert!(!other.is_modified());
    assert_eq!(other.to_json(), json);
    assert!(other.has_reverse_edge(a, b));
    assert_eq!(ed.matrix_csv(true), other.matrix_csv(true));
}

#[wasm_bindgen_test]
fn info_panel_and_selection() {
    let ed = Editor::new();
    let a = ed.create_node(0.0, 0.0);
    let b = ed.create_node(200.0, 0.0);
    ed.set_node_label_res(b, "B".into());
    ed.create_edge_res(a, b, "5".into());
    assert!(ed.info_panel_text().is_none());
    assert!(ed.select_node(a, false));
    let text = ed.info_panel_text().unwrap();
    assert!(text.contains("-> 1 (B) weight: 5"));
    assert!(ed.select_edge(a, b, true));
    assert!(ed.info_panel_text().is_some());
    let sel = js_sys::Array::from(&ed.get_selection());
    assert_eq!(sel.length(), 2);
    assert!(ed.select_edge(a, b, false));
    assert!(ed.info_panel_text().is_none());
    ed.clear_selection();
    assert_eq!(js_sys::Array::from(&ed.get_selection()).length(), 0);
}

#[wasm_bindgen_test]
fn view_controls() {
    let ed = Editor::new();
    assert!(ed.zoom_in());
    let zoom = Reflect::get(&ed.get_view(), &"zoom".into()).unwrap().as_f64().unwrap();
    assert!((zoom - 1.15).abs() < 1e-5);
    assert!(ed.zoom_out());
    ed.create_node(0.0, 0.0);
    ed.fit_view(800.0, 600.0);
    let zoom = Reflect::get(&ed.get_view(), &"zoom".into()).unwrap().as_f64().unwrap();
    assert!(zoom > 0.0);
}

#[wasm_bindgen_test]
fn radius_steps() {
    let ed = Editor::new();
    let a = ed.create_node(0.0, 0.0);
    assert_eq!(ed.grow_radius(), 45);
    assert_eq!(ed.shrink_radius(), 40);
    let radii = Uint32Array::new(&Reflect::get(&ed.get_node_data(), &"radii".into()).unwrap());
    assert_eq!(radii.to_vec(), vec![40]);
    assert!(ed.delete_node(a));
}
