use grafo_wasm::Editor;
use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

#[wasm_bindgen_test]
fn invalid_ids_return_typed_errors() {
    let ed = Editor::new();
    let rev = ed.revision();
    assert!(is_err(&ed.move_node_res(12345, 0.0, 0.0), "invalid_id"));
    assert!(is_err(&ed.delete_node_res(12345), "invalid_id"));
    assert!(is_err(&ed.delete_edge_res(1, 2), "invalid_id"));
    assert!(is_err(&ed.set_node_label_res(3, "x".into()), "invalid_id"));
    assert!(is_err(&ed.set_edge_weight_res(0, 0, "1".into()), "invalid_id"));
    assert_eq!(ed.revision(), rev, "state mutated on error");
}

#[wasm_bindgen_test]
fn edge_errors_carry_codes() {
    let ed = Editor::new();
    let a = ed.create_node(0.0, 0.0);
    let b = ed.create_node(100.0, 0.0);
    assert!(is_err(&ed.create_edge_res(a, 99, "1".into()), "missing_node"));
    let first = ed.create_edge_res(a, b, "1".into());
    assert!(!is_err(&first, "duplicate_edge"));
    let dup = ed.create_edge_res(a, b, "2".into());
    assert!(is_err(&dup, "duplicate_edge"));
    let data = Reflect::get(&Reflect::get(&dup, &"error".into()).unwrap(), &"data".into()).unwrap();
    assert_eq!(Reflect::get(&data, &"source".into()).unwrap().as_f64(), Some(a as f64));
    assert_eq!(ed.edge_count(), 1);
}

#[wasm_bindgen_test]
fn non_finite_and_bad_input() {
    let ed = Editor::new();
    assert!(is_err(&ed.create_node_res(f32::NAN, 0.0, None, None), "non_finite"));
    assert!(is_err(&ed.create_node_res(0.0, f32::INFINITY, None, None), "non_finite"));
    assert!(is_err(&ed.pick_res(f32::NAN, 0.0), "non_finite"));
    let r = ed.move_node_res(0, 1.0, f32::NEG_INFINITY);
    let data = Reflect::get(&Reflect::get(&r, &"error".into()).unwrap(), &"data".into()).unwrap();
    assert_eq!(Reflect::get(&data, &"param".into()).unwrap().as_string().as_deref(), Some("y"));
    assert_eq!(ed.node_count(), 0);

    assert!(is_err(&ed.set_mode_res("paint"), "invalid_mode"));
    assert_eq!(ed.mode(), "move");
    assert!(!is_err(&ed.set_mode_res(" Edge "), "invalid_mode"));
    assert_eq!(ed.mode(), "connect");

    assert!(is_err(&ed.pointer_res(JsValue::from_str("click")), "invalid_event"));
    assert!(is_err(&ed.key_res(JsValue::from_str("undo")), "invalid_event"));
}

#[wasm_bindgen_test]
fn bad_documents_leave_the_editor_alone() {
    let ed = Editor::new();
    ed.create_node(0.0, 0.0);
    let before = ed.to_json();
    assert!(is_err(&ed.load_json_res("{\"nodes\": ["), "invalid_json"));
    assert!(is_err(&ed.load_json_res("42"), "malformed_document"));
    assert_eq!(ed.to_json(), before);
}

#[wasm_bindgen_test]
fn config_and_background_failures() {
    assert!(Editor::with_config("{\"min_radius\": 90, \"max_radius\": 10}").is_err());
    assert!(Editor::with_config("{}").is_ok());

    let ed = Editor::new();
    let notices = js_sys::Array::new();
    let sink = notices.clone();
    let notify = Closure::<dyn FnMut(JsValue)>::new(move |n: JsValue| {
        sink.push(&n);
    });
    ed.set_notifier(Some(notify.as_ref().unchecked_ref::<Function>().clone()));
    assert!(!ed.set_background("missing.png"));
    assert_eq!(notices.length(), 1);

    ed.set_image_loader(Some(Function::new_with_args(
        "path",
        "return { width: 640, height: 480 }",
    )));
    assert!(ed.set_background("floor.png"));
    let bounds = ed.bounds();
    assert_eq!(Reflect::get(&bounds, &"width".into()).unwrap().as_f64(), Some(640.0));
    assert!(ed.remove_background());
}
