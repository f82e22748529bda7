use crate::interop::{new_obj, set_kv, set_num};
use grafo::{DocumentError, EdgeKey, GraphError, ParseModeError, Vec2};
use js_sys::Object;
use wasm_bindgen::prelude::*;

fn envelope(ok: bool, key: &str, payload: &JsValue) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(ok));
    set_kv(&root, key, payload);
    root.into()
}

/// `{ok: true, value}`.
pub fn ok(v: JsValue) -> JsValue {
    envelope(true, "value", &v)
}

/// `{ok: false, error: {code, message, data?}}`; `code` is one of the stable core codes.
pub fn fail(code: &'static str, message: impl Into<String>, data: Option<Object>) -> JsValue {
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data {
        set_kv(&e, "data", &d.into());
    }
    envelope(false, "error", &e.into())
}

fn edge_data(key: EdgeKey) -> Object {
    let d = new_obj();
    set_num(&d, "source", key.source);
    set_num(&d, "dest", key.dest);
    d
}

/// Scene coordinates from JS; the error names the first non-finite component.
pub fn scene_point(x: f32, y: f32) -> Result<Vec2, JsValue> {
    for (param, v) in [("x", x), ("y", y)] {
        if !v.is_finite() {
            let d = new_obj();
            set_kv(&d, "param", &JsValue::from_str(param));
            return Err(fail("non_finite", format!("coordinate '{}' must be finite", param), Some(d)));
        }
    }
    Ok(Vec2::new(x, y))
}

pub fn unknown_node(id: u32) -> JsValue {
    let d = new_obj();
    set_num(&d, "id", id);
    fail("invalid_id", format!("no node {}", id), Some(d))
}

pub fn unknown_edge(key: EdgeKey) -> JsValue {
    fail("invalid_id", format!("no edge {}", key), Some(edge_data(key)))
}

pub fn invalid_mode(e: &ParseModeError) -> JsValue {
    let d = new_obj();
    set_kv(&d, "got", &JsValue::from_str(&e.0));
    fail("invalid_mode", e.to_string(), Some(d))
}

pub fn invalid_event(message: impl Into<String>) -> JsValue {
    fail("invalid_event", message, None)
}

pub fn graph(e: &GraphError) -> JsValue {
    let data = match e {
        GraphError::DuplicateEdge(key) => edge_data(*key),
        GraphError::MissingNode(id) => {
            let d = new_obj();
            set_num(&d, "id", *id);
            d
        }
    };
    fail(e.code(), e.to_string(), Some(data))
}

pub fn document(e: &DocumentError) -> JsValue {
    fail(e.code(), e.to_string(), None)
}
