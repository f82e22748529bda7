use grafo::{Graph, LoadReport};
use js_sys::{Float32Array, Object, Reflect, Uint32Array};
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object {
    Object::new()
}
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn set_num(obj: &Object, k: &str, n: impl Into<f64>) {
    set_kv(obj, k, &JsValue::from_f64(n.into()));
}

fn arr_u32(slice: &[u32]) -> Uint32Array {
    let arr = Uint32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice);
    arr
}
fn arr_f32(slice: &[f32]) -> Float32Array {
    let arr = Float32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice);
    arr
}

/// serde value -> JsValue, `null` when the value cannot be represented.
pub fn to_js<T: serde::Serialize + ?Sized>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

/// Node render buffers `{ids, positions, radii}`, ids ascending, positions as x,y pairs.
pub fn node_buffers(graph: &Graph) -> JsValue {
    let n = graph.node_count();
    let mut ids = Vec::with_capacity(n);
    let mut pos = Vec::with_capacity(n * 2);
    let mut radii = Vec::with_capacity(n);
    for node in graph.nodes() {
        ids.push(node.id);
        pos.extend_from_slice(&[node.position.x, node.position.y]);
        radii.push(node.radius);
    }
    let obj = new_obj();
    set_kv(&obj, "ids", &arr_u32(&ids).into());
    set_kv(&obj, "positions", &arr_f32(&pos).into());
    set_kv(&obj, "radii", &arr_u32(&radii).into());
    obj.into()
}

pub fn load_report(report: &LoadReport) -> JsValue {
    let o = new_obj();
    set_num(&o, "nodes_loaded", report.nodes_loaded as f64);
    set_num(&o, "edges_loaded", report.edges_loaded as f64);
    set_num(&o, "nodes_skipped", report.nodes_skipped as f64);
    set_num(&o, "edges_skipped", report.edges_skipped as f64);
    o.into()
}
