use grafo::{EdgeKey, Scene, Shape, Vec2};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    AddNode { x: i16, y: i16 },
    MoveNode { idx: u16, dx: i16, dy: i16 },
    RemoveNode { idx: u16 },
    AddEdge { a: u16, b: u16, w: u8 },
    RemoveEdge { idx: u16 },
    Select { idx: u16, additive: bool },
    DeleteSelected,
    Resize { r: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::AddNode { x, y }),
        (any::<u16>(), any::<i16>(), any::<i16>()).prop_map(|(idx, dx, dy)| Op::MoveNode {
            idx,
            dx,
            dy,
        }),
        any::<u16>().prop_map(|idx| Op::RemoveNode { idx }),
        (any::<u16>(), any::<u16>(), any::<u8>()).prop_map(|(a, b, w)| Op::AddEdge { a, b, w }),
        any::<u16>().prop_map(|idx| Op::RemoveEdge { idx }),
        (any::<u16>(), any::<bool>()).prop_map(|(idx, additive)| Op::Select { idx, additive }),
        Just(Op::DeleteSelected),
        any::<u8>().prop_map(|r| Op::Resize { r }),
    ]
}

fn pick<T: Copy>(items: &[T], idx: u16) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[(idx as usize) % items.len()])
}

fn apply_op(scene: &mut Scene, op: Op) {
    let nodes = scene.graph().node_ids();
    let edges: Vec<EdgeKey> = scene.graph().edges().map(|e| e.key).collect();
    match op {
        Op::AddNode { x, y } => {
            let _ = scene.create_node(Vec2::new(x as f32 * 0.5, y as f32 * 0.5), None, None);
        }
        Op::MoveNode { idx, dx, dy } => {
            if let Some(id) = pick(&nodes, idx) {
                let cur = scene.graph().node(id).map(|n| n.position).unwrap_or_default();
                let _ = scene.move_node(id, cur + Vec2::new(dx as f32, dy as f32));
            }
        }
        Op::RemoveNode { idx } => {
            if let Some(id) = pick(&nodes, idx) {
                let _ = scene.delete_node(id);
            }
        }
        Op::AddEdge { a, b, w } => {
            if let (Some(a), Some(b)) = (pick(&nodes, a), pick(&nodes, b)) {
                let _ = scene.create_edge(a, b, (w as u16 + 1).to_string());
            }
        }
        Op::RemoveEdge { idx } => {
            if let Some(key) = pick(&edges, idx) {
                let _ = scene.delete_edge(key);
            }
        }
        Op::Select { idx, additive } => {
            // Even indices pick nodes, odd ones edges.
            let shape = if idx % 2 == 0 {
                pick(&nodes, idx / 2).map(Shape::Node)
            } else {
                pick(&edges, idx / 2).map(Shape::Edge)
            };
            if let Some(shape) = shape {
                let _ = scene.select(shape, additive);
            }
        }
        Op::DeleteSelected => {
            let _ = scene.delete_selected();
        }
        Op::Resize { r } => {
            let _ = scene.resize_all(r as u32);
        }
    }
}

fn assert_invariants(scene: &Scene) {
    if let Err(msg) = scene.check_invariants() {
        panic!("invariant violated: {}", msg);
    }
    let bounds = scene.bounds();
    for n in scene.graph().nodes() {
        let r = n.radius as f32;
        assert!(n.position.x >= bounds.left() + r - 1e-3, "node {} left of bounds", n.id);
        assert!(n.position.x <= bounds.right() - r + 1e-3, "node {} right of bounds", n.id);
        assert!(n.position.y >= bounds.top() + r - 1e-3, "node {} above bounds", n.id);
        assert!(n.position.y <= bounds.bottom() - r + 1e-3, "node {} below bounds", n.id);
    }
    let m = scene.to_matrix();
    assert_eq!(m.len(), scene.graph().node_count());
    let present = m.cells.iter().flatten().filter(|c| c.as_str() != "0").count();
    // Weights are never "0" here, so every edge shows up as a non-"0" cell.
    assert_eq!(present, scene.graph().edge_count());
    for e in scene.graph().edges() {
        let path = scene.edge_path(e.key).expect("cached path");
        let reciprocal = scene.graph().has_reverse_edge(e.key);
        let p1 = scene.graph().node(e.key.source).map(|n| n.position);
        let p2 = scene.graph().node(e.key.dest).map(|n| n.position);
        // Coincident centres fall back to a degenerate straight path.
        if !e.key.is_loop() && p1 != p2 {
            assert_eq!(path.is_curved(), reciprocal, "curvature of {}", e.key);
        }
    }
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 5..40)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]
    #[test]
    fn scene_edit_invariants(seq in sequence_strategy()) {
        let mut scene = Scene::default();
        for op in seq {
            apply_op(&mut scene, op);
        }
        assert_invariants(&scene);
    }
}

// Long-running soak; enable with: cargo test --features long-persist
#[test]
#[cfg_attr(not(feature = "long-persist"), ignore)]
fn long_random_session_keeps_invariants() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    });
    let strategy = prop::collection::vec(op_strategy(), 500..1500);
    runner
        .run(&strategy, |seq| {
            let mut scene = Scene::default();
            for op in seq {
                apply_op(&mut scene, op);
                scene.check_invariants().map_err(TestCaseError::fail)?;
            }
            assert_invariants(&scene);
            Ok(())
        })
        .expect("soak run");
}
