use crate::model::{Node, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Paint and hit geometry of a node circle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    pub center: Vec2,
    pub radius: f32,
    pub bounds: Rect,
}

impl NodeGeometry {
    pub fn of(node: &Node) -> Self {
        let r = node.radius as f32;
        NodeGeometry {
            center: node.position,
            radius: r,
            bounds: Rect::new(node.position.x - r, node.position.y - r, 2.0 * r, 2.0 * r),
        }
    }
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance_sq(p) <= self.radius * self.radius
    }
}

/// Top-left origin that centres a `width` x `height` text box on `anchor`.
pub fn centered_text_origin(anchor: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(anchor.x - width / 2.0, anchor.y - height / 2.0)
}

/// Backing box for an edge weight label: the centred text box grown by `padding`.
pub fn label_box(anchor: Vec2, width: f32, height: f32, padding: f32) -> Rect {
    let o = centered_text_origin(anchor, width, height);
    Rect::new(o.x, o.y, width.max(0.0), height.max(0.0)).padded(padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_bounds_and_hit() {
        let n = Node {
            id: 0,
            label: "0".into(),
            position: Vec2::new(100.0, 50.0),
            radius: 40,
        };
        let g = NodeGeometry::of(&n);
        assert_eq!(g.bounds, Rect::new(60.0, 10.0, 80.0, 80.0));
        assert!(g.contains(Vec2::new(139.0, 50.0)));
        assert!(!g.contains(Vec2::new(141.0, 50.0)));
    }

    #[test]
    fn text_is_centered() {
        let o = centered_text_origin(Vec2::new(10.0, 10.0), 20.0, 8.0);
        assert_eq!(o, Vec2::new(0.0, 6.0));
        let b = label_box(Vec2::new(10.0, 10.0), 20.0, 8.0, 4.0);
        assert_eq!(b, Rect::new(-4.0, 2.0, 28.0, 16.0));
    }
}
