//! Edge path construction: straight links, bowed reciprocal pairs and self-loops.
//!
//! Every function here is pure. Inputs come from node centres/radii and a [`PathStyle`];
//! degenerate inputs yield a defined fallback path rather than an error.

use super::intersect::circle_segment;
use super::math::{quad_distance_sq, quad_point, seg_distance_sq};
use super::tolerance::{norm2, EPS_LEN};
use crate::model::{Node, Vec2};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Tunables for edge paths, derived from the scene configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub arrow_size: f32,
    pub loop_angle_deg: f32,
    pub loop_height_factor: f32,
    pub loop_label_gap: f32,
    pub reciprocal_offset: f32,
}

impl Default for PathStyle {
    fn default() -> Self {
        PathStyle {
            arrow_size: 20.0,
            loop_angle_deg: 35.0,
            loop_height_factor: 1.6,
            loop_label_gap: 15.0,
            reciprocal_offset: 30.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EdgeCurve {
    Line { from: Vec2, to: Vec2 },
    Quad { from: Vec2, ctrl: Vec2, to: Vec2 },
}

impl EdgeCurve {
    pub fn start(&self) -> Vec2 {
        match *self {
            EdgeCurve::Line { from, .. } | EdgeCurve::Quad { from, .. } => from,
        }
    }
    pub fn end(&self) -> Vec2 {
        match *self {
            EdgeCurve::Line { to, .. } | EdgeCurve::Quad { to, .. } => to,
        }
    }
    pub fn point_at(&self, t: f32) -> Vec2 {
        match *self {
            EdgeCurve::Line { from, to } => from.lerp(to, t),
            EdgeCurve::Quad { from, ctrl, to } => quad_point(t, from, ctrl, to),
        }
    }
    /// Squared distance from `p` to the curve and the curve parameter of the closest point.
    pub fn distance_sq(&self, p: Vec2) -> (f32, f32) {
        match *self {
            EdgeCurve::Line { from, to } => seg_distance_sq(p, from, to),
            EdgeCurve::Quad { from, ctrl, to } => quad_distance_sq(p, from, ctrl, to),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgePath {
    pub curve: EdgeCurve,
    /// Tip first, then the two wings. `None` means no arrowhead is drawn.
    pub arrow: Option<[Vec2; 3]>,
    pub label_anchor: Vec2,
}

impl EdgePath {
    pub fn is_curved(&self) -> bool {
        matches!(self.curve, EdgeCurve::Quad { .. })
    }
}

/// Arrowhead triangle at `tip`, pointing along `dir_from -> tip`.
pub fn arrow_head(tip: Vec2, dir_from: Vec2, size: f32) -> Option<[Vec2; 3]> {
    let dx = tip.x - dir_from.x;
    let dy = tip.y - dir_from.y;
    if (dx * dx + dy * dy).sqrt() <= EPS_LEN {
        return None;
    }
    // Screen y grows downwards, so angles are taken on the flipped axis.
    let angle = (-dy).atan2(dx);
    let back = angle + PI;
    let spread = PI / 6.0;
    let wing = |a: f32| Vec2::new(tip.x + a.cos() * size, tip.y - a.sin() * size);
    Some([tip, wing(back - spread), wing(back + spread)])
}

pub fn loop_path(center: Vec2, radius: f32, style: &PathStyle) -> EdgePath {
    let start_a = (90.0 + style.loop_angle_deg).to_radians();
    let end_a = (90.0 - style.loop_angle_deg).to_radians();
    let start = Vec2::new(center.x + radius * start_a.cos(), center.y - radius * start_a.sin());
    let end = Vec2::new(center.x + radius * end_a.cos(), center.y - radius * end_a.sin());
    let height = radius * style.loop_height_factor;
    let ctrl = Vec2::new(center.x, center.y - height);
    EdgePath {
        curve: EdgeCurve::Quad {
            from: start,
            ctrl,
            to: end,
        },
        arrow: arrow_head(end, ctrl, style.arrow_size),
        label_anchor: Vec2::new(center.x, center.y - height - style.loop_label_gap),
    }
}

/// Path between two distinct nodes. Reciprocal edges bow through a perpendicular control
/// point and carry an arrowhead; lone edges are straight and carry none.
pub fn directed_path(
    p1: Vec2,
    r1: f32,
    p2: Vec2,
    r2: f32,
    reciprocal: bool,
    style: &PathStyle,
) -> EdgePath {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let ((ux, uy), len) = norm2(dx, dy);
    if len <= EPS_LEN {
        log::debug!("coincident edge endpoints at {}, using fallback path", p1);
        return EdgePath {
            curve: EdgeCurve::Line { from: p1, to: p2 },
            arrow: None,
            label_anchor: p1,
        };
    }

    let ctrl = reciprocal.then(|| {
        let off = style.reciprocal_offset;
        Vec2::new(p1.x + dx / 2.0 - uy * off, p1.y + dy / 2.0 + ux * off)
    });
    let full = match ctrl {
        Some(ctrl) => EdgeCurve::Quad { from: p1, ctrl, to: p2 },
        None => EdgeCurve::Line { from: p1, to: p2 },
    };

    // Trim along the chord from the curve midpoint towards each centre.
    let mid = full.point_at(0.5);
    let start = circle_segment(mid, p1, p1, r1).unwrap_or(p1);
    let end = circle_segment(mid, p2, p2, r2).unwrap_or(p2);

    let (curve, arrow) = match ctrl {
        Some(ctrl) => (
            EdgeCurve::Quad {
                from: start,
                ctrl,
                to: end,
            },
            arrow_head(end, ctrl, style.arrow_size),
        ),
        None => (EdgeCurve::Line { from: start, to: end }, None),
    };
    EdgePath {
        curve,
        arrow,
        label_anchor: curve.point_at(0.5),
    }
}

pub fn edge_path(source: &Node, dest: &Node, reciprocal: bool, style: &PathStyle) -> EdgePath {
    if source.id == dest.id {
        return loop_path(source.position, source.radius as f32, style);
    }
    directed_path(
        source.position,
        source.radius as f32,
        dest.position,
        dest.radius as f32,
        reciprocal,
        style,
    )
}
