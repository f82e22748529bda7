use super::tolerance::{approx_eq, clamp01, near_zero, CURVE_SAMPLES, EPS_POS};
use crate::model::Vec2;

/// Squared distance from `p` to segment `a`-`b` and the clamped parameter of the projection.
pub fn seg_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> (f32, f32) {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let vv = vx * vx + vy * vy;
    let t = if near_zero(vv, 0.0) {
        0.0
    } else {
        clamp01((wx * vx + wy * vy) / vv)
    };
    let proj = Vec2::new(a.x + t * vx, a.y + t * vy);
    (p.distance_sq(proj), t)
}

pub fn quad_point(t: f32, p0: Vec2, p1: Vec2, p2: Vec2) -> Vec2 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    Vec2 {
        x: uu * p0.x + 2.0 * u * t * p1.x + tt * p2.x,
        y: uu * p0.y + 2.0 * u * t * p1.y + tt * p2.y,
    }
}

pub fn quad_distance_sq(p: Vec2, p0: Vec2, p1: Vec2, p2: Vec2) -> (f32, f32) {
    // Degenerate: all control points coincident
    if approx_eq(p0.x, p1.x, EPS_POS)
        && approx_eq(p1.x, p2.x, EPS_POS)
        && approx_eq(p0.y, p1.y, EPS_POS)
        && approx_eq(p1.y, p2.y, EPS_POS)
    {
        return (p.distance_sq(p0), 0.0);
    }
    let mut best_d2 = f32::INFINITY;
    let mut best_t = 0.0;
    let mut prev = p0;
    let n = CURVE_SAMPLES;
    for i in 1..=n {
        let t1 = i as f32 / n as f32;
        let cur = quad_point(t1, p0, p1, p2);
        let (d2, ts) = seg_distance_sq(p, prev, cur);
        if d2 < best_d2 {
            best_d2 = d2;
            best_t = (i as f32 - 1.0 + ts) / n as f32;
        }
        prev = cur;
    }
    (best_d2, best_t)
}
