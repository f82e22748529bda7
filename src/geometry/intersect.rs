// Circle/segment intersection in f64, used to trim edge ends at node boundaries.

use super::tolerance::{EPS_DENOM, EPS_ROOT};
use crate::model::Vec2;

#[inline]
fn within_unit(t: f64) -> bool {
    t >= -EPS_ROOT && t <= 1.0 + EPS_ROOT
}

/// Intersects segment `from`-`to` with the circle (`center`, `radius`).
///
/// Solves `|from + t·(to - from) - center|² = radius²` for `t ∈ [0, 1]`. With two valid roots
/// the point closer to `to` wins. Returns `None` for a zero-length segment or no valid root.
pub fn circle_segment(from: Vec2, to: Vec2, center: Vec2, radius: f32) -> Option<Vec2> {
    let (x0, y0) = (from.x as f64, from.y as f64);
    let dx = to.x as f64 - x0;
    let dy = to.y as f64 - y0;
    let cx = center.x as f64;
    let cy = center.y as f64;
    let r = radius as f64;

    let a = dx * dx + dy * dy;
    if a <= EPS_DENOM {
        return None;
    }
    let b = 2.0 * (dx * (x0 - cx) + dy * (y0 - cy));
    let c = (x0 - cx) * (x0 - cx) + (y0 - cy) * (y0 - cy) - r * r;
    let delta = b * b - 4.0 * a * c;
    if delta < 0.0 {
        return None;
    }
    let sq = delta.sqrt();
    let t1 = (-b + sq) / (2.0 * a);
    let t2 = (-b - sq) / (2.0 * a);

    let at = |t: f64| Vec2::new((x0 + t * dx) as f32, (y0 + t * dy) as f32);
    match (within_unit(t1), within_unit(t2)) {
        (false, false) => None,
        (true, false) => Some(at(t1)),
        (false, true) => Some(at(t2)),
        // Larger t is nearer to `to`
        (true, true) => Some(at(t1.max(t2))),
    }
}
