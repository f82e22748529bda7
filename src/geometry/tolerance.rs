// Centralized tolerances and helpers for scene geometry

pub const EPS_POS: f32 = 1e-4; // point coincidence threshold (scene units)
pub const EPS_LEN: f32 = 1e-6; // zero-length vector threshold
pub const EPS_DENOM: f64 = 1e-12; // quadratic leading-coefficient guard
pub const EPS_ROOT: f64 = 1e-9; // slack when testing t in [0,1]

// Samples used to approximate distance to a quadratic curve
pub const CURVE_SAMPLES: u32 = 32;

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.max(0.0).min(1.0)
}
#[inline]
pub fn near_zero(x: f32, eps: f32) -> bool {
    x.abs() <= eps
}
#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[inline]
pub fn norm2(mut x: f32, mut y: f32) -> ((f32, f32), f32) {
    let len = (x * x + y * y).sqrt();
    if len > EPS_LEN {
        x /= len;
        y /= len;
        ((x, y), len)
    } else {
        ((0.0, 0.0), 0.0)
    }
}
