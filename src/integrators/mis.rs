// Copyright @yucwang 2026

use crate::math::constants::Float;

/// Power heuristic (beta = 2) for `nf` samples of strategy f against `ng`
/// samples of strategy g. Returns 0 when neither strategy can produce the
/// sample.
///
/// Evaluated as `1 / (1 + (g/f)^2)` so that densities whose squares leave
/// the f32 range still give a finite weight.
pub fn power_heuristic(nf: u32, f_pdf: Float, ng: u32, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    match dominant_ratio(f, g) {
        Some(r) => 1.0 / (1.0 + r * r),
        None => if f > 0.0 { 1.0 } else { 0.0 },
    }
}

pub fn balance_heuristic(nf: u32, f_pdf: Float, ng: u32, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    match dominant_ratio(f, g) {
        Some(r) => 1.0 / (1.0 + r),
        None => if f > 0.0 { 1.0 } else { 0.0 },
    }
}

// g / f when both densities are positive; `None` when one side is zero.
fn dominant_ratio(f: Float, g: Float) -> Option<Float> {
    if !(f > 0.0) || !(g > 0.0) {
        return None;
    }
    match (f.is_infinite(), g.is_infinite()) {
        (true, true) => Some(1.0),
        (true, false) => Some(0.0),
        (false, true) => Some(Float::INFINITY),
        (false, false) => Some(g / f),
    }
}
