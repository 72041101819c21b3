// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Mirror `d` (pointing towards the surface) about `n`: d - 2 (d . n) n.
pub fn mirror(d: &Vector3f, n: &Vector3f) -> Vector3f {
    d - 2.0 * d.dot(n) * n
}

/// Refracts `wi` (pointing away from the surface, same side as `m`) with the
/// relative index `eta = eta_i / eta_t`. `None` on total internal reflection.
pub fn refract(wi: &Vector3f, m: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = wi.dot(m).max(-1.0).min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let wt = -eta * wi + (eta * cos_i - cos_t) * m;
    Some(wt)
}

/// Unpolarized Fresnel reflectance. A negative `cos_i` means the ray arrives
/// from the `eta_t` side.
pub fn fresnel_dielectric(cos_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_i = cos_i.max(-1.0).min(1.0);
    let entering = cos_i > 0.0;
    let (eta_i, eta_t) = if entering { (eta_i, eta_t) } else { (eta_t, eta_i) };
    cos_i = cos_i.abs();

    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parl = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_perp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_law() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let d = Vector3f::new(0.3, -0.4, -0.5).normalize();
        let r = mirror(&d, &n);
        assert!((r.x - d.x).abs() < 1e-6);
        assert!((r.y - d.y).abs() < 1e-6);
        assert!((r.z + d.z).abs() < 1e-6);
    }

    #[test]
    fn test_fresnel_normal_incidence() {
        let f = fresnel_dielectric(1.0, 1.0, 1.5);
        assert!((f - 0.04).abs() < 1e-5, "f = {}", f);
        // Symmetric when leaving the medium at normal incidence.
        let g = fresnel_dielectric(-1.0, 1.0, 1.5);
        assert!((g - 0.04).abs() < 1e-5, "g = {}", g);
    }

    #[test]
    fn test_total_internal_reflection() {
        // Leaving glass at 60 degrees: critical angle is ~41.8 degrees.
        let cos_i = (60.0f32).to_radians().cos();
        assert_eq!(fresnel_dielectric(-cos_i, 1.0, 1.5), 1.0);

        let n = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new((60.0f32).to_radians().sin(), 0.0, cos_i);
        assert!(refract(&wi, &n, 1.5).is_none());
    }

    #[test]
    fn test_refract_obeys_snell() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let theta_i = (30.0f32).to_radians();
        let wi = Vector3f::new(theta_i.sin(), 0.0, theta_i.cos());
        let wt = refract(&wi, &n, 1.0 / 1.5).expect("no refraction");
        assert!((wt.norm() - 1.0).abs() < 1e-5);
        assert!(wt.z < 0.0);
        let sin_t = (wt.x * wt.x + wt.y * wt.y).sqrt();
        assert!((theta_i.sin() - 1.5 * sin_t).abs() < 1e-5);
    }
}
