// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius: radius.abs() }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    /// Cosine of the half-angle of the cone the sphere subtends from `p`, or
    /// `None` when `p` is inside the sphere.
    pub fn cos_subtended(&self, p: &Vector3f) -> Option<Float> {
        let dist2 = (self.center - p).norm_squared();
        let r2 = self.radius * self.radius;
        if dist2 <= r2 {
            return None;
        }
        let sin2_max = r2 / dist2;
        Some((1.0 - sin2_max).max(0.0).sqrt())
    }

    /// Nearest positive distance along the unit direction `dir`.
    pub fn ray_intersection_t(&self, origin: &Vector3f, dir: &Vector3f) -> Option<Float> {
        let oc = origin - self.center;
        let b = oc.dot(dir);
        let c = oc.norm_squared() - self.radius * self.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let t0 = -b - root;
        let t1 = -b + root;
        if t0 > 0.0 {
            Some(t0)
        } else if t1 > 0.0 {
            Some(t1)
        } else {
            None
        }
    }
}
