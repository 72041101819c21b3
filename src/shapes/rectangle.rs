// Copyright @yucwang 2026

use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};

/// Parallelogram spanned by `edge_u` and `edge_v` from `corner`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    corner: Vector3f,
    edge_u: Vector3f,
    edge_v: Vector3f,
    normal: Vector3f,
    area: Float,
}

impl Rectangle {
    pub fn new(corner: Vector3f, edge_u: Vector3f, edge_v: Vector3f) -> Self {
        let cross = edge_u.cross(&edge_v);
        let area = cross.norm();
        let normal = if area > 0.0 { cross / area } else { Vector3f::zeros() };
        Self { corner, edge_u, edge_v, normal, area }
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn surface_area(&self) -> Float {
        self.area
    }

    /// Area-uniform point for `u` in [0, 1)^2.
    pub fn sample(&self, u: &Vector2f) -> Vector3f {
        self.corner + self.edge_u * u.x + self.edge_v * u.y
    }

    /// Distance along the unit direction `dir` to the rectangle, if hit.
    pub fn ray_intersection_t(&self, origin: &Vector3f, dir: &Vector3f) -> Option<Float> {
        let denom = dir.dot(&self.normal);
        if denom.abs() < EPSILON || self.area <= 0.0 {
            return None;
        }

        let t = (self.corner - origin).dot(&self.normal) / denom;
        if t <= 0.0 {
            return None;
        }

        let rel = origin + dir * t - self.corner;
        let cross = self.edge_u.cross(&self.edge_v);
        let inv = 1.0 / cross.norm_squared();
        let a = rel.cross(&self.edge_v).dot(&cross) * inv;
        let b = self.edge_u.cross(&rel).dot(&cross) * inv;
        if a < -EPSILON || a > 1.0 + EPSILON || b < -EPSILON || b > 1.0 + EPSILON {
            return None;
        }
        Some(t)
    }
}
