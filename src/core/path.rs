// Copyright @yucwang 2026

use crate::math::constants::Vector3f;
use crate::math::ray::Ray3f;

/// One in-flight sample path. Mutated in place by every shading call.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub ray: Ray3f,
    pub beta: Vector3f,
    pub color: Vector3f,
    pub remaining_bounces: u32,
    pub pixel_index: usize,
}

impl PathSegment {
    pub fn new(ray: Ray3f, pixel_index: usize, max_bounces: u32) -> Self {
        Self {
            ray,
            beta: Vector3f::new(1.0, 1.0, 1.0),
            color: Vector3f::zeros(),
            remaining_bounces: max_bounces,
            pixel_index,
        }
    }

    /// No bounces left, or nothing left to carry.
    pub fn is_terminated(&self) -> bool {
        self.remaining_bounces == 0
            || (self.beta == Vector3f::zeros() && self.color == Vector3f::zeros())
    }

    /// Ends the path with zero contribution.
    pub fn terminate(&mut self) {
        self.color = Vector3f::zeros();
        self.remaining_bounces = 0;
    }

    /// Continues along `ray`, consuming one bounce.
    pub fn extend(&mut self, ray: Ray3f) {
        self.ray = ray;
        self.remaining_bounces = self.remaining_bounces.saturating_sub(1);
    }
}
