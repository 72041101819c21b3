// Copyright @yucwang 2023

use crate::core::material::Material;
use crate::math::constants::Vector3f;

/// What the intersection stage hands to the shading core for one hit.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit<'a> {
    pub point: Vector3f,
    pub normal: Vector3f,
    pub material: &'a Material,
}

impl<'a> SurfaceHit<'a> {
    pub fn new(point: Vector3f, normal: Vector3f, material: &'a Material) -> Self {
        Self { point, normal, material }
    }
}
