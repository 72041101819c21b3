// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specular {
    pub color: Vector3f,
}

/// Scene material as handed over by the loader. Read-only during shading.
///
/// `has_reflective` and `has_refractive` are scalar flags: 1 means fully set,
/// fractional values are interpreted as mixing weights by `WeightedPolicy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vector3f,
    pub specular: Specular,
    pub has_reflective: Float,
    pub has_refractive: Float,
    pub index_of_refraction: Float,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vector3f::zeros(),
            specular: Specular { color: Vector3f::zeros() },
            has_reflective: 0.0,
            has_refractive: 0.0,
            index_of_refraction: 1.0,
        }
    }
}

impl Material {
    pub fn diffuse(albedo: Vector3f) -> Self {
        Self { color: albedo, ..Self::default() }
    }

    pub fn mirror(tint: Vector3f) -> Self {
        Self {
            specular: Specular { color: tint },
            has_reflective: 1.0,
            ..Self::default()
        }
    }

    pub fn glass(tint: Vector3f, ior: Float) -> Self {
        Self {
            specular: Specular { color: tint },
            has_refractive: 1.0,
            index_of_refraction: ior,
            ..Self::default()
        }
    }

    pub fn is_reflective(&self) -> bool {
        self.has_reflective == 1.0
    }

    pub fn is_refractive(&self) -> bool {
        self.has_refractive == 1.0
    }
}
