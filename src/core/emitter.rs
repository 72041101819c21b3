// Copyright @yucwang 2026

use crate::core::rng::RandomStream;
use crate::math::constants::{Float, Vector3f};
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeomShape {
    Sphere(Sphere),
    Rectangle(Rectangle),
}

/// Light-emitting scene geometry. `geom_id` refers back into the scene's
/// geometry table so the caller can match shadow-ray hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geom {
    pub geom_id: usize,
    pub shape: GeomShape,
}

impl Geom {
    pub fn new(geom_id: usize, shape: GeomShape) -> Self {
        Self { geom_id, shape }
    }
}

/// Direction from a reference point towards a sampled light point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSampleRecord {
    pub direction: Vector3f,
    pub distance: Float,
    /// Solid-angle density, including the light selection probability.
    pub pdf: Float,
}

impl Default for LightSampleRecord {
    fn default() -> Self {
        Self {
            direction: Vector3f::zeros(),
            distance: 0.0,
            pdf: 0.0,
        }
    }
}

pub trait LightSampler: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Samples a direction from `reference` towards `light`. A pdf of zero
    /// means the light cannot be reached from `reference`.
    fn sample_light(&self,
                    rng: &mut dyn RandomStream,
                    light: &Geom,
                    reference: &Vector3f,
                    num_lights: usize) -> LightSampleRecord;

    /// Density `sample_light` would assign to `direction`.
    fn pdf_light(&self,
                 light: &Geom,
                 reference: &Vector3f,
                 direction: &Vector3f,
                 num_lights: usize) -> Float;
}
