// Copyright @yucwang 2026

use crate::core::computation_node::{ComputationNode, generate_node_id};
use crate::core::emitter::{Geom, GeomShape, LightSampleRecord, LightSampler};
use crate::core::rng::RandomStream;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::frame::Frame;
use crate::math::warp::{sample_uniform_cone, sample_uniform_cone_pdf};
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;

/// Default light sampling: spheres are sampled uniformly inside the cone
/// they subtend, rectangles uniformly by area with the density converted to
/// solid angle. Both divide by the number of lights for uniform selection.
pub struct ShapeLightSampler {
    id: String,
}

impl ShapeLightSampler {
    pub fn new(id: Option<String>) -> Self {
        Self { id: id.unwrap_or_else(|| generate_node_id("ShapeLightSampler")) }
    }
}

impl Default for ShapeLightSampler {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ComputationNode for ShapeLightSampler {
    fn id(&self) -> &str {
        &self.id
    }

    fn describe(&self) -> String {
        String::from("ShapeLightSampler")
    }
}

fn selection_pdf(num_lights: usize) -> Float {
    if num_lights == 0 {
        0.0
    } else {
        1.0 / num_lights as Float
    }
}

// Area density 1/A at distance `dist` seen under `cos_light` becomes dist^2 / (A cos).
fn area_to_solid_angle(rect: &Rectangle, dist2: Float, cos_light: Float) -> Float {
    let denom = cos_light * rect.surface_area();
    if denom <= 0.0 || dist2 <= 0.0 {
        0.0
    } else {
        dist2 / denom
    }
}

fn sample_rectangle(rect: &Rectangle, u: &Vector2f, reference: &Vector3f) -> LightSampleRecord {
    let p = rect.sample(u);
    let to_light = p - reference;
    let dist2 = to_light.norm_squared();
    if dist2 <= 0.0 {
        return LightSampleRecord::default();
    }
    let distance = dist2.sqrt();
    let direction = to_light / distance;
    let cos_light = rect.normal().dot(&direction).abs();

    LightSampleRecord {
        direction,
        distance,
        pdf: area_to_solid_angle(rect, dist2, cos_light),
    }
}

fn sample_sphere(sphere: &Sphere, u: &Vector2f, reference: &Vector3f) -> LightSampleRecord {
    let cos_max = match sphere.cos_subtended(reference) {
        Some(c) => c,
        None => return LightSampleRecord::default(),
    };

    let axis = (sphere.center() - reference).normalize();
    let frame = Frame::from_normal(&axis);
    let direction = frame.from_local(&sample_uniform_cone(u, cos_max)).normalize();
    let distance = sphere
        .ray_intersection_t(reference, &direction)
        .unwrap_or_else(|| (sphere.center() - reference).norm());

    LightSampleRecord {
        direction,
        distance,
        pdf: sample_uniform_cone_pdf(cos_max),
    }
}

impl LightSampler for ShapeLightSampler {
    fn sample_light(&self,
                    rng: &mut dyn RandomStream,
                    light: &Geom,
                    reference: &Vector3f,
                    num_lights: usize) -> LightSampleRecord {
        let u = Vector2f::new(rng.next_f32(), rng.next_f32());
        let mut record = match &light.shape {
            GeomShape::Rectangle(rect) => sample_rectangle(rect, &u, reference),
            GeomShape::Sphere(sphere) => sample_sphere(sphere, &u, reference),
        };
        record.pdf *= selection_pdf(num_lights);
        record
    }

    fn pdf_light(&self,
                 light: &Geom,
                 reference: &Vector3f,
                 direction: &Vector3f,
                 num_lights: usize) -> Float {
        let pdf = match &light.shape {
            GeomShape::Rectangle(rect) => match rect.ray_intersection_t(reference, direction) {
                Some(t) => {
                    let cos_light = rect.normal().dot(direction).abs();
                    area_to_solid_angle(rect, t * t, cos_light)
                }
                None => 0.0,
            },
            GeomShape::Sphere(sphere) => match sphere.cos_subtended(reference) {
                Some(cos_max) => {
                    let axis = (sphere.center() - reference).normalize();
                    if direction.dot(&axis) >= cos_max {
                        sample_uniform_cone_pdf(cos_max)
                    } else {
                        0.0
                    }
                }
                None => 0.0,
            },
        };
        pdf * selection_pdf(num_lights)
    }
}
