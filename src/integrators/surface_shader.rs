// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFSampleRecord, BSDF};
use crate::core::computation_node::{ComputationNode, generate_node_id};
use crate::core::emitter::{Geom, LightSampler};
use crate::core::interaction::SurfaceHit;
use crate::core::path::PathSegment;
use crate::core::rng::RandomStream;
use crate::core::settings::ShadingSettings;
use crate::emitters::area::ShapeLightSampler;
use crate::integrators::mis::power_heuristic;
use crate::materials::selection::{PriorityPolicy, SelectionPolicy};
use crate::math::constants::{Float, RAY_BIAS, Vector3f};
use crate::math::ray::Ray3f;

/// Outcome of one next-event estimation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextEventRecord {
    pub light_geom_id: usize,
    pub light_index: usize,
    /// Light-strategy density of the sampled direction.
    pub pdf_l_l: Float,
    /// BSDF-strategy density of the same direction.
    pub pdf_l_f: Float,
    /// Distance to the sampled light point, for the shadow ray.
    pub distance: Float,
}

impl NextEventRecord {
    /// MIS weight of the light-sampled contribution.
    pub fn mis_weight(&self) -> Float {
        power_heuristic(1, self.pdf_l_l, 1, self.pdf_l_f)
    }
}

/// Per-bounce shading: BSDF sampling, next-event estimation and the MIS
/// weights tying them together. Shared read-only between all paths.
pub struct SurfaceShader {
    id: String,
    policy: Box<dyn SelectionPolicy>,
    light_sampler: Box<dyn LightSampler>,
    ray_bias: Float,
}

impl ComputationNode for SurfaceShader {
    fn id(&self) -> &str {
        &self.id
    }

    fn describe(&self) -> String {
        format!("SurfaceShader[policy = {}, lights = {}, bias = {}]",
                self.policy.name(), self.light_sampler.name(), self.ray_bias)
    }
}

impl Default for SurfaceShader {
    fn default() -> Self {
        Self::new(Box::new(PriorityPolicy), Box::new(ShapeLightSampler::default()), RAY_BIAS)
    }
}

// Rays are pushed off along the normal; only transmitted rays switch to the
// side they travel into.
fn offset_normal(normal: &Vector3f, sample: &BSDFSampleRecord) -> Vector3f {
    if sample.transmitted && sample.wo.dot(normal) < 0.0 { -normal } else { *normal }
}

impl SurfaceShader {
    pub fn new(policy: Box<dyn SelectionPolicy>,
               light_sampler: Box<dyn LightSampler>,
               ray_bias: Float) -> Self {
        Self { id: generate_node_id("SurfaceShader"), policy, light_sampler, ray_bias }
    }

    pub fn from_settings(settings: &ShadingSettings) -> Self {
        let shader = Self::new(settings.selection.policy(),
                               Box::new(ShapeLightSampler::default()),
                               settings.ray_bias);
        shader.log_summary();
        shader
    }

    pub fn policy(&self) -> &dyn SelectionPolicy {
        self.policy.as_ref()
    }

    pub fn light_sampler(&self) -> &dyn LightSampler {
        self.light_sampler.as_ref()
    }

    pub fn ray_bias(&self) -> Float {
        self.ray_bias
    }

    /// Extends `segment` by one BSDF-sampled bounce from `hit`.
    ///
    /// Returns the sample record; its `pdf` is the BSDF-strategy density of
    /// the new direction (1 for delta lobes). A zero density terminates the
    /// path. Terminated paths are left untouched.
    pub fn scatter_ray(&self,
                       segment: &mut PathSegment,
                       hit: &SurfaceHit,
                       rng: &mut dyn RandomStream) -> BSDFSampleRecord {
        if segment.is_terminated() {
            log::trace!("scatter_ray on terminated path {}", segment.pixel_index);
            return BSDFSampleRecord::default();
        }

        let strategy = self.policy.strategy_for(hit.material);
        let sample = strategy.sample(&segment.ray.dir(), &hit.normal, rng);
        if sample.pdf == 0.0 {
            segment.terminate();
            return sample;
        }

        segment.beta = segment.beta.component_mul(&(sample.value / sample.pdf));
        let offset = offset_normal(&hit.normal, &sample);
        segment.extend(Ray3f::spawn(hit.point, offset, self.ray_bias, sample.wo));
        sample
    }

    /// One next-event estimation step: picks a light uniformly, points the
    /// path at a sampled point on it and weights the throughput by the BSDF
    /// over the light-sampling density.
    ///
    /// `lights` must not be empty. Returns `None` when no light was chosen.
    pub fn scatter_ray_to_light(&self,
                                segment: &mut PathSegment,
                                hit: &SurfaceHit,
                                lights: &[Geom],
                                rng: &mut dyn RandomStream) -> Option<NextEventRecord> {
        debug_assert!(!lights.is_empty(), "next-event estimation needs at least one light");
        if segment.is_terminated() {
            return None;
        }
        if lights.is_empty() {
            log::warn!("No lights for next-event estimation, terminating path {}.", segment.pixel_index);
            segment.terminate();
            return None;
        }

        let num_lights = lights.len();
        let light_index = ((rng.next_f32() * num_lights as Float) as usize).min(num_lights - 1);
        let light = &lights[light_index];
        let light_sample = self.light_sampler.sample_light(rng, light, &hit.point, num_lights);

        let strategy = self.policy.strategy_for(hit.material);
        let eval = strategy.eval(&segment.ray.dir(), &light_sample.direction, &hit.normal);

        let record = NextEventRecord {
            light_geom_id: light.geom_id,
            light_index,
            pdf_l_l: light_sample.pdf,
            pdf_l_f: eval.pdf,
            distance: light_sample.distance,
        };

        if light_sample.pdf <= 0.0 {
            segment.terminate();
            return Some(record);
        }

        segment.beta = segment.beta.component_mul(&(eval.value / light_sample.pdf));
        segment.extend(Ray3f::spawn(hit.point, hit.normal, self.ray_bias, light_sample.direction));
        if segment.beta == Vector3f::zeros() {
            segment.terminate();
        }
        Some(record)
    }

    /// MIS weight for a BSDF-sampled direction that reached `light`.
    /// Delta lobes cannot be matched by light sampling and keep full weight.
    pub fn bsdf_mis_weight(&self,
                           sample: &BSDFSampleRecord,
                           light: &Geom,
                           reference: &Vector3f,
                           num_lights: usize) -> Float {
        if sample.is_delta {
            return 1.0;
        }
        let light_pdf = self.light_sampler.pdf_light(light, reference, &sample.wo, num_lights);
        power_heuristic(1, sample.pdf, 1, light_pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::SurfaceShader;
    use crate::core::emitter::{Geom, GeomShape};
    use crate::core::interaction::SurfaceHit;
    use crate::core::material::Material;
    use crate::core::path::PathSegment;
    use crate::core::rng::{FixedStream, LcgRng, RandomStream};
    use crate::core::settings::{SelectionMode, ShadingSettings};
    use crate::math::constants::{PI, Vector3f};
    use crate::math::ray::Ray3f;
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "expected {} ~ {}", a, b);
    }

    fn downward_path(bounces: u32) -> PathSegment {
        let ray = Ray3f::new(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, -1.0, 0.0));
        PathSegment::new(ray, 0, bounces)
    }

    fn floor_hit(material: &Material) -> SurfaceHit<'_> {
        SurfaceHit::new(Vector3f::zeros(), Vector3f::new(0.0, 1.0, 0.0), material)
    }

    fn ceiling_light(geom_id: usize) -> Geom {
        Geom::new(
            geom_id,
            GeomShape::Rectangle(Rectangle::new(
                Vector3f::new(-0.5, 2.0, -0.5),
                Vector3f::new(1.0, 0.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.0),
            )),
        )
    }

    #[test]
    fn test_diffuse_regression_fixture() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let mut path = downward_path(4);
        let mut rng = FixedStream::new(&[0.25, 0.5]);

        let sample = shader.scatter_ray(&mut path, &floor_hit(&material), &mut rng);

        // up = 0.5, over = sqrt(0.75), around = pi.
        let dir = path.ray.dir();
        assert!(dir.x.abs() < 1e-6);
        assert_close(dir.y, 0.5);
        assert_close(dir.z, 0.75f32.sqrt());
        assert_close(sample.pdf, 0.5 / PI);
        assert_close(path.beta.x, 0.5);
        assert_close(path.beta.y, 0.5);
        assert_close(path.beta.z, 0.5);
        assert_close(path.ray.origin().y, 0.001);
        assert_eq!(path.remaining_bounces, 3);
    }

    #[test]
    fn test_diffuse_never_creates_energy() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.9, 0.6, 1.0));
        let mut rng = LcgRng::for_path(12, 0, 0);
        let mut path = downward_path(64);
        let mut previous = path.beta;
        while !path.is_terminated() {
            let hit = floor_hit(&material);
            shader.scatter_ray(&mut path, &hit, &mut rng);
            for c in 0..3 {
                assert!(path.beta[c] >= 0.0);
                assert!(path.beta[c] <= previous[c] * (1.0 + 1e-5), "component {} grew", c);
            }
            previous = path.beta;
        }
    }

    #[test]
    fn test_mirror_reflection_exact() {
        let shader = SurfaceShader::default();
        let material = Material::mirror(Vector3f::new(0.8, 0.9, 1.0));
        let d = Vector3f::new(0.3, -0.8, 0.2).normalize();
        let ray = Ray3f::new(Vector3f::new(-0.3, 0.8, -0.2), d);
        let mut path = PathSegment::new(ray, 3, 5);
        let hit = floor_hit(&material);
        let n = hit.normal;

        let sample = shader.scatter_ray(&mut path, &hit, &mut LcgRng::new(1));
        let expected = d - 2.0 * d.dot(&n) * n;
        assert_eq!(sample.pdf, 1.0);
        assert!((path.ray.dir() - expected).norm() < 1e-6);
        assert_eq!(path.beta, Vector3f::new(0.8, 0.9, 1.0));
        assert_eq!(path.remaining_bounces, 4);
        assert_eq!(path.pixel_index, 3);
    }

    #[test]
    fn test_glass_transmission_spawns_below_surface() {
        let shader = SurfaceShader::default();
        let material = Material::glass(Vector3f::new(1.0, 1.0, 1.0), 1.5);
        let mut path = downward_path(3);
        let sample = shader.scatter_ray(&mut path, &floor_hit(&material), &mut FixedStream::new(&[0.5]));
        assert!(sample.transmitted);
        assert!(path.ray.origin().y < 0.0);
        assert!(path.ray.dir().y < 0.0);
        assert_eq!(path.remaining_bounces, 2);
    }

    #[test]
    fn test_reflection_from_below_keeps_normal_offset() {
        // Hit from the back side: the mirrored ray heads below the normal but
        // the origin is still pushed along +n.
        let shader = SurfaceShader::default();
        let material = Material::mirror(Vector3f::new(1.0, 1.0, 1.0));
        let ray = Ray3f::new(Vector3f::new(0.0, -1.0, 0.0), Vector3f::new(0.0, 1.0, 0.0));
        let mut path = PathSegment::new(ray, 0, 3);
        let sample = shader.scatter_ray(&mut path, &floor_hit(&material), &mut LcgRng::new(5));
        assert!(!sample.transmitted);
        assert!(path.ray.dir().y < 0.0);
        assert_close(path.ray.origin().y, 0.001);
    }

    #[test]
    fn test_next_event_offsets_along_normal() {
        // Light below the surface: the diffuse lobe evaluates to zero, but the
        // spawned ray still starts on the normal side.
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let below = Geom::new(
            6,
            GeomShape::Rectangle(Rectangle::new(
                Vector3f::new(-0.5, -2.0, -0.5),
                Vector3f::new(1.0, 0.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.0),
            )),
        );
        let mut path = downward_path(4);
        let record = shader
            .scatter_ray_to_light(&mut path, &floor_hit(&material), &[below], &mut LcgRng::new(13))
            .expect("light chosen");
        assert!(record.pdf_l_l > 0.0);
        assert!(path.ray.dir().y < 0.0);
        assert_close(path.ray.origin().y, 0.001);
        assert!(path.is_terminated());
    }

    #[test]
    fn test_from_settings_wires_configuration() {
        let shader = SurfaceShader::from_settings(&ShadingSettings {
            ray_bias: 0.01,
            selection: SelectionMode::Weighted,
            ..ShadingSettings::default()
        });
        assert_eq!(shader.policy().name(), "weighted");
        assert_eq!(shader.ray_bias(), 0.01);
        assert!(shader.light_sampler().name().ends_with("ShapeLightSampler"));

        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let mut path = downward_path(2);
        shader.scatter_ray(&mut path, &floor_hit(&material), &mut FixedStream::new(&[0.25, 0.5]));
        assert_close(path.ray.origin().y, 0.01);
    }

    #[test]
    fn test_zero_pdf_terminates() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let mut path = downward_path(4);
        path.color = Vector3f::new(0.2, 0.2, 0.2);
        let sample = shader.scatter_ray(&mut path, &floor_hit(&material), &mut FixedStream::new(&[0.0, 0.5]));
        assert_eq!(sample.pdf, 0.0);
        assert_eq!(path.remaining_bounces, 0);
        assert_eq!(path.color, Vector3f::zeros());
    }

    #[test]
    fn test_bounce_count_decreases_by_one() {
        let shader = SurfaceShader::from_settings(&ShadingSettings {
            selection: SelectionMode::Weighted,
            ..ShadingSettings::default()
        });
        let mut material = Material::diffuse(Vector3f::new(0.7, 0.7, 0.7));
        material.has_reflective = 0.5;
        material.specular.color = Vector3f::new(1.0, 1.0, 1.0);
        let lights = [ceiling_light(2)];
        let mut rng = LcgRng::for_path(5, 2, 0);

        for i in 0..200 {
            let mut path = downward_path(6);
            let hit = floor_hit(&material);
            let before = path.remaining_bounces;
            if i % 2 == 0 {
                shader.scatter_ray(&mut path, &hit, &mut rng);
            } else {
                shader.scatter_ray_to_light(&mut path, &hit, &lights, &mut rng);
            }
            if path.is_terminated() {
                assert_eq!(path.remaining_bounces, 0);
                assert_eq!(path.color, Vector3f::zeros());
            } else {
                assert_eq!(path.remaining_bounces, before - 1);
            }
        }
    }

    #[test]
    fn test_terminated_path_is_not_scattered() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let mut path = downward_path(0);
        let before = path.clone();
        let mut rng = LcgRng::new(4);
        shader.scatter_ray(&mut path, &floor_hit(&material), &mut rng);
        assert!(shader.scatter_ray_to_light(&mut path, &floor_hit(&material), &[ceiling_light(1)], &mut rng).is_none());
        assert_eq!(path, before);
    }

    #[test]
    fn test_next_event_towards_rectangle() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let lights = [ceiling_light(9)];
        let mut path = downward_path(4);
        let mut rng = LcgRng::new(21);

        let record = shader
            .scatter_ray_to_light(&mut path, &floor_hit(&material), &lights, &mut rng)
            .expect("light chosen");
        assert_eq!(record.light_geom_id, 9);
        assert_eq!(record.light_index, 0);
        assert!(record.pdf_l_l > 0.0);
        assert!(record.pdf_l_f > 0.0);
        assert!(record.distance >= 2.0 - 1e-4);
        assert_eq!(path.remaining_bounces, 3);

        let dir = path.ray.dir();
        assert!(dir.y > 0.0);
        assert_close(record.pdf_l_f, dir.y / PI);
        // beta = albedo / pi * cos / pdf_l_l
        let expected = 0.5 / PI * dir.y / record.pdf_l_l;
        assert!((path.beta.x - expected).abs() / expected < 1e-4);

        let w = record.mis_weight();
        assert!(w > 0.0 && w <= 1.0);
    }

    #[test]
    fn test_next_event_light_choice_is_uniform() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let lights = [ceiling_light(3), ceiling_light(5), ceiling_light(8)];
        let mut counts = [0usize; 3];
        let mut rng = LcgRng::new(77);
        let trials = 9000;
        for _ in 0..trials {
            let mut path = downward_path(2);
            let record = shader
                .scatter_ray_to_light(&mut path, &floor_hit(&material), &lights, &mut rng)
                .expect("light chosen");
            assert_eq!(record.light_geom_id, lights[record.light_index].geom_id);
            counts[record.light_index] += 1;
        }
        for c in counts.iter() {
            let ratio = *c as f32 / trials as f32;
            assert!((ratio - 1.0 / 3.0).abs() < 0.03, "ratio = {}", ratio);
        }
    }

    #[test]
    fn test_next_event_on_mirror_terminates() {
        // A delta lobe evaluates to zero for any light direction.
        let shader = SurfaceShader::default();
        let material = Material::mirror(Vector3f::new(1.0, 1.0, 1.0));
        let mut path = downward_path(4);
        path.color = Vector3f::new(0.3, 0.3, 0.3);
        let record = shader
            .scatter_ray_to_light(&mut path, &floor_hit(&material), &[ceiling_light(0)], &mut LcgRng::new(2))
            .expect("light chosen");
        assert_eq!(record.pdf_l_f, 0.0);
        assert_eq!(path.remaining_bounces, 0);
        assert_eq!(path.color, Vector3f::zeros());
    }

    #[test]
    fn test_unreachable_light_terminates() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        // Reference point sits inside the emitting sphere.
        let light = Geom::new(1, GeomShape::Sphere(Sphere::new(Vector3f::zeros(), 2.0)));
        let mut path = downward_path(4);
        let record = shader
            .scatter_ray_to_light(&mut path, &floor_hit(&material), &[light], &mut LcgRng::new(8))
            .expect("light chosen");
        assert_eq!(record.pdf_l_l, 0.0);
        assert_eq!(path.remaining_bounces, 0);
        assert!(path.beta.iter().all(|c| c.is_finite()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_empty_light_list_asserts() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let mut path = downward_path(4);
        shader.scatter_ray_to_light(&mut path, &floor_hit(&material), &[], &mut LcgRng::new(0));
    }

    #[test]
    fn test_bsdf_mis_weight() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let light = ceiling_light(0);
        let hit = floor_hit(&material);

        // Straight up hits the light; both strategies can produce it.
        let mut path = downward_path(4);
        let sample = shader.scatter_ray(&mut path, &hit, &mut FixedStream::new(&[0.999, 0.0]));
        let w = shader.bsdf_mis_weight(&sample, &light, &hit.point, 1);
        assert!(w > 0.0 && w < 1.0);

        let mirror = Material::mirror(Vector3f::new(1.0, 1.0, 1.0));
        let mut path = downward_path(4);
        let sample = shader.scatter_ray(&mut path, &floor_hit(&mirror), &mut LcgRng::new(1));
        assert_eq!(shader.bsdf_mis_weight(&sample, &light, &hit.point, 1), 1.0);
    }

    #[test]
    fn test_rng_streams_reproduce_paths() {
        let shader = SurfaceShader::default();
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5));
        let run = || {
            let mut path = downward_path(3);
            let mut rng = LcgRng::for_path(100, 7, 1);
            shader.scatter_ray(&mut path, &floor_hit(&material), &mut rng);
            (path.ray.dir(), rng.next_f32())
        };
        assert_eq!(run(), run());
    }
}
