// Copyright @yucwang 2026

use crate::core::material::Material;
use crate::materials::dielectric::SmoothDielectricBSDF;
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::materials::specular::PerfectSpecularBSDF;
use crate::materials::strategy::{MixLobes, ScatterStrategy};
use crate::math::constants::Float;

/// Maps a scene material onto the strategy used to continue a path.
pub trait SelectionPolicy: Send + Sync {
    fn name(&self) -> &'static str;
    fn strategy_for(&self, material: &Material) -> ScatterStrategy;
}

/// Reflective first, then refractive, otherwise diffuse. Only fully set
/// flags count; a material never blends lobes under this policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityPolicy;

impl SelectionPolicy for PriorityPolicy {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn strategy_for(&self, material: &Material) -> ScatterStrategy {
        if material.is_reflective() {
            ScatterStrategy::specular(material.specular.color)
        } else if material.is_refractive() {
            ScatterStrategy::refractive(material.specular.color, material.index_of_refraction)
        } else {
            ScatterStrategy::diffuse(material.color)
        }
    }
}

/// Treats the scalar flags as lobe weights: `has_reflective` goes to the
/// mirror, `has_refractive` to the dielectric (limited to what is left), and
/// the remainder to the diffuse lobe.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedPolicy;

fn clamp01(v: Float) -> Float {
    v.max(0.0).min(1.0)
}

impl SelectionPolicy for WeightedPolicy {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn strategy_for(&self, material: &Material) -> ScatterStrategy {
        let reflective = clamp01(material.has_reflective);
        let refractive = clamp01(material.has_refractive).min(1.0 - reflective);
        let diffuse = 1.0 - reflective - refractive;

        let lit = [reflective, refractive, diffuse].iter().filter(|w| **w > 0.0).count();
        if lit == 1 {
            if reflective > 0.0 {
                return ScatterStrategy::specular(material.specular.color);
            }
            if refractive > 0.0 {
                return ScatterStrategy::refractive(material.specular.color, material.index_of_refraction);
            }
            return ScatterStrategy::diffuse(material.color);
        }

        ScatterStrategy::Mix(MixLobes::new(
            (reflective, PerfectSpecularBSDF::new(material.specular.color)),
            (refractive, SmoothDielectricBSDF::new(material.specular.color, material.index_of_refraction)),
            (diffuse, LambertianDiffuseBSDF::new(material.color)),
        ))
    }
}
