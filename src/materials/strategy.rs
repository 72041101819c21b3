// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFSampleRecord, BSDFEvalResult, BSDF};
use crate::core::rng::RandomStream;
use crate::materials::dielectric::SmoothDielectricBSDF;
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::materials::specular::PerfectSpecularBSDF;
use crate::math::constants::{Float, Vector3f};

/// How a ray continues from a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScatterStrategy {
    Diffuse(LambertianDiffuseBSDF),
    Specular(PerfectSpecularBSDF),
    Refractive(SmoothDielectricBSDF),
    /// Picks one lobe with probability proportional to its weight.
    Mix(MixLobes),
}

/// Weighted blend of the three lobes. Lobes with a non-positive weight are
/// never chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixLobes {
    specular: (Float, PerfectSpecularBSDF),
    refractive: (Float, SmoothDielectricBSDF),
    diffuse: (Float, LambertianDiffuseBSDF),
}

impl MixLobes {
    pub fn new(specular: (Float, PerfectSpecularBSDF),
               refractive: (Float, SmoothDielectricBSDF),
               diffuse: (Float, LambertianDiffuseBSDF)) -> Self {
        Self { specular, refractive, diffuse }
    }

    /// Lobe weights in specular, refractive, diffuse order.
    pub fn weights(&self) -> [Float; 3] {
        [self.specular.0, self.refractive.0, self.diffuse.0]
    }

    fn lobes(&self) -> [(Float, &dyn BSDF, bool); 3] {
        [
            (self.specular.0.max(0.0), &self.specular.1 as &dyn BSDF, true),
            (self.refractive.0.max(0.0), &self.refractive.1 as &dyn BSDF, true),
            (self.diffuse.0.max(0.0), &self.diffuse.1 as &dyn BSDF, false),
        ]
    }

    fn total_weight(&self) -> Float {
        self.lobes().iter().map(|(w, _, _)| *w).sum()
    }
}

impl ScatterStrategy {
    pub fn diffuse(albedo: Vector3f) -> Self {
        ScatterStrategy::Diffuse(LambertianDiffuseBSDF::new(albedo))
    }

    pub fn specular(color: Vector3f) -> Self {
        ScatterStrategy::Specular(PerfectSpecularBSDF::new(color))
    }

    pub fn refractive(color: Vector3f, ior: Float) -> Self {
        ScatterStrategy::Refractive(SmoothDielectricBSDF::new(color, ior))
    }

    /// True when no direction chosen by another strategy can be evaluated.
    pub fn is_delta(&self) -> bool {
        match self {
            ScatterStrategy::Diffuse(_) => false,
            ScatterStrategy::Specular(_) | ScatterStrategy::Refractive(_) => true,
            ScatterStrategy::Mix(mix) => mix.lobes().iter().all(|(w, _, delta)| *w <= 0.0 || *delta),
        }
    }

    fn as_bsdf(&self) -> Option<&dyn BSDF> {
        match self {
            ScatterStrategy::Diffuse(b) => Some(b as &dyn BSDF),
            ScatterStrategy::Specular(b) => Some(b),
            ScatterStrategy::Refractive(b) => Some(b),
            ScatterStrategy::Mix(_) => None,
        }
    }
}

impl BSDF for ScatterStrategy {
    fn name(&self) -> &'static str {
        match self {
            ScatterStrategy::Diffuse(_) => "Diffuse",
            ScatterStrategy::Specular(_) => "Specular",
            ScatterStrategy::Refractive(_) => "Refractive",
            ScatterStrategy::Mix(_) => "Mix",
        }
    }

    fn sample(&self,
              wi: &Vector3f,
              normal: &Vector3f,
              rng: &mut dyn RandomStream) -> BSDFSampleRecord {
        let mix = match self {
            ScatterStrategy::Mix(mix) => mix,
            _ => match self.as_bsdf() {
                Some(bsdf) => return bsdf.sample(wi, normal, rng),
                None => return BSDFSampleRecord::default(),
            },
        };
        let total = mix.total_weight();
        if total <= 0.0 {
            return BSDFSampleRecord::default();
        }

        let target = rng.next_f32() * total;
        let mut accum: Float = 0.0;
        let mut chosen = None;
        for (weight, bsdf, _) in mix.lobes().iter().filter(|(w, _, _)| *w > 0.0) {
            accum += *weight;
            chosen = Some((*weight, *bsdf));
            if target < accum {
                break;
            }
        }

        match chosen {
            Some((weight, bsdf)) => {
                let prob = weight / total;
                let mut record = bsdf.sample(wi, normal, rng);
                record.value *= prob;
                record.pdf *= prob;
                record
            }
            None => BSDFSampleRecord::default(),
        }
    }

    fn eval(&self,
            wi: &Vector3f,
            wo: &Vector3f,
            normal: &Vector3f) -> BSDFEvalResult {
        let mix = match self {
            ScatterStrategy::Mix(mix) => mix,
            _ => match self.as_bsdf() {
                Some(bsdf) => return bsdf.eval(wi, wo, normal),
                None => return BSDFEvalResult::default(),
            },
        };
        let total = mix.total_weight();
        if total <= 0.0 {
            return BSDFEvalResult::default();
        }

        let mut result = BSDFEvalResult::default();
        for (weight, bsdf, _) in mix.lobes().iter().filter(|(w, _, _)| *w > 0.0) {
            let prob = *weight / total;
            let eval = bsdf.eval(wi, wo, normal);
            result.value += eval.value * prob;
            result.pdf += eval.pdf * prob;
        }
        result
    }
}
