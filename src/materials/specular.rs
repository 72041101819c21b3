// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFSampleRecord, BSDFEvalResult, BSDF};
use crate::core::rng::RandomStream;
use crate::materials::fresnel::mirror;
use crate::math::constants::Vector3f;

/// Perfect mirror. The lobe is a Dirac delta, so `sample` reports pdf 1 and
/// `eval` never matches an externally chosen direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectSpecularBSDF {
    color: Vector3f,
}

impl PerfectSpecularBSDF {
    pub fn new(color: Vector3f) -> Self {
        Self { color }
    }
}

impl BSDF for PerfectSpecularBSDF {
    fn sample(&self,
              wi: &Vector3f,
              normal: &Vector3f,
              _rng: &mut dyn RandomStream) -> BSDFSampleRecord {
        let wo = mirror(wi, normal);
        BSDFSampleRecord::delta(*wi, wo, self.color, 1.0)
    }

    fn eval(&self,
            _wi: &Vector3f,
            _wo: &Vector3f,
            _normal: &Vector3f) -> BSDFEvalResult {
        BSDFEvalResult::default()
    }
}
