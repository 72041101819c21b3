// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFSampleRecord, BSDFEvalResult, BSDF};
use crate::core::rng::RandomStream;
use crate::materials::fresnel::{fresnel_dielectric, mirror, refract};
use crate::math::constants::{Float, Vector3f};

/// Smooth dielectric interface. Reflection is chosen with probability F and
/// transmission with 1 - F; the record's pdf is that discrete probability and
/// its value carries the same factor, so the throughput weight is the tint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothDielectricBSDF {
    color: Vector3f,
    ior: Float,
}

impl SmoothDielectricBSDF {
    pub fn new(color: Vector3f, ior: Float) -> Self {
        Self { color, ior }
    }
}

impl BSDF for SmoothDielectricBSDF {
    fn sample(&self,
              wi: &Vector3f,
              normal: &Vector3f,
              rng: &mut dyn RandomStream) -> BSDFSampleRecord {
        let cos_i = -wi.dot(normal);
        let entering = cos_i >= 0.0;
        let facing = if entering { *normal } else { -normal };
        let (eta_i, eta_t) = if entering { (1.0, self.ior) } else { (self.ior, 1.0) };

        let f = fresnel_dielectric(cos_i, 1.0, self.ior);
        let u = rng.next_f32();
        if u < f {
            let wo = mirror(wi, &facing);
            return BSDFSampleRecord::delta(*wi, wo, self.color * f, f);
        }

        match refract(&-wi, &facing, eta_i / eta_t) {
            Some(wt) => {
                BSDFSampleRecord::delta(*wi, wt.normalize(), self.color * (1.0 - f), 1.0 - f)
                    .with_transmission(true)
            }
            None => {
                log::trace!("refraction rejected at cos_i = {}, reflecting", cos_i);
                let wo = mirror(wi, &facing);
                BSDFSampleRecord::delta(*wi, wo, self.color * (1.0 - f), 1.0 - f)
            }
        }
    }

    fn eval(&self,
            _wi: &Vector3f,
            _wo: &Vector3f,
            _normal: &Vector3f) -> BSDFEvalResult {
        BSDFEvalResult::default()
    }
}
