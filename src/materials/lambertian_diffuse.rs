// Copyright @yucwang 2023

use crate::core::bsdf::{BSDFSampleRecord, BSDFEvalResult, BSDF};
use crate::core::rng::RandomStream;
use crate::math::constants::{ INV_PI, Vector3f };
use crate::math::warp::{ random_direction_in_hemisphere, sample_cosine_hemisphere_pdf };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertianDiffuseBSDF {
    albedo: Vector3f
}

impl LambertianDiffuseBSDF {
    pub fn new(albedo: Vector3f) -> Self {
        Self {
            albedo,
        }
    }

    pub fn albedo(&self) -> Vector3f {
        self.albedo
    }
}

impl BSDF for LambertianDiffuseBSDF {
    fn sample(&self,
              wi: &Vector3f,
              normal: &Vector3f,
              rng: &mut dyn RandomStream) -> BSDFSampleRecord {
        let wo = random_direction_in_hemisphere(normal, rng);
        let cos_theta = wo.dot(normal);
        let pdf = sample_cosine_hemisphere_pdf(cos_theta);
        if pdf == 0.0 {
            return BSDFSampleRecord::new(*wi, wo, Vector3f::zeros(), 0.0);
        }

        let lambert_brdf = self.albedo * INV_PI;
        BSDFSampleRecord::new(*wi, wo, lambert_brdf * cos_theta, pdf)
    }

    fn eval(&self,
            _wi: &Vector3f,
            wo: &Vector3f,
            normal: &Vector3f) -> BSDFEvalResult {
        let cos_theta = wo.dot(normal);
        if cos_theta <= 0.0 {
            return BSDFEvalResult::default();
        }

        BSDFEvalResult {
            value: self.albedo * INV_PI * cos_theta,
            pdf: sample_cosine_hemisphere_pdf(cos_theta),
        }
    }
}
