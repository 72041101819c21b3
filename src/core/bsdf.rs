// Copyright @yucwang 2023

use crate::core::rng::RandomStream;
use crate::math::constants::{ Float, Vector3f };

// Definitions of types used in BSDF sampling and eval
// processes. `value` is always the cosine-weighted BSDF, so the
// throughput update is `value / pdf` for every lobe.
pub type BSDFValue = Vector3f;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BSDFSampleRecord {
    /// Incoming ray direction (pointing towards the surface).
    pub wi: Vector3f,
    /// Sampled outgoing direction.
    pub wo: Vector3f,
    pub value: BSDFValue,
    pub pdf: Float,
    pub is_delta: bool,
    /// The sampled direction crosses the surface.
    pub transmitted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BSDFEvalResult {
    pub value: BSDFValue,
    pub pdf: Float,
}

impl Default for BSDFSampleRecord {
    fn default() -> Self {
        Self {
            wi: Vector3f::zeros(),
            wo: Vector3f::zeros(),
            value: Vector3f::zeros(),
            pdf: 0.0,
            is_delta: false,
            transmitted: false,
        }
    }
}

impl BSDFSampleRecord {
    pub fn new(wi: Vector3f, wo: Vector3f, value: BSDFValue, pdf: Float) -> Self {
        Self { wi, wo, value, pdf, is_delta: false, transmitted: false }
    }

    pub fn delta(wi: Vector3f, wo: Vector3f, value: BSDFValue, pdf: Float) -> Self {
        Self { wi, wo, value, pdf, is_delta: true, transmitted: false }
    }

    pub fn with_transmission(mut self, transmitted: bool) -> Self {
        self.transmitted = transmitted;
        self
    }

    /// Throughput multiplier `value / pdf`, zero when the density vanishes.
    pub fn weight(&self) -> Vector3f {
        if self.pdf > 0.0 {
            self.value / self.pdf
        } else {
            Vector3f::zeros()
        }
    }
}

impl Default for BSDFEvalResult {
    fn default() -> Self {
        Self {
            value: Vector3f::zeros(),
            pdf: 0.0,
        }
    }
}

/// Scattering behaviour at a single surface point. Directions are in world
/// space; `normal` is the unit surface normal at the hit.
pub trait BSDF: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
    fn sample(&self,
              wi: &Vector3f,
              normal: &Vector3f,
              rng: &mut dyn RandomStream) -> BSDFSampleRecord;
    fn eval(&self,
            wi: &Vector3f,
            wo: &Vector3f,
            normal: &Vector3f) -> BSDFEvalResult;
}
