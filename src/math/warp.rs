// Copyright @yucwang 2023

use super::constants::{ INV_PI, TWO_PI, Float, Vector2f, Vector3f };
use super::frame::Frame;
use crate::core::rng::RandomStream;

/// Cosine-weighted direction in the hemisphere around `normal`.
///
/// `u.x` maps to cos(theta) through a square root and `u.y` to the azimuth.
pub fn sample_cosine_hemisphere_around(normal: &Vector3f, u: &Vector2f) -> Vector3f {
    let up: Float = u.x.sqrt();
    let over: Float = (1. - up * up).max(0.).sqrt();
    let around: Float = u.y * TWO_PI;

    let frame = Frame::from_normal(normal);
    up * frame.z + around.cos() * over * frame.x + around.sin() * over * frame.y
}

pub fn sample_cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta.max(0.) * INV_PI
}

/// Draws two values from `rng` (cos(theta) first, azimuth second).
pub fn random_direction_in_hemisphere(normal: &Vector3f, rng: &mut dyn RandomStream) -> Vector3f {
    let u1 = rng.next_f32();
    let u2 = rng.next_f32();
    sample_cosine_hemisphere_around(normal, &Vector2f::new(u1, u2))
}

/// Uniform direction inside the cone of half-angle acos(`cos_theta_max`) around +z.
pub fn sample_uniform_cone(u: &Vector2f, cos_theta_max: Float) -> Vector3f {
    let cos_theta = (1. - u.x) + u.x * cos_theta_max;
    let sin_theta = (1. - cos_theta * cos_theta).max(0.).sqrt();
    let phi = u.y * TWO_PI;
    Vector3f::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}

pub fn sample_uniform_cone_pdf(cos_theta_max: Float) -> Float {
    let solid_angle = TWO_PI * (1. - cos_theta_max);
    if solid_angle > 0. {
        1. / solid_angle
    } else {
        0.
    }
}
