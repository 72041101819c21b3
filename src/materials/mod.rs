// Copyright @yucwang 2023

pub mod dielectric;
pub mod fresnel;
pub mod lambertian_diffuse;
pub mod selection;
pub mod specular;
pub mod strategy;
