// Copyright @yucwang 2023

pub mod rectangle;
pub mod sphere;
