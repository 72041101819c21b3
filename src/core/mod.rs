// Copyright @yucwang 2021

pub mod bsdf;
pub mod computation_node;
pub mod emitter;
pub mod interaction;
pub mod material;
pub mod path;
pub mod rng;
pub mod settings;
pub mod settings_loader;
