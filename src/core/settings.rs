// Copyright @yucwang 2026

use crate::materials::selection::{PriorityPolicy, SelectionPolicy, WeightedPolicy};
use crate::math::constants::{Float, RAY_BIAS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Priority,
    Weighted,
}

impl SelectionMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "priority" => Some(SelectionMode::Priority),
            "weighted" => Some(SelectionMode::Weighted),
            _ => None,
        }
    }

    pub fn policy(&self) -> Box<dyn SelectionPolicy> {
        match self {
            SelectionMode::Priority => Box::new(PriorityPolicy),
            SelectionMode::Weighted => Box::new(WeightedPolicy),
        }
    }
}

/// Knobs for the shading core, usually read with `load_settings`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingSettings {
    pub ray_bias: Float,
    pub selection: SelectionMode,
    pub max_depth: u32,
    pub seed: u64,
}

impl Default for ShadingSettings {
    fn default() -> Self {
        Self {
            ray_bias: RAY_BIAS,
            selection: SelectionMode::Priority,
            max_depth: 8,
            seed: 0,
        }
    }
}
