// Copyright @yucwang 2026

use crate::math::constants::Float;

/// Source of independent uniform reals in [0, 1), owned by exactly one path.
pub trait RandomStream {
    fn next_f32(&mut self) -> Float;
}

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Stream for one path vertex, reproducible from (pixel, iteration, bounce).
    pub fn for_path(pixel_index: usize, iteration: u32, depth: u32) -> Self {
        let mut seed = mix64(iteration as u64);
        seed = mix64(seed ^ (pixel_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        seed = mix64(seed ^ (depth as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F));
        Self::new(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }
}

impl RandomStream for LcgRng {
    fn next_f32(&mut self) -> Float {
        // 24 mantissa bits keep the result strictly below 1.
        ((self.next_u32() >> 8) as Float) * (1.0 / 16_777_216.0)
    }
}

/// Replays a fixed list of values, cycling when exhausted. Used for fixtures.
#[cfg(test)]
pub struct FixedStream {
    values: Vec<Float>,
    cursor: usize,
}

#[cfg(test)]
impl FixedStream {
    pub fn new(values: &[Float]) -> Self {
        Self { values: values.to_vec(), cursor: 0 }
    }
}

#[cfg(test)]
impl RandomStream for FixedStream {
    fn next_f32(&mut self) -> Float {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

// splitmix64 finalizer
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
