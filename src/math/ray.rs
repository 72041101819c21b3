// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f) -> Self {
        Self { origin: o, dir: d.normalize() }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    /// Spawn a ray leaving `p`, pushed off the surface by `bias` along `offset_dir`.
    pub fn spawn(p: Vector3f, offset_dir: Vector3f, bias: Float, d: Vector3f) -> Self {
        Self::new(p + offset_dir * bias, d)
    }
}

/* Tests for Ray */
