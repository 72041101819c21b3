// Copyright @yucwang 2023

use crate::math::constants::{ SQRT_OF_ONE_THIRD, Vector3f };

/// Orthonormal frame with `z` aligned to a surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: Vector3f,
    pub y: Vector3f,
    pub z: Vector3f
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            x: Vector3f::new(1.0, 0.0, 0.0),
            y: Vector3f::new(0.0, 1.0, 0.0),
            z: Vector3f::new(0.0, 0.0, 1.0)
        }
    }
}

impl Frame {
    /// Builds the tangent pair by crossing `n` with the first world axis whose
    /// component in `n` is below 1/sqrt(3), so the cross product never degenerates.
    pub fn from_normal(n: &Vector3f) -> Frame {
        let not_normal = if n.x.abs() < SQRT_OF_ONE_THIRD {
            Vector3f::new(1.0, 0.0, 0.0)
        } else if n.y.abs() < SQRT_OF_ONE_THIRD {
            Vector3f::new(0.0, 1.0, 0.0)
        } else {
            Vector3f::new(0.0, 0.0, 1.0)
        };

        let perp1 = n.cross(&not_normal).normalize();
        let perp2 = n.cross(&perp1).normalize();
        Frame {
            x: perp1,
            y: perp2,
            z: *n
        }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        v.x * self.x + v.y * self.y + v.z * self.z
    }
}
