//! Three-component vectors for surface geometry.
//!
//! Points on the paper and directions toward the light or viewer share
//! the same representation. Positions are in micrometres; directions are
//! expected to be unit length wherever a function says so.
//!
//! Every operation returns a fresh value. Nothing here keeps scratch state,
//! so the helpers are safe to call from any number of render threads.

use std::ops::{Add, Mul, Neg, Sub};

/// A 3D vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Points and vectors use the same type; the alias documents intent.
pub type Point3 = Vec3;

impl Vec3 {
    /// The zero vector, also the origin of the paper coordinate system.
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    /// Unit vector along +Z, straight up out of the paper.
    pub const UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalize(self) -> Option<Vec3> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(self * (1.0 / len))
    }

    /// Mirror `self` about the normal `n`: `2(n·l)n - l`.
    ///
    /// Both vectors point away from the surface.
    pub fn reflect(self, n: Vec3) -> Vec3 {
        n * (2.0 * n.dot(self)) - self
    }

    /// Transmitted direction of `self` through an interface with normal `n`.
    ///
    /// `ni` is the index on the side `n` points to, `nt` the index behind
    /// the surface. Returns `None` on total internal reflection.
    pub fn refract(self, n: Vec3, ni: f64, nt: f64) -> Option<Vec3> {
        let n_dot_l = n.dot(self);
        let ratio = if n_dot_l > 0.0 { ni / nt } else { nt / ni };
        let sin_t = (n * n_dot_l - self) * ratio;
        let sin_sq = sin_t.dot(sin_t);
        if sin_sq >= 1.0 {
            return None;
        }
        let mut cos_t = (1.0 - sin_sq).sqrt();
        if n_dot_l < 0.0 {
            cos_t = -cos_t;
        }
        Some(sin_t - n * cos_t)
    }

    /// Horizontal (XY-plane) length.
    #[inline]
    pub fn horizontal_length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Bisector of two unit directions, or `None` when they cancel out.
pub fn half_vector(e: Vec3, l: Vec3) -> Option<Vec3> {
    (e + l).normalize()
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}
