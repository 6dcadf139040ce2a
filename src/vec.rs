//! 2D vector type for vine physics.

use core::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D vector in screen space (+y points down).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new 2D vector.
    pub const fn new(x: f64, y: f64) -> Self { Vec2 { x, y } }

    pub fn dot(self, other: Self) -> f64 { self.x * other.x + self.y * other.y }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> f64 { self.dot(self) }

    pub fn length(self) -> f64 { libm::sqrt(self.length_sq()) }

    pub fn scale(self, s: f64) -> Self { Vec2 { x: self.x * s, y: self.y * s } }

    pub fn distance(self, other: Self) -> f64 { (self - other).length() }

    pub fn distance_sq(self, other: Self) -> f64 { (self - other).length_sq() }

    /// Linear interpolation: `self + (other - self) * t`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self).scale(t)
    }

    /// Rescale to at most `max` length. Zero-length vectors are returned unchanged.
    pub fn clamp_length(self, max: f64) -> Self {
        let len_sq = self.length_sq();
        if len_sq <= max * max || len_sq == 0.0 {
            return self;
        }
        self.scale(max / libm::sqrt(len_sq))
    }

    /// Angle of the vector in radians, measured from +x toward +y.
    pub fn angle(self) -> f64 { libm::atan2(self.y, self.x) }

    pub fn is_finite(self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
