use core::ops::{Add, Mul, Neg, Sub};

/// 2D point or direction in world units (or NDC after transformation).
///
/// World space is y-up with the origin at the centre of the configured bounds.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Z component of the 3D cross product; positive when `rhs` turns left of `self`.
    #[inline]
    pub fn cross(self, rhs: Vec2) -> f64 {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Largest per-axis distance to `other`.
    #[inline]
    pub fn max_axis_distance(self, other: Vec2) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    #[inline]
    pub fn to_f32(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_sign_follows_turn_direction() {
        let east = Vec2::new(1.0, 0.0);
        assert!(east.cross(Vec2::new(0.0, 1.0)) > 0.0);
        assert!(east.cross(Vec2::new(0.0, -1.0)) < 0.0);
        assert_eq!(east.cross(Vec2::new(3.0, 0.0)), 0.0);
    }

    #[test]
    fn max_axis_distance_picks_larger_axis() {
        let d = Vec2::new(1.0, 1.0).max_axis_distance(Vec2::new(4.0, -1.0));
        assert_eq!(d, 3.0);
    }
}
