//! Points, rectangles, and quadratic curve evaluation.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Smallest width or height a generated bounds rectangle may have.
pub const MIN_BOUNDS_EXTENT: f64 = 1e-3;

/// A 2D point or direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Normalize, falling back to a length of 1 for zero vectors so the
    /// result stays finite.
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        let len = if len == 0.0 { 1.0 } else { len };
        Self::new(self.x / len, self.y / len)
    }

    /// Rotate 90° counter-clockwise.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle. Negative sizes collapse to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Square centred on the origin with half-size `extent`.
    pub fn centered(extent: f64) -> Self {
        Self::new(-extent, -extent, extent * 2.0, extent * 2.0)
    }

    /// Grow width and height up to `floor` if they fall below it.
    pub fn non_degenerate(self, floor: f64) -> Self {
        Self {
            width: self.width.max(floor),
            height: self.height.max(floor),
            ..self
        }
    }

    pub fn is_degenerate(&self, floor: f64) -> bool {
        self.width < floor || self.height < floor
    }
}

/// Point on the quadratic Bézier `p0 → c → p1` at `t`.
pub fn quad_point(p0: Vec2, c: Vec2, p1: Vec2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    Vec2::new(
        uu * p0.x + 2.0 * u * t * c.x + tt * p1.x,
        uu * p0.y + 2.0 * u * t * c.y + tt * p1.y,
    )
}

/// Derivative of the quadratic Bézier `p0 → c → p1` at `t`.
pub fn quad_tangent(p0: Vec2, c: Vec2, p1: Vec2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    Vec2::new(
        2.0 * u * (c.x - p0.x) + 2.0 * t * (p1.x - c.x),
        2.0 * u * (c.y - p0.y) + 2.0 * t * (p1.y - c.y),
    )
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

pub(crate) fn clamp01(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}
