//! Local node transforms and the affine matrices they compose into.

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;

/// Translation, rotation (radians) and anisotropic scale, relative to the
/// parent node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Translate to `(tx, ty)` and rotate by `rotation`.
    pub fn placed(tx: f64, ty: f64, rotation: f64) -> Self {
        Self {
            tx,
            ty,
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn to_matrix(&self) -> Mat2D {
        Mat2D::from_transform(self)
    }
}

/// Column-major 2×3 affine matrix: `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Mat2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat2D {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn from_transform(t: &Transform) -> Self {
        let (sin, cos) = t.rotation.sin_cos();
        Self {
            a: cos * t.scale_x,
            b: sin * t.scale_x,
            c: -sin * t.scale_y,
            d: cos * t.scale_y,
            e: t.tx,
            f: t.ty,
        }
    }

    /// `self × other`: `other` is applied first, then `self`.
    pub fn multiply(&self, other: &Mat2D) -> Mat2D {
        Mat2D {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}
