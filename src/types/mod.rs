//! Core domain types for sullivan.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Vec2`, `Rect` - points and bounds
//! - `Path`, `PathCommand` - local-space drawing commands
//! - `Transform`, `Mat2D` - node transforms and their affine matrices
//! - `OrnamentNode`, `OrnamentResult` - the generated scene tree
//! - `LeafProfile` - width profiles for leaf outlines
//! - `Paint` - stroke and fill values for SVG output

mod geometry;
mod node;
mod paint;
mod path;
mod profile;
mod transform;

pub use geometry::{quad_point, quad_tangent, Rect, Vec2, MIN_BOUNDS_EXTENT};
pub(crate) use geometry::{clamp, clamp01, lerp};
pub use node::{NodeKind, OrnamentNode, OrnamentResult, ParamValue};
pub use paint::{Colour, Paint};
pub use path::{
    close_path, cubic_to, ellipse_path, line_to, move_to, quad_to, rect_path, Path, PathCommand,
    KAPPA,
};
pub use profile::{morph_leaf, sample_width_at, LeafProfile, WidthStop};
pub use transform::{Mat2D, Transform};
