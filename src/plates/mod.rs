//! Procedural ornament generators.
//!
//! Every generator is a pure function from a parameter struct to a freshly
//! built [`OrnamentResult`](crate::types::OrnamentResult). Out-of-range inputs
//! are clamped through each parameter struct's `normalized()` copy and are
//! never rejected.

mod leaf;
mod plate;
mod radial;
mod square;
mod stem;

pub use leaf::{
    create_leaf_geometry, create_leaf_node, generate_leaf_scene, leaf_to_path, morph_leaf_params,
    LeafGeometry, LeafParams, LeafSettings, LeafShapeParams, MAX_LEAF_RESOLUTION,
};
pub use plate::{generate_plate, PlateParams, MAX_STEM_COUNT};
pub use radial::{
    generate_radial_flow, rotation_stops, snap_polygon_rotation, EdgeDecorationStyle,
    FlowMotif, FlowSettings, NodeDecorationType, MAX_RADIAL_COUNT, MAX_SUB_CENTER_DEPTH,
};
pub use square::{generate_square_scene, SquareSettings};
pub use stem::{create_stem_with_leaves, Side, StemOptions};

/// Upper bound on grid subdivisions for the plate and square generators.
pub const MAX_SUBDIVISIONS: i64 = 64;

pub(crate) fn clamp_int(value: i64, min: i64, max: i64) -> i64 {
    value.max(min).min(max)
}
