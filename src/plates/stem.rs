//! Flowing stems with morphing leaves.

use std::f64::consts::FRAC_PI_2;

use crate::error::{Result, SullivanError};
use crate::types::{
    clamp01, move_to, quad_point, quad_tangent, quad_to, NodeKind, OrnamentNode, Path,
    PathCommand, Transform, Vec2,
};

use super::leaf::{leaf_to_path, morph_leaf_params, LeafParams};

/// Which side of the axis a stem bows toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Side::Right => 1.0,
            Side::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StemOptions {
    /// 0 = straight, 1 = strongly curved.
    pub curve_amount: f64,
    pub side: Side,
    /// How far leaves sit away from the stem, in scene units.
    pub leaf_offset: f64,
}

impl Default for StemOptions {
    fn default() -> Self {
        Self {
            curve_amount: 0.4,
            side: Side::Right,
            leaf_offset: 0.04,
        }
    }
}

/// Replace a straight axis with a quadratic stem and hang `leaf_count` leaves
/// along it, morphing from `leaf_a` at the base to `leaf_b` at the tip.
///
/// The axis node must hold exactly one path made of a `Move` followed by a
/// `Line`; any other shape is a contract violation.
pub fn create_stem_with_leaves(
    id: &str,
    axis: &OrnamentNode,
    leaf_a: &LeafParams,
    leaf_b: &LeafParams,
    leaf_count: usize,
    options: &StemOptions,
) -> Result<OrnamentNode> {
    let (p0, p1) = axis_endpoints(axis)?;

    let delta = p1 - p0;
    let length = {
        let len = delta.length();
        if len == 0.0 {
            1.0
        } else {
            len
        }
    };

    let curve_amount = clamp01(options.curve_amount);
    let side = options.side.sign();
    let leaf_offset = options.leaf_offset.max(0.0);

    let unit = delta * (1.0 / length);
    let normal = unit.perp() * side;
    let control = p0.midpoint(p1) + normal * (curve_amount * length / 2.0);

    let mut stem = OrnamentNode::new(id, NodeKind::Stem)
        .with_origin(
            axis.plate_origin.unwrap_or(1),
            axis.step_in_plate.unwrap_or(3),
        )
        .with_role("flowing-stem")
        .with_param("curveAmount", curve_amount)
        .with_param("side", side)
        .with_param("leafCount", leaf_count)
        .with_path(Path::open(vec![
            move_to(p0.x, p0.y),
            quad_to(control.x, control.y, p1.x, p1.y),
        ]));

    for i in 1..=leaf_count {
        let t = i as f64 / (leaf_count + 1) as f64;

        let pos = quad_point(p0, control, p1, t);
        let tangent = quad_tangent(p0, control, p1, t).normalize_or_zero();
        let leaf_normal = tangent.perp() * side;
        let origin = pos + leaf_normal * leaf_offset;
        let rotation = tangent.y.atan2(tangent.x) - FRAC_PI_2;

        let params = morph_leaf_params(leaf_a, leaf_b, t);

        stem.push_child(
            OrnamentNode::new(format!("{}-leaf-{}", id, i), NodeKind::Leaf)
                .with_origin(2, i as i64)
                .with_role("stem-leaf")
                .with_param("t", t)
                .with_transform(Transform::placed(origin.x, origin.y, rotation))
                .with_path(leaf_to_path(&params)),
        );
    }

    Ok(stem)
}

fn axis_endpoints(axis: &OrnamentNode) -> Result<(Vec2, Vec2)> {
    match (axis.paths.as_slice(), axis.paths.first().map(|p| p.commands.as_slice())) {
        ([_], Some([PathCommand::Move { p: start }, PathCommand::Line { p: end }])) => {
            Ok((*start, *end))
        }
        _ => Err(contract(format!(
            "axis '{}' must be a single straight segment (M then L)",
            axis.id
        ))),
    }
}

fn contract(message: String) -> SullivanError {
    SullivanError::Contract {
        message,
        help: Some("Build stem axes with Path::segment".to_string()),
    }
}
