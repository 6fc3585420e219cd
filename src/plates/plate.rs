//! Grid, axes, radiating stems and a central medallion on a square panel.
//!
//! The plate is built in normalized `[-1, 1]²` coordinates; the root
//! transform maps that square onto the requested `width × height`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{
    clamp, clamp01, ellipse_path, rect_path, NodeKind, OrnamentNode, OrnamentResult, Path, Rect,
    Transform, Vec2, MIN_BOUNDS_EXTENT,
};

use super::{clamp_int, MAX_SUBDIVISIONS};
use super::leaf::LeafParams;
use super::stem::{create_stem_with_leaves, Side, StemOptions};

/// Upper bound on radiating stems.
pub const MAX_STEM_COUNT: i64 = 32;

/// Plate generator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlateParams {
    /// Grid subdivisions (2..64).
    pub subdivisions: i64,
    /// Construction progress. 0 is the panel only, 1 adds the grid, 2 the axes,
    /// 3 and up the stems and medallion.
    pub step: i64,
    /// Medallion radius relative to the half-panel (0.1..0.9).
    pub medallion_radius: f64,
    /// Interpolated axis pairs between the cardinals and diagonals (0..3).
    pub secondary_axis_pairs: i64,
    /// Radiating stems (0..32).
    pub stem_count: i64,
    /// Stem length relative to the half-panel (0.2..1.35).
    pub stem_length: f64,
    /// 0 is perfectly mirrored.
    pub symmetry_bias: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for PlateParams {
    fn default() -> Self {
        Self {
            subdivisions: 4,
            step: 3,
            medallion_radius: 0.4,
            secondary_axis_pairs: 1,
            stem_count: 4,
            stem_length: 0.85,
            symmetry_bias: 0.0,
            width: 800.0,
            height: 800.0,
        }
    }
}

impl PlateParams {
    /// Copy with every field clamped into range.
    pub fn normalized(&self) -> Self {
        Self {
            subdivisions: clamp_int(self.subdivisions, 2, MAX_SUBDIVISIONS),
            step: self.step.max(0),
            medallion_radius: clamp(self.medallion_radius, 0.1, 0.9),
            secondary_axis_pairs: clamp_int(self.secondary_axis_pairs, 0, 3),
            stem_count: clamp_int(self.stem_count, 0, MAX_STEM_COUNT),
            stem_length: clamp(self.stem_length, 0.2, 1.35),
            symmetry_bias: clamp01(self.symmetry_bias),
            width: self.width.max(MIN_BOUNDS_EXTENT),
            height: self.height.max(MIN_BOUNDS_EXTENT),
        }
    }
}

/// Generate a plate scene.
///
/// Fails only if an internally built stem axis is malformed.
pub fn generate_plate(params: &PlateParams) -> Result<OrnamentResult> {
    let p = params.normalized();

    let mut root = OrnamentNode::new("root-container", NodeKind::Container)
        .with_origin(1, p.step)
        .with_role("panel")
        .with_path(rect_path(-1.0, -1.0, 2.0, 2.0))
        .with_transform(
            Transform::translate(p.width / 2.0, p.height / 2.0)
                .with_scale(p.width / 2.0, p.height / 2.0),
        );

    if p.step >= 1 {
        root.push_child(grid_node(p.subdivisions));
    }

    if p.step >= 2 {
        root.push_child(diagonal_axes_node(p.symmetry_bias));
        root.push_child_opt(secondary_axes_node(p.secondary_axis_pairs, p.symmetry_bias));
    }

    if p.step >= 3 {
        root.push_child_opt(stems_node(p.stem_count, p.stem_length, p.symmetry_bias)?);
        root.push_child(medallion_node(p.medallion_radius));
    }

    log::debug!(
        "generated plate step {} with {} nodes",
        p.step,
        root.count_nodes()
    );

    Ok(OrnamentResult::new(
        root,
        Rect::new(0.0, 0.0, p.width, p.height).non_degenerate(MIN_BOUNDS_EXTENT),
    ))
}

fn grid_node(subdivisions: i64) -> OrnamentNode {
    let mut node = OrnamentNode::new("grid", NodeKind::Auxiliary)
        .with_origin(1, 1)
        .with_role("grid")
        .with_param("subdivisions", subdivisions);

    for i in 1..subdivisions {
        let t = -1.0 + (2 * i) as f64 / subdivisions as f64;
        node.paths.push(Path::segment(Vec2::new(t, -1.0), Vec2::new(t, 1.0)));
        node.paths.push(Path::segment(Vec2::new(-1.0, t), Vec2::new(1.0, t)));
    }

    node
}

fn diagonal_axes_node(symmetry_bias: f64) -> OrnamentNode {
    let twist = symmetry_bias * (PI / 14.0);

    OrnamentNode::new("axes-diagonal", NodeKind::Axis)
        .with_origin(1, 2)
        .with_role("diagonal-axis")
        .with_param("symmetryBias", symmetry_bias)
        .with_path(axis_path(PI / 4.0 + twist, 1.05))
        .with_path(axis_path(3.0 * PI / 4.0 - twist, 1.05))
}

fn secondary_axes_node(pairs: i64, symmetry_bias: f64) -> Option<OrnamentNode> {
    if pairs <= 0 {
        return None;
    }

    let skew = (PI / 32.0) * symmetry_bias;
    let mut node = OrnamentNode::new("axes-secondary", NodeKind::Axis)
        .with_origin(1, 2)
        .with_role("secondary-axis")
        .with_param("pairs", pairs)
        .with_param("symmetryBias", symmetry_bias);

    for i in 0..pairs {
        let offset = (i + 1) as f64 / (pairs + 1) as f64 * (PI / 4.0);
        node.paths.push(axis_path(offset + skew, 0.98));
        node.paths.push(axis_path(offset + PI / 2.0 - skew, 0.98));
    }

    Some(node)
}

fn stems_node(count: i64, stem_length: f64, symmetry_bias: f64) -> Result<Option<OrnamentNode>> {
    if count <= 0 {
        return Ok(None);
    }

    let mut node = OrnamentNode::new("radiating-stems", NodeKind::Stem)
        .with_origin(1, 3)
        .with_role("medallion-stem")
        .with_param("count", count)
        .with_param("stemLength", stem_length)
        .with_param("symmetryBias", symmetry_bias);

    for i in 0..count {
        let alternating = if i % 2 == 0 { -1.0 } else { 1.0 };
        let angle = 2.0 * PI * i as f64 / count as f64 + alternating * symmetry_bias * 0.2;
        let jitter = clamp(
            1.0 - symmetry_bias * 0.25 + alternating * symmetry_bias * 0.15,
            0.35,
            1.2,
        );
        let radius = stem_length * jitter;

        let axis = OrnamentNode::new(format!("stem-axis-{}", i), NodeKind::Axis)
            .with_origin(1, 3)
            .with_role("stem-axis")
            .with_param("angle", angle)
            .with_param("radius", radius)
            .with_path(Path::segment(Vec2::ZERO, Vec2::from_angle(angle) * radius));

        let reach = clamp01(radius);
        let leaf_count = (3.0 + reach * 5.0).round().max(3.0) as usize;
        let leaf_a = stem_leaf_params(reach, symmetry_bias, alternating, false);
        let leaf_b = stem_leaf_params(reach, symmetry_bias, alternating, true);

        let curve_bias = clamp01(0.25 + reach * 0.5 + symmetry_bias * 0.25);
        let curve_variation = ((i % 3) - 1) as f64 * 0.08;

        let options = StemOptions {
            curve_amount: clamp01(curve_bias + curve_variation),
            side: if alternating >= 0.0 { Side::Right } else { Side::Left },
            leaf_offset: 0.035 + reach * 0.05,
        };

        node.push_child(create_stem_with_leaves(
            &format!("radiating-stem-{}", i),
            &axis,
            &leaf_a,
            &leaf_b,
            leaf_count,
            &options,
        )?);
    }

    Ok(Some(node))
}

/// Leaf shape for one end of a radiating stem. The tip leaves are longer,
/// sharper and more lobed than the base leaves.
fn stem_leaf_params(reach: f64, symmetry_bias: f64, side: f64, tip: bool) -> LeafParams {
    let (length, width, curvature) = if tip {
        (0.28, 0.12, -0.05)
    } else {
        (0.18, 0.09, -0.12)
    };

    LeafParams {
        length: clamp(length + reach * 0.45, 0.12, 0.95),
        width: clamp(width + reach * 0.25, 0.05, 0.4),
        tip_sharpness: clamp01(if tip { 0.55 } else { 0.4 } + symmetry_bias * 0.3),
        base_taper: clamp01(if tip { 0.35 } else { 0.6 } + symmetry_bias * 0.15),
        asymmetry: clamp01(0.45 + side * 0.15 * symmetry_bias),
        lobes: clamp01(if tip { 0.25 } else { 0.1 } + reach * 0.4),
        serration: clamp01(if tip { 0.3 } else { 0.12 } + symmetry_bias * 0.35),
        curvature: clamp(curvature - side * 0.25 + symmetry_bias * 0.2, -0.75, 0.75),
    }
}

fn medallion_node(radius: f64) -> OrnamentNode {
    let circle = radius * 0.55;
    let mut node = OrnamentNode::new("medallion", NodeKind::Medallion)
        .with_origin(1, 3)
        .with_role("central-medallion")
        .with_param("radius", radius)
        .with_path(ellipse_path(circle, circle));

    let arms = [
        ("right", 0.0),
        ("top", PI / 2.0),
        ("left", PI),
        ("bottom", 3.0 * PI / 2.0),
    ];

    for (arm, angle) in arms {
        let offset = Vec2::from_angle(angle) * radius;
        node.push_child(
            OrnamentNode::new(format!("medallion-petal-{}", arm), NodeKind::Medallion)
                .with_origin(1, 3)
                .with_role("medallion-petal")
                .with_param("arm", arm)
                .with_transform(Transform::placed(offset.x, offset.y, angle))
                .with_path(ellipse_path(radius * 0.75, radius * 0.35)),
        );
    }

    node
}

/// Axis through the origin at `angle`, clipped to the square of half-size
/// `reach`.
fn axis_path(angle: f64, reach: f64) -> Path {
    let dir = Vec2::from_angle(angle);
    let denom = dir.x.abs().max(dir.y.abs());
    let limit = reach / if denom == 0.0 { 1.0 } else { denom };
    Path::segment(dir * -limit, dir * limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scenario() -> PlateParams {
        PlateParams {
            subdivisions: 4,
            step: 3,
            medallion_radius: 0.4,
            ..Default::default()
        }
    }

    #[test]
    fn test_step_zero_is_panel_only() {
        let result = generate_plate(&PlateParams {
            step: 0,
            ..Default::default()
        })
        .unwrap();

        assert!(result.root.children.is_empty());
        assert_eq!(result.root.paths.len(), 1);
        assert_eq!(result.root.role.as_deref(), Some("panel"));
    }

    #[test]
    fn test_step_three_structure() {
        let result = generate_plate(&scenario()).unwrap();
        let ids: Vec<&str> = result.root.children.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "grid",
                "axes-diagonal",
                "axes-secondary",
                "radiating-stems",
                "medallion"
            ]
        );

        let grid = result.root.find("grid").unwrap();
        assert_eq!(grid.kind, NodeKind::Auxiliary);
        // Three interior lines in each direction
        assert_eq!(grid.paths.len(), 6);

        assert_eq!(result.root.find("axes-diagonal").unwrap().paths.len(), 2);
    }

    #[test]
    fn test_medallion_petals() {
        let result = generate_plate(&scenario()).unwrap();
        let medallion = result.root.find("medallion").unwrap();

        assert_eq!(medallion.children.len(), 4);
        let rotations: Vec<f64> = medallion
            .children
            .iter()
            .map(|c| c.transform.rotation)
            .collect();
        assert_eq!(rotations, vec![0.0, PI / 2.0, PI, 3.0 * PI / 2.0]);

        let right = &medallion.children[0];
        assert_eq!(right.id, "medallion-petal-right");
        assert!((right.transform.tx - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_stems_carry_leaves() {
        let result = generate_plate(&scenario()).unwrap();
        let stems = result.root.find("radiating-stems").unwrap();

        assert_eq!(stems.children.len(), 4);
        // Radius 0.85 gives round(3 + 4.25) = 7 leaves
        for stem in &stems.children {
            assert_eq!(stem.kind, NodeKind::Stem);
            assert_eq!(stem.children.len(), 7);
        }
        assert!(result.root.find("radiating-stem-3-leaf-7").is_some());
    }

    #[test]
    fn test_root_transform_maps_panel() {
        let result = generate_plate(&PlateParams {
            width: 400.0,
            height: 200.0,
            ..scenario()
        })
        .unwrap();
        let m = result.root.transform.to_matrix();

        assert_eq!(m.apply(Vec2::new(-1.0, -1.0)), Vec2::new(0.0, 0.0));
        assert_eq!(m.apply(Vec2::new(1.0, 1.0)), Vec2::new(400.0, 200.0));
        assert_eq!(result.bounds, Rect::new(0.0, 0.0, 400.0, 200.0));
    }

    #[test]
    fn test_params_clamped() {
        let p = PlateParams {
            subdivisions: 0,
            step: -4,
            medallion_radius: 5.0,
            secondary_axis_pairs: 9,
            stem_count: -1,
            stem_length: 0.0,
            symmetry_bias: 2.0,
            width: 800.0,
            height: 800.0,
        }
        .normalized();

        assert_eq!(p.subdivisions, 2);
        assert_eq!(p.step, 0);
        assert_eq!(p.medallion_radius, 0.9);
        assert_eq!(p.secondary_axis_pairs, 3);
        assert_eq!(p.stem_count, 0);
        assert_eq!(p.stem_length, 0.2);
        assert_eq!(p.symmetry_bias, 1.0);
    }

    #[test]
    fn test_counts_capped() {
        let p = PlateParams {
            subdivisions: 200_000,
            stem_count: 5_000,
            ..Default::default()
        };
        assert_eq!(p.normalized().subdivisions, MAX_SUBDIVISIONS);
        assert_eq!(p.normalized().stem_count, MAX_STEM_COUNT);

        let result = generate_plate(&p).unwrap();
        let grid = result.root.find("grid").unwrap();
        assert_eq!(grid.paths.len(), 2 * (MAX_SUBDIVISIONS as usize - 1));
        assert_eq!(
            result.root.find("radiating-stems").unwrap().children.len(),
            MAX_STEM_COUNT as usize
        );
    }

    #[test]
    fn test_no_secondary_axes_or_stems() {
        let result = generate_plate(&PlateParams {
            secondary_axis_pairs: 0,
            stem_count: 0,
            ..scenario()
        })
        .unwrap();

        assert!(result.root.find("axes-secondary").is_none());
        assert!(result.root.find("radiating-stems").is_none());
        assert!(result.root.find("medallion").is_some());
    }

    #[test]
    fn test_axis_path_clipped_to_square() {
        let path = axis_path(PI / 4.0, 1.0);
        let end = path.commands[1].end_point().unwrap();

        assert!((end.x - 1.0).abs() < 1e-12);
        assert!((end.y - 1.0).abs() < 1e-12);
    }
}
