//! Square motif studies on a fixed `[-1, 1]²` canvas.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::types::{
    clamp, ellipse_path, rect_path, NodeKind, OrnamentNode, OrnamentResult, Path, Rect, Vec2,
};

use super::{clamp_int, MAX_SUBDIVISIONS};

/// Square motif toggles. Each toggle gates only its own subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SquareSettings {
    pub show_outer_frame: bool,
    pub show_inner_frame: bool,
    /// Inset of the inner frame (0..0.9).
    pub inner_margin: f64,
    pub show_center_cross: bool,
    pub show_diagonals: bool,
    pub show_subdivision_grid: bool,
    pub subdivisions: i64,
    pub show_inscribed_circle: bool,
    /// Square rotated 45° with corners on the frame midlines.
    pub show_diamond_square: bool,
    /// Chords joining adjacent side midpoints.
    pub show_quarter_arcs: bool,
    /// When set, the toggles follow [`SquareSettings::for_step`] instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
}

impl Default for SquareSettings {
    fn default() -> Self {
        Self {
            show_outer_frame: true,
            show_inner_frame: true,
            inner_margin: 0.18,
            show_center_cross: true,
            show_diagonals: true,
            show_subdivision_grid: true,
            subdivisions: 6,
            show_inscribed_circle: true,
            show_diamond_square: true,
            show_quarter_arcs: true,
            step: None,
        }
    }
}

impl SquareSettings {
    /// Toggles for construction step `step`: outer frame from 1, inner frame
    /// from 2, centre cross 3, diagonals 4, inscribed circle 5, diamond 6,
    /// quarter arcs and grid 7.
    pub fn for_step(step: i64) -> Self {
        Self {
            show_outer_frame: step >= 1,
            show_inner_frame: step >= 2,
            show_center_cross: step >= 3,
            show_diagonals: step >= 4,
            show_inscribed_circle: step >= 5,
            show_diamond_square: step >= 6,
            show_quarter_arcs: step >= 7,
            show_subdivision_grid: step >= 7,
            ..Self::default()
        }
    }

    /// Copy with numeric fields clamped and any `step` expanded into toggles.
    pub fn normalized(&self) -> Self {
        let base = match self.step {
            Some(step) => Self {
                inner_margin: self.inner_margin,
                subdivisions: self.subdivisions,
                ..Self::for_step(step)
            },
            None => self.clone(),
        };

        Self {
            inner_margin: clamp(base.inner_margin, 0.0, 0.9),
            subdivisions: clamp_int(base.subdivisions, 2, MAX_SUBDIVISIONS),
            step: None,
            ..base
        }
    }
}

/// Generate a square motif scene.
pub fn generate_square_scene(settings: &SquareSettings) -> OrnamentResult {
    let s = settings.normalized();
    let m = s.inner_margin;

    let mut root = OrnamentNode::new("inorganic-square-root", NodeKind::Container)
        .with_origin(1, 0)
        .with_role("panel");

    if s.show_outer_frame {
        root.paths.push(rect_path(-1.0, -1.0, 2.0, 2.0));
    }

    if s.show_inner_frame {
        let size = 2.0 - 2.0 * m;
        root.paths.push(rect_path(-1.0 + m, -1.0 + m, size, size));
    }

    if s.show_center_cross {
        root.push_child(guide_node(
            "center-cross",
            &[
                ((-1.0, 0.0), (1.0, 0.0)),
                ((0.0, -1.0), (0.0, 1.0)),
            ],
        ));
    }

    if s.show_diagonals {
        root.push_child(guide_node(
            "diagonals",
            &[
                ((-1.0, -1.0), (1.0, 1.0)),
                ((-1.0, 1.0), (1.0, -1.0)),
            ],
        ));
    }

    if s.show_subdivision_grid {
        let n = s.subdivisions;
        let mut grid = OrnamentNode::new("subdivision-grid", NodeKind::Auxiliary)
            .with_origin(1, 0)
            .with_role("grid")
            .with_param("subdivisions", n);

        for i in 1..n {
            let t = -1.0 + (2 * i) as f64 / n as f64;
            grid.paths.push(Path::segment(Vec2::new(t, -1.0), Vec2::new(t, 1.0)));
            grid.paths.push(Path::segment(Vec2::new(-1.0, t), Vec2::new(1.0, t)));
        }

        root.push_child(grid);
    }

    if s.show_inscribed_circle {
        let r = if s.show_inner_frame { 1.0 - m } else { 1.0 };
        root.push_child(
            OrnamentNode::new("inscribed-circle", NodeKind::Auxiliary)
                .with_origin(1, 0)
                .with_role("inscribed-circle")
                .with_param("r", r)
                .with_path(ellipse_path(r, r)),
        );
    }

    if s.show_diamond_square {
        let k = 1.0 / SQRT_2;
        root.push_child(
            OrnamentNode::new("diamond-square", NodeKind::Auxiliary)
                .with_origin(1, 0)
                .with_role("diamond-square")
                .with_path(Path::polygon(&[
                    Vec2::new(0.0, -k),
                    Vec2::new(k, 0.0),
                    Vec2::new(0.0, k),
                    Vec2::new(-k, 0.0),
                ])),
        );
    }

    if s.show_quarter_arcs {
        root.push_child(guide_node(
            "quarter-arcs",
            &[
                ((0.0, -1.0), (1.0, 0.0)),
                ((1.0, 0.0), (0.0, 1.0)),
                ((0.0, 1.0), (-1.0, 0.0)),
                ((-1.0, 0.0), (0.0, -1.0)),
            ],
        ));
    }

    log::trace!("generated square motif with {} paths", root.count_paths());

    OrnamentResult::new(root, Rect::new(-1.0, -1.0, 2.0, 2.0))
}

/// Auxiliary node whose id doubles as its role, owning straight segments.
fn guide_node(id: &str, segments: &[((f64, f64), (f64, f64))]) -> OrnamentNode {
    OrnamentNode::new(id, NodeKind::Auxiliary)
        .with_origin(1, 0)
        .with_role(id)
        .with_paths(
            segments
                .iter()
                .map(|&((ax, ay), (bx, by))| Path::segment(Vec2::new(ax, ay), Vec2::new(bx, by))),
        )
}
