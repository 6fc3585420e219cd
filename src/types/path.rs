//! Path commands and the path builders used by every generator.

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;

/// Control-point factor for approximating a quarter circle with one cubic.
pub const KAPPA: f64 = 0.5522847498307936;

/// A single drawing command. Coordinates are in the owning node's local space
/// until the tree is flattened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathCommand {
    #[serde(rename = "M")]
    Move { p: Vec2 },
    #[serde(rename = "L")]
    Line { p: Vec2 },
    #[serde(rename = "Q")]
    Quad { c: Vec2, p: Vec2 },
    #[serde(rename = "C")]
    Cubic { c1: Vec2, c2: Vec2, p: Vec2 },
    #[serde(rename = "Z")]
    Close,
}

impl PathCommand {
    /// The end point of the command, if it has one.
    pub fn end_point(&self) -> Option<Vec2> {
        match self {
            PathCommand::Move { p }
            | PathCommand::Line { p }
            | PathCommand::Quad { p, .. }
            | PathCommand::Cubic { p, .. } => Some(*p),
            PathCommand::Close => None,
        }
    }

    /// Apply `f` to every point the command carries.
    pub fn map_points(self, mut f: impl FnMut(Vec2) -> Vec2) -> Self {
        match self {
            PathCommand::Move { p } => PathCommand::Move { p: f(p) },
            PathCommand::Line { p } => PathCommand::Line { p: f(p) },
            PathCommand::Quad { c, p } => PathCommand::Quad { c: f(c), p: f(p) },
            PathCommand::Cubic { c1, c2, p } => PathCommand::Cubic {
                c1: f(c1),
                c2: f(c2),
                p: f(p),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }

    pub fn is_close(&self) -> bool {
        matches!(self, PathCommand::Close)
    }
}

/// An ordered command list.
///
/// `closed` marks the contour as filled/closed for the serializer. It is kept
/// separately from any explicit `Close` command; both may be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
    pub closed: bool,
}

impl Path {
    pub fn new(commands: Vec<PathCommand>, closed: bool) -> Self {
        Self { commands, closed }
    }

    /// An open path.
    pub fn open(commands: Vec<PathCommand>) -> Self {
        Self::new(commands, false)
    }

    /// A closed path. The caller supplies the trailing `Close` if wanted.
    pub fn closed(commands: Vec<PathCommand>) -> Self {
        Self::new(commands, true)
    }

    /// Straight segment from `a` to `b`.
    pub fn segment(a: Vec2, b: Vec2) -> Self {
        Self::open(vec![move_to(a.x, a.y), line_to(b.x, b.y)])
    }

    /// Closed polygon through `vertices`.
    pub fn polygon(vertices: &[Vec2]) -> Self {
        let mut commands = Vec::with_capacity(vertices.len() + 1);
        for (index, v) in vertices.iter().enumerate() {
            if index == 0 {
                commands.push(move_to(v.x, v.y));
            } else {
                commands.push(line_to(v.x, v.y));
            }
        }
        commands.push(close_path());
        Self::closed(commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the command list already ends with `Close`.
    pub fn ends_with_close(&self) -> bool {
        self.commands.last().is_some_and(PathCommand::is_close)
    }

    /// Whether the path starts with a `Move`.
    pub fn starts_with_move(&self) -> bool {
        matches!(self.commands.first(), Some(PathCommand::Move { .. }))
    }
}

pub fn move_to(x: f64, y: f64) -> PathCommand {
    PathCommand::Move { p: Vec2::new(x, y) }
}

pub fn line_to(x: f64, y: f64) -> PathCommand {
    PathCommand::Line { p: Vec2::new(x, y) }
}

pub fn quad_to(cx: f64, cy: f64, x: f64, y: f64) -> PathCommand {
    PathCommand::Quad {
        c: Vec2::new(cx, cy),
        p: Vec2::new(x, y),
    }
}

pub fn cubic_to(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> PathCommand {
    PathCommand::Cubic {
        c1: Vec2::new(x1, y1),
        c2: Vec2::new(x2, y2),
        p: Vec2::new(x, y),
    }
}

pub fn close_path() -> PathCommand {
    PathCommand::Close
}

/// Axis-aligned rectangle starting at `(x, y)`.
pub fn rect_path(x: f64, y: f64, width: f64, height: f64) -> Path {
    Path::closed(vec![
        move_to(x, y),
        line_to(x + width, y),
        line_to(x + width, y + height),
        line_to(x, y + height),
        close_path(),
    ])
}

/// Origin-centred ellipse built from four cubic segments, starting at `(rx, 0)`.
pub fn ellipse_path(rx: f64, ry: f64) -> Path {
    let kx = KAPPA * rx;
    let ky = KAPPA * ry;

    Path::closed(vec![
        move_to(rx, 0.0),
        cubic_to(rx, ky, kx, ry, 0.0, ry),
        cubic_to(-kx, ry, -rx, ky, -rx, 0.0),
        cubic_to(-rx, -ky, -kx, -ry, 0.0, -ry),
        cubic_to(kx, -ry, rx, -ky, rx, 0.0),
        close_path(),
    ])
}
