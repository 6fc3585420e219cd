//! SVG serialization of flattened paths.
//!
//! The document layout is fixed: an optional XML prolog, the `<svg>` root
//! carrying the viewBox and default stroke, one `<g>` group, and one `<path>`
//! per retained flattened path.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SullivanError};
use crate::types::{Colour, OrnamentResult, Paint, PathCommand, Rect};

use super::flatten::{flatten, FlattenedPath};

/// Most decimal places a coordinate is printed with.
pub const MAX_PRECISION: usize = 100;

/// Serializer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgOptions {
    pub stroke: Paint,
    pub fill: Paint,
    pub stroke_width: f64,
    /// Decimal places for path coordinates, capped at [`MAX_PRECISION`].
    pub precision: usize,
    /// Keep paths owned by auxiliary (construction) nodes.
    pub include_construction: bool,
    pub include_xml_declaration: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            stroke: Paint::from(Colour::INK),
            fill: Paint::None,
            stroke_width: 0.01,
            precision: 4,
            include_construction: true,
            include_xml_declaration: false,
            width: None,
            height: None,
        }
    }
}

/// Flatten and serialize a generated scene.
pub fn to_svg(result: &OrnamentResult, options: &SvgOptions) -> String {
    render_svg(&flatten(result), &result.bounds, options)
}

/// Serialize already-flattened paths with `bounds` as the viewBox.
///
/// Auxiliary paths are dropped here when construction lines are excluded.
pub fn render_svg(paths: &[FlattenedPath], bounds: &Rect, options: &SvgOptions) -> String {
    let mut svg = String::new();

    if options.include_xml_declaration {
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" ",
        number(bounds.x),
        number(bounds.y),
        number(bounds.width),
        number(bounds.height)
    );
    if let Some(width) = options.width {
        let _ = write!(svg, "width=\"{}\" ", number(width));
    }
    if let Some(height) = options.height {
        let _ = write!(svg, "height=\"{}\" ", number(height));
    }
    let _ = writeln!(
        svg,
        "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\">",
        options.stroke,
        number(options.stroke_width)
    );
    let _ = writeln!(svg, "  <g fill=\"{}\" stroke=\"{}\">", options.fill, options.stroke);

    let mut written = 0;
    for path in paths {
        if !options.include_construction && path.is_auxiliary() {
            continue;
        }
        let _ = writeln!(svg, "    <path d=\"{}\" />", flattened_path_data(path, options.precision));
        written += 1;
    }

    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");

    log::debug!(
        "serialized {} of {} paths ({} bytes)",
        written,
        paths.len(),
        svg.len()
    );

    svg
}

/// Path data for a flattened path. A path flagged `closed` whose commands do
/// not already end in `Close` gets a trailing `Z`.
fn flattened_path_data(path: &FlattenedPath, precision: usize) -> String {
    let mut d = path_data(&path.commands, precision);
    let ends_closed = path.commands.last().is_some_and(PathCommand::is_close);
    if path.closed && !ends_closed && !d.is_empty() {
        d.push_str(" Z");
    }
    d
}

/// Textual path data: one token group per command, space separated, every
/// coordinate printed with `precision` decimals.
pub fn path_data(commands: &[PathCommand], precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    let fixed = |n: f64| format!("{:.*}", precision, positive_zero(n));

    commands
        .iter()
        .map(|cmd| match cmd {
            PathCommand::Move { p } => format!("M {} {}", fixed(p.x), fixed(p.y)),
            PathCommand::Line { p } => format!("L {} {}", fixed(p.x), fixed(p.y)),
            PathCommand::Quad { c, p } => format!(
                "Q {} {} {} {}",
                fixed(c.x),
                fixed(c.y),
                fixed(p.x),
                fixed(p.y)
            ),
            PathCommand::Cubic { c1, c2, p } => format!(
                "C {} {} {} {} {} {}",
                fixed(c1.x),
                fixed(c1.y),
                fixed(c2.x),
                fixed(c2.y),
                fixed(p.x),
                fixed(p.y)
            ),
            PathCommand::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write a serialized document to disk.
pub fn write_svg(svg: &str, path: &Path) -> Result<()> {
    std::fs::write(path, svg).map_err(|e| SullivanError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write SVG: {}", e),
    })
}

fn number(n: f64) -> String {
    positive_zero(n).to_string()
}

/// Map `-0.0` to `0.0` so it never prints with a sign.
fn positive_zero(n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else {
        n
    }
}
