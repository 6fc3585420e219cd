//! Rendering module for sullivan.
//!
//! This module flattens ornament trees into absolute paths and serializes
//! them as SVG documents.

mod flatten;
mod svg;
mod viewport;

pub use flatten::{flatten, flatten_node, FlattenedPath};
pub use svg::{path_data, render_svg, to_svg, write_svg, SvgOptions, MAX_PRECISION};
pub use viewport::fit_to_viewport;
