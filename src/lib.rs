//! sullivan - Procedural ornament line art
//!
//! Generators build a tree of ornament nodes (each with local paths and a
//! transform), the tree is flattened into absolute paths, and the paths are
//! serialized as SVG.
//!
//! ```ignore
//! use sullivan::{generate_radial_flow, to_svg, FlowSettings, SvgOptions};
//!
//! let scene = generate_radial_flow(&FlowSettings {
//!     show_base_circle: true,
//!     ..Default::default()
//! });
//! let svg = to_svg(&scene, &SvgOptions::default());
//! ```

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod plates;
pub mod preset;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::{discover, discover_paths, DiscoveryResult, LoadedPreset, Manifest, ScanResult};
pub use error::{Result, SullivanError};
pub use plates::{
    create_leaf_geometry, create_leaf_node, create_stem_with_leaves, generate_leaf_scene,
    generate_plate, generate_radial_flow, generate_square_scene, leaf_to_path, morph_leaf_params,
    rotation_stops, snap_polygon_rotation, FlowSettings, LeafParams, LeafSettings,
    LeafShapeParams, PlateParams, SquareSettings, StemOptions,
};
pub use preset::{GeneratorParams, Preset, PresetFormat};
pub use render::{fit_to_viewport, flatten, path_data, render_svg, to_svg, FlattenedPath, SvgOptions};
pub use types::{
    LeafProfile, Mat2D, NodeKind, OrnamentNode, OrnamentResult, Paint, Path, PathCommand, Rect,
    Transform, Vec2,
};
pub use validation::{validate_preset, Diagnostic, Severity, ValidationResult};
