//! Leaf outline generator and morpher.
//!
//! A leaf is an outline built by offsetting a curved spine left and right by
//! the profile width at `resolution + 1` stations, plus an open midrib that
//! follows the same spine.

use serde::{Deserialize, Serialize};

use crate::types::{
    clamp, clamp01, close_path, lerp, line_to, morph_leaf, move_to, sample_width_at, LeafProfile,
    NodeKind, OrnamentNode, OrnamentResult, Path, Rect, Vec2, MIN_BOUNDS_EXTENT,
};

use super::clamp_int;

/// Upper bound on outline stations.
pub const MAX_LEAF_RESOLUTION: i64 = 512;

/// Shape parameters for a single leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafShapeParams {
    pub profile: LeafProfile,
    /// Leaf length along the spine.
    pub length: f64,
    /// Maximum half-width multiplier.
    pub max_width: f64,
    /// Midrib curvature; negative bends left, positive bends right.
    pub curvature: f64,
    /// How much to bias toward the profile's base/tip pulls (0..1).
    pub pull_bias: f64,
    /// Number of segments per side.
    pub resolution: i64,
}

impl Default for LeafShapeParams {
    fn default() -> Self {
        Self {
            profile: LeafProfile::ovate(),
            length: 1.0,
            max_width: 0.6,
            curvature: 0.0,
            pull_bias: 0.6,
            resolution: 48,
        }
    }
}

impl LeafShapeParams {
    /// Copy with every field clamped into range.
    pub fn normalized(&self) -> Self {
        Self {
            profile: self.profile.clone(),
            length: self.length,
            max_width: self.max_width,
            curvature: clamp(self.curvature, -0.85, 0.85),
            pull_bias: clamp01(self.pull_bias),
            resolution: clamp_int(self.resolution, 6, MAX_LEAF_RESOLUTION),
        }
    }
}

/// Outline and midrib of one leaf, in leaf-local space (base at the origin,
/// growing along +y).
#[derive(Debug, Clone, PartialEq)]
pub struct LeafGeometry {
    pub outline: Path,
    pub midrib: Path,
}

/// Build the outline and midrib for `params`.
pub fn create_leaf_geometry(params: &LeafShapeParams) -> LeafGeometry {
    let p = params.normalized();
    LeafGeometry {
        outline: build_outline(&p),
        midrib: build_midrib(p.length, p.curvature, p.resolution),
    }
}

/// A leaf node owning the outline and the midrib.
pub fn create_leaf_node(params: &LeafShapeParams) -> OrnamentNode {
    let geometry = create_leaf_geometry(params);

    OrnamentNode::new(format!("leaf-{}", params.profile.id), NodeKind::Leaf)
        .with_origin(2, 2)
        .with_role("leaf-outline")
        .with_param("profile", params.profile.id.as_str())
        .with_param("curvature", params.curvature)
        .with_param("length", params.length)
        .with_param("maxWidth", params.max_width)
        .with_paths([geometry.outline, geometry.midrib])
}

fn build_outline(p: &LeafShapeParams) -> Path {
    let stations = p.resolution as usize;
    let mut left = Vec::with_capacity(stations + 1);
    let mut right = Vec::with_capacity(stations + 1);

    for i in 0..=stations {
        let t = i as f64 / stations as f64;
        let width = sample_width_at(&p.profile, t);
        let pinch = shape_pinch(t, p.profile.base_pull, p.profile.tip_pull, p.pull_bias);
        let half = p.max_width * width * pinch;
        let y = p.length * t;
        let mid = spine_offset(t, p.curvature, p.length);

        left.push(Vec2::new(mid - half, y));
        right.push(Vec2::new(mid + half, y));
    }

    let mut commands = Vec::with_capacity(left.len() + right.len() + 1);
    commands.push(move_to(left[0].x, left[0].y));
    commands.extend(left.iter().skip(1).map(|v| line_to(v.x, v.y)));
    commands.extend(right.iter().rev().map(|v| line_to(v.x, v.y)));
    commands.push(close_path());

    Path::closed(commands)
}

fn build_midrib(length: f64, curvature: f64, resolution: i64) -> Path {
    let stations = resolution as usize;
    let mut commands = Vec::with_capacity(stations + 1);

    commands.push(move_to(spine_offset(0.0, curvature, length), 0.0));
    for i in 1..=stations {
        let t = i as f64 / stations as f64;
        commands.push(line_to(spine_offset(t, curvature, length), length * t));
    }

    Path::open(commands)
}

/// Lateral spine displacement: zero at both ends, largest mid-leaf.
fn spine_offset(t: f64, curvature: f64, length: f64) -> f64 {
    curvature * (t - t * t) * length
}

/// Width attenuation near base and tip, never below 0.1.
fn shape_pinch(t: f64, base_pull: f64, tip_pull: f64, bias: f64) -> f64 {
    let base = 1.0 - (1.0 - clamp01(base_pull)).powf(bias + 0.5) * (1.0 - t) * 0.35;
    let tip = 1.0 - (1.0 - clamp01(tip_pull)).powf(bias + 0.5) * t * 0.55;
    (base * tip).max(0.1)
}

/// Simplified, slider-friendly leaf description used to drive stem leaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeafParams {
    pub length: f64,
    pub width: f64,
    pub tip_sharpness: f64,
    pub base_taper: f64,
    pub asymmetry: f64,
    pub lobes: f64,
    pub serration: f64,
    pub curvature: f64,
}

impl Default for LeafParams {
    fn default() -> Self {
        Self {
            length: 0.4,
            width: 0.2,
            tip_sharpness: 0.5,
            base_taper: 0.5,
            asymmetry: 0.5,
            lobes: 0.0,
            serration: 0.0,
            curvature: 0.2,
        }
    }
}

impl LeafParams {
    /// Pick the built-in profile that best matches these parameters.
    pub fn profile(&self) -> LeafProfile {
        if self.lobes > 0.65 {
            LeafProfile::cordate()
        } else if self.tip_sharpness > 0.6 {
            LeafProfile::lanceolate()
        } else {
            LeafProfile::ovate()
        }
    }

    /// Translate into full shape parameters.
    pub fn to_shape_params(&self) -> LeafShapeParams {
        let curvature = clamp(
            self.curvature + (clamp01(self.asymmetry) - 0.5) * 0.25,
            -0.85,
            0.85,
        );
        let pull_bias = clamp01(0.35 + self.tip_sharpness * 0.4 - self.base_taper * 0.25);

        LeafShapeParams {
            profile: self.profile(),
            length: clamp(self.length, 0.1, 1.5),
            max_width: clamp(self.width, 0.05, 0.8),
            curvature,
            pull_bias,
            resolution: 48 + (clamp01(self.serration) * 24.0).round() as i64,
        }
    }
}

/// Blend every field of `a` toward `b` by `alpha` (clamped to [0, 1]).
pub fn morph_leaf_params(a: &LeafParams, b: &LeafParams, alpha: f64) -> LeafParams {
    let t = clamp01(alpha);
    LeafParams {
        length: lerp(a.length, b.length, t),
        width: lerp(a.width, b.width, t),
        tip_sharpness: lerp(a.tip_sharpness, b.tip_sharpness, t),
        base_taper: lerp(a.base_taper, b.base_taper, t),
        asymmetry: lerp(a.asymmetry, b.asymmetry, t),
        lobes: lerp(a.lobes, b.lobes, t),
        serration: lerp(a.serration, b.serration, t),
        curvature: lerp(a.curvature, b.curvature, t),
    }
}

/// The outline path for a simplified leaf description.
pub fn leaf_to_path(params: &LeafParams) -> Path {
    create_leaf_geometry(&params.to_shape_params()).outline
}

/// Preset-facing settings for the stand-alone leaf generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeafSettings {
    /// Name of a built-in profile.
    pub profile: String,
    /// Optional second built-in profile to blend toward.
    pub morph_to: Option<String>,
    pub morph_alpha: f64,
    pub length: f64,
    pub max_width: f64,
    pub curvature: f64,
    pub pull_bias: f64,
    pub resolution: i64,
}

impl Default for LeafSettings {
    fn default() -> Self {
        Self {
            profile: "ovate".to_string(),
            morph_to: None,
            morph_alpha: 0.0,
            length: 1.0,
            max_width: 0.6,
            curvature: 0.0,
            pull_bias: 0.6,
            resolution: 48,
        }
    }
}

impl LeafSettings {
    /// Copy with every numeric field clamped into range. Unknown profile names
    /// fall back to `ovate`.
    pub fn normalized(&self) -> Self {
        let known = |name: &str| {
            if LeafProfile::builtin(name).is_some() {
                name.to_string()
            } else {
                "ovate".to_string()
            }
        };

        Self {
            profile: known(&self.profile),
            morph_to: self.morph_to.as_deref().map(known),
            morph_alpha: clamp01(self.morph_alpha),
            length: clamp(self.length, 0.1, 4.0),
            max_width: clamp(self.max_width, 0.01, 2.0),
            curvature: clamp(self.curvature, -0.85, 0.85),
            pull_bias: clamp01(self.pull_bias),
            resolution: clamp_int(self.resolution, 6, MAX_LEAF_RESOLUTION),
        }
    }

    /// Resolve the (possibly blended) profile.
    pub fn resolve_profile(&self) -> LeafProfile {
        let base = LeafProfile::builtin(&self.profile).unwrap_or_default();
        match self.morph_to.as_deref().and_then(LeafProfile::builtin) {
            Some(target) => morph_leaf(&base, &target, self.morph_alpha),
            None => base,
        }
    }
}

/// Generate a single-leaf scene.
///
/// The leaf grows from the origin along +y. Bounds enclose the widest possible
/// outline plus the spine bend, with a small margin.
pub fn generate_leaf_scene(settings: &LeafSettings) -> OrnamentResult {
    let s = settings.normalized();
    let shape = LeafShapeParams {
        profile: s.resolve_profile(),
        length: s.length,
        max_width: s.max_width,
        curvature: s.curvature,
        pull_bias: s.pull_bias,
        resolution: s.resolution,
    };

    let max_profile_width = shape
        .profile
        .widths
        .iter()
        .map(|stop| stop.width)
        .fold(0.0_f64, f64::max);
    let bend = s.curvature.abs() * 0.25 * s.length;
    let half_width = s.max_width * max_profile_width + bend;
    let margin = s.length * 0.05;

    let bounds = Rect::new(
        -half_width - margin,
        -margin,
        (half_width + margin) * 2.0,
        s.length + margin * 2.0,
    )
    .non_degenerate(MIN_BOUNDS_EXTENT);

    let root = create_leaf_node(&shape);
    log::debug!(
        "generated leaf '{}' with {} stations",
        shape.profile.id,
        shape.resolution + 1
    );

    OrnamentResult::new(root, bounds)
}
