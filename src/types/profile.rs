//! Leaf width profiles.
//!
//! A profile is a piecewise-linear function from normalized position along
//! the leaf (0 = base, 1 = tip) to relative half-width, plus two pull terms
//! that pinch the base and sharpen the tip.

use serde::{Deserialize, Serialize};

use super::geometry::{clamp01, lerp};

/// One control point of a width profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthStop {
    pub t: f64,
    pub width: f64,
}

impl WidthStop {
    pub const fn new(t: f64, width: f64) -> Self {
        Self { t, width }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafProfile {
    pub id: String,
    pub widths: Vec<WidthStop>,
    /// How strongly the base pinches inwards (0..1).
    pub base_pull: f64,
    /// How pointy the tip is (0..1).
    pub tip_pull: f64,
}

impl LeafProfile {
    pub fn new(id: impl Into<String>, widths: Vec<WidthStop>, base_pull: f64, tip_pull: f64) -> Self {
        Self {
            id: id.into(),
            widths,
            base_pull,
            tip_pull,
        }
    }

    pub fn ovate() -> Self {
        Self::new(
            "ovate",
            vec![
                WidthStop::new(0.0, 0.15),
                WidthStop::new(0.15, 0.55),
                WidthStop::new(0.45, 0.75),
                WidthStop::new(0.75, 0.5),
                WidthStop::new(1.0, 0.0),
            ],
            0.35,
            0.45,
        )
    }

    pub fn lanceolate() -> Self {
        Self::new(
            "lanceolate",
            vec![
                WidthStop::new(0.0, 0.18),
                WidthStop::new(0.25, 0.48),
                WidthStop::new(0.55, 0.52),
                WidthStop::new(0.85, 0.32),
                WidthStop::new(1.0, 0.0),
            ],
            0.15,
            0.65,
        )
    }

    pub fn cordate() -> Self {
        Self::new(
            "cordate",
            vec![
                WidthStop::new(0.0, 0.22),
                WidthStop::new(0.12, 0.68),
                WidthStop::new(0.35, 0.8),
                WidthStop::new(0.65, 0.58),
                WidthStop::new(1.0, 0.0),
            ],
            0.6,
            0.35,
        )
    }

    /// Look up a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "ovate" => Some(Self::ovate()),
            "lanceolate" => Some(Self::lanceolate()),
            "cordate" => Some(Self::cordate()),
            _ => None,
        }
    }

    /// Names accepted by [`LeafProfile::builtin`].
    pub fn builtin_names() -> &'static [&'static str] {
        &["ovate", "lanceolate", "cordate"]
    }

    /// Width at `t`. See [`sample_width_at`].
    pub fn width_at(&self, t: f64) -> f64 {
        sample_width_at(self, t)
    }
}

impl Default for LeafProfile {
    fn default() -> Self {
        Self::ovate()
    }
}

/// Linearly interpolate the profile width at `t`.
///
/// `t` is clamped to [0, 1]; positions before the first stop or after the
/// last one take that endpoint's width. An empty profile has zero width.
pub fn sample_width_at(profile: &LeafProfile, t: f64) -> f64 {
    let t = clamp01(t);
    let mut points = profile.widths.clone();
    points.sort_by(|a, b| a.t.total_cmp(&b.t));

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };

    if t <= first.t {
        return first.width;
    }
    if t >= last.t {
        return last.width;
    }

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.t && t <= b.t {
            let span = b.t - a.t;
            let local = (t - a.t) / if span == 0.0 { 1.0 } else { span };
            return lerp(a.width, b.width, local);
        }
    }

    last.width
}

/// Blend profile `a` toward `b` by `alpha` (clamped to [0, 1]).
///
/// The result has a stop at every key position of either input (rounded to
/// four decimals, deduplicated, ascending), with widths sampled from both
/// profiles and interpolated. Pull terms are interpolated too.
pub fn morph_leaf(a: &LeafProfile, b: &LeafProfile, alpha: f64) -> LeafProfile {
    let alpha = clamp01(alpha);

    let mut keys: Vec<f64> = a
        .widths
        .iter()
        .chain(&b.widths)
        .map(|stop| round_key(clamp01(stop.t)))
        .collect();
    keys.sort_by(f64::total_cmp);
    keys.dedup();

    let widths = keys
        .into_iter()
        .map(|t| WidthStop::new(t, lerp(sample_width_at(a, t), sample_width_at(b, t), alpha)))
        .collect();

    LeafProfile {
        id: format!("{}-to-{}-{:.2}", a.id, b.id, alpha),
        widths,
        base_pull: lerp(a.base_pull, b.base_pull, alpha),
        tip_pull: lerp(a.tip_pull, b.tip_pull, alpha),
    }
}

fn round_key(t: f64) -> f64 {
    (t * 10_000.0).round() / 10_000.0
}
