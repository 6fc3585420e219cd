//! Radial flow generator.
//!
//! A base circle divided by a polygon and its radials, with two layers:
//! the structural layer (circle, cross, polygon, radial guides, recursive
//! sub-centers) and the ornament layer (push/pull motifs, node and edge
//! decorations, line diamonds). Each layer can be switched off as a whole.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::types::{
    clamp, clamp01, close_path, ellipse_path, line_to, move_to, quad_to, rect_path, NodeKind,
    OrnamentNode, OrnamentResult, Path, Rect, Transform, Vec2,
};

use super::clamp_int;

/// Upper bound on radial lines.
pub const MAX_RADIAL_COUNT: i64 = 96;

/// Upper bound on sub-center recursion.
pub const MAX_SUB_CENTER_DEPTH: i64 = 4;

/// Smallest half-extent of the generated bounds.
const MIN_EXTENT: f64 = 1.6;

/// Radius multiplier applied at each sub-center level.
const SUB_CENTER_SHRINK: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowMotif {
    #[default]
    Square,
    Diamond,
    Lobe,
    Pyramid,
}

impl FlowMotif {
    pub fn name(&self) -> &'static str {
        match self {
            FlowMotif::Square => "square",
            FlowMotif::Diamond => "diamond",
            FlowMotif::Lobe => "lobe",
            FlowMotif::Pyramid => "pyramid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeDecorationType {
    #[default]
    None,
    Circle,
    Square,
    Petal,
    Custom,
}

impl NodeDecorationType {
    pub fn name(&self) -> &'static str {
        match self {
            NodeDecorationType::None => "none",
            NodeDecorationType::Circle => "circle",
            NodeDecorationType::Square => "square",
            NodeDecorationType::Petal => "petal",
            NodeDecorationType::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDecorationStyle {
    #[default]
    Straight,
    Arched,
    Double,
}

impl EdgeDecorationStyle {
    pub fn name(&self) -> &'static str {
        match self {
            EdgeDecorationStyle::Straight => "straight",
            EdgeDecorationStyle::Arched => "arched",
            EdgeDecorationStyle::Double => "double",
        }
    }
}

/// Radial flow parameters. Toggles default to off except the two layer
/// switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowSettings {
    pub show_base_circle: bool,
    pub show_cross: bool,
    pub show_polygon: bool,
    pub show_radials: bool,
    /// Relative to the `[-1, 1]` canvas.
    pub circle_radius: f64,
    pub polygon_sides: i64,
    /// Degrees.
    pub polygon_rotation: f64,
    /// Snap `polygon_rotation` to the nearest axis-aligned stop.
    pub snap_rotation: bool,
    pub radial_multiplier: i64,
    pub enable_push: bool,
    pub push_amount: f64,
    pub push_motif: FlowMotif,
    pub enable_pull: bool,
    pub pull_amount: f64,
    pub sub_center_depth: i64,
    /// Sub-center radius relative to the base circle.
    pub sub_center_radius: f64,
    pub sub_center_sides: i64,
    pub radiate_sub_centers: bool,
    pub node_decoration_type: NodeDecorationType,
    pub node_size: f64,
    pub edge_decoration_style: EdgeDecorationStyle,
    pub edge_bulge: f64,
    pub edge_repeat: i64,
    /// Rendering hint, carried on the root node.
    pub line_weight: f64,
    pub show_structural_layer: bool,
    pub show_ornament_layer: bool,
    pub line_diamonds_enabled: bool,
    pub line_diamond_width: f64,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            show_base_circle: false,
            show_cross: false,
            show_polygon: false,
            show_radials: false,
            circle_radius: 0.65,
            polygon_sides: 6,
            polygon_rotation: 0.0,
            snap_rotation: false,
            radial_multiplier: 1,
            enable_push: false,
            push_amount: 0.0,
            push_motif: FlowMotif::Square,
            enable_pull: false,
            pull_amount: 0.0,
            sub_center_depth: 0,
            sub_center_radius: 0.35,
            sub_center_sides: 4,
            radiate_sub_centers: false,
            node_decoration_type: NodeDecorationType::None,
            node_size: 0.18,
            edge_decoration_style: EdgeDecorationStyle::Straight,
            edge_bulge: 0.3,
            edge_repeat: 0,
            line_weight: 1.4,
            show_structural_layer: true,
            show_ornament_layer: true,
            line_diamonds_enabled: false,
            line_diamond_width: 0.2,
        }
    }
}

impl FlowSettings {
    /// Copy with every numeric field clamped into range, and the rotation
    /// snapped when `snap_rotation` is set.
    pub fn normalized(&self) -> Self {
        let polygon_sides = clamp_int(self.polygon_sides, 3, 18);
        let polygon_rotation = if self.snap_rotation {
            snap_polygon_rotation(self.polygon_rotation, polygon_sides)
        } else {
            self.polygon_rotation
        };

        Self {
            circle_radius: clamp(self.circle_radius, 0.25, 0.98),
            polygon_sides,
            polygon_rotation,
            radial_multiplier: clamp_int(self.radial_multiplier, 1, 4),
            push_amount: clamp01(self.push_amount),
            pull_amount: clamp01(self.pull_amount),
            sub_center_depth: clamp_int(self.sub_center_depth, 0, MAX_SUB_CENTER_DEPTH),
            sub_center_radius: clamp(self.sub_center_radius, 0.05, 0.85),
            sub_center_sides: clamp_int(self.sub_center_sides, 3, 12),
            node_size: clamp(self.node_size, 0.01, 0.6),
            edge_bulge: clamp01(self.edge_bulge),
            edge_repeat: clamp_int(self.edge_repeat, 0, 16),
            line_diamond_width: clamp(self.line_diamond_width, 0.01, 0.8),
            ..self.clone()
        }
    }

    /// `polygon_sides × radial_multiplier`, kept within `[polygon_sides, 96]`.
    pub fn radial_count(&self) -> i64 {
        let s = self.normalized();
        clamp_int(s.polygon_sides * s.radial_multiplier, s.polygon_sides, MAX_RADIAL_COUNT)
    }
}

/// One radial line: its angle, unit direction, left normal and rim point.
#[derive(Debug, Clone, Copy)]
struct Radial {
    angle: f64,
    dir: Vec2,
    normal: Vec2,
    end: Vec2,
}

fn radials(count: i64, rotation: f64, radius: f64) -> Vec<Radial> {
    (0..count)
        .map(|i| {
            let angle = rotation + TAU * i as f64 / count as f64;
            let dir = Vec2::from_angle(angle);
            Radial {
                angle,
                dir,
                normal: dir.perp(),
                end: dir * radius,
            }
        })
        .collect()
}

fn polygon_vertices(radius: f64, sides: i64, rotation: f64) -> Vec<Vec2> {
    (0..sides)
        .map(|i| Vec2::from_angle(rotation + TAU * i as f64 / sides as f64) * radius)
        .collect()
}

/// Generate a radial flow scene.
pub fn generate_radial_flow(settings: &FlowSettings) -> OrnamentResult {
    let s = settings.normalized();
    let radius = s.circle_radius;
    let rotation = s.polygon_rotation.to_radians();
    let radial_count = s.radial_count();
    let rays = radials(radial_count, rotation, radius);
    let vertices = polygon_vertices(radius, s.polygon_sides, rotation);

    let mut root = OrnamentNode::new("radial-flow-root", NodeKind::Container)
        .with_origin(1, 0)
        .with_role("radial-flow")
        .with_param("radialCount", radial_count)
        .with_param("lineWeight", s.line_weight);

    let mut structure = layer_node("flow-structure", "structure-layer", s.show_structural_layer);
    let mut ornament = layer_node("flow-ornament", "ornament-layer", s.show_ornament_layer);

    if s.show_structural_layer {
        if s.show_base_circle {
            structure.paths.push(ellipse_path(radius, radius));
        }
        if s.show_cross {
            structure.push_child(cross_node(radius));
        }
        if s.show_polygon {
            structure.push_child(dividing_polygon_node(&vertices));
        }
        if s.show_radials {
            structure.push_child(radial_guides_node(radius, radial_count, rotation));
        }
        if s.sub_center_depth > 0 {
            structure.push_child_opt(sub_center_group(
                s.sub_center_depth,
                radius * s.sub_center_radius,
                radius,
                radial_count,
                rotation,
                s.sub_center_sides,
                s.radiate_sub_centers,
            ));
        }
    }

    if s.show_ornament_layer {
        if s.enable_push && s.push_amount > 0.0 {
            ornament.push_child(push_motifs_node(&rays, radius, s.push_amount, s.push_motif));
        }
        if s.enable_pull && s.pull_amount > 0.0 {
            ornament.push_child(pull_motifs_node(&rays, radius, s.pull_amount));
        }
        ornament.push_child_opt(node_decorations(s.node_decoration_type, s.node_size, &rays, radius));
        ornament.push_child_opt(edge_decorations(
            s.edge_decoration_style,
            s.edge_repeat,
            s.edge_bulge,
            &rays,
            radius,
            s.node_size,
        ));
        if s.line_diamonds_enabled {
            ornament.push_child_opt(line_diamonds_node(s.line_diamond_width, &vertices));
        }
    }

    if !structure.is_empty() {
        root.push_child(structure);
    }
    if !ornament.is_empty() {
        root.push_child(ornament);
    }

    let extent = compute_extent(&s);
    log::debug!(
        "generated radial flow with {} radials, {} nodes, extent {:.3}",
        radial_count,
        root.count_nodes(),
        extent
    );

    OrnamentResult::new(root, Rect::centered(extent))
}

/// Half-size of the bounds: the largest reach of any enabled feature,
/// never below 1.6.
fn compute_extent(s: &FlowSettings) -> f64 {
    let r = s.circle_radius;
    let diamond_width = if s.line_diamonds_enabled {
        s.line_diamond_width
    } else {
        0.0
    };

    let mut extent = r * (1.1 + s.node_size * 0.8);
    extent = extent.max(r * (1.0 + s.edge_bulge * 0.5));
    extent = extent.max(r * (1.0 + diamond_width));
    extent = extent.max(r * (1.0 + s.push_amount * 0.6));

    if s.sub_center_depth > 0 && s.sub_center_radius > 0.0 {
        let mut offset = r;
        let mut current = r * s.sub_center_radius;
        for _ in 0..s.sub_center_depth {
            offset += current;
            current *= SUB_CENTER_SHRINK;
        }
        extent = extent.max(offset);
    }

    extent.max(MIN_EXTENT)
}

fn layer_node(id: &str, role: &str, enabled: bool) -> OrnamentNode {
    OrnamentNode::new(id, NodeKind::Container)
        .with_origin(1, 0)
        .with_role(role)
        .with_param("enabled", enabled)
}

fn cross_node(radius: f64) -> OrnamentNode {
    let reach = (radius * 1.35).max(radius + 0.2);

    OrnamentNode::new("flow-cross", NodeKind::Axis)
        .with_origin(1, 1)
        .with_role("circle-cross")
        .with_path(Path::segment(Vec2::new(-reach, 0.0), Vec2::new(reach, 0.0)))
        .with_path(Path::segment(Vec2::new(0.0, -reach), Vec2::new(0.0, reach)))
}

fn dividing_polygon_node(vertices: &[Vec2]) -> OrnamentNode {
    OrnamentNode::new("flow-dividing-polygon", NodeKind::Auxiliary)
        .with_origin(1, 1)
        .with_role("dividing-polygon")
        .with_param("sides", vertices.len())
        .with_path(Path::polygon(vertices))
}

fn radial_guides_node(radius: f64, count: i64, rotation: f64) -> OrnamentNode {
    let reach = radius * 1.08;
    OrnamentNode::new("flow-radials", NodeKind::Axis)
        .with_origin(1, 2)
        .with_role("radial-energy")
        .with_param("count", count)
        .with_paths(
            radials(count, rotation, reach)
                .into_iter()
                .map(|ray| Path::segment(Vec2::ZERO, ray.end)),
        )
}

fn push_motifs_node(rays: &[Radial], base_radius: f64, amount: f64, motif: FlowMotif) -> OrnamentNode {
    let size = 0.08 + amount * 0.18;
    let radius = base_radius * (1.0 + amount * 0.45);
    let path = motif_path(motif, size);

    let mut group = OrnamentNode::new("flow-push-motifs", NodeKind::Overlay)
        .with_origin(1, 3)
        .with_role("push-motif")
        .with_param("motif", motif.name());

    for (i, ray) in rays.iter().enumerate() {
        let at = ray.dir * radius;
        group.push_child(
            OrnamentNode::new(format!("push-{}", i), NodeKind::Overlay)
                .with_origin(1, 3)
                .with_role("push-instance")
                .with_param("angle", ray.angle)
                .with_transform(Transform::placed(at.x, at.y, ray.angle + FRAC_PI_2))
                .with_path(path.clone()),
        );
    }

    group
}

fn pull_motifs_node(rays: &[Radial], base_radius: f64, amount: f64) -> OrnamentNode {
    let inner = base_radius * (1.0 - 0.6 * amount);
    let radius = (base_radius + inner) / 2.0;
    let size = 0.06 + amount * 0.16;
    let path = kite_path(size * 0.5, size * 1.4 * 0.5);

    let mut group = OrnamentNode::new("flow-pull-motifs", NodeKind::Overlay)
        .with_origin(1, 3)
        .with_role("pull-motif");

    for (i, ray) in rays.iter().enumerate() {
        let at = ray.dir * radius;
        group.push_child(
            OrnamentNode::new(format!("pull-{}", i), NodeKind::Overlay)
                .with_origin(1, 3)
                .with_role("pull-instance")
                .with_param("angle", ray.angle)
                .with_transform(Transform::placed(at.x, at.y, ray.angle + PI))
                .with_path(path.clone()),
        );
    }

    group
}

fn motif_path(motif: FlowMotif, size: f64) -> Path {
    match motif {
        FlowMotif::Square => rect_path(-size / 2.0, -size / 2.0, size, size),
        FlowMotif::Diamond => kite_path(size * 0.65, size),
        FlowMotif::Lobe => ellipse_path(size * 0.5, size * 0.9),
        FlowMotif::Pyramid => Path::polygon(&[
            Vec2::new(-size * 0.6, size * 0.5),
            Vec2::new(size * 0.6, size * 0.5),
            Vec2::new(0.0, -size * 0.65),
        ]),
    }
}

/// Diamond with half-width `w` and half-height `h`, starting at the top.
fn kite_path(w: f64, h: f64) -> Path {
    Path::polygon(&[
        Vec2::new(0.0, -h),
        Vec2::new(w, 0.0),
        Vec2::new(0.0, h),
        Vec2::new(-w, 0.0),
    ])
}

fn sub_center_group(
    depth: i64,
    radius: f64,
    anchor_radius: f64,
    radial_count: i64,
    rotation: f64,
    sides: i64,
    radiate: bool,
) -> Option<OrnamentNode> {
    if depth <= 0 || radius <= 0.0 {
        return None;
    }

    let mut group = OrnamentNode::new("flow-sub-centers", NodeKind::Container)
        .with_origin(1, 4)
        .with_role("sub-centers")
        .with_param("depth", depth);

    for (i, ray) in radials(radial_count, rotation, anchor_radius).iter().enumerate() {
        group.push_child(sub_center_node(
            format!("sub-center-{}", i),
            depth,
            radius,
            sides,
            radiate,
            Transform::translate(ray.end.x, ray.end.y),
        ));
    }

    Some(group)
}

/// A sub-center ring. `remaining` counts this level; children are spawned
/// while more than one level remains.
fn sub_center_node(
    id: String,
    remaining: i64,
    radius: f64,
    sides: i64,
    radiate: bool,
    transform: Transform,
) -> OrnamentNode {
    let mut node = OrnamentNode::new(id, NodeKind::Container)
        .with_origin(1, MAX_SUB_CENTER_DEPTH - remaining)
        .with_role("sub-center")
        .with_param("radius", radius)
        .with_param("depth", remaining)
        .with_transform(transform)
        .with_path(ellipse_path(radius * 0.4, radius * 0.4));

    if radiate {
        node.push_child(
            OrnamentNode::new("sub-center-radials", NodeKind::Axis)
                .with_origin(1, 4)
                .with_role("sub-center-radial")
                .with_param("sides", sides)
                .with_paths(
                    radials(sides, 0.0, radius)
                        .into_iter()
                        .map(|ray| Path::segment(Vec2::ZERO, ray.end)),
                ),
        );
    }

    if remaining > 1 {
        for (i, ray) in radials(sides, 0.0, radius).iter().enumerate() {
            let child_id = format!("{}-{}", node.id, i);
            node.push_child(sub_center_node(
                child_id,
                remaining - 1,
                radius * SUB_CENTER_SHRINK,
                sides,
                radiate,
                Transform::translate(ray.end.x, ray.end.y),
            ));
        }
    }

    node
}

fn node_decorations(
    kind: NodeDecorationType,
    size_ratio: f64,
    rays: &[Radial],
    circle_radius: f64,
) -> Option<OrnamentNode> {
    if kind == NodeDecorationType::None || size_ratio <= 0.0 || rays.is_empty() {
        return None;
    }

    let size = circle_radius * size_ratio;
    let path = node_decoration_path(kind, size);

    let mut node = OrnamentNode::new("node-decorations", NodeKind::Overlay)
        .with_origin(1, 4)
        .with_role("node-decoration")
        .with_param("type", kind.name())
        .with_param("size", size)
        .with_child(
            OrnamentNode::new("node-center", NodeKind::Overlay)
                .with_origin(1, 4)
                .with_role("node-center")
                .with_path(path.clone()),
        );

    for (i, ray) in rays.iter().enumerate() {
        node.push_child(
            OrnamentNode::new(format!("node-{}", i), NodeKind::Overlay)
                .with_origin(1, 4)
                .with_role("node-ray")
                .with_param("angle", ray.angle)
                .with_transform(Transform::placed(ray.end.x, ray.end.y, ray.angle))
                .with_path(path.clone()),
        );
    }

    Some(node)
}

fn node_decoration_path(kind: NodeDecorationType, size: f64) -> Path {
    match kind {
        NodeDecorationType::None | NodeDecorationType::Circle => {
            ellipse_path(size * 0.5, size * 0.5)
        }
        NodeDecorationType::Square => rect_path(-size / 2.0, -size / 2.0, size, size),
        NodeDecorationType::Petal => ellipse_path(size * 0.35, size * 0.65),
        NodeDecorationType::Custom => {
            let w = size * 0.6;
            let h = size;
            Path::polygon(&[
                Vec2::new(0.0, -h / 2.0),
                Vec2::new(w / 2.0, -h / 4.0),
                Vec2::new(w / 2.0, h / 4.0),
                Vec2::new(0.0, h / 2.0),
                Vec2::new(-w / 2.0, h / 4.0),
                Vec2::new(-w / 2.0, -h / 4.0),
            ])
        }
    }
}

fn edge_decorations(
    style: EdgeDecorationStyle,
    repeats: i64,
    bulge: f64,
    rays: &[Radial],
    circle_radius: f64,
    size_ratio: f64,
) -> Option<OrnamentNode> {
    if style == EdgeDecorationStyle::Straight || repeats <= 0 || rays.is_empty() {
        return None;
    }

    let span = circle_radius * (size_ratio * 0.25).max(0.04);
    let mut node = OrnamentNode::new("edge-ornaments", NodeKind::Overlay)
        .with_origin(1, 4)
        .with_role("edge-decoration")
        .with_param("style", style.name())
        .with_param("repeats", repeats);

    for ray in rays {
        for r in 0..repeats {
            let t = (r + 1) as f64 / (repeats + 1) as f64;
            let base = ray.dir * (circle_radius * t);

            match style {
                EdgeDecorationStyle::Arched => {
                    let lateral = span * (0.8 + r as f64 * 0.05);
                    let start = base - ray.normal * lateral;
                    let end = base + ray.normal * lateral;
                    let control = base + ray.dir * (bulge * lateral * 1.4);
                    node.paths.push(Path::open(vec![
                        move_to(start.x, start.y),
                        quad_to(control.x, control.y, end.x, end.y),
                    ]));
                }
                EdgeDecorationStyle::Double => {
                    let gap = span * (0.4 + bulge * 0.5);
                    let start = base - ray.dir * span;
                    let end = base + ray.dir * span;
                    for offset in [ray.normal * gap, -(ray.normal * gap)] {
                        node.paths.push(Path::segment(start + offset, end + offset));
                    }
                }
                EdgeDecorationStyle::Straight => {}
            }
        }
    }

    if node.paths.is_empty() {
        None
    } else {
        Some(node)
    }
}

fn line_diamonds_node(width_ratio: f64, vertices: &[Vec2]) -> Option<OrnamentNode> {
    if width_ratio <= 0.0 || vertices.len() < 2 {
        return None;
    }

    let mut node = OrnamentNode::new("line-diamonds", NodeKind::Overlay)
        .with_origin(1, 4)
        .with_role("line-diamonds")
        .with_param("widthRatio", width_ratio);

    for (i, &start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % vertices.len()];
        let edge = end - start;
        let length = edge.length();
        if length == 0.0 {
            continue;
        }

        let normal = (edge * (1.0 / length)).perp();
        let mid = start.midpoint(end);
        let offset = normal * (length * width_ratio);

        node.paths.push(Path::closed(vec![
            move_to(start.x, start.y),
            line_to(mid.x + offset.x, mid.y + offset.y),
            line_to(end.x, end.y),
            line_to(mid.x - offset.x, mid.y - offset.y),
            close_path(),
        ]));
    }

    if node.paths.is_empty() {
        None
    } else {
        Some(node)
    }
}

/// Rotations in `[0°, 90°]` that bring one of the polygon's symmetry axes
/// onto a canvas axis. Always contains 0; ascending, rounded to 3 decimals.
pub fn rotation_stops(sides: i64) -> Vec<f64> {
    let sides = sides.max(3);
    let mut stops: Vec<f64> = (0..sides)
        .map(|k| {
            let axis = (k * 180) as f64 / sides as f64;
            let snap = (90.0 - axis % 90.0) % 90.0;
            (snap * 1000.0).round() / 1000.0
        })
        .filter(|angle| *angle <= 90.0)
        .collect();

    stops.push(0.0);
    stops.sort_by(f64::total_cmp);
    stops.dedup();
    stops
}

/// Snap `degrees` to the nearest rotation stop for `sides`, rounded to a
/// whole degree and kept within `[0, 90]`.
pub fn snap_polygon_rotation(degrees: f64, sides: i64) -> f64 {
    let closest = rotation_stops(sides)
        .into_iter()
        .min_by(|a, b| (degrees - a).abs().total_cmp(&(degrees - b).abs()))
        .unwrap_or(degrees);

    clamp(closest.round(), 0.0, 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_circle_only() {
        let settings = FlowSettings {
            circle_radius: 0.72,
            polygon_sides: 6,
            radial_multiplier: 1,
            show_base_circle: true,
            ..Default::default()
        };
        let result = generate_radial_flow(&settings);

        assert_eq!(result.root.children.len(), 1);
        let structure = &result.root.children[0];
        assert_eq!(structure.id, "flow-structure");
        assert_eq!(structure.paths.len(), 1);
        assert_eq!(result.root.count_paths(), 1);
    }

    #[test]
    fn test_empty_layers_are_omitted() {
        let result = generate_radial_flow(&FlowSettings::default());
        assert!(result.root.children.is_empty());
    }

    #[test]
    fn test_polygon_sides_clamped() {
        let low = FlowSettings {
            polygon_sides: 1,
            ..Default::default()
        };
        let high = FlowSettings {
            polygon_sides: 50,
            ..Default::default()
        };

        assert_eq!(low.normalized().polygon_sides, 3);
        assert_eq!(high.normalized().polygon_sides, 18);
    }

    #[test]
    fn test_radial_count() {
        let settings = |sides, mult| FlowSettings {
            polygon_sides: sides,
            radial_multiplier: mult,
            ..Default::default()
        };

        assert_eq!(settings(6, 1).radial_count(), 6);
        assert_eq!(settings(6, 4).radial_count(), 24);
        assert_eq!(settings(18, 4).radial_count(), 72);
        assert_eq!(settings(6, 0).radial_count(), 6);
    }

    #[test]
    fn test_dividing_polygon_is_auxiliary() {
        let result = generate_radial_flow(&FlowSettings {
            show_polygon: true,
            polygon_sides: 5,
            ..Default::default()
        });
        let polygon = result.root.find("flow-dividing-polygon").unwrap();

        assert_eq!(polygon.kind, NodeKind::Auxiliary);
        // Five vertices plus close
        assert_eq!(polygon.paths[0].len(), 6);
    }

    #[test]
    fn test_sub_center_recursion() {
        let result = generate_radial_flow(&FlowSettings {
            sub_center_depth: 2,
            sub_center_sides: 4,
            ..Default::default()
        });
        let group = result.root.find("flow-sub-centers").unwrap();

        assert_eq!(group.children.len(), 6);
        for center in &group.children {
            assert_eq!(center.children.len(), 4);
            assert!(center.children.iter().all(|c| c.children.is_empty()));
        }
        assert_eq!(group.count_nodes(), 1 + 6 * 5);
        assert!(result.root.find("sub-center-5-3").is_some());
    }

    #[test]
    fn test_sub_center_depth_clamped() {
        let settings = FlowSettings {
            sub_center_depth: 99,
            sub_center_sides: 3,
            polygon_sides: 3,
            ..Default::default()
        };
        assert_eq!(settings.normalized().sub_center_depth, MAX_SUB_CENTER_DEPTH);

        let result = generate_radial_flow(&settings);
        let mut deepest = 0;
        result.root.walk(&mut |node, depth| {
            if node.role.as_deref() == Some("sub-center") {
                deepest = deepest.max(depth);
            }
        });
        // root > structure > group > 4 levels of sub-centers
        assert_eq!(deepest, 6);
    }

    #[test]
    fn test_radiating_sub_centers() {
        let result = generate_radial_flow(&FlowSettings {
            sub_center_depth: 1,
            sub_center_sides: 5,
            radiate_sub_centers: true,
            ..Default::default()
        });
        let center = result.root.find("sub-center-0").unwrap();

        assert_eq!(center.children.len(), 1);
        assert_eq!(center.children[0].paths.len(), 5);
    }

    #[test]
    fn test_ornament_layer() {
        let result = generate_radial_flow(&FlowSettings {
            enable_push: true,
            push_amount: 0.5,
            push_motif: FlowMotif::Pyramid,
            enable_pull: true,
            pull_amount: 0.5,
            node_decoration_type: NodeDecorationType::Circle,
            edge_decoration_style: EdgeDecorationStyle::Double,
            edge_repeat: 2,
            line_diamonds_enabled: true,
            ..Default::default()
        });
        let ornament = result.root.find("flow-ornament").unwrap();
        let ids: Vec<&str> = ornament.children.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "flow-push-motifs",
                "flow-pull-motifs",
                "node-decorations",
                "edge-ornaments",
                "line-diamonds"
            ]
        );
        assert_eq!(result.root.find("flow-push-motifs").unwrap().children.len(), 6);
        assert_eq!(result.root.find("node-decorations").unwrap().children.len(), 7);
        assert_eq!(result.root.find("edge-ornaments").unwrap().paths.len(), 24);
        assert_eq!(result.root.find("line-diamonds").unwrap().paths.len(), 6);
    }

    #[test]
    fn test_push_needs_amount() {
        let result = generate_radial_flow(&FlowSettings {
            enable_push: true,
            push_amount: 0.0,
            ..Default::default()
        });
        assert!(result.root.find("flow-push-motifs").is_none());
    }

    #[test]
    fn test_arched_edges() {
        let result = generate_radial_flow(&FlowSettings {
            edge_decoration_style: EdgeDecorationStyle::Arched,
            edge_repeat: 3,
            ..Default::default()
        });
        let edges = result.root.find("edge-ornaments").unwrap();

        assert_eq!(edges.paths.len(), 18);
        assert!(edges
            .paths
            .iter()
            .all(|p| matches!(p.commands[1], crate::types::PathCommand::Quad { .. })));
    }

    #[test]
    fn test_layers_can_be_disabled() {
        let result = generate_radial_flow(&FlowSettings {
            show_base_circle: true,
            show_structural_layer: false,
            node_decoration_type: NodeDecorationType::Square,
            show_ornament_layer: false,
            ..Default::default()
        });
        assert!(result.root.children.is_empty());
    }

    #[test]
    fn test_extent_floor() {
        let result = generate_radial_flow(&FlowSettings::default());
        assert_eq!(result.bounds, Rect::new(-1.6, -1.6, 3.2, 3.2));
    }

    #[test]
    fn test_extent_grows_with_sub_centers() {
        let result = generate_radial_flow(&FlowSettings {
            circle_radius: 0.98,
            sub_center_radius: 0.85,
            sub_center_depth: 4,
            ..Default::default()
        });
        assert!(result.bounds.width > 3.2);
        assert_eq!(result.bounds.x, -result.bounds.width / 2.0);
    }

    #[test]
    fn test_rotation_stops() {
        assert_eq!(rotation_stops(4), vec![0.0, 45.0]);
        assert_eq!(rotation_stops(6), vec![0.0, 30.0, 60.0]);
        assert_eq!(rotation_stops(5), vec![0.0, 18.0, 36.0, 54.0, 72.0]);
    }

    #[test]
    fn test_snap_polygon_rotation() {
        assert_eq!(snap_polygon_rotation(40.0, 6), 30.0);
        assert_eq!(snap_polygon_rotation(50.0, 6), 60.0);
        assert_eq!(snap_polygon_rotation(100.0, 4), 45.0);
        assert_eq!(snap_polygon_rotation(-20.0, 4), 0.0);
    }

    #[test]
    fn test_snap_applied_in_normalize() {
        let settings = FlowSettings {
            polygon_rotation: 28.0,
            snap_rotation: true,
            ..Default::default()
        };
        assert_eq!(settings.normalized().polygon_rotation, 30.0);
    }

    #[test]
    fn test_settings_json_defaults() {
        let settings: FlowSettings =
            serde_json::from_str(r#"{"showBaseCircle": true, "pushMotif": "lobe"}"#).unwrap();

        assert!(settings.show_base_circle);
        assert!(settings.show_structural_layer);
        assert_eq!(settings.push_motif, FlowMotif::Lobe);
        assert_eq!(settings.circle_radius, 0.65);
    }
}
