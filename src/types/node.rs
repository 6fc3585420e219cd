//! Ornament scene tree.
//!
//! Every generator returns a freshly built [`OrnamentResult`]. Nodes own their
//! children and their paths outright; paths are authored in the node's local
//! space and only the flattener produces absolute coordinates.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::path::Path;
use super::transform::Transform;

/// Semantic category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Container,
    Axis,
    Stem,
    Leaf,
    Medallion,
    Overlay,
    /// Construction and guide geometry, excludable from rendered output.
    Auxiliary,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Axis => "axis",
            NodeKind::Stem => "stem",
            NodeKind::Leaf => "leaf",
            NodeKind::Medallion => "medallion",
            NodeKind::Overlay => "overlay",
            NodeKind::Auxiliary => "auxiliary",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A descriptive parameter value attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Flag(b) => write!(f, "{}", b),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One element of the ornament tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrnamentNode {
    /// Unique within one tree, not globally.
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Plate this node's construction comes from (provenance only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_origin: Option<u32>,

    /// Step within the plate (provenance only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_in_plate: Option<i64>,

    /// Free-form semantic tag such as `grid` or `medallion-petal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Descriptive metadata; never read by flattening or serialization.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,

    #[serde(default)]
    pub transform: Transform,

    #[serde(default)]
    pub paths: Vec<Path>,

    #[serde(default)]
    pub children: Vec<OrnamentNode>,
}

impl OrnamentNode {
    /// Create an empty node with an identity transform.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            plate_origin: None,
            step_in_plate: None,
            role: None,
            params: BTreeMap::new(),
            transform: Transform::IDENTITY,
            paths: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the semantic role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set plate provenance.
    pub fn with_origin(mut self, plate: u32, step: i64) -> Self {
        self.plate_origin = Some(plate);
        self.step_in_plate = Some(step);
        self
    }

    /// Attach a descriptive parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_path(mut self, path: Path) -> Self {
        self.paths.push(path);
        self
    }

    pub fn with_paths(mut self, paths: impl IntoIterator<Item = Path>) -> Self {
        self.paths.extend(paths);
        self
    }

    pub fn with_child(mut self, child: OrnamentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: OrnamentNode) {
        self.children.push(child);
    }

    /// Push `child` only when present.
    pub fn push_child_opt(&mut self, child: Option<OrnamentNode>) {
        if let Some(child) = child {
            self.children.push(child);
        }
    }

    /// True if the node owns neither paths nor children.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.children.is_empty()
    }

    /// Visit every node in pre-order along with its depth.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a OrnamentNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a OrnamentNode, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count_nodes(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }

    /// Number of paths owned anywhere in this subtree.
    pub fn count_paths(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node, _| count += node.paths.len());
        count
    }

    /// First node in pre-order with the given id.
    pub fn find(&self, id: &str) -> Option<&OrnamentNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// All nodes in pre-order carrying the given role.
    pub fn find_by_role(&self, role: &str) -> Vec<&OrnamentNode> {
        let mut found = Vec::new();
        self.walk(&mut |node, _| {
            if node.role.as_deref() == Some(role) {
                found.push(node);
            }
        });
        found
    }

    /// Indented one-line-per-node outline of the subtree.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node, depth| {
            let role = node.role.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "{:indent$}{} [{}] {} ({} path{}, {} child{})\n",
                "",
                node.id,
                node.kind,
                role,
                node.paths.len(),
                if node.paths.len() == 1 { "" } else { "s" },
                node.children.len(),
                if node.children.len() == 1 { "" } else { "ren" },
                indent = depth * 2,
            ));
        });
        out
    }
}

/// A generated scene: the tree plus advisory viewport bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrnamentResult {
    pub root: OrnamentNode,
    pub bounds: Rect,
}

impl OrnamentResult {
    pub fn new(root: OrnamentNode, bounds: Rect) -> Self {
        Self { root, bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::path::rect_path;
    use pretty_assertions::assert_eq;

    fn sample_tree() -> OrnamentNode {
        OrnamentNode::new("root", NodeKind::Container)
            .with_role("panel")
            .with_path(rect_path(-1.0, -1.0, 2.0, 2.0))
            .with_child(
                OrnamentNode::new("grid", NodeKind::Auxiliary)
                    .with_role("grid")
                    .with_param("subdivisions", 4_i64),
            )
            .with_child(
                OrnamentNode::new("medallion", NodeKind::Medallion)
                    .with_child(OrnamentNode::new("petal", NodeKind::Medallion).with_role("petal"))
                    .with_child(OrnamentNode::new("petal-2", NodeKind::Medallion).with_role("petal")),
            )
    }

    #[test]
    fn test_node_new_defaults() {
        let node = OrnamentNode::new("n", NodeKind::Leaf);

        assert_eq!(node.transform, Transform::IDENTITY);
        assert!(node.is_empty());
        assert!(node.role.is_none());
        assert!(node.params.is_empty());
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = sample_tree();
        let mut ids = Vec::new();
        tree.walk(&mut |node, depth| ids.push((node.id.clone(), depth)));

        assert_eq!(
            ids,
            vec![
                ("root".to_string(), 0),
                ("grid".to_string(), 1),
                ("medallion".to_string(), 1),
                ("petal".to_string(), 2),
                ("petal-2".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_counts_and_find() {
        let tree = sample_tree();

        assert_eq!(tree.count_nodes(), 5);
        assert_eq!(tree.count_paths(), 1);
        assert_eq!(tree.find("petal-2").map(|n| n.kind), Some(NodeKind::Medallion));
        assert!(tree.find("missing").is_none());
        assert_eq!(tree.find_by_role("petal").len(), 2);
    }

    #[test]
    fn test_params_are_ordered() {
        let node = OrnamentNode::new("n", NodeKind::Axis)
            .with_param("zeta", 1.0)
            .with_param("alpha", "x")
            .with_param("flag", true);

        let keys: Vec<&str> = node.params.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "flag", "zeta"]);
    }

    #[test]
    fn test_summary_lines() {
        let summary = sample_tree().summary();
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "root [container] panel (1 path, 2 children)");
        assert_eq!(lines[1], "  grid [auxiliary] grid (0 paths, 0 children)");
        assert_eq!(lines[3], "    petal [medallion] petal (0 paths, 0 children)");
    }

    #[test]
    fn test_node_json_uses_type_key() {
        let node = OrnamentNode::new("n", NodeKind::Auxiliary);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "auxiliary");
        assert_eq!(json["transform"]["scaleX"], 1.0);
    }
}
