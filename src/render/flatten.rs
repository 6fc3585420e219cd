//! Transform composition and tree flattening.

use crate::types::{Mat2D, NodeKind, OrnamentNode, OrnamentResult, PathCommand};

/// A path in absolute coordinates, tagged with the kind of node that owned it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedPath {
    pub commands: Vec<PathCommand>,
    pub closed: bool,
    pub kind: NodeKind,
}

impl FlattenedPath {
    pub fn is_auxiliary(&self) -> bool {
        self.kind == NodeKind::Auxiliary
    }
}

/// Flatten a generated scene into absolute paths.
///
/// Paths come out in pre-order: a node's own paths before its children's,
/// children in order. Nothing is filtered here.
pub fn flatten(result: &OrnamentResult) -> Vec<FlattenedPath> {
    flatten_node(&result.root, &Mat2D::IDENTITY)
}

/// Flatten `node` under an existing parent matrix.
pub fn flatten_node(node: &OrnamentNode, parent: &Mat2D) -> Vec<FlattenedPath> {
    let mut out = Vec::new();
    flatten_into(node, parent, &mut out);
    log::trace!("flattened '{}' into {} paths", node.id, out.len());
    out
}

fn flatten_into(node: &OrnamentNode, parent: &Mat2D, out: &mut Vec<FlattenedPath>) {
    let combined = parent.multiply(&node.transform.to_matrix());

    for path in &node.paths {
        out.push(FlattenedPath {
            commands: path
                .commands
                .iter()
                .map(|cmd| cmd.map_points(|p| combined.apply(p)))
                .collect(),
            closed: path.closed,
            kind: node.kind,
        });
    }

    for child in &node.children {
        flatten_into(child, &combined, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{close_path, line_to, move_to, rect_path, Path, Rect, Transform, Vec2};
    use pretty_assertions::assert_eq;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_identity_passes_through() {
        let node = OrnamentNode::new("n", NodeKind::Container).with_path(rect_path(0.0, 0.0, 1.0, 1.0));
        let flat = flatten_node(&node, &Mat2D::IDENTITY);

        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].commands, node.paths[0].commands);
        assert!(flat[0].closed);
        assert_eq!(flat[0].kind, NodeKind::Container);
    }

    #[test]
    fn test_nested_transforms_compose() {
        let leaf = OrnamentNode::new("leaf", NodeKind::Leaf)
            .with_transform(Transform::translate(1.0, 0.0))
            .with_path(Path::segment(Vec2::ZERO, Vec2::new(1.0, 0.0)));
        let root = OrnamentNode::new("root", NodeKind::Container)
            .with_transform(Transform::placed(10.0, 0.0, FRAC_PI_2))
            .with_child(leaf);

        let flat = flatten(&OrnamentResult::new(root, Rect::centered(1.0)));
        let start = flat[0].commands[0].end_point().unwrap();
        let end = flat[0].commands[1].end_point().unwrap();

        assert!(approx(start, Vec2::new(10.0, 1.0)));
        assert!(approx(end, Vec2::new(10.0, 2.0)));
        assert_eq!(flat[0].kind, NodeKind::Leaf);
    }

    #[test]
    fn test_order_is_pre_order() {
        let tag = |id: &str, kind| {
            OrnamentNode::new(id, kind).with_path(Path::segment(Vec2::ZERO, Vec2::new(1.0, 1.0)))
        };
        let root = tag("root", NodeKind::Container)
            .with_child(tag("a", NodeKind::Axis).with_child(tag("a1", NodeKind::Auxiliary)))
            .with_child(tag("b", NodeKind::Medallion));

        let kinds: Vec<NodeKind> = flatten_node(&root, &Mat2D::IDENTITY)
            .into_iter()
            .map(|p| p.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                NodeKind::Container,
                NodeKind::Axis,
                NodeKind::Auxiliary,
                NodeKind::Medallion
            ]
        );
    }

    #[test]
    fn test_close_passes_through_and_nothing_filtered() {
        let root = OrnamentNode::new("aux", NodeKind::Auxiliary)
            .with_transform(Transform::translate(5.0, 5.0))
            .with_path(Path::closed(vec![
                move_to(0.0, 0.0),
                line_to(1.0, 0.0),
                close_path(),
            ]));
        let flat = flatten_node(&root, &Mat2D::IDENTITY);

        assert_eq!(flat.len(), 1);
        assert!(flat[0].is_auxiliary());
        assert_eq!(flat[0].commands[0], move_to(5.0, 5.0));
        assert_eq!(flat[0].commands[2], PathCommand::Close);
    }

    #[test]
    fn test_scale_applies_to_control_points() {
        let root = OrnamentNode::new("s", NodeKind::Stem)
            .with_transform(Transform::identity().with_scale(2.0, 3.0))
            .with_path(Path::open(vec![
                move_to(0.0, 0.0),
                crate::types::cubic_to(1.0, 1.0, 2.0, 2.0, 3.0, 3.0),
            ]));
        let flat = flatten_node(&root, &Mat2D::IDENTITY);

        assert_eq!(
            flat[0].commands[1],
            crate::types::cubic_to(2.0, 3.0, 4.0, 6.0, 6.0, 9.0)
        );
    }
}
