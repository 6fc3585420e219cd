//! Fitting normalized scenes into a pixel viewport.

use crate::types::{OrnamentResult, Rect, Transform, MIN_BOUNDS_EXTENT};

/// Map the scene's `[-1, 1]²` space onto `width × height`.
///
/// The root transform is replaced (not composed) and the bounds become
/// `{0, 0, width, height}`. Scenes whose geometry reaches beyond the unit
/// square will spill past the viewport.
pub fn fit_to_viewport(result: OrnamentResult, width: f64, height: f64) -> OrnamentResult {
    let width = width.max(MIN_BOUNDS_EXTENT);
    let height = height.max(MIN_BOUNDS_EXTENT);

    let mut root = result.root;
    root.transform =
        Transform::translate(width / 2.0, height / 2.0).with_scale(width / 2.0, height / 2.0);

    OrnamentResult::new(root, Rect::new(0.0, 0.0, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plates::{generate_square_scene, SquareSettings};
    use crate::render::flatten;
    use crate::types::Vec2;

    #[test]
    fn test_fit_maps_unit_square() {
        let scene = generate_square_scene(&SquareSettings::for_step(1));
        let fitted = fit_to_viewport(scene, 600.0, 600.0);

        assert_eq!(fitted.bounds, Rect::new(0.0, 0.0, 600.0, 600.0));

        let flat = flatten(&fitted);
        let corner = flat[0].commands[0].end_point().unwrap();
        assert_eq!(corner, Vec2::new(0.0, 0.0));
        let opposite = flat[0].commands[2].end_point().unwrap();
        assert_eq!(opposite, Vec2::new(600.0, 600.0));
    }

    #[test]
    fn test_fit_floors_dimensions() {
        let scene = generate_square_scene(&SquareSettings::for_step(1));
        let fitted = fit_to_viewport(scene, 0.0, -10.0);

        assert!(!fitted.bounds.is_degenerate(MIN_BOUNDS_EXTENT));
    }
}
