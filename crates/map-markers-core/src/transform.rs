use nalgebra::{Matrix3, Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;

/// 2D affine placement transform backed by a homogeneous 3×3 matrix.
///
/// Transforms are composed as an ordered product of elementary operations.
/// `a.then(b)` concatenates `b` so it acts on the output of `a`; every call
/// site in the placement engines preserves the pipeline order
/// recenter → stretch/scale → rotate → translate-to-anchor → device scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementTransform {
    pub m: Matrix3<f64>,
}

impl PlacementTransform {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix3::new(
                1.0, 0.0, dx, //
                0.0, 1.0, dy, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Counter-clockwise rotation by `angle` radians about the origin.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: Matrix3::new(
                c, -s, 0.0, //
                s, c, 0.0, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: Matrix3::new(
                sx, 0.0, 0.0, //
                0.0, sy, 0.0, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Recentering transform mapping `bbox.center() - pivot` to the origin,
    /// so that subsequent rotation and scaling pivot correctly.
    pub fn recenter(bbox: &BoundingBox, pivot: Vector2<f64>) -> Self {
        let c = bbox.center();
        Self::translation(pivot.x - c.x, pivot.y - c.y)
    }

    /// Concatenate `next` so it applies after the effect `self` already
    /// encodes: `a.then(b).apply(p) == b.apply(a.apply(p))`.
    #[must_use]
    pub fn then(&self, next: &PlacementTransform) -> Self {
        Self {
            m: next.m * self.m,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        self.m.transform_point(&p)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|m| Self { m })
    }
}

impl Default for PlacementTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Scale factor stretching a marker of length `target_base` over a segment of
/// `current_length` device units.
#[inline]
pub fn scale_to_length(current_length: f64, target_base: f64) -> f64 {
    current_length / target_base
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn then_applies_left_to_right() {
        // translate, then rotate 90° CCW: (1,0) -> (2,0) -> (0,2)
        let tr = PlacementTransform::translation(1.0, 0.0)
            .then(&PlacementTransform::rotation(FRAC_PI_2));
        let p = tr.apply(Point2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn recenter_maps_bbox_center_to_origin() {
        let bbox = BoundingBox::new(2.0, 4.0, 6.0, 8.0);
        let tr = PlacementTransform::recenter(&bbox, Vector2::zeros());
        let p = tr.apply(bbox.center());
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn recenter_honors_pivot_offset() {
        let bbox = BoundingBox::new(0.0, 0.0, 4.0, 4.0);
        let tr = PlacementTransform::recenter(&bbox, Vector2::new(1.0, -1.0));
        // center (2,2) minus pivot (1,-1) maps to origin
        let p = tr.apply(Point2::new(1.0, 3.0));
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn scale_to_length_is_ratio() {
        assert_relative_eq!(scale_to_length(10.0, 5.0), 2.0);
        assert_relative_eq!(scale_to_length(10.0, 10.0), 1.0);
    }

    #[test]
    fn inverse_round_trips() {
        let tr = PlacementTransform::translation(3.0, -2.0)
            .then(&PlacementTransform::rotation(0.4))
            .then(&PlacementTransform::scaling(2.0, 0.5));
        let inv = tr.inverse().expect("invertible");
        let p = Point2::new(7.0, 11.0);
        let back = inv.apply(tr.apply(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
    }
}
