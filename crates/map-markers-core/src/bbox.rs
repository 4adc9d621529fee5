use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::transform::PlacementTransform;

/// Axis-aligned bounding box in device or marker-local units.
///
/// Used both for marker bounding boxes and for the label-extent boxes fed to
/// the collision arbiter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Build a box from two corner points, normalizing min/max.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Shift the box so its center lands exactly on `(x, y)`.
    pub fn re_center(&mut self, x: f64, y: f64) {
        let c = self.center();
        let dx = x - c.x;
        let dy = y - c.y;
        self.min_x += dx;
        self.max_x += dx;
        self.min_y += dy;
        self.max_y += dy;
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn expand_to_include(&mut self, p: Point2<f64>) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Map the box through an affine transform.
    ///
    /// The four corners are transformed and the result is their envelope, so
    /// a rotated box grows to its axis-aligned hull.
    pub fn transformed(&self, tr: &PlacementTransform) -> BoundingBox {
        let corners = [
            Point2::new(self.min_x, self.min_y),
            Point2::new(self.max_x, self.min_y),
            Point2::new(self.max_x, self.max_y),
            Point2::new(self.min_x, self.max_y),
        ];
        let first = tr.apply(corners[0]);
        let mut out = BoundingBox::new(first.x, first.y, first.x, first.y);
        for corner in &corners[1..] {
            out.expand_to_include(tr.apply(*corner));
        }
        out
    }
}
