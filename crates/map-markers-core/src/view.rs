use nalgebra::Point2;

use crate::bbox::BoundingBox;

/// Backward coordinate projection from the layer's projection into the
/// map's projection. Pure mapping, invoked per vertex.
pub trait Projection {
    fn backward(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64);
}

/// Identity projection for layers already in the map projection.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainProjection;

impl Projection for PlainProjection {
    #[inline]
    fn backward(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        (x, y, z)
    }
}

/// World-to-pixel transform for one output image.
///
/// Maps the visible extent onto `width × height` pixels with the y axis
/// flipped so pixel y grows downward.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
    width: u32,
    height: u32,
    extent: BoundingBox,
    sx: f64,
    sy: f64,
}

impl ViewTransform {
    pub fn new(width: u32, height: u32, extent: BoundingBox) -> Self {
        Self {
            width,
            height,
            extent,
            sx: f64::from(width) / extent.width(),
            sy: f64::from(height) / extent.height(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn extent(&self) -> &BoundingBox {
        &self.extent
    }

    #[inline]
    pub fn forward(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            (p.x - self.extent.min_x) * self.sx,
            (self.extent.max_y - p.y) * self.sy,
        )
    }

    #[inline]
    pub fn backward(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            p.x / self.sx + self.extent.min_x,
            self.extent.max_y - p.y / self.sy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn forward_flips_y() {
        let view = ViewTransform::new(100, 100, BoundingBox::new(0.0, 0.0, 100.0, 100.0));
        let p = view.forward(Point2::new(0.0, 0.0));
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 100.0);
    }

    #[test]
    fn forward_scales_extent_to_pixels() {
        let view = ViewTransform::new(200, 100, BoundingBox::new(10.0, 10.0, 30.0, 20.0));
        let p = view.forward(Point2::new(20.0, 15.0));
        assert_relative_eq!(p.x, 100.0);
        assert_relative_eq!(p.y, 50.0);
    }

    #[test]
    fn backward_round_trips() {
        let view = ViewTransform::new(512, 512, BoundingBox::new(-180.0, -90.0, 180.0, 90.0));
        let p = Point2::new(13.4, 52.5);
        let back = view.backward(view.forward(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
    }
}
