use nalgebra::Point2;

use crate::bbox::BoundingBox;
use crate::collision::CollisionArbiter;
use crate::marker::Marker;
use crate::symbol::{CompositeOp, MarkerSymbol};
use crate::transform::PlacementTransform;
use crate::view::{Projection, ViewTransform};

/// Receives accepted placements. Side-effecting; assumed to always succeed
/// (pixel-level failures are not surfaced to the placement engines).
pub trait RenderSink {
    fn render_marker(
        &mut self,
        position: Point2<f64>,
        marker: &Marker,
        transform: &PlacementTransform,
        opacity: f64,
        comp_op: CompositeOp,
    );
}

/// Everything one symbolizer needs to place markers for one feature:
/// coordinate mappings, the device scale factor, and exclusive handles on
/// the render pass's collision arbiter and renderer sink.
pub struct PlacementContext<'a, P: Projection, A: CollisionArbiter, S: RenderSink> {
    pub projection: &'a P,
    pub view: &'a ViewTransform,
    /// Global multiplier converting style units to output pixels.
    pub scale_factor: f64,
    pub arbiter: &'a mut A,
    pub sink: &'a mut S,
}

impl<'a, P: Projection, A: CollisionArbiter, S: RenderSink> PlacementContext<'a, P, A, S> {
    pub fn new(
        projection: &'a P,
        view: &'a ViewTransform,
        scale_factor: f64,
        arbiter: &'a mut A,
        sink: &'a mut S,
    ) -> Self {
        Self {
            projection,
            view,
            scale_factor,
            arbiter,
            sink,
        }
    }

    /// Map a vertex from layer coordinates to device pixels.
    pub fn to_device(&self, p: Point2<f64>) -> Point2<f64> {
        let (x, y, _) = self.projection.backward(p.x, p.y, 0.0);
        self.view.forward(Point2::new(x, y))
    }

    /// The allow-overlap / arbiter / ignore-placement protocol shared by
    /// every placement candidate.
    ///
    /// Re-centers `label_ext` at `position`, renders when overlap is allowed
    /// or the arbiter reports the box free, and registers the box unless the
    /// symbolizer ignores placement bookkeeping. Returns whether a render
    /// happened.
    pub fn place_at_point(
        &mut self,
        position: Point2<f64>,
        marker: &Marker,
        transform: &PlacementTransform,
        symbol: &MarkerSymbol,
        label_ext: &BoundingBox,
    ) -> bool {
        let mut label = *label_ext;
        label.re_center(position.x, position.y);
        if symbol.allow_overlap || self.arbiter.has_placement(&label) {
            self.sink
                .render_marker(position, marker, transform, symbol.opacity, symbol.comp_op);
            if !symbol.ignore_placement {
                self.arbiter.insert(label);
            }
            true
        } else {
            false
        }
    }
}
