//! High-level facade crate for the `map-markers-*` workspace.
//!
//! Given a feature's geometries and a symbolizer configuration, this engine
//! decides where along each geometry to place reusable graphic markers,
//! computes the affine transform for every placement, and arbitrates against
//! previously drawn labels to avoid overlap.
//!
//! ## Quickstart
//!
//! ```
//! use map_markers::{
//!     process_feature, BoundingBox, Geometry, LabelCollisionList, Marker, MarkerCache,
//!     MarkerKind, MarkerSymbol, PlacementContext, PlacementMode, PlacementTransform,
//!     PlainProjection, RenderSink, ViewTransform,
//! };
//! use nalgebra::Point2;
//!
//! struct NullSink;
//! impl RenderSink for NullSink {
//!     fn render_marker(
//!         &mut self,
//!         _position: Point2<f64>,
//!         _marker: &Marker,
//!         _transform: &PlacementTransform,
//!         _opacity: f64,
//!         _comp_op: map_markers::CompositeOp,
//!     ) {
//!     }
//! }
//!
//! let cache = MarkerCache::new(|_path: &str| {
//!     Some(Marker::new(BoundingBox::new(0.0, 0.0, 16.0, 16.0), MarkerKind::Raster))
//! });
//! let view = ViewTransform::new(256, 256, BoundingBox::new(0.0, 0.0, 256.0, 256.0));
//! let mut arbiter = LabelCollisionList::new();
//! let mut sink = NullSink;
//! let mut ctx = PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);
//!
//! let symbol = MarkerSymbol {
//!     file: "town.png".into(),
//!     placement: PlacementMode::Centroid,
//!     ..MarkerSymbol::default()
//! };
//! let geoms = [Geometry::point(128.0, 128.0)];
//! process_feature(&mut ctx, &symbol, &cache, &geoms).expect("valid symbol");
//! ```
//!
//! ## API map
//! - [`core`](map_markers_core): geometries, boxes, transforms, collision,
//!   marker cache, view/projection.
//! - [`point`](map_markers_point): point-symbolizer placement policies.
//! - [`vector`](map_markers_vector): vector-mark layout engine.

pub use map_markers_core as core;
pub use map_markers_point as point;
pub use map_markers_vector as vector;

pub use map_markers_core::{
    centroid, interior_point, scale_to_length, tangent_angle, BoundingBox, CollisionArbiter,
    CompositeOp, Geometry, GeometryKind, LabelCollisionList, Marker, MarkerCache, MarkerKind,
    MarkerLoader, MarkerProvider, MarkerSymbol, PathCommand, PlacementContext, PlacementMode,
    PlacementTransform, PlainProjection, Projection, RenderSink, SymbolError, VectorMarkStyle,
    ViewTransform,
};
pub use map_markers_point::place_point_markers;
pub use map_markers_vector::place_vector_marks;

mod process;

pub use process::process_feature;
