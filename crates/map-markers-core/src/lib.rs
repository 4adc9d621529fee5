//! Core types and utilities for map marker placement.
//!
//! This crate is intentionally small and mostly geometric: affine placement
//! transforms, bounding/label boxes, feature geometries with anchor-point
//! algorithms, plus the seams every symbolizer shares (collision arbiter,
//! marker provider, renderer sink). It does *not* decode marker images or
//! rasterize anything.

mod anchor;
mod bbox;
mod collision;
mod geometry;
mod logger;
mod marker;
mod render;
mod symbol;
mod transform;
mod view;

pub use anchor::{centroid, interior_point, tangent_angle};
pub use bbox::BoundingBox;
pub use collision::{CollisionArbiter, LabelCollisionList};
pub use geometry::{Geometry, GeometryKind, PathCommand};
pub use marker::{Marker, MarkerCache, MarkerKind, MarkerLoader, MarkerProvider};
pub use render::{PlacementContext, RenderSink};
pub use symbol::{CompositeOp, MarkerSymbol, PlacementMode, SymbolError, VectorMarkStyle};
pub use transform::{scale_to_length, PlacementTransform};
pub use view::{PlainProjection, Projection, ViewTransform};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
