//! Point-symbolizer placement policies.
//!
//! Chooses anchor points and orientations for a marker placed once or a few
//! times per geometry: centroid, interior point, first/last vertex, or every
//! vertex of a line.

mod place;

pub use place::place_point_markers;
