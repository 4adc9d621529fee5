//! Vector-mark layout engine.
//!
//! Computes per-segment or per-geometry transforms for elongated,
//! stretchable markers such as arrows, dashes, and oriented icons.

mod layout;

pub use layout::place_vector_marks;
