use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::transform::PlacementTransform;

/// Where along a geometry a point marker is anchored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
pub enum PlacementMode {
    #[default]
    Centroid,
    InteriorPoint,
    First,
    Last,
    All,
}

/// Pixel compositing operation forwarded to the renderer sink.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
pub enum CompositeOp {
    #[default]
    SrcOver,
    Clear,
    Src,
    Dst,
    DstOver,
    SrcAtop,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    Plus,
}

/// Vector-mark options governing the layout engine.
///
/// `repeat` selects tiling mode (the marker repeated along every segment);
/// the remaining fields drive single-placement mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorMarkStyle {
    /// Repeat the marker along every line segment instead of placing once.
    pub repeat: bool,
    /// Rotate the marker to the first segment's tangent.
    pub align_by_geometry: bool,
    /// Stretch the marker along x to cover the aligned segment.
    pub stretch: bool,
    /// Marker design length in pixels; non-positive disables length-based
    /// scaling in tiling mode.
    pub base: f64,
    /// Anchor offset from the marker's bounding-box center, in marker units.
    pub anchor: Vector2<f64>,
    /// Anchor at the geometry centroid instead of the first vertex.
    pub center: bool,
}

impl Default for VectorMarkStyle {
    fn default() -> Self {
        Self {
            repeat: true,
            align_by_geometry: true,
            stretch: false,
            base: 0.0,
            anchor: Vector2::zeros(),
            center: false,
        }
    }
}

/// Symbolizer configuration, externally parsed and evaluated.
///
/// Point markers and vector marks share one record; a populated `mark`
/// field routes the feature to the vector-mark layout engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSymbol {
    /// Marker path, already evaluated from the style's path expression.
    /// Empty resolves to the default empty marker.
    pub file: String,
    pub placement: PlacementMode,
    pub allow_overlap: bool,
    pub ignore_placement: bool,
    /// Rotate point markers to the line tangent (First/Last/All modes).
    pub rotate: bool,
    pub opacity: f64,
    pub comp_op: CompositeOp,
    /// Style-level image transform, already evaluated from expressions.
    pub image_transform: PlacementTransform,
    pub mark: Option<VectorMarkStyle>,
}

impl Default for MarkerSymbol {
    fn default() -> Self {
        Self {
            file: String::new(),
            placement: PlacementMode::default(),
            allow_overlap: false,
            ignore_placement: false,
            rotate: false,
            opacity: 1.0,
            comp_op: CompositeOp::default(),
            image_transform: PlacementTransform::identity(),
            mark: None,
        }
    }
}

impl MarkerSymbol {
    /// Reject configurations that cannot be rendered, before placement
    /// begins. The degenerate-geometry paths are not errors (§ error
    /// design); an unusable stretch base is.
    pub fn validate(&self) -> Result<(), SymbolError> {
        if let Some(mark) = &self.mark {
            if mark.stretch && mark.base <= 0.0 {
                return Err(SymbolError::InvalidStretchBase { base: mark.base });
            }
        }
        Ok(())
    }
}

/// Configuration errors surfaced before rendering begins.
#[derive(thiserror::Error, Debug)]
pub enum SymbolError {
    #[error("vector mark base length must be positive when stretch is enabled (base={base})")]
    InvalidStretchBase { base: f64 },
}
