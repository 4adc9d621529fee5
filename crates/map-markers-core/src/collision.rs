use crate::bbox::BoundingBox;

/// Overlap-avoidance protocol shared by every symbolizer drawn on a map.
///
/// One arbiter instance belongs to one render pass; placement engines
/// receive it as an explicit `&mut` handle and assume exclusive access for
/// the duration of one feature.
pub trait CollisionArbiter {
    /// True when `label` does not collide with anything placed earlier.
    fn has_placement(&self, label: &BoundingBox) -> bool;

    /// Register an accepted placement.
    fn insert(&mut self, label: BoundingBox);
}

/// Append-only list of accepted label boxes with linear overlap queries.
#[derive(Clone, Debug, Default)]
pub struct LabelCollisionList {
    boxes: Vec<BoundingBox>,
}

impl LabelCollisionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Reset between render passes.
    pub fn clear(&mut self) {
        self.boxes.clear();
    }
}

impl CollisionArbiter for LabelCollisionList {
    fn has_placement(&self, label: &BoundingBox) -> bool {
        !self.boxes.iter().any(|b| b.intersects(label))
    }

    fn insert(&mut self, label: BoundingBox) {
        self.boxes.push(label);
    }
}
