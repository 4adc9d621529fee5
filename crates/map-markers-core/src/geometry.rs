use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Geometry kind. Polygon topology is only consulted by the interior-point
/// algorithm; everywhere else a geometry is treated as a path of vertices.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

/// Segment command emitted by the vertex cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathCommand {
    MoveTo,
    LineTo,
    End,
}

/// A feature geometry: a kind tag plus its vertices in traversal order.
///
/// Owned by the feature being rendered; the placement engines only read it.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    points: Vec<Point2<f64>>,
}

impl Geometry {
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
        }
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self {
            kind: GeometryKind::Point,
            points: vec![Point2::new(x, y)],
        }
    }

    pub fn line_string<I: IntoIterator<Item = (f64, f64)>>(coords: I) -> Self {
        Self {
            kind: GeometryKind::LineString,
            points: coords.into_iter().map(|(x, y)| Point2::new(x, y)).collect(),
        }
    }

    /// Build a polygon ring. The closing vertex is stored as given; rings may
    /// be left open, the centroid accumulation closes them implicitly.
    pub fn polygon<I: IntoIterator<Item = (f64, f64)>>(coords: I) -> Self {
        Self {
            kind: GeometryKind::Polygon,
            points: coords.into_iter().map(|(x, y)| Point2::new(x, y)).collect(),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.points.push(Point2::new(x, y));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.points.push(Point2::new(x, y));
    }

    #[inline]
    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex at `index`; panics when out of bounds.
    #[inline]
    pub fn vertex_at(&self, index: usize) -> Point2<f64> {
        self.points[index]
    }

    /// Cursor-style access: the vertex and its command, or `End` past the
    /// final vertex.
    pub fn vertex(&self, index: usize) -> (f64, f64, PathCommand) {
        match self.points.get(index) {
            Some(p) => {
                let cmd = if index == 0 {
                    PathCommand::MoveTo
                } else {
                    PathCommand::LineTo
                };
                (p.x, p.y, cmd)
            }
            None => (0.0, 0.0, PathCommand::End),
        }
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Consecutive vertex pairs in traversal order.
    pub fn segments(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_emits_move_line_end() {
        let geom = Geometry::line_string([(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(geom.vertex(0).2, PathCommand::MoveTo);
        assert_eq!(geom.vertex(1).2, PathCommand::LineTo);
        assert_eq!(geom.vertex(2).2, PathCommand::End);
    }

    #[test]
    fn segments_pair_consecutive_vertices() {
        let geom = Geometry::line_string([(0.0, 0.0), (1.0, 0.0), (1.0, 2.0)]);
        let segs: Vec<_> = geom.segments().collect();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].0, Point2::new(1.0, 0.0));
        assert_eq!(segs[1].1, Point2::new(1.0, 2.0));
    }

    #[test]
    fn empty_geometry_has_no_segments() {
        let geom = Geometry::new(GeometryKind::LineString);
        assert!(geom.is_empty());
        assert_eq!(geom.segments().count(), 0);
    }
}
