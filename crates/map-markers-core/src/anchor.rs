//! Anchor-point algorithms: centroid, interior point, and tangent angles.

use nalgebra::Point2;

use crate::geometry::{Geometry, GeometryKind};

/// Geometry centroid.
///
/// Polygons use the area-weighted centroid (shoelace accumulation relative
/// to the first vertex, which closes open rings implicitly); polylines and
/// zero-area polygons fall back to the length-weighted path centroid; a
/// single vertex is its own centroid. Returns `None` for empty geometries.
pub fn centroid(geom: &Geometry) -> Option<Point2<f64>> {
    let pts = geom.points();
    let first = *pts.first()?;
    if pts.len() == 1 {
        return Some(first);
    }

    if geom.kind() == GeometryKind::Polygon {
        let mut area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for w in pts.windows(2) {
            let d0 = w[0] - first;
            let d1 = w[1] - first;
            let ai = d0.x * d1.y - d1.x * d0.y;
            area += ai;
            cx += (d0.x + d1.x) * ai;
            cy += (d0.y + d1.y) * ai;
        }
        if area != 0.0 {
            return Some(Point2::new(
                cx / (3.0 * area) + first.x,
                cy / (3.0 * area) + first.y,
            ));
        }
        // zero area: treat the ring as a path
    }

    let mut length = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for w in pts.windows(2) {
        let l = (w[1] - w[0]).norm();
        length += l;
        cx += (w[0].x + w[1].x) * 0.5 * l;
        cy += (w[0].y + w[1].y) * 0.5 * l;
    }
    if length > 0.0 {
        Some(Point2::new(cx / length, cy / length))
    } else {
        Some(first)
    }
}

/// A point guaranteed to lie inside a polygon.
///
/// Casts a horizontal scanline through the centroid, pairs the sorted
/// edge intersections even-odd, and returns the midpoint of the widest
/// span. Non-polygon geometries, and polygons whose scanline finds no span,
/// yield the centroid itself.
pub fn interior_point(geom: &Geometry) -> Option<Point2<f64>> {
    let c = centroid(geom)?;
    if geom.kind() != GeometryKind::Polygon {
        return Some(c);
    }

    let y = c.y;
    let mut crossings: Vec<f64> = Vec::new();
    for (p0, p1) in geom.segments() {
        if p0.y == p1.y {
            if p0.y == y {
                crossings.push((p0.x + p1.x) * 0.5);
            }
        } else if (p0.y <= y && p1.y >= y) || (p0.y >= y && p1.y <= y) {
            crossings.push(p0.x + (p1.x - p0.x) * (y - p0.y) / (p1.y - p0.y));
        }
    }
    if crossings.is_empty() {
        return Some(c);
    }

    crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut best_x = c.x;
    let mut best_width = 0.0;
    for pair in crossings.chunks_exact(2) {
        let width = pair[1] - pair[0];
        if width > best_width {
            best_width = width;
            best_x = (pair[0] + pair[1]) * 0.5;
        }
    }
    Some(Point2::new(best_x, y))
}

/// Angle of the directed tangent `from -> to` relative to the positive
/// x-axis in device space, or `None` for a zero-length tangent.
///
/// `angle = acos(dx / length)`, negated when `dy < 0`.
pub fn tangent_angle(from: Point2<f64>, to: Point2<f64>) -> Option<f64> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return None;
    }
    // dx/length can drift past ±1 in floating point
    let mut angle = (dx / length).clamp(-1.0, 1.0).acos();
    if dy < 0.0 {
        angle = -angle;
    }
    Some(angle)
}
