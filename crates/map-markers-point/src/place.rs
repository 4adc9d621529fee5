use log::debug;
use nalgebra::Vector2;

use map_markers_core::{
    centroid, interior_point, tangent_angle, BoundingBox, CollisionArbiter, Geometry,
    GeometryKind, Marker, MarkerSymbol, PlacementContext, PlacementMode, PlacementTransform,
    Projection, RenderSink,
};

/// Place a point marker once or a few times per geometry, per the symbol's
/// [`PlacementMode`].
///
/// Degenerate geometries abort the remainder of the feature: a failed
/// centroid/interior-point computation, or a zero-length oriented segment,
/// returns without touching the feature's later geometries. That early
/// return is a compatibility contract inherited from the reference
/// renderer, not a per-geometry skip; each exit is logged.
pub fn place_point_markers<P, A, S>(
    ctx: &mut PlacementContext<'_, P, A, S>,
    symbol: &MarkerSymbol,
    marker: &Marker,
    geometries: &[Geometry],
) where
    P: Projection,
    A: CollisionArbiter,
    S: RenderSink,
{
    let bbox = marker.bounding_box();
    let tr = symbol.image_transform;
    let recenter_tr = PlacementTransform::recenter(bbox, Vector2::zeros()).then(&tr);
    let device_scale = PlacementTransform::scaling(ctx.scale_factor, ctx.scale_factor);
    let label_ext = bbox.transformed(&recenter_tr).transformed(&device_scale);

    for geom in geometries {
        if geom.is_empty() {
            continue;
        }

        match symbol.placement {
            PlacementMode::Centroid => {
                let Some(anchor) = centroid(geom) else {
                    debug!("centroid failed; dropping the feature's remaining geometries");
                    return;
                };
                let position = ctx.to_device(anchor);
                ctx.place_at_point(position, marker, &tr, symbol, &label_ext);
            }
            PlacementMode::InteriorPoint => {
                let Some(anchor) = interior_point(geom) else {
                    debug!("interior point failed; dropping the feature's remaining geometries");
                    return;
                };
                let position = ctx.to_device(anchor);
                ctx.place_at_point(position, marker, &tr, symbol, &label_ext);
            }
            PlacementMode::First => {
                if geom.kind() != GeometryKind::LineString || geom.vertex_count() < 2 {
                    continue;
                }
                let position = ctx.to_device(geom.vertex_at(0));
                let mut angle = 0.0;
                if symbol.rotate {
                    let next = ctx.to_device(geom.vertex_at(1));
                    match tangent_angle(position, next) {
                        Some(a) => angle = a,
                        None => {
                            debug!("zero-length first segment; dropping remaining geometries");
                            return;
                        }
                    }
                }
                place_rotated(ctx, position, marker, &tr, symbol, &label_ext, angle);
            }
            PlacementMode::Last => {
                if geom.kind() != GeometryKind::LineString || geom.vertex_count() < 2 {
                    continue;
                }
                let n = geom.vertex_count();
                let position = ctx.to_device(geom.vertex_at(n - 1));
                let mut angle = 0.0;
                if symbol.rotate {
                    let prev = ctx.to_device(geom.vertex_at(n - 2));
                    match tangent_angle(prev, position) {
                        Some(a) => angle = a,
                        None => {
                            debug!("zero-length last segment; dropping remaining geometries");
                            return;
                        }
                    }
                }
                place_rotated(ctx, position, marker, &tr, symbol, &label_ext, angle);
            }
            PlacementMode::All => {
                // One candidate per vertex. Rotation is recomputed per
                // segment against the unmodified base transform; the final
                // vertex reuses the last segment's angle.
                let mut anchor = ctx.to_device(geom.vertex_at(0));
                let mut angle = 0.0;
                for i in 1..geom.vertex_count() {
                    let next = ctx.to_device(geom.vertex_at(i));
                    if symbol.rotate {
                        match tangent_angle(anchor, next) {
                            Some(a) => angle = a,
                            None => {
                                debug!("zero-length segment; dropping remaining geometries");
                                return;
                            }
                        }
                    }
                    place_rotated(ctx, anchor, marker, &tr, symbol, &label_ext, angle);
                    anchor = next;
                }
                place_rotated(ctx, anchor, marker, &tr, symbol, &label_ext, angle);
            }
        }
    }
}

fn place_rotated<P, A, S>(
    ctx: &mut PlacementContext<'_, P, A, S>,
    position: nalgebra::Point2<f64>,
    marker: &Marker,
    base_tr: &PlacementTransform,
    symbol: &MarkerSymbol,
    label_ext: &BoundingBox,
    angle: f64,
) -> bool
where
    P: Projection,
    A: CollisionArbiter,
    S: RenderSink,
{
    if angle == 0.0 {
        return ctx.place_at_point(position, marker, base_tr, symbol, label_ext);
    }
    let rot = PlacementTransform::rotation(angle);
    let tr = base_tr.then(&rot);
    let label = label_ext.transformed(&rot);
    ctx.place_at_point(position, marker, &tr, symbol, &label)
}
