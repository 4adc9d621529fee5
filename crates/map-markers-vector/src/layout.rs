use log::debug;

use map_markers_core::{
    centroid, scale_to_length, tangent_angle, CollisionArbiter, Geometry, Marker, MarkerSymbol,
    PlacementContext, PlacementTransform, Projection, RenderSink, VectorMarkStyle,
};

/// Place an elongated vector marker along the feature's geometries.
///
/// `VectorMarkStyle::repeat` selects between the two variants of the shared
/// transform pipeline: tiling the marker over every line segment, or a
/// single anchored/aligned/stretched placement per geometry. Raster markers
/// and symbols without a vector-mark style produce no output.
pub fn place_vector_marks<P, A, S>(
    ctx: &mut PlacementContext<'_, P, A, S>,
    symbol: &MarkerSymbol,
    marker: &Marker,
    geometries: &[Geometry],
) where
    P: Projection,
    A: CollisionArbiter,
    S: RenderSink,
{
    let Some(mark) = &symbol.mark else {
        return;
    };
    if !marker.is_vector() {
        return;
    }

    for geom in geometries {
        if geom.is_empty() {
            continue;
        }
        if mark.repeat {
            tile_along(ctx, symbol, mark, marker, geom);
        } else if !place_single(ctx, symbol, mark, marker, geom) {
            // degenerate centroid: same fail-fast contract as the point
            // placement policies
            return;
        }
    }
}

/// Tiling mode: the marker repeated over every segment, scaled to the
/// segment length, rendered unconditionally. Tiled marks are decorative
/// path ornaments, not discrete labels, so the collision arbiter is never
/// consulted.
fn tile_along<P, A, S>(
    ctx: &mut PlacementContext<'_, P, A, S>,
    symbol: &MarkerSymbol,
    mark: &VectorMarkStyle,
    marker: &Marker,
    geom: &Geometry,
) where
    P: Projection,
    A: CollisionArbiter,
    S: RenderSink,
{
    let center = marker.bounding_box().center();
    let tr = symbol
        .image_transform
        .then(&PlacementTransform::translation(center.x, center.y));

    let mut start = ctx.to_device(geom.vertex_at(0));
    for i in 1..geom.vertex_count() {
        let end = ctx.to_device(geom.vertex_at(i));
        let Some(angle) = tangent_angle(start, end) else {
            // zero-length segments are skipped, not fatal
            start = end;
            continue;
        };
        let length = (end - start).norm();
        let mut trans = tr;
        if mark.base > 0.0 {
            let scale = scale_to_length(length, mark.base * ctx.scale_factor);
            trans = trans.then(&PlacementTransform::scaling(scale, scale));
        }
        trans = trans.then(&PlacementTransform::rotation(angle));
        ctx.sink
            .render_marker(start, marker, &trans, symbol.opacity, symbol.comp_op);
        start = end;
    }
}

/// Single-placement mode: anchor/align/stretch/center options, one render
/// per geometry, gated by the collision protocol.
///
/// Returns false when a degenerate centroid must abort the whole call.
fn place_single<P, A, S>(
    ctx: &mut PlacementContext<'_, P, A, S>,
    symbol: &MarkerSymbol,
    mark: &VectorMarkStyle,
    marker: &Marker,
    geom: &Geometry,
) -> bool
where
    P: Projection,
    A: CollisionArbiter,
    S: RenderSink,
{
    let bbox = marker.bounding_box();
    let center = bbox.center();
    let mut tr = symbol.image_transform.then(&PlacementTransform::translation(
        center.x - mark.anchor.x,
        center.y - mark.anchor.y,
    ));

    if mark.align_by_geometry && geom.vertex_count() >= 2 {
        let p0 = ctx.to_device(geom.vertex_at(0));
        let p1 = ctx.to_device(geom.vertex_at(1));
        let Some(angle) = tangent_angle(p0, p1) else {
            debug!("zero-length leading segment; skipping geometry");
            return true;
        };
        if mark.stretch {
            let stretch = scale_to_length((p1 - p0).norm(), mark.base);
            tr = tr.then(&PlacementTransform::scaling(stretch, 1.0));
        }
        tr = tr.then(&PlacementTransform::rotation(angle));
    }

    let recenter = PlacementTransform::recenter(bbox, mark.anchor);
    let device_scale = PlacementTransform::scaling(ctx.scale_factor, ctx.scale_factor);
    let label_ext = bbox
        .transformed(&recenter)
        .transformed(&tr)
        .transformed(&device_scale);

    let anchor = if mark.center {
        let Some(c) = centroid(geom) else {
            debug!("centroid failed; dropping the feature's remaining geometries");
            return false;
        };
        c
    } else {
        geom.vertex_at(0)
    };
    let position = ctx.to_device(anchor);
    ctx.place_at_point(position, marker, &tr, symbol, &label_ext);
    true
}
