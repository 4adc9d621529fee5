use map_markers_core::{
    CollisionArbiter, Geometry, MarkerProvider, MarkerSymbol, PlacementContext, Projection,
    RenderSink, SymbolError,
};
use map_markers_point::place_point_markers;
use map_markers_vector::place_vector_marks;

/// Process one (feature, symbolizer) pair.
///
/// Validates the configuration, resolves the marker, and routes the
/// feature's geometries to the point placement policies or the vector-mark
/// layout engine. A marker that fails to resolve produces no output and no
/// error; a vector-mark style paired with a raster marker likewise renders
/// nothing. The only `Err` is an invalid configuration, surfaced before any
/// placement happens.
pub fn process_feature<P, A, S, M>(
    ctx: &mut PlacementContext<'_, P, A, S>,
    symbol: &MarkerSymbol,
    provider: &M,
    geometries: &[Geometry],
) -> Result<(), SymbolError>
where
    P: Projection,
    A: CollisionArbiter,
    S: RenderSink,
    M: MarkerProvider,
{
    symbol.validate()?;

    let Some(marker) = provider.resolve(&symbol.file, true) else {
        return Ok(());
    };

    if symbol.mark.is_some() {
        place_vector_marks(ctx, symbol, &marker, geometries);
    } else {
        place_point_markers(ctx, symbol, &marker, geometries);
    }
    Ok(())
}
