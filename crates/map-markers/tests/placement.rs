use approx::assert_relative_eq;
use map_markers::{
    process_feature, BoundingBox, Geometry, LabelCollisionList, Marker, MarkerCache, MarkerKind,
    MarkerSymbol, PlacementContext, PlacementMode, PlacementTransform, PlainProjection,
    RenderSink, VectorMarkStyle, ViewTransform,
};
use nalgebra::Point2;

struct Recorded {
    position: Point2<f64>,
    transform: PlacementTransform,
    opacity: f64,
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<Recorded>,
}

impl RenderSink for RecordingSink {
    fn render_marker(
        &mut self,
        position: Point2<f64>,
        _marker: &Marker,
        transform: &PlacementTransform,
        opacity: f64,
        _comp_op: map_markers::CompositeOp,
    ) {
        self.calls.push(Recorded {
            position,
            transform: *transform,
            opacity,
        });
    }
}

fn raster_cache() -> MarkerCache {
    MarkerCache::new(|_path: &str| {
        Some(Marker::new(
            BoundingBox::new(0.0, 0.0, 4.0, 4.0),
            MarkerKind::Raster,
        ))
    })
}

fn vector_cache() -> MarkerCache {
    MarkerCache::new(|_path: &str| {
        Some(Marker::new(
            BoundingBox::new(0.0, 0.0, 4.0, 4.0),
            MarkerKind::Vector,
        ))
    })
}

fn view() -> ViewTransform {
    ViewTransform::new(100, 100, BoundingBox::new(0.0, 0.0, 100.0, 100.0))
}

/// Map coordinates to expected device pixels for the test view.
fn device(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, 100.0 - y)
}

fn rotation_of(tr: &PlacementTransform) -> f64 {
    let o = tr.apply(Point2::new(0.0, 0.0));
    let x = tr.apply(Point2::new(1.0, 0.0));
    (x.y - o.y).atan2(x.x - o.x)
}

#[test]
fn first_placement_on_horizontal_line_is_unrotated() {
    let symbol = MarkerSymbol {
        file: "dot.png".into(),
        placement: PlacementMode::First,
        rotate: true,
        ..MarkerSymbol::default()
    };
    let geoms = [Geometry::line_string([(0.0, 0.0), (10.0, 0.0)])];
    let cache = raster_cache();
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();
    let mut ctx = PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);

    process_feature(&mut ctx, &symbol, &cache, &geoms).expect("valid symbol");

    assert_eq!(sink.calls.len(), 1);
    assert_eq!(sink.calls[0].position, device(0.0, 0.0));
    assert_relative_eq!(rotation_of(&sink.calls[0].transform), 0.0, epsilon = 1e-12);
}

#[test]
fn all_placement_without_rotation_fires_per_vertex() {
    let symbol = MarkerSymbol {
        file: "dot.png".into(),
        placement: PlacementMode::All,
        ..MarkerSymbol::default()
    };
    let geoms = [Geometry::line_string([(0.0, 0.0), (10.0, 0.0)])];
    let cache = raster_cache();
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();
    let mut ctx = PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);

    process_feature(&mut ctx, &symbol, &cache, &geoms).expect("valid symbol");

    assert_eq!(sink.calls.len(), 2);
    assert_eq!(sink.calls[0].position, device(0.0, 0.0));
    assert_eq!(sink.calls[1].position, device(10.0, 0.0));
    for call in &sink.calls {
        assert_relative_eq!(rotation_of(&call.transform), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn tiled_vector_mark_scales_to_segment_length() {
    let symbol = MarkerSymbol {
        file: "arrow.svg".into(),
        mark: Some(VectorMarkStyle {
            base: 5.0,
            ..VectorMarkStyle::default()
        }),
        ..MarkerSymbol::default()
    };
    let geoms = [Geometry::line_string([(0.0, 0.0), (10.0, 0.0)])];
    let cache = vector_cache();
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();
    let mut ctx = PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);

    process_feature(&mut ctx, &symbol, &cache, &geoms).expect("valid symbol");

    assert_eq!(sink.calls.len(), 1);
    let tr = &sink.calls[0].transform;
    let o = tr.apply(Point2::new(0.0, 0.0));
    let x = tr.apply(Point2::new(1.0, 0.0));
    assert_relative_eq!((x - o).norm(), 2.0, epsilon = 1e-12);
    assert!(arbiter.is_empty());
}

#[test]
fn overlapping_features_collide_across_calls() {
    let symbol = MarkerSymbol {
        file: "dot.png".into(),
        ..MarkerSymbol::default()
    };
    let near = [Geometry::point(50.0, 50.0)];
    let nearer = [Geometry::point(51.0, 50.0)];
    let cache = raster_cache();
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();

    {
        let mut ctx =
            PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);
        process_feature(&mut ctx, &symbol, &cache, &near).expect("valid symbol");
        process_feature(&mut ctx, &symbol, &cache, &nearer).expect("valid symbol");
    }

    // the second feature's box overlaps the first and is dropped
    assert_eq!(sink.calls.len(), 1);
    assert_eq!(arbiter.len(), 1);
}

#[test]
fn ignore_placement_never_blocks_later_features() {
    let symbol = MarkerSymbol {
        file: "dot.png".into(),
        ignore_placement: true,
        ..MarkerSymbol::default()
    };
    let geoms = [Geometry::point(50.0, 50.0)];
    let cache = raster_cache();
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();

    {
        let mut ctx =
            PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);
        process_feature(&mut ctx, &symbol, &cache, &geoms).expect("valid symbol");
        process_feature(&mut ctx, &symbol, &cache, &geoms).expect("valid symbol");
    }

    assert_eq!(sink.calls.len(), 2);
    assert!(arbiter.is_empty());
}

#[test]
fn unresolvable_marker_is_silent() {
    let symbol = MarkerSymbol {
        file: "missing.png".into(),
        ..MarkerSymbol::default()
    };
    let geoms = [Geometry::point(50.0, 50.0)];
    let cache = MarkerCache::new(|_: &str| -> Option<Marker> { None });
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();
    let mut ctx = PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);

    process_feature(&mut ctx, &symbol, &cache, &geoms).expect("no output is not an error");
    assert!(sink.calls.is_empty());
}

#[test]
fn empty_path_places_the_default_marker() {
    let symbol = MarkerSymbol::default();
    let geoms = [Geometry::point(50.0, 50.0)];
    let cache = MarkerCache::new(|_: &str| -> Option<Marker> { None });
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();
    let mut ctx = PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);

    process_feature(&mut ctx, &symbol, &cache, &geoms).expect("valid symbol");
    assert_eq!(sink.calls.len(), 1);
    assert_relative_eq!(sink.calls[0].opacity, 1.0);
}

#[test]
fn invalid_stretch_base_is_a_config_error() {
    let symbol = MarkerSymbol {
        file: "arrow.svg".into(),
        mark: Some(VectorMarkStyle {
            repeat: false,
            stretch: true,
            base: 0.0,
            ..VectorMarkStyle::default()
        }),
        ..MarkerSymbol::default()
    };
    let geoms = [Geometry::line_string([(0.0, 0.0), (10.0, 0.0)])];
    let cache = vector_cache();
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();
    let mut ctx = PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);

    assert!(process_feature(&mut ctx, &symbol, &cache, &geoms).is_err());
    assert!(sink.calls.is_empty());
}

#[test]
fn vector_mark_style_with_raster_marker_renders_nothing() {
    let symbol = MarkerSymbol {
        file: "flat.png".into(),
        mark: Some(VectorMarkStyle::default()),
        ..MarkerSymbol::default()
    };
    let geoms = [Geometry::line_string([(0.0, 0.0), (10.0, 0.0)])];
    let cache = raster_cache();
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();
    let mut ctx = PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);

    process_feature(&mut ctx, &symbol, &cache, &geoms).expect("valid symbol");
    assert!(sink.calls.is_empty());
}

#[test]
fn degenerate_geometry_drops_the_rest_of_the_feature_only() {
    let symbol = MarkerSymbol {
        file: "dot.png".into(),
        placement: PlacementMode::First,
        rotate: true,
        allow_overlap: true,
        ..MarkerSymbol::default()
    };
    // zero-length leading segment aborts this feature after its first
    // geometry; a later feature still places
    let broken = [
        Geometry::line_string([(5.0, 5.0), (5.0, 5.0)]),
        Geometry::line_string([(40.0, 40.0), (50.0, 40.0)]),
    ];
    let healthy = [Geometry::line_string([(70.0, 70.0), (80.0, 70.0)])];
    let cache = raster_cache();
    let view = view();
    let mut arbiter = LabelCollisionList::new();
    let mut sink = RecordingSink::default();

    {
        let mut ctx =
            PlacementContext::new(&PlainProjection, &view, 1.0, &mut arbiter, &mut sink);
        process_feature(&mut ctx, &symbol, &cache, &broken).expect("valid symbol");
        process_feature(&mut ctx, &symbol, &cache, &healthy).expect("valid symbol");
    }

    assert_eq!(sink.calls.len(), 1);
    assert_eq!(sink.calls[0].position, device(70.0, 70.0));
}
