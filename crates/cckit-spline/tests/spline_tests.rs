use approx::assert_relative_eq;
use cckit_math::{DVec3, Point3};
use cckit_spline::{
    BezierSpline, BlendSpline, CatmullRomSpline, LinearSpline, NurbsSpline, Spline, SplineBase,
    SplineKind,
};

fn p(x: f64, y: f64, z: f64) -> Point3 {
    DVec3::new(x, y, z)
}

fn sample_splines() -> Vec<Spline> {
    let points = [
        p(0.0, 0.0, 0.0),
        p(3.0, 1.0, 0.0),
        p(6.0, -1.0, 0.0),
        p(9.0, 0.0, 0.0),
    ];
    vec![
        LinearSpline::from_points(points, false).into(),
        BezierSpline::from_points(points, false).into(),
        CatmullRomSpline::from_points(points, 0.5, false).into(),
    ]
}

#[test]
fn test_interpolate_hits_endpoints_for_every_basis() {
    for spline in sample_splines() {
        let first = spline.points()[0];
        let last = *spline.points().last().unwrap();

        let at_zero = spline.interpolate(0.0);
        let at_one = spline.interpolate(1.0);
        assert_relative_eq!(at_zero.x, first.x, epsilon = 1e-9);
        assert_relative_eq!(at_zero.y, first.y, epsilon = 1e-9);
        assert_relative_eq!(at_one.x, last.x, epsilon = 1e-9);
        assert_relative_eq!(at_one.y, last.y, epsilon = 1e-9);
    }
}

#[test]
fn test_total_length_matches_segment_sum() {
    for spline in sample_splines() {
        let sum: f64 = spline.segment_lengths().iter().sum();
        assert!(spline.total_length() > 0.0);
        assert_relative_eq!(spline.total_length(), sum, epsilon = 1e-9);
        assert_eq!(spline.number_of_segments(), spline.segment_lengths().len());
    }
}

#[test]
fn test_linear_arc_length_parameterization() {
    // Three collinear points 10 units long; blend is distance-proportional
    // even though the middle vertex sits off-center.
    let spline: Spline = LinearSpline::from_points(
        [p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(10.0, 0.0, 0.0)],
        false,
    )
    .into();

    assert_relative_eq!(spline.total_length(), 10.0, epsilon = 1e-12);
    let mid = spline.interpolate(0.5);
    assert_relative_eq!(mid.x, 5.0, epsilon = 1e-9);
    let quarter = spline.interpolate(0.25);
    assert_relative_eq!(quarter.x, 2.5, epsilon = 1e-9);
}

#[test]
fn test_bezier_control_point_synthesis() {
    let mut spline = BezierSpline::new(false);
    spline.add_point(p(0.0, 0.0, 0.0));
    spline.add_point(p(10.0, 0.0, 0.0));

    // Anchor, out-handle at 25%, in-handle at 75%, anchor.
    let expected = [
        p(0.0, 0.0, 0.0),
        p(2.5, 0.0, 0.0),
        p(7.5, 0.0, 0.0),
        p(10.0, 0.0, 0.0),
    ];
    assert_eq!(spline.points(), expected.as_slice());

    let mid = spline.interpolate(0.5);
    assert_relative_eq!(mid.x, 5.0, epsilon = 1e-6);
    assert_relative_eq!(mid.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_bezier_sub_spline_full_range_is_identity() {
    let spline = BezierSpline::from_control_points(
        [
            p(0.0, 0.0, 0.0),
            p(1.0, 2.0, 0.0),
            p(3.0, 2.0, 0.0),
            p(4.0, 0.0, 0.0),
            p(5.0, -2.0, 0.0),
            p(7.0, -2.0, 0.0),
            p(8.0, 0.0, 0.0),
        ],
        false,
    );

    let sub = spline.sub_spline(0.0, 1.0).unwrap();
    for i in 0..=20 {
        let blend = i as f64 / 20.0;
        let a = spline.interpolate(blend);
        let b = sub.interpolate(blend);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-3);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-3);
    }
}

#[test]
fn test_discretize_count_and_endpoints() {
    for spline in sample_splines() {
        let samples = spline.discretize(17);
        assert_eq!(samples.len(), 17);

        let first = spline.points()[0];
        let last = *spline.points().last().unwrap();
        assert_relative_eq!(samples[0].x, first.x, epsilon = 1e-9);
        assert_relative_eq!(samples[16].x, last.x, epsilon = 1e-9);
        assert_relative_eq!(samples[16].y, last.y, epsilon = 1e-9);
    }
}

#[test]
fn test_closed_toggle_restores_authored_points() {
    let points = [
        p(0.0, 0.0, 0.0),
        p(4.0, 0.0, 0.0),
        p(4.0, 4.0, 0.0),
        p(0.0, 4.0, 0.0),
    ];
    let mut spline: Spline = CatmullRomSpline::from_points(points, 0.5, false).into();
    let authored = spline.points().to_vec();
    let open_eval = spline.curve_points().len();

    spline.set_closed(true);
    assert!(spline.closed());
    assert_eq!(spline.points(), authored.as_slice());
    assert_ne!(spline.curve_points().len(), open_eval);

    spline.set_closed(false);
    assert_eq!(spline.points(), authored.as_slice());
    assert_eq!(spline.curve_points().len(), open_eval);
}

#[test]
fn test_edit_session_batches_rebuilds() {
    let mut spline: Spline = LinearSpline::new(false).into();
    spline.begin_edit();
    spline.add_point(p(0.0, 0.0, 0.0));
    spline.add_point(p(10.0, 0.0, 0.0));
    // The session is still open; nothing has been finalized yet.
    assert_eq!(spline.total_length(), 0.0);

    spline.end_edit();
    assert_relative_eq!(spline.total_length(), 10.0, epsilon = 1e-12);
    assert_eq!(spline.curve_points().len(), 2);
}

#[test]
fn test_blend_spline_mixes_children() {
    let a: Spline =
        LinearSpline::from_points([p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)], false).into();
    let b: Spline =
        LinearSpline::from_points([p(0.0, 10.0, 0.0), p(10.0, 10.0, 0.0)], false).into();

    let mut blend = BlendSpline::new(a, b);
    blend.set_blend(0.5);

    let mid = blend.interpolate(0.5);
    assert_relative_eq!(mid.x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(mid.y, 5.0, epsilon = 1e-9);
    assert_relative_eq!(blend.total_length(), 10.0, epsilon = 1e-9);
}

#[test]
fn test_nurbs_rejects_decreasing_knots() {
    let points = vec![p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 0.0, 0.0)];
    let weights = vec![1.0; 3];
    let knots = vec![0.0, 1.0, 0.5, 2.0, 3.0, 4.0];
    assert!(NurbsSpline::new(points, weights, knots).is_err());
}

#[test]
fn test_nurbs_weight_count_mismatch_is_rejected() {
    let points = vec![p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 0.0, 0.0)];
    let weights = vec![1.0, 1.0];
    let knots = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    assert!(NurbsSpline::new(points, weights, knots).is_err());
}

#[test]
fn test_spline_kind_reports_basis() {
    let spline: Spline = BezierSpline::new(false).into();
    assert_eq!(spline.kind(), SplineKind::Bezier);
    let spline: Spline = LinearSpline::new(true).into();
    assert_eq!(spline.kind(), SplineKind::Linear);
}

#[test]
fn test_serde_round_trip_preserves_curve() {
    let mut original = CatmullRomSpline::from_points(
        [
            p(0.0, 0.0, 0.0),
            p(2.0, 3.0, 0.0),
            p(5.0, 1.0, 0.0),
            p(8.0, 4.0, 0.0),
        ],
        0.5,
        true,
    );
    original.set_tension(0.8);
    let spline: Spline = original.into();

    let json = serde_json::to_string(&spline).unwrap();
    let restored: Spline = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.kind(), SplineKind::CatmullRom);
    assert_eq!(restored.points(), spline.points());
    assert_eq!(restored.closed(), spline.closed());
    assert_relative_eq!(
        restored.total_length(),
        spline.total_length(),
        epsilon = 1e-12
    );
    for i in 0..=10 {
        let blend = i as f64 / 10.0;
        let a = spline.interpolate(blend);
        let b = restored.interpolate(blend);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
    }
}

#[test]
fn test_closest_point_beats_every_vertex() {
    let spline: Spline = LinearSpline::from_points(
        [p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), p(10.0, 10.0, 0.0)],
        false,
    )
    .into();

    // Nearest curve point to (5, 1, 0) lies on the first segment interior.
    let query = p(5.0, 1.0, 0.0);
    let closest = spline.closest_point(query);
    assert_relative_eq!(closest.x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(closest.y, 0.0, epsilon = 1e-9);

    for &vertex in spline.points() {
        assert!(closest.distance(query) <= vertex.distance(query) + 1e-12);
    }
}
