mod common;

use common::synthetic_event::{fan_of_tracks, noise_hits, test_directions, track_hits};
use nalgebra::{Vector2, Vector3};
use quad_vertex::diagnostics::PassStage;
use quad_vertex::{FailureReason, Hit, SearchState, VertexFinder, VertexParams, View, ViewDirections};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn true_vertex() -> Vector3<f64> {
    Vector3::new(12.3, -4.7, 31.6)
}

/// Larger of the two bin widths of the collection-view map of a pass.
fn bin_width(pass: Option<&PassStage>) -> f64 {
    let maps = pass.and_then(|p| p.maps.as_ref()).expect("retained maps");
    maps[0].z_bin_width().max(maps[0].x_bin_width())
}

fn assert_within(found: &Vector3<f64>, truth: &Vector3<f64>, width: f64, label: &str) {
    for k in 0..3 {
        assert!(
            (found[k] - truth[k]).abs() < width,
            "{label} component {k}: {:.3} vs {:.3} (bin width {width:.3})",
            found[k],
            truth[k]
        );
    }
}

#[test]
fn fan_of_tracks_recovers_vertex() {
    init_logging();
    let dirs = test_directions();
    let vtx = true_vertex();
    let hits = track_hits(vtx, &fan_of_tracks(), 12, &dirs);

    let params = VertexParams {
        keep_heatmaps: true,
        ..Default::default()
    };
    let report = VertexFinder::new(params).find_with_diagnostics(&hits, &dirs);
    let result = &report.result;
    assert!(result.found, "search failed: {}", report.trace.summary());
    assert_eq!(report.trace.state, SearchState::Done);
    assert!(report.trace.failure.is_none());

    let coarse_width = bin_width(report.trace.coarse.as_ref());
    let coarse = result.coarse_vertex.expect("coarse vertex");
    assert_within(&coarse, &vtx, coarse_width, "coarse");

    let zoom_width = bin_width(report.trace.zoom.as_ref());
    assert!((zoom_width - 0.1).abs() < 1e-9, "zoom bin width {zoom_width}");
    let fine = result.vertex.expect("vertex");
    assert_within(&fine, &vtx, zoom_width, "final");
    assert!(result.score > 0.0);

    let coarse_stage = report.trace.coarse.as_ref().expect("coarse stage");
    let zoom_stage = report.trace.zoom.as_ref().expect("zoom stage");
    assert_eq!(coarse_stage.views.len(), 3);
    for (c, z) in coarse_stage.views.iter().zip(&zoom_stage.views) {
        assert_eq!(c.points, 48);
        assert_eq!(c.candidate_pairs, 48 * 47 / 2);
        // Points sharing a transverse coordinate give no line.
        assert!(c.lines > 1000 && c.lines <= c.candidate_pairs, "lines {}", c.lines);
        assert_eq!(c.line_stride, 1);
        assert!(!c.lines_capped);
        assert!(z.lines < c.lines, "zoom should keep fewer lines than coarse");
        assert_eq!(z.map_bins, [50, 50]);
    }
    assert!(report.trace.timings.stage_ms("coarse").is_some());
    assert!(report.trace.timings.stage_ms("zoom").is_some());
}

#[test]
fn background_hits_do_not_move_vertex() {
    init_logging();
    let dirs = test_directions();
    let vtx = true_vertex();
    let mut hits = track_hits(vtx, &fan_of_tracks(), 12, &dirs);
    hits.extend(noise_hits(vtx, 10, 7));

    let found = VertexFinder::default().find(&hits, &dirs).expect("vertex");
    assert!((found - vtx).norm() < 0.3, "off by {:.3}", (found - vtx).norm());
}

#[test]
fn capped_line_generation_still_converges() {
    init_logging();
    let dirs = test_directions();
    let vtx = true_vertex();
    let hits = track_hits(vtx, &fan_of_tracks(), 12, &dirs);
    let params = VertexParams {
        max_lines: 400,
        ..Default::default()
    };

    let report = VertexFinder::new(params).find_with_diagnostics(&hits, &dirs);
    let coarse = report.trace.coarse.as_ref().expect("coarse stage");
    assert!(coarse.views.iter().all(|v| v.lines_capped && v.lines == 400));
    assert!(coarse.views.iter().all(|v| v.line_stride > 1));
    let found = report.result.vertex.expect("vertex");
    assert!((found - vtx).norm() < 0.5, "off by {:.3}", (found - vtx).norm());
}

#[test]
fn search_is_repeatable_and_order_independent() {
    let dirs = test_directions();
    let mut hits = track_hits(true_vertex(), &fan_of_tracks(), 10, &dirs);
    hits.extend(noise_hits(true_vertex(), 6, 3));
    let finder = VertexFinder::default();

    let first = finder.find(&hits, &dirs).expect("first");
    let second = finder.find(&hits, &dirs).expect("second");
    assert_eq!(first, second);

    hits.reverse();
    let reversed = finder.find(&hits, &dirs).expect("reversed");
    assert_eq!(first, reversed);
}

#[test]
fn empty_view_yields_nothing() {
    let dirs = test_directions();
    let hits: Vec<Hit> = track_hits(true_vertex(), &fan_of_tracks(), 8, &dirs)
        .into_iter()
        .filter(|h| h.view != View::V)
        .collect();

    let report = VertexFinder::default().find_with_diagnostics(&hits, &dirs);
    assert!(!report.result.found);
    assert!(report.result.vertex.is_none());
    assert_eq!(report.trace.state, SearchState::Failed);
    assert_eq!(report.trace.failure, Some(FailureReason::EmptyView { view: View::V }));
    assert!(report.trace.coarse.is_none());
}

#[test]
fn no_hits_at_all_yields_nothing() {
    let report = VertexFinder::default().find_with_diagnostics(&[], &test_directions());
    assert_eq!(report.trace.failure, Some(FailureReason::EmptyView { view: View::Z }));
    assert_eq!(report.trace.hits, 0);
}

#[test]
fn collinear_directions_yield_nothing() {
    let d = Vector2::new(0.0, 1.0);
    let dirs = ViewDirections::new(d, d, Vector2::new(0.8, 0.6)).expect("directions");
    let hits = track_hits(true_vertex(), &fan_of_tracks(), 8, &test_directions());

    let report = VertexFinder::default().find_with_diagnostics(&hits, &dirs);
    assert!(report.result.vertex.is_none());
    assert_eq!(report.trace.failure, Some(FailureReason::SingularDirections));
}

#[test]
fn single_point_views_have_no_lines() {
    let dirs = test_directions();
    let hits = track_hits(true_vertex(), &fan_of_tracks()[..1], 1, &dirs);
    assert_eq!(hits.len(), 3);

    let report = VertexFinder::default().find_with_diagnostics(&hits, &dirs);
    assert!(report.result.vertex.is_none());
    assert_eq!(
        report.trace.failure,
        Some(FailureReason::NoLines {
            stage: SearchState::CoarseScan,
            view: View::Z
        })
    );
    assert!(report.result.coarse_vertex.is_none());
}

#[test]
fn single_line_per_view_finds_no_peak() {
    let dirs = test_directions();
    let hits = track_hits(true_vertex(), &fan_of_tracks()[..1], 2, &dirs);

    let report = VertexFinder::default().find_with_diagnostics(&hits, &dirs);
    assert!(report.result.vertex.is_none());
    assert_eq!(
        report.trace.failure,
        Some(FailureReason::NoPeak {
            stage: SearchState::CoarseScan
        })
    );
    let coarse = report.trace.coarse.as_ref().expect("coarse stage");
    assert!(coarse.views.iter().all(|v| v.lines == 1 && v.votes == 0));
}

#[test]
fn heatmaps_are_retained_on_request() {
    let dirs = test_directions();
    let hits = track_hits(true_vertex(), &fan_of_tracks(), 8, &dirs);

    let plain = VertexFinder::default().find_with_diagnostics(&hits, &dirs);
    assert!(plain.trace.coarse.as_ref().is_some_and(|p| p.maps.is_none()));

    let params = VertexParams {
        keep_heatmaps: true,
        ..Default::default()
    };
    let report = VertexFinder::new(params).find_with_diagnostics(&hits, &dirs);
    let maps = report
        .trace
        .zoom
        .as_ref()
        .and_then(|p| p.maps.as_ref())
        .expect("zoom maps");
    assert!(maps.iter().all(|m| m.nz == 50 && m.nx == 50));
    assert!(maps.iter().all(|m| m.total_weight() > 0.0));
}

#[test]
fn distant_outlier_fails_instead_of_allocating() {
    let dirs = test_directions();
    let mut hits = track_hits(true_vertex(), &fan_of_tracks(), 12, &dirs);
    hits.push(Hit::new(View::U, 1.0e9, 0.0, 1.0));

    let report = VertexFinder::default().find_with_diagnostics(&hits, &dirs);
    assert!(!report.result.found);
    assert!(report.result.vertex.is_none());
    assert_eq!(
        report.trace.failure,
        Some(FailureReason::MapTooLarge {
            stage: SearchState::CoarseScan,
            view: View::Z
        })
    );
    assert!(report.trace.coarse.is_none());
}

#[test]
fn zoom_map_above_cap_is_rejected() {
    let dirs = test_directions();
    let hits = track_hits(true_vertex(), &fan_of_tracks(), 8, &dirs);
    // Tight coarse window so only the 50x50 zoom map exceeds the cap.
    let mut strict = VertexParams {
        max_map_bins: 49 * 49,
        ..Default::default()
    };
    strict.coarse.transverse_padding = 5.0;
    strict.coarse.drift_padding = 5.0;
    strict.coarse.view0_max_quantile = None;

    let report = VertexFinder::new(strict).find_with_diagnostics(&hits, &dirs);
    assert_eq!(
        report.trace.failure,
        Some(FailureReason::MapTooLarge {
            stage: SearchState::ZoomScan,
            view: View::Z
        })
    );
    assert!(report.result.coarse_vertex.is_some());
    assert!(report.result.vertex.is_none());
}
