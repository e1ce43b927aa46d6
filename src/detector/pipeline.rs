//! Vertex finder driving the coarse and zoom passes end-to-end.
//!
//! The [`VertexFinder`] exposes a small API: feed the hits of one event and
//! the view directions, get back a 3D vertex or nothing. Internally it walks
//! `Init → CoarseScan → ZoomScan → Done`, dropping to `Failed` as soon as a
//! view runs out of points or lines, the directions are collinear, or a pass
//! finds no peak.
//!
//! Typical usage:
//! ```no_run
//! use quad_vertex::{Hit, VertexFinder, VertexParams, ViewDirections};
//!
//! # fn example(hits: Vec<Hit>, dirs: ViewDirections) {
//! let finder = VertexFinder::new(VertexParams::default());
//! let report = finder.find_with_diagnostics(&hits, &dirs);
//! if let Some(vtx) = report.result.vertex {
//!     println!("vertex: ({:.2}, {:.2}, {:.2})", vtx.x, vtx.y, vtx.z);
//! }
//! # }
//! ```
use super::params::VertexParams;
use super::state::{FailureReason, SearchState};
use crate::angle::AngleCloseness;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{PassStage, SearchReport, SearchTrace, ViewPassStage};
use crate::geometry::ViewDirections;
use crate::heatmap::HeatMap;
use crate::intersect::map_from_lines;
use crate::lines::{lines_from_points, CircleWindow};
use crate::peak::{find_peak_3d, Peak};
use crate::points::{SearchWindow, ViewPoints};
use crate::types::{Hit, Point2D, VertexResult, View};
use log::{debug, warn};
use nalgebra::Vector3;
use std::time::Instant;

/// Two-pass line-intersection vertex finder.
///
/// Holds only parameters; every search owns its points, lines and heat maps,
/// so one finder can serve concurrent searches.
#[derive(Clone, Debug, Default)]
pub struct VertexFinder {
    params: VertexParams,
}

/// Work item for one view within a pass.
struct ViewJob<'a> {
    view: View,
    points: &'a [Point2D],
    map: HeatMap,
    window: Option<CircleWindow>,
}

struct ViewBuild {
    map: HeatMap,
    stage: ViewPassStage,
}

impl VertexFinder {
    pub fn new(params: VertexParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &VertexParams {
        &self.params
    }

    /// Final vertex `(drift, y, z)`, or `None` when the event yields none.
    pub fn find(&self, hits: &[Hit], dirs: &ViewDirections) -> Option<Vector3<f64>> {
        self.find_with_diagnostics(hits, dirs).result.vertex
    }

    /// Runs the search and returns both the result and a detailed trace.
    pub fn find_with_diagnostics(&self, hits: &[Hit], dirs: &ViewDirections) -> SearchReport {
        let total_start = Instant::now();
        let mut trace = SearchTrace::new(hits.len());
        let mut result = VertexResult::default();

        let outcome = self.run(hits, dirs, &mut trace, &mut result);
        match outcome {
            Ok(peak) => {
                trace.state = SearchState::Done;
                result.found = true;
                result.vertex = Some(peak.position);
                result.score = peak.score;
            }
            Err(reason) => {
                debug!("vertex search failed: {}", reason);
                trace.state = SearchState::Failed;
                trace.failure = Some(reason);
            }
        }

        trace.timings.total_ms = elapsed_ms(total_start);
        result.latency_ms = trace.timings.total_ms;
        SearchReport { result, trace }
    }

    fn run(
        &self,
        hits: &[Hit],
        dirs: &ViewDirections,
        trace: &mut SearchTrace,
        result: &mut VertexResult,
    ) -> Result<Peak, FailureReason> {
        // Init
        let init_start = Instant::now();
        let points = ViewPoints::from_hits(hits, self.params.shuffle_seed);
        trace.points = points.counts();
        if let Some(view) = points.first_empty() {
            return Err(FailureReason::EmptyView { view });
        }
        if dirs.solver().is_none() {
            return Err(FailureReason::SingularDirections);
        }
        let window = SearchWindow::from_points(&points, &self.params.coarse.window_rules())
            .ok_or(FailureReason::EmptyView { view: View::Z })?;
        trace.window = Some(window);
        trace.timings.record_since("init", init_start);
        debug!(
            "init: points={:?} drift=[{:.1}, {:.1}]",
            trace.points, window.minx, window.maxx
        );

        // Coarse scan over the whole event.
        trace.state = SearchState::CoarseScan;
        let bins_per_unit = self.params.coarse.bins_per_unit;
        for view in View::ALL {
            let k = view.index();
            let (nz, nx) = HeatMap::resolution_bins(
                window.minz[k],
                window.maxz[k],
                window.minx,
                window.maxx,
                bins_per_unit,
            );
            self.check_map_size(SearchState::CoarseScan, view, nz, nx)?;
        }
        let jobs = View::ALL.map(|view| {
            let k = view.index();
            ViewJob {
                view,
                points: points.get(view),
                map: HeatMap::with_resolution(
                    window.minz[k],
                    window.maxz[k],
                    window.minx,
                    window.maxx,
                    bins_per_unit,
                ),
                window: None,
            }
        });
        let coarse = self.scan(SearchState::CoarseScan, jobs, dirs, trace)?;
        let coarse_vtx = coarse.position;
        result.coarse_vertex = Some(coarse_vtx);
        debug!(
            "coarse vertex ({:.2}, {:.2}, {:.2}) score {:.1}",
            coarse_vtx.x, coarse_vtx.y, coarse_vtx.z, coarse.score
        );

        // Zoom scan around the projections of the coarse vertex.
        trace.state = SearchState::ZoomScan;
        let radius = self.params.zoom.radius;
        let bins = self.params.zoom.bins;
        let x0 = coarse_vtx.x;
        for view in View::ALL {
            self.check_map_size(SearchState::ZoomScan, view, bins, bins)?;
        }
        let jobs = View::ALL.map(|view| {
            let z0 = dirs.project(&coarse_vtx, view);
            ViewJob {
                view,
                points: points.get(view),
                map: HeatMap::new(bins, z0 - radius, z0 + radius, bins, x0 - radius, x0 + radius),
                window: Some(CircleWindow::new(z0, x0, radius)),
            }
        });
        let fine = self.scan(SearchState::ZoomScan, jobs, dirs, trace)?;
        debug!(
            "final vertex ({:.3}, {:.3}, {:.3}) score {:.1}",
            fine.position.x, fine.position.y, fine.position.z, fine.score
        );
        Ok(fine)
    }

    /// Rejects maps above `max_map_bins` before they are allocated.
    fn check_map_size(
        &self,
        stage: SearchState,
        view: View,
        nz: usize,
        nx: usize,
    ) -> Result<(), FailureReason> {
        match nz.checked_mul(nx) {
            Some(total) if total <= self.params.max_map_bins => Ok(()),
            _ => {
                warn!(
                    "{:?} map for view {:?} needs {}x{} bins (cap {})",
                    stage, view, nz, nx, self.params.max_map_bins
                );
                Err(FailureReason::MapTooLarge { stage, view })
            }
        }
    }

    /// Builds the three heat maps of one pass and fuses them.
    fn scan(
        &self,
        stage: SearchState,
        jobs: [ViewJob<'_>; 3],
        dirs: &ViewDirections,
        trace: &mut SearchTrace,
    ) -> Result<Peak, FailureReason> {
        let start = Instant::now();
        let builds = self.build_views(jobs);

        let mut pass = PassStage {
            views: builds.iter().map(|b| b.stage.clone()).collect(),
            ..Default::default()
        };
        let empty = builds.iter().find(|b| b.stage.lines == 0).map(|b| b.stage.view);
        let [h0, h1, h2] = builds;
        let maps = [h0.map, h1.map, h2.map];

        let peak = match empty {
            Some(view) => Err(FailureReason::NoLines { stage, view }),
            None => find_peak_3d(&maps, dirs).ok_or(FailureReason::NoPeak { stage }),
        };

        pass.peak = peak.as_ref().ok().cloned();
        pass.elapsed_ms = elapsed_ms(start);
        if self.params.keep_heatmaps {
            pass.maps = Some(maps);
        }
        let label = match stage {
            SearchState::CoarseScan => "coarse",
            _ => "zoom",
        };
        trace.timings.push(label, pass.elapsed_ms);
        match stage {
            SearchState::CoarseScan => trace.coarse = Some(pass),
            _ => trace.zoom = Some(pass),
        }
        peak
    }

    #[cfg(feature = "parallel")]
    fn build_views(&self, jobs: [ViewJob<'_>; 3]) -> [ViewBuild; 3] {
        let [j0, j1, j2] = jobs;
        let (b0, (b1, b2)) = rayon::join(
            || self.build_view(j0),
            || rayon::join(|| self.build_view(j1), || self.build_view(j2)),
        );
        [b0, b1, b2]
    }

    #[cfg(not(feature = "parallel"))]
    fn build_views(&self, jobs: [ViewJob<'_>; 3]) -> [ViewBuild; 3] {
        jobs.map(|job| self.build_view(job))
    }

    /// Lines then intersections for a single view.
    fn build_view(&self, job: ViewJob<'_>) -> ViewBuild {
        let start = Instant::now();
        let ViewJob {
            view,
            points,
            mut map,
            window,
        } = job;
        let lines = lines_from_points(points, self.params.max_lines, window.as_ref());
        let closeness = AngleCloseness::from_degrees(self.params.close_angle_deg);
        let accumulation = map_from_lines(&lines.lines, &mut map, self.params.max_intersections, closeness);
        let stage = ViewPassStage::new(
            view,
            points.len(),
            &lines,
            &accumulation,
            &map,
            elapsed_ms(start),
        );
        debug!(
            "view {:?}: {} points, {} lines, {} votes, max weight {:.1}",
            view, stage.points, stage.lines, stage.votes, stage.max_weight
        );
        ViewBuild { map, stage }
    }
}
