//! Parameter types configuring the two-pass vertex search.
//!
//! Defaults reproduce the detector-scale constants the algorithm was tuned
//! with (centimetre units): 1 cm coarse bins, ±100 cm transverse and ±20 cm
//! drift padding, a 2.5 cm zoom radius and 10M caps on lines and
//! intersections. None of them is derived from first principles; treat them
//! as tunable when the detector geometry changes.

use crate::angle::DEFAULT_CLOSE_ANGLE_DEG;
use crate::heatmap::DEFAULT_MAX_MAP_BINS;
use crate::intersect::DEFAULT_MAX_INTERSECTIONS;
use crate::lines::DEFAULT_MAX_LINES;
use crate::points::WindowRules;
use serde::{Deserialize, Serialize};

/// Search-wide parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexParams {
    pub coarse: CoarseParams,
    pub zoom: ZoomParams,
    /// Upper bound on candidate lines per view and pass.
    pub max_lines: usize,
    /// Upper bound on evaluated intersections per view and pass.
    pub max_intersections: usize,
    /// Upper bound on the bins of any single heat map; larger maps fail the
    /// search before anything is allocated.
    pub max_map_bins: usize,
    /// Lines closer in angle than this never vote together.
    pub close_angle_deg: f64,
    /// Seed of the per-view point shuffle.
    pub shuffle_seed: u64,
    /// Keep the heat maps of both passes in the diagnostics report.
    pub keep_heatmaps: bool,
}

impl Default for VertexParams {
    fn default() -> Self {
        Self {
            coarse: CoarseParams::default(),
            zoom: ZoomParams::default(),
            max_lines: DEFAULT_MAX_LINES,
            max_intersections: DEFAULT_MAX_INTERSECTIONS,
            max_map_bins: DEFAULT_MAX_MAP_BINS,
            close_angle_deg: DEFAULT_CLOSE_ANGLE_DEG,
            shuffle_seed: 0x5eed,
            keep_heatmaps: false,
        }
    }
}

/// Coarse pass over the full extent of the event.
///
/// - `bins_per_unit`: heat-map resolution on both axes.
/// - `transverse_padding`: added on both sides of every view's transverse range.
/// - `drift_padding`: added on both sides of the shared drift range.
/// - `view0_max_quantile`: caps view 0's transverse range at this quantile of
///   its points; `None` disables the cut.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CoarseParams {
    pub bins_per_unit: f64,
    pub transverse_padding: f64,
    pub drift_padding: f64,
    pub view0_max_quantile: Option<f64>,
}

impl Default for CoarseParams {
    fn default() -> Self {
        Self {
            bins_per_unit: 1.0,
            transverse_padding: 100.0,
            drift_padding: 20.0,
            view0_max_quantile: Some(0.25),
        }
    }
}

impl CoarseParams {
    pub fn window_rules(&self) -> WindowRules {
        WindowRules {
            transverse_padding: self.transverse_padding,
            drift_padding: self.drift_padding,
            view0_max_quantile: self.view0_max_quantile,
        }
    }
}

/// Zoom pass around the coarse vertex: a square map of `bins × bins` over
/// `±radius` on both axes, fed only by lines crossing the circle of that radius.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomParams {
    pub radius: f64,
    pub bins: usize,
}

impl Default for ZoomParams {
    fn default() -> Self {
        Self {
            radius: 2.5,
            bins: 50,
        }
    }
}
