use crate::heatmap::HeatMap;
use crate::intersect::AccumulationStats;
use crate::lines::LineSet;
use crate::peak::Peak;
use crate::types::View;
use serde::Serialize;

/// What one view contributed to a pass.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPassStage {
    pub view: View,
    pub points: usize,
    pub lines: usize,
    pub candidate_pairs: usize,
    pub line_stride: usize,
    pub lines_capped: bool,
    pub intersection_pairs: usize,
    pub intersection_stride: usize,
    pub votes: usize,
    /// Heat-map size as `[transverse bins, drift bins]`.
    pub map_bins: [usize; 2],
    pub max_weight: f32,
    pub elapsed_ms: f64,
}

impl ViewPassStage {
    pub fn new(
        view: View,
        points: usize,
        lines: &LineSet,
        accumulation: &AccumulationStats,
        map: &HeatMap,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            view,
            points,
            lines: lines.len(),
            candidate_pairs: lines.candidate_pairs,
            line_stride: lines.stride,
            lines_capped: lines.capped,
            intersection_pairs: accumulation.pairs,
            intersection_stride: accumulation.stride,
            votes: accumulation.votes,
            map_bins: [map.nz, map.nx],
            max_weight: map.max_weight(),
            elapsed_ms,
        }
    }
}

/// One coarse or zoom pass over the three views.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassStage {
    pub views: Vec<ViewPassStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak: Option<Peak>,
    pub elapsed_ms: f64,
    /// Heat maps of the pass, retained only on request.
    #[serde(skip)]
    pub maps: Option<[HeatMap; 3]>,
}
