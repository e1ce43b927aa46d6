use super::{PassStage, TimingBreakdown};
use crate::detector::{FailureReason, SearchState};
use crate::points::SearchWindow;
use crate::types::VertexResult;
use serde::Serialize;

/// Result produced by [`VertexFinder::find_with_diagnostics`](crate::VertexFinder).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub result: VertexResult,
    pub trace: SearchTrace,
}

/// End-to-end trace of one vertex search.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTrace {
    pub hits: usize,
    /// Usable points per view.
    pub points: [usize; 3],
    /// Terminal state: `Done` or `Failed`.
    pub state: SearchState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<SearchWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coarse: Option<PassStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<PassStage>,
    pub timings: TimingBreakdown,
}

impl SearchTrace {
    pub fn new(hits: usize) -> Self {
        Self {
            hits,
            points: [0; 3],
            state: SearchState::Init,
            failure: None,
            window: None,
            coarse: None,
            zoom: None,
            timings: TimingBreakdown::default(),
        }
    }

    /// One-line summary used by the command-line runner.
    pub fn summary(&self) -> String {
        let lines = |stage: &Option<PassStage>| -> String {
            stage
                .as_ref()
                .map(|p| {
                    p.views
                        .iter()
                        .map(|v| v.lines.to_string())
                        .collect::<Vec<_>>()
                        .join("/")
                })
                .unwrap_or_else(|| "-".to_string())
        };
        let outcome = match &self.failure {
            Some(reason) => format!("failed ({reason})"),
            None => format!("{:?}", self.state).to_lowercase(),
        };
        format!(
            "points={}/{}/{} coarse_lines={} zoom_lines={} {} in {:.1} ms",
            self.points[0],
            self.points[1],
            self.points[2],
            lines(&self.coarse),
            lines(&self.zoom),
            outcome,
            self.timings.total_ms
        )
    }
}
