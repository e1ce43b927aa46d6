use crate::types::View;
use serde::Serialize;
use std::fmt;

/// Stages of a vertex search. A search starts in `Init` and ends in either
/// `Done` or `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchState {
    Init,
    CoarseScan,
    ZoomScan,
    Done,
    Failed,
}

/// Why a search produced no vertex. These are expected outcomes for sparse
/// or degenerate events, not faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FailureReason {
    /// A view has no usable points.
    EmptyView { view: View },
    /// A view produced no candidate lines in the given pass.
    NoLines { stage: SearchState, view: View },
    /// The first two view directions are collinear.
    SingularDirections,
    /// A heat map of the given pass would exceed the bin cap.
    MapTooLarge { stage: SearchState, view: View },
    /// The fused heat maps collected no consistent weight.
    NoPeak { stage: SearchState },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::EmptyView { view } => write!(f, "no points in view {view:?}"),
            FailureReason::NoLines { stage, view } => {
                write!(f, "no candidate lines in view {view:?} during {stage:?}")
            }
            FailureReason::MapTooLarge { stage, view } => {
                write!(f, "heat map of view {view:?} too large during {stage:?}")
            }
            FailureReason::SingularDirections => write!(f, "view directions are collinear"),
            FailureReason::NoPeak { stage } => write!(f, "no peak during {stage:?}"),
        }
    }
}
