//! Diagnostics data model returned alongside the vertex.
//!
//! `SearchReport` is the main entry point: it bundles the compact
//! [`VertexResult`](crate::types::VertexResult) with a `SearchTrace` that
//! records, per pass and per view, how many points, lines and votes went into
//! the heat maps, where the peak was found and how long each stage took.

pub mod pass;
pub mod pipeline;
pub mod timing;

pub use pass::{PassStage, ViewPassStage};
pub use pipeline::{SearchReport, SearchTrace};
pub use timing::{StageTiming, TimingBreakdown};
