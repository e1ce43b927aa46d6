//! Two-pass vertex search over three wire-plane views.
//!
//! Overview
//! - Partitions hits by view, orders each view deterministically and derives
//!   a padded search window (view 0 capped at a low quantile of its points).
//! - Coarse scan: builds candidate lines from all point pairs of each view,
//!   votes their pairwise intersections into a ~1 unit/bin heat map, and fuses
//!   the three maps into a coarse 3D vertex.
//! - Zoom scan: keeps only lines crossing a small circle around each view's
//!   projection of the coarse vertex, votes into a fine map over that circle's
//!   bounding square, and fuses again for the final vertex.
//!
//! Modules
//! - [`params`] – tunable constants of both passes.
//! - `pipeline` – the [`VertexFinder`] driver.
//! - `state` – search states and failure reasons.

pub mod params;
mod pipeline;
mod state;

pub use params::{CoarseParams, VertexParams, ZoomParams};
pub use pipeline::VertexFinder;
pub use state::{FailureReason, SearchState};
