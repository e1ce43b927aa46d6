//! Three-view vertex finding for wire-plane detectors.
//!
//! Each view records hits as `(drift, transverse)` pairs. Hits of the same
//! view are joined into lines, the lines are intersected pairwise into a
//! per-view heat map, and the three maps are fused into one 3D peak through
//! the view directions. A coarse pass over the whole event is followed by a
//! fine pass around the coarse answer.
//!
//! ```no_run
//! use quad_vertex::prelude::*;
//! use nalgebra::Vector2;
//!
//! # fn main() {
//! let dirs = ViewDirections::new(
//!     Vector2::new(0.0, 1.0),
//!     Vector2::new(0.866, 0.5),
//!     Vector2::new(-0.866, 0.5),
//! )
//! .expect("directions");
//! let hits = vec![Hit::new(View::Z, 12.0, 40.0, 1.0)];
//! let finder = VertexFinder::new(VertexParams::default());
//! let report = finder.find_with_diagnostics(&hits, &dirs);
//! println!("found={} latency_ms={:.3}", report.result.found, report.result.latency_ms);
//! # }
//! ```

// Public modules (stable surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod geometry;
pub mod io;
pub mod types;

// Building blocks of the passes.
pub mod angle;
pub mod heatmap;
pub mod intersect;
pub mod lines;
pub mod peak;
pub mod points;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{FailureReason, SearchState, VertexFinder, VertexParams};
pub use crate::geometry::ViewDirections;
pub use crate::heatmap::HeatMap;
pub use crate::types::{Hit, Point2D, VertexResult, View};

pub use crate::diagnostics::{SearchReport, SearchTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::{Hit, VertexFinder, VertexParams, VertexResult, View, ViewDirections};
}
