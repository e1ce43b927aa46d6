//! Candidate lines built from pairs of points within one view.
//!
//! Every pair of points defines a line `x = m·z + c` in (transverse, drift)
//! space. Lines are the voters of the intersection accumulator, so the
//! generator caps their number, optionally restricts them to a circular
//! window, and returns them sorted by slope.

mod circle;
mod generator;
mod line;

pub use circle::{intersects_circle, CircleWindow};
pub use generator::{lines_from_points, LineSet, DEFAULT_MAX_LINES};
pub use line::Line2D;
