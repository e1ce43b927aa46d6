use super::{CircleWindow, Line2D};
use crate::types::Point2D;
use log::{debug, warn};
use serde::Serialize;

/// Default cap on lines per view (about 150 MB of `Line2D`).
pub const DEFAULT_MAX_LINES: usize = 10_000_000;

/// Slope-sorted candidate lines of one view with generation statistics.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LineSet {
    #[serde(skip)]
    pub lines: Vec<Line2D>,
    /// Number of point pairs available before subsampling.
    pub candidate_pairs: usize,
    /// Pair enumeration step; `1` means every pair was visited.
    pub stride: usize,
    /// Whether generation stopped at the cap.
    pub capped: bool,
}

impl LineSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Builds candidate lines from point pairs.
///
/// When the number of pairs exceeds `max_lines`, pairs `(i, i + offset + 1 +
/// k·stride)` are enumerated for each `offset < stride`, giving a spread-out
/// subsample of the whole pair space instead of a prefix biased towards low
/// indices. With a `window`, only lines admitted by the circle are kept.
/// The returned lines are sorted by ascending slope.
pub fn lines_from_points(
    pts: &[Point2D],
    max_lines: usize,
    window: Option<&CircleWindow>,
) -> LineSet {
    let n = pts.len();
    let max_lines = max_lines.max(1);
    if n < 2 {
        return LineSet {
            stride: 1,
            ..Default::default()
        };
    }

    let product = n * (n - 1) / 2;
    let stride = product / max_lines + 1;
    let mut lines = Vec::with_capacity(product.min(max_lines));
    let mut capped = false;

    'enumerate: for offset in 0..stride {
        for i in 0..n {
            let mut j = i + offset + 1;
            while j < n {
                if let Some(line) = Line2D::through(&pts[i], &pts[j]) {
                    if window.map_or(true, |w| w.admits(&line)) {
                        lines.push(line);
                        if lines.len() == max_lines {
                            capped = true;
                            break 'enumerate;
                        }
                    }
                }
                j += stride;
            }
        }
    }

    lines.shrink_to_fit();
    lines.sort_unstable_by(Line2D::cmp_slope);

    if capped {
        warn!(
            "line generation hit the cap of {} lines (pairs={} stride={})",
            max_lines, product, stride
        );
    }
    debug!(
        "made {} lines from {} points using stride {} (cap {})",
        lines.len(),
        n,
        stride,
        max_lines
    );

    LineSet {
        lines,
        candidate_pairs: product,
        stride,
        capped,
    }
}
