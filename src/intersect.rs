//! Pairwise intersection voting of slope-sorted lines into a heat map.
//!
//! Near-parallel pairs are skipped: their intersections are numerically
//! unstable and mostly come from segments of the same track. Because lines are
//! sorted by slope, the admissible partners of line `i` among `i+1..` form a
//! single contiguous range `[j0, jmax)`. Both bounds only ever move forward,
//! so locating them costs amortised linear time over the whole pass.
use crate::angle::AngleCloseness;
use crate::heatmap::HeatMap;
use crate::lines::Line2D;
use log::{debug, warn};
use serde::Serialize;

/// Default cap on intersections evaluated per view.
pub const DEFAULT_MAX_INTERSECTIONS: usize = 10_000_000;

/// Counters describing one accumulation pass.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct AccumulationStats {
    /// Admissible (not near-parallel) pairs before subsampling.
    pub pairs: usize,
    /// Partner step; each cast vote carries this weight.
    pub stride: usize,
    /// Votes that landed inside the map.
    pub votes: usize,
}

/// Forward-only window over the not-close partners of each line.
struct PartnerWindow<'a> {
    lines: &'a [Line2D],
    closeness: AngleCloseness,
    j0: usize,
    jmax: usize,
}

impl<'a> PartnerWindow<'a> {
    fn new(lines: &'a [Line2D], closeness: AngleCloseness) -> Self {
        Self {
            lines,
            closeness,
            j0: 0,
            jmax: 0,
        }
    }

    /// Partner range of line `i`; must be called with increasing `i`.
    fn advance(&mut self, i: usize) -> (usize, usize) {
        let n = self.lines.len();
        let m = self.lines[i].m;
        self.j0 = self.j0.max(i + 1);
        while self.j0 < n && self.closeness.is_close(m, self.lines[self.j0].m) {
            self.j0 += 1;
        }
        self.jmax = self.jmax.max(self.j0);
        while self.jmax < n && !self.closeness.is_close(m, self.lines[self.jmax].m) {
            self.jmax += 1;
        }
        (self.j0, self.jmax)
    }
}

/// Counts the pairs that [`map_from_lines`] would consider without a cap.
pub fn count_admissible_pairs(lines: &[Line2D], closeness: AngleCloseness) -> usize {
    let mut window = PartnerWindow::new(lines, closeness);
    let mut npts = 0usize;
    for i in 0..lines.len().saturating_sub(1) {
        let (j0, jmax) = window.advance(i);
        npts += jmax - j0;
    }
    npts
}

/// Intersection of two lines, `None` for parallel or non-finite results.
#[inline]
pub fn intersection(a: &Line2D, b: &Line2D) -> Option<(f64, f64)> {
    // x = ma·z + ca = mb·z + cb
    let z = (b.c as f64 - a.c as f64) / (a.m as f64 - b.m as f64);
    let x = a.x_at(z);
    (z.is_finite() && x.is_finite()).then_some((z, x))
}

/// Accumulates the intersections of all admissible line pairs into `hm`.
///
/// `lines` must be sorted by ascending slope. When the admissible pairs
/// exceed `max_intersections`, only every `stride`-th partner is visited and
/// each vote is weighted by `stride` to keep the map's scale comparable.
/// An intersection that falls within either source segment is not a vote.
pub fn map_from_lines(
    lines: &[Line2D],
    hm: &mut HeatMap,
    max_intersections: usize,
    closeness: AngleCloseness,
) -> AccumulationStats {
    debug_assert!(lines.windows(2).all(|w| w[0].m <= w[1].m));

    let npts = count_admissible_pairs(lines, closeness);
    let stride = npts / max_intersections.max(1) + 1;
    if stride > 1 {
        warn!(
            "combining lines to points with stride {} ({} admissible pairs, cap {})",
            stride, npts, max_intersections
        );
    }
    let product = lines.len() * lines.len().saturating_sub(1) / 2;
    debug!(
        "intersections: {} admissible of {} pairs ({:.3}), stride {}",
        npts,
        product,
        if product > 0 {
            npts as f64 / product as f64
        } else {
            0.0
        },
        stride
    );

    let weight = stride as f32;
    let mut votes = 0usize;
    let mut window = PartnerWindow::new(lines, closeness);
    for i in 0..lines.len().saturating_sub(1) {
        let a = &lines[i];
        let (j0, jmax) = window.advance(i);
        for b in lines[j0..jmax].iter().step_by(stride) {
            let Some((z, x)) = intersection(a, b) else {
                continue;
            };
            // No solutions within a segment.
            if a.covers(z) || b.covers(z) {
                continue;
            }
            if hm.fill(z, x, weight) {
                votes += 1;
            }
        }
    }

    AccumulationStats {
        pairs: npts,
        stride,
        votes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(m: f32, c: f32, minz: f32, maxz: f32) -> Line2D {
        Line2D { m, c, minz, maxz }
    }

    fn sorted(mut lines: Vec<Line2D>) -> Vec<Line2D> {
        lines.sort_by(Line2D::cmp_slope);
        lines
    }

    #[test]
    fn crossing_outside_segments_votes_once() {
        // Both lines pass through (z, x) = (0, 0); segments lie at z in [2, 6].
        let lines = sorted(vec![line(1.0, 0.0, 2.0, 6.0), line(-1.0, 0.0, 2.0, 6.0)]);
        let mut hm = HeatMap::new(10, -5.0, 5.0, 10, -5.0, 5.0);
        let stats = map_from_lines(&lines, &mut hm, DEFAULT_MAX_INTERSECTIONS, AngleCloseness::default());
        assert_eq!(stats.pairs, 1);
        assert_eq!(stats.stride, 1);
        assert_eq!(stats.votes, 1);
        assert_eq!(hm.get(5, 5), 1.0);
        assert_eq!(hm.total_weight(), 1.0);
    }

    #[test]
    fn crossing_inside_a_segment_is_rejected() {
        let lines = sorted(vec![line(1.0, 0.0, -1.0, 6.0), line(-1.0, 0.0, 2.0, 6.0)]);
        let mut hm = HeatMap::new(10, -5.0, 5.0, 10, -5.0, 5.0);
        let stats = map_from_lines(&lines, &mut hm, DEFAULT_MAX_INTERSECTIONS, AngleCloseness::default());
        assert_eq!(stats.pairs, 1);
        assert_eq!(stats.votes, 0);
        assert_eq!(hm.total_weight(), 0.0);
    }

    #[test]
    fn near_parallel_pairs_are_skipped() {
        let m2 = 5.0f64.to_radians().tan() as f32;
        let lines = sorted(vec![line(0.0, 0.0, 2.0, 6.0), line(m2, 1.0, 2.0, 6.0)]);
        assert_eq!(count_admissible_pairs(&lines, AngleCloseness::default()), 0);
    }

    #[test]
    fn window_matches_brute_force_count() {
        let closeness = AngleCloseness::default();
        let lines = sorted(
            (0..60)
                .map(|k| {
                    let deg = -88.5 + 3.0 * k as f64;
                    line(deg.to_radians().tan() as f32, k as f32, 0.0, 1.0)
                })
                .collect(),
        );
        let mut brute = 0usize;
        for i in 0..lines.len() {
            for j in i + 1..lines.len() {
                if !closeness.is_close(lines[i].m, lines[j].m) {
                    brute += 1;
                }
            }
        }
        assert_eq!(count_admissible_pairs(&lines, closeness), brute);
    }

    #[test]
    fn stride_weights_votes_when_capped() {
        // Fan of lines through (0, 0), segments on the positive side.
        let lines = sorted(
            (0..40)
                .map(|k| {
                    let deg = -78.0 + 4.0 * k as f64;
                    line(deg.to_radians().tan() as f32, 0.0, 1.0, 3.0)
                })
                .collect(),
        );
        let closeness = AngleCloseness::default();
        let npts = count_admissible_pairs(&lines, closeness);
        let mut hm = HeatMap::new(10, -0.5, 0.5, 10, -0.5, 0.5);
        let stats = map_from_lines(&lines, &mut hm, npts / 3, closeness);
        assert!(stats.stride >= 3);
        assert!(stats.votes < npts);
        let expected = stats.votes as f64 * stats.stride as f64;
        assert!((hm.total_weight() - expected).abs() < 1e-6);
    }
}
