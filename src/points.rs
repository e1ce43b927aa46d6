//! Per-view point preparation and the coarse search window.
use crate::types::{Hit, Point2D, View};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// Points of the three views, in a deterministic pseudo-random order.
#[derive(Clone, Debug, Default)]
pub struct ViewPoints {
    views: [Vec<Point2D>; 3],
}

impl ViewPoints {
    /// Partitions `hits` by view and drops non-finite ones.
    ///
    /// Each view is sorted by transverse coordinate and then shuffled with a
    /// generator seeded by `seed`, so the order seen by the line generator's
    /// subsampling is fair yet independent of the input order.
    pub fn from_hits(hits: &[Hit], seed: u64) -> Self {
        let mut views: [Vec<Point2D>; 3] = Default::default();
        let mut dropped = 0usize;
        for hit in hits {
            if !hit.is_finite() {
                dropped += 1;
                continue;
            }
            views[hit.view.index()].push(Point2D::from(hit));
        }
        if dropped > 0 {
            debug!("points: dropped {} non-finite hits", dropped);
        }
        for (k, pts) in views.iter_mut().enumerate() {
            pts.sort_by(Point2D::cmp_z);
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(k as u64));
            pts.shuffle(&mut rng);
        }
        Self { views }
    }

    #[inline]
    pub fn get(&self, view: View) -> &[Point2D] {
        &self.views[view.index()]
    }

    pub fn counts(&self) -> [usize; 3] {
        [self.views[0].len(), self.views[1].len(), self.views[2].len()]
    }

    /// First view without points, if any.
    pub fn first_empty(&self) -> Option<View> {
        View::ALL.into_iter().find(|v| self.get(*v).is_empty())
    }
}

/// Padding and restriction rules for the coarse search window.
#[derive(Clone, Copy, Debug)]
pub struct WindowRules {
    pub transverse_padding: f64,
    pub drift_padding: f64,
    /// Quantile of view-0 transverse positions used as that view's upper bound.
    pub view0_max_quantile: Option<f64>,
}

/// Coarse search region: one transverse range per view, one shared drift range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SearchWindow {
    pub minz: [f64; 3],
    pub maxz: [f64; 3],
    pub minx: f64,
    pub maxx: f64,
}

impl SearchWindow {
    /// Bounding ranges of the points plus padding. Returns `None` when a view
    /// has no points.
    pub fn from_points(points: &ViewPoints, rules: &WindowRules) -> Option<Self> {
        let mut minz = [f64::INFINITY; 3];
        let mut maxz = [f64::NEG_INFINITY; 3];
        let mut minx = f64::INFINITY;
        let mut maxx = f64::NEG_INFINITY;
        for view in View::ALL {
            let pts = points.get(view);
            if pts.is_empty() {
                return None;
            }
            let k = view.index();
            for p in pts {
                minx = minx.min(p.x);
                maxx = maxx.max(p.x);
                minz[k] = minz[k].min(p.z);
                maxz[k] = maxz[k].max(p.z);
            }
        }

        for k in 0..3 {
            minz[k] -= rules.transverse_padding;
            maxz[k] += rules.transverse_padding;
        }
        minx -= rules.drift_padding;
        maxx += rules.drift_padding;

        // Keep the vertex upstream of most of the collection-view activity.
        if let Some(q) = rules.view0_max_quantile {
            if let Some(cut) = transverse_quantile(points.get(View::Z), q) {
                maxz[0] = cut;
            }
        }

        Some(Self {
            minz,
            maxz,
            minx,
            maxx,
        })
    }
}

/// Transverse value at rank `floor(len · q)` among `pts`.
pub fn transverse_quantile(pts: &[Point2D], q: f64) -> Option<f64> {
    if pts.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut zs: Vec<f64> = pts.iter().map(|p| p.z).collect();
    let idx = ((zs.len() as f64 * q) as usize).min(zs.len() - 1);
    let (_, nth, _) = zs.select_nth_unstable_by(idx, f64::total_cmp);
    Some(*nth)
}
