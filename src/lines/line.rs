use crate::types::Point2D;
use serde::Serialize;
use std::cmp::Ordering;

/// Line `x = m·z + c` through two points, remembering the transverse extent
/// of the segment between them.
///
/// Stored in single precision: the generator may hold millions of these.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Line2D {
    pub m: f32,
    pub c: f32,
    pub minz: f32,
    pub maxz: f32,
}

impl Line2D {
    /// Line through `a` and `b`, or `None` when slope or intercept is not
    /// finite (coincident or vertically aligned points).
    pub fn through(a: &Point2D, b: &Point2D) -> Option<Self> {
        let m = (b.x - a.x) / (b.z - a.z);
        let c = b.x - m * b.z;
        let line = Line2D {
            m: m as f32,
            c: c as f32,
            minz: a.z.min(b.z) as f32,
            maxz: a.z.max(b.z) as f32,
        };
        line.is_finite().then_some(line)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.is_finite() && self.c.is_finite()
    }

    /// Whether `z` lies within the segment's own transverse extent.
    #[inline]
    pub fn covers(&self, z: f64) -> bool {
        z >= self.minz as f64 && z <= self.maxz as f64
    }

    #[inline]
    pub fn x_at(&self, z: f64) -> f64 {
        self.m as f64 * z + self.c as f64
    }

    /// Slope ordering used to sort candidate sets.
    #[inline]
    pub fn cmp_slope(&self, other: &Self) -> Ordering {
        self.m.total_cmp(&other.m)
    }
}
