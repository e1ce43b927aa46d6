use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One of the three wire-plane views. Index 0 is the collection view whose
/// transverse axis is the beam axis `z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Z,
    U,
    V,
}

impl View {
    pub const ALL: [View; 3] = [View::Z, View::U, View::V];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            View::Z => 0,
            View::U => 1,
            View::V => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        View::ALL.get(index).copied()
    }
}

/// Calibrated hit as delivered by the upstream hit-finding stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub view: View,
    /// Position along the drift axis (shared by all views).
    pub drift: f64,
    /// Position along the view's transverse axis.
    pub transverse: f64,
    /// Deposited charge, used as a bookkeeping weight.
    #[serde(default = "unit_energy")]
    pub energy: f64,
}

fn unit_energy() -> f64 {
    1.0
}

impl Hit {
    pub fn new(view: View, drift: f64, transverse: f64, energy: f64) -> Self {
        Self {
            view,
            drift,
            transverse,
            energy,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.drift.is_finite() && self.transverse.is_finite() && self.energy.is_finite()
    }
}

/// A hit projected into its view: `x` is drift, `z` is transverse.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
    pub view: View,
    pub energy: f64,
}

impl Point2D {
    pub fn new(x: f64, z: f64, view: View, energy: f64) -> Self {
        Self { x, z, view, energy }
    }

    /// Total order on the transverse coordinate, ties broken by drift and
    /// energy.
    #[inline]
    pub fn cmp_z(&self, other: &Self) -> Ordering {
        self.z
            .total_cmp(&other.z)
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| self.energy.total_cmp(&other.energy))
    }
}

impl From<&Hit> for Point2D {
    fn from(hit: &Hit) -> Self {
        Point2D::new(hit.drift, hit.transverse, hit.view, hit.energy)
    }
}

/// Compact outcome of a vertex search.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VertexResult {
    pub found: bool,
    /// Final (zoom pass) vertex as `(drift, y, z)`.
    pub vertex: Option<Vector3<f64>>,
    /// Vertex after the coarse pass, kept for diagnostics.
    pub coarse_vertex: Option<Vector3<f64>>,
    /// Summed heat-map weight at the final vertex.
    pub score: f32,
    pub latency_ms: f64,
}
