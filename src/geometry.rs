//! Wire-plane view directions.
//!
//! Every view measures the projection of a 3D position onto one unit
//! direction in the `(y, z)` plane perpendicular to drift. Only two
//! independent directions exist in that plane, so the first two views fix a
//! point and the third must agree with it.
use crate::types::View;
use nalgebra::{Matrix2, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Transverse unit directions `(y, z)` of the three views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 2]; 3]", into = "[[f64; 2]; 3]")]
pub struct ViewDirections {
    dirs: [Vector2<f64>; 3],
}

impl ViewDirections {
    /// Normalises the three directions. Returns `None` if any of them has
    /// zero or non-finite length.
    pub fn new(z: Vector2<f64>, u: Vector2<f64>, v: Vector2<f64>) -> Option<Self> {
        let mut dirs = [z, u, v];
        for d in dirs.iter_mut() {
            let norm = d.norm();
            if !(norm.is_finite() && norm > 0.0) {
                return None;
            }
            *d /= norm;
        }
        Some(Self { dirs })
    }

    /// Directions for a detector whose collection view measures `z` and
    /// whose induction wires run along `u_wire` and `v_wire` (as `(y, z)`).
    ///
    /// Each induction view measures the coordinate perpendicular to its
    /// wires, oriented so its `z` component is non-negative.
    pub fn from_wire_axes(u_wire: Vector2<f64>, v_wire: Vector2<f64>) -> Option<Self> {
        Self::new(
            Vector2::new(0.0, 1.0),
            wire_normal(u_wire),
            wire_normal(v_wire),
        )
    }

    #[inline]
    pub fn get(&self, view: View) -> &Vector2<f64> {
        &self.dirs[view.index()]
    }

    /// Transverse coordinate of `vertex = (x, y, z)` as seen by `view`.
    #[inline]
    pub fn project(&self, vertex: &Vector3<f64>, view: View) -> f64 {
        let d = self.get(view);
        vertex.y * d.x + vertex.z * d.y
    }

    /// Inverse of the matrix whose rows are the first two view directions,
    /// mapping `(t0, t1)` transverse coordinates to `(y, z)`. `None` when the
    /// two directions are collinear.
    pub fn solver(&self) -> Option<Matrix2<f64>> {
        let d0 = self.dirs[0];
        let d1 = self.dirs[1];
        let m = Matrix2::new(d0.x, d0.y, d1.x, d1.y);
        if m.determinant() == 0.0 {
            return None;
        }
        m.try_inverse()
    }
}

fn wire_normal(wire: Vector2<f64>) -> Vector2<f64> {
    let perp = Vector2::new(-wire.y, wire.x);
    if perp.y < 0.0 {
        -perp
    } else {
        perp
    }
}

impl TryFrom<[[f64; 2]; 3]> for ViewDirections {
    type Error = String;

    fn try_from(raw: [[f64; 2]; 3]) -> Result<Self, Self::Error> {
        let [z, u, v] = raw.map(|[y, z]| Vector2::new(y, z));
        ViewDirections::new(z, u, v)
            .ok_or_else(|| "view directions must have finite, non-zero length".to_string())
    }
}

impl From<ViewDirections> for [[f64; 2]; 3] {
    fn from(dirs: ViewDirections) -> Self {
        dirs.dirs.map(|d| [d.x, d.y])
    }
}
