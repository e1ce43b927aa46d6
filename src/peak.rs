//! Fuses the three per-view heat maps into a single 3D peak.
//!
//! Views 0 and 1 fix a point `(y, z)` in the transverse plane through a 2×2
//! inversion; view 2 must see that point inside its own map. For every such
//! consistent triple of transverse bins the shared drift axis is scanned for
//! the largest summed weight. Per-row maxima give an upper bound on any
//! triple, so rows that cannot beat the running best are never scanned.
use crate::geometry::ViewDirections;
use crate::heatmap::HeatMap;
use crate::types::View;
use log::debug;
use nalgebra::{Vector2, Vector3};
use serde::Serialize;

/// Best-scoring consistent bin triple.
#[derive(Clone, Debug, Serialize)]
pub struct Peak {
    /// `(drift, y, z)` at the bin centres of the winning combination.
    pub position: Vector3<f64>,
    /// Summed weight of the three views at the peak.
    pub score: f32,
    /// Transverse bins `(iz, iu, iv)` and the drift bin `ix`.
    pub bins: [usize; 4],
}

/// Finds the 3D point maximising `h0[iz, ix] + h1[iu, ix] + h2[iv, ix]`.
///
/// All maps must share the drift binning. Returns `None` when the first two
/// directions are collinear, the drift binnings differ, or no consistent
/// combination collects any weight. Edge drift bins are not considered.
pub fn find_peak_3d(hs: &[HeatMap; 3], dirs: &ViewDirections) -> Option<Peak> {
    let Some(solver) = dirs.solver() else {
        debug!("peak: view directions 0 and 1 are collinear");
        return None;
    };
    let nx = hs[0].nx;
    if hs.iter().any(|h| h.nx != nx) {
        debug!("peak: drift binning differs between views");
        return None;
    }
    if nx < 3 {
        return None;
    }

    let row_max: [Vec<f32>; 3] = [hs[0].row_maxima(), hs[1].row_maxima(), hs[2].row_maxima()];
    let dir2 = *dirs.get(View::V);

    let mut best_score = 0.0f32;
    let mut best: Option<Peak> = None;
    let mut scanned = 0usize;

    for iz in 0..hs[0].nz {
        let z = hs[0].z_bin_center(iz);
        for iu in 0..hs[1].nz {
            let u = hs[1].z_bin_center(iu);
            // r·d0 = z and r·d1 = u
            let r = solver * Vector2::new(z, u);
            let v = r.dot(&dir2);
            let Some(iv) = hs[2].z_to_bin(v) else {
                continue;
            };

            // Even with all maxima at the same drift bin the record stands.
            if row_max[0][iz] + row_max[1][iu] + row_max[2][iv] <= best_score {
                continue;
            }
            scanned += 1;

            let h0 = hs[0].row(iz);
            let h1 = hs[1].row(iu);
            let h2 = hs[2].row(iv);
            let mut best_ix = None;
            for ix in 1..nx - 1 {
                let score = h0[ix] + h1[ix] + h2[ix];
                if score > best_score {
                    best_score = score;
                    best_ix = Some(ix);
                }
            }

            if let Some(ix) = best_ix {
                best = Some(Peak {
                    position: Vector3::new(hs[0].x_bin_center(ix), r.x, r.y),
                    score: best_score,
                    bins: [iz, iu, iv, ix],
                });
            }
        }
    }

    debug!(
        "peak: scanned {} of {} transverse combinations, best score {:.1}",
        scanned,
        hs[0].nz * hs[1].nz,
        best_score
    );
    best
}
