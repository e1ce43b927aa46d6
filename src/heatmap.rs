//! Dense 2D vote accumulator over `(transverse, drift)` space.
//!
//! Rows are transverse (`z`) bins and columns are drift (`x`) bins, stored
//! row-major so the peak finder can scan one transverse bin as a contiguous
//! slice. Bounds and bin counts are fixed at construction; accumulation only
//! ever adds weight.
use serde::Serialize;

/// Default cap on the bins of one heat map (64 MB of `f32`).
pub const DEFAULT_MAX_MAP_BINS: usize = 16_000_000;

/// Fixed-resolution weighted histogram used as a voting accumulator.
#[derive(Clone, Debug, Serialize)]
pub struct HeatMap {
    /// Number of transverse bins (rows).
    pub nz: usize,
    pub minz: f64,
    pub maxz: f64,
    /// Number of drift bins (columns).
    pub nx: usize,
    pub minx: f64,
    pub maxx: f64,
    #[serde(skip)]
    data: Vec<f32>,
}

impl HeatMap {
    /// Zero-initialised map of `nz × nx` bins over `[minz, maxz) × [minx, maxx)`.
    pub fn new(nz: usize, minz: f64, maxz: f64, nx: usize, minx: f64, maxx: f64) -> Self {
        Self {
            nz,
            minz,
            maxz,
            nx,
            minx,
            maxx,
            data: vec![0.0; nz * nx],
        }
    }

    /// Map whose bin count follows from the covered range and a resolution in
    /// bins per spatial unit. Partial bins at the upper edge are truncated.
    pub fn with_resolution(
        minz: f64,
        maxz: f64,
        minx: f64,
        maxx: f64,
        bins_per_unit: f64,
    ) -> Self {
        let (nz, nx) = Self::resolution_bins(minz, maxz, minx, maxx, bins_per_unit);
        Self::new(nz, minz, maxz, nx, minx, maxx)
    }

    /// Bin counts `(nz, nx)` that [`HeatMap::with_resolution`] would allocate.
    pub fn resolution_bins(
        minz: f64,
        maxz: f64,
        minx: f64,
        maxx: f64,
        bins_per_unit: f64,
    ) -> (usize, usize) {
        (
            axis_bins(minz, maxz, bins_per_unit),
            axis_bins(minx, maxx, bins_per_unit),
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Transverse bin containing `z`, or `None` when outside the map.
    #[inline]
    pub fn z_to_bin(&self, z: f64) -> Option<usize> {
        value_to_bin(z, self.minz, self.maxz, self.nz)
    }

    /// Drift bin containing `x`, or `None` when outside the map.
    #[inline]
    pub fn x_to_bin(&self, x: f64) -> Option<usize> {
        value_to_bin(x, self.minx, self.maxx, self.nx)
    }

    #[inline]
    pub fn z_bin_center(&self, iz: usize) -> f64 {
        bin_center(iz, self.minz, self.maxz, self.nz)
    }

    #[inline]
    pub fn x_bin_center(&self, ix: usize) -> f64 {
        bin_center(ix, self.minx, self.maxx, self.nx)
    }

    #[inline]
    pub fn z_bin_width(&self) -> f64 {
        bin_width(self.minz, self.maxz, self.nz)
    }

    #[inline]
    pub fn x_bin_width(&self) -> f64 {
        bin_width(self.minx, self.maxx, self.nx)
    }

    /// Adds `weight` to the bin containing `(z, x)`. Returns whether the vote
    /// landed inside the map.
    #[inline]
    pub fn fill(&mut self, z: f64, x: f64, weight: f32) -> bool {
        match (self.z_to_bin(z), self.x_to_bin(x)) {
            (Some(iz), Some(ix)) => {
                let idx = iz * self.nx + ix;
                self.data[idx] += weight;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn get(&self, iz: usize, ix: usize) -> f32 {
        self.data[iz * self.nx + ix]
    }

    /// All drift bins of one transverse bin.
    #[inline]
    pub fn row(&self, iz: usize) -> &[f32] {
        let start = iz * self.nx;
        &self.data[start..start + self.nx]
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Largest weight in every transverse row.
    pub fn row_maxima(&self) -> Vec<f32> {
        (0..self.nz)
            .map(|iz| self.row(iz).iter().copied().fold(0.0f32, f32::max))
            .collect()
    }

    pub fn max_weight(&self) -> f32 {
        self.data.iter().copied().fold(0.0f32, f32::max)
    }

    pub fn total_weight(&self) -> f64 {
        self.data.iter().map(|&w| w as f64).sum()
    }
}

fn axis_bins(min: f64, max: f64, bins_per_unit: f64) -> usize {
    let span = (max - min) * bins_per_unit;
    if span.is_finite() && span > 0.0 {
        span.floor() as usize
    } else {
        0
    }
}

#[inline]
fn value_to_bin(v: f64, min: f64, max: f64, n: usize) -> Option<usize> {
    if n == 0 || !(max > min) || !v.is_finite() {
        return None;
    }
    let pos = ((v - min) / (max - min) * n as f64).floor();
    if pos < 0.0 || pos >= n as f64 {
        return None;
    }
    Some(pos as usize)
}

#[inline]
fn bin_center(i: usize, min: f64, max: f64, n: usize) -> f64 {
    min + (i as f64 + 0.5) * bin_width(min, max, n)
}

#[inline]
fn bin_width(min: f64, max: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        (max - min) / n as f64
    }
}
