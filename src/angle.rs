//! Angle utilities for comparing candidate lines of the form `x = m·z + c`.

/// Default opening angle below which two lines count as near-parallel.
pub const DEFAULT_CLOSE_ANGLE_DEG: f64 = 10.0;

/// Precomputed closeness test between line slopes.
///
/// Two lines are close when the angle between their direction vectors
/// `(1, m)` is below the threshold. The test is algebraic, avoiding `atan`
/// in the hot loop: `(1 + ma·mb)² > (1 + ma²)(1 + mb²)·cos²θ`.
#[derive(Clone, Copy, Debug)]
pub struct AngleCloseness {
    cos2: f64,
}

impl AngleCloseness {
    pub fn from_degrees(threshold_deg: f64) -> Self {
        let c = threshold_deg.to_radians().cos();
        Self { cos2: c * c }
    }

    #[inline]
    pub fn is_close(&self, ma: f32, mb: f32) -> bool {
        close_angles_cos2(ma as f64, mb as f64, self.cos2)
    }
}

impl Default for AngleCloseness {
    fn default() -> Self {
        Self::from_degrees(DEFAULT_CLOSE_ANGLE_DEG)
    }
}

/// Closeness test with the default 10° threshold.
#[inline]
pub fn close_angles(ma: f32, mb: f32) -> bool {
    AngleCloseness::default().is_close(ma, mb)
}

#[inline]
fn close_angles_cos2(ma: f64, mb: f64, cos2: f64) -> bool {
    let dot = 1.0 + ma * mb;
    dot * dot > (1.0 + ma * ma) * (1.0 + mb * mb) * cos2
}

/// Orientation of a line with slope `m`, in (-π/2, π/2).
#[inline]
pub fn slope_angle(m: f32) -> f64 {
    (m as f64).atan()
}
