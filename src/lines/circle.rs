use super::Line2D;
use serde::Serialize;

/// Circular region in (transverse, drift) space used to restrict the
/// candidate lines of the zoom pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CircleWindow {
    pub z0: f64,
    pub x0: f64,
    pub radius: f64,
}

impl CircleWindow {
    pub fn new(z0: f64, x0: f64, radius: f64) -> Self {
        Self { z0, x0, radius }
    }

    /// A line is admitted when it crosses the circle and its segment does
    /// not span both crossings. Intersections inside a segment never vote,
    /// so a segment covering the whole chord cannot contribute here.
    pub fn admits(&self, line: &Line2D) -> bool {
        let Some((z1, z2)) = intersects_circle(line.m, line.c, self.z0, self.x0, self.radius)
        else {
            return false;
        };
        let minz = line.minz as f64;
        let maxz = line.maxz as f64;
        let spans_chord = minz < z1 && minz < z2 && maxz > z1 && maxz > z2;
        !spans_chord
    }
}

/// Transverse coordinates `(z1, z2)`, `z1 <= z2`, where `x = m·z + c` crosses
/// the circle of radius `r` centred at `(z0, x0)`.
pub fn intersects_circle(m: f32, c: f32, z0: f64, x0: f64, r: f64) -> Option<(f64, f64)> {
    let m = m as f64;
    // Shift to the frame centred on the circle.
    let c = c as f64 + m * z0 - x0;

    // z² + (m·z + c)² = r²
    let a = 1.0 + m * m;
    let b = 2.0 * m * c;
    let cc = c * c - r * r;
    let disc = b * b - 4.0 * a * cc;
    if !(disc >= 0.0) {
        return None;
    }
    let sq = disc.sqrt();
    let z1 = (-b - sq) / (2.0 * a) + z0;
    let z2 = (-b + sq) / (2.0 * a) + z0;
    Some((z1, z2))
}
