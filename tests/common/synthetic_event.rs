#![allow(dead_code)]

use nalgebra::{Vector2, Vector3};
use quad_vertex::{Hit, View, ViewDirections};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Collection view along `z`, induction views at ±53° to it.
pub fn test_directions() -> ViewDirections {
    ViewDirections::new(
        Vector2::new(0.0, 1.0),
        Vector2::new(0.8, 0.6),
        Vector2::new(-0.8, 0.6),
    )
    .expect("directions")
}

/// Four tracks leaving the vertex, pairwise well separated in every view.
pub fn fan_of_tracks() -> Vec<Vector3<f64>> {
    vec![
        Vector3::new(1.0, 0.5, 1.0),
        Vector3::new(-1.0, -0.5, 1.0),
        Vector3::new(0.3, -0.6, 1.0),
        Vector3::new(-0.3, 1.0, 1.0),
    ]
}

/// Hits of straight tracks starting at `vertex`, sampled at unit steps
/// `1..=samples` along each direction and projected into all three views.
pub fn track_hits(
    vertex: Vector3<f64>,
    tracks: &[Vector3<f64>],
    samples: usize,
    dirs: &ViewDirections,
) -> Vec<Hit> {
    let mut hits = Vec::with_capacity(tracks.len() * samples * 3);
    for t in tracks {
        for s in 1..=samples {
            let p = vertex + t * s as f64;
            for view in View::ALL {
                hits.push(Hit::new(view, p.x, dirs.project(&p, view), 1.0));
            }
        }
    }
    hits
}

/// Uniform background hits around `vertex`, `per_view` in each view.
pub fn noise_hits(vertex: Vector3<f64>, per_view: usize, seed: u64) -> Vec<Hit> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut hits = Vec::with_capacity(per_view * 3);
    for view in View::ALL {
        for _ in 0..per_view {
            let drift = rng.gen_range(vertex.x - 30.0..vertex.x + 30.0);
            let transverse = rng.gen_range(-40.0..80.0);
            hits.push(Hit::new(view, drift, transverse, 0.5));
        }
    }
    hits
}
