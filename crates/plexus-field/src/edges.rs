//! Proximity edges between particles.

use crate::particle::Particle;

/// A connection between two particles closer than the connection distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Index of the first particle, always less than `b`.
    pub a: usize,
    pub b: usize,
    /// Line alpha, fading linearly to zero at the connection distance.
    pub opacity: f32,
}

/// Rebuild `edges` from scratch for the current particle positions.
///
/// Visits every unordered pair, so cost is quadratic in the particle count.
pub fn connect(
    particles: &[Particle],
    max_distance: f32,
    opacity_scale: f32,
    edges: &mut Vec<Edge>,
) {
    edges.clear();
    for (a, p) in particles.iter().enumerate() {
        for (offset, q) in particles[a + 1..].iter().enumerate() {
            let distance = p.position.distance(q.position);
            if distance < max_distance {
                edges.push(Edge {
                    a,
                    b: a + 1 + offset,
                    opacity: (1.0 - distance / max_distance) * opacity_scale,
                });
            }
        }
    }
}
