//! Per-tick physics: pairwise overlap detection, elastic collision resolution
//! and wall reflection, followed by explicit Euler integration.

use crate::core::particle::{Particle, DIM};
use crate::core::set::{pair_mut, ParticleSet};
use log::trace;

/// Advance every particle in `set` by one tick inside a `width` x `height` plane.
///
/// For each particle `i` in index order:
/// 1. every other particle `j` is tested for overlap and, if overlapping, the
///    pair `(i, j)` is resolved as an elastic collision;
/// 2. a velocity component pointing out of the plane is negated when the disc
///    crosses the corresponding wall;
/// 3. the position is advanced by the velocity.
///
/// Later particles see earlier particles' already-integrated positions within
/// the same tick. Resolution only changes velocities, so this ordering affects
/// trajectories but never leaves a particle half-updated.
///
/// The plane size may differ from the previous call; the new bounds simply
/// apply to this tick's reflection test.
pub fn advance(set: &mut ParticleSet, width: f64, height: f64) {
    let bounds = [width, height];
    let particles = set.as_mut_slice();
    let n = particles.len();
    for i in 0..n {
        for j in 0..n {
            if j == i {
                continue;
            }
            let (a, b) = pair_mut(particles, i, j);
            if overlapping(a, b) && resolve(a, b) {
                trace!("resolved collision between {i} and {j}");
            }
        }

        let p = &mut particles[i];
        reflect(p, &bounds);
        for k in 0..DIM {
            p.r[k] += p.v[k];
        }
    }
}

/// Resolve an elastic collision between `a` and `b`, updating both velocities.
///
/// Nothing happens when the pair is already separating, i.e. when the relative
/// velocity `v_a - v_b` points away from the line of centers `r_b - r_a`.
/// Otherwise both velocities are rotated into the frame whose x-axis is the
/// line of centers, the 1-D elastic collision formula is applied to the
/// x-components, and the results are rotated back. Positions are untouched.
///
/// Returns `true` if the velocities were updated.
pub fn resolve(a: &mut Particle, b: &mut Particle) -> bool {
    let dv = [a.v[0] - b.v[0], a.v[1] - b.v[1]];
    let d = [b.r[0] - a.r[0], b.r[1] - a.r[1]];
    if dot(&dv, &d) < 0.0 {
        return false;
    }

    let angle = -d[1].atan2(d[0]);
    let (m1, m2) = (a.mass(), b.mass());
    let total = m1 + m2;

    let u1 = rotate(a.v, angle);
    let u2 = rotate(b.v, angle);

    let v1 = [(u1[0] * (m1 - m2) + 2.0 * m2 * u2[0]) / total, u1[1]];
    let v2 = [(u2[0] * (m2 - m1) + 2.0 * m1 * u1[0]) / total, u2[1]];

    a.v = rotate(v1, -angle);
    b.v = rotate(v2, -angle);
    true
}

/// Rotate `v` by `angle` radians (counter-clockwise).
#[inline]
pub fn rotate(v: [f64; DIM], angle: f64) -> [f64; DIM] {
    let (sin, cos) = angle.sin_cos();
    [v[0] * cos - v[1] * sin, v[0] * sin + v[1] * cos]
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

/// True when the discs of `a` and `b` overlap (touching does not count).
#[inline]
pub fn overlapping(a: &Particle, b: &Particle) -> bool {
    distance(&a.r, &b.r) - (a.radius() + b.radius()) < 0.0
}

/// Negate each velocity component that carries the disc further past a wall.
fn reflect(p: &mut Particle, bounds: &[f64; DIM]) {
    let radius = p.radius();
    for (k, &l) in bounds.iter().enumerate() {
        let past_min = p.r[k] - radius < 0.0 && p.v[k] < 0.0;
        let past_max = p.r[k] + radius > l && p.v[k] > 0.0;
        if past_min || past_max {
            p.v[k] = -p.v[k];
        }
    }
}

#[inline]
fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
