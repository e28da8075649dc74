use crate::core::config::{validate_plane, SimConfig};
use crate::core::particle::{Color, Particle, DIM};
use crate::core::physics::{distance, overlapping, resolve};
use crate::error::{Error, Result};
use log::{debug, info};
use rand::Rng;

/// Dense, index-addressed arena of particles.
///
/// A particle's index is its identity for the lifetime of the set. Particles are
/// never added or removed after construction; only their positions and
/// velocities change, once per tick, through [`crate::core::physics::advance`].
/// Callers only ever get shared references to individual particles:
///
/// ```compile_fail
/// let mut set = ballsim::ParticleSet::default();
/// for p in set.iter_mut() {
///     p.v = [0.0, 0.0];
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// Build a set of `config.count` non-overlapping particles inside a plane of
    /// size `plane = [width, height]`.
    ///
    /// Each radius is drawn from `config.radius_range`, and each center
    /// uniformly from `[2r, width - 2r] x [2r, height - 2r]`. A candidate that
    /// overlaps any already-placed particle is discarded and a fresh center is
    /// drawn, up to `config.max_placement_attempts` times per particle.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if the config or plane size is invalid.
    /// - `Error::PlacementInfeasible` if a particle cannot be placed.
    pub fn initialize<R: Rng>(
        config: &SimConfig,
        plane: [f64; DIM],
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        validate_plane(plane)?;

        let mut particles: Vec<Particle> = Vec::with_capacity(config.count);
        for index in 0..config.count {
            let radius = f64::from(rng.random_range(config.radius_range.clone()));

            // Placement window keeps a full diameter of clearance from the walls
            let mut window = [(0.0, 0.0); DIM];
            for (k, w) in window.iter_mut().enumerate() {
                let (lo, hi) = (2.0 * radius, plane[k] - 2.0 * radius);
                if lo > hi {
                    debug!(
                        "particle {index} with radius {radius} cannot fit a plane of {}x{}",
                        plane[0], plane[1]
                    );
                    return Err(Error::PlacementInfeasible { index, attempts: 0 });
                }
                *w = (lo, hi);
            }

            let mut attempts = 0usize;
            let r = loop {
                if attempts >= config.max_placement_attempts {
                    return Err(Error::PlacementInfeasible { index, attempts });
                }
                attempts += 1;
                let mut r = [0.0_f64; DIM];
                for (r_k, &(lo, hi)) in r.iter_mut().zip(window.iter()) {
                    *r_k = rng.random_range(lo..=hi);
                }
                if !overlaps_existing(&particles, &r, radius) {
                    break r;
                }
            };
            if attempts > 1 {
                debug!("particle {index} placed after {attempts} attempts");
            }

            let mut v = [0.0_f64; DIM];
            for v_k in v.iter_mut() {
                *v_k = config.velocity_sampling.sample(rng, config.velocity_range);
            }

            let mass = config.mass_policy.mass_for(radius);
            particles.push(Particle::new(r, v, radius, mass, Color::random(rng))?);
        }

        info!(
            "placed {} particles in a {}x{} plane",
            particles.len(),
            plane[0],
            plane[1]
        );
        Ok(Self { particles })
    }

    /// Wrap already-built particles. No overlap check is performed.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Positions as a Vec of fixed-size arrays.
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.r).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.v).collect()
    }

    /// Mutable access to two distinct particles at once.
    ///
    /// Returns `None` if `i == j` or either index is out of bounds.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut Particle, &mut Particle)> {
        if i == j || i.max(j) >= self.particles.len() {
            return None;
        }
        Some(pair_mut(&mut self.particles, i, j))
    }

    /// Resolve a collision between particles `i` and `j` in place.
    ///
    /// Returns whether the velocities changed; a separating pair is left alone.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `i == j` or either index is out of bounds.
    pub fn resolve_pair(&mut self, i: usize, j: usize) -> Result<bool> {
        let n = self.particles.len();
        let (a, b) = self.pair_mut(i, j).ok_or_else(|| {
            Error::InvalidParam(format!(
                "cannot resolve pair ({i}, {j}) in a set of {n} particles"
            ))
        })?;
        Ok(resolve(a, b))
    }

    /// Number of unordered pairs whose discs currently overlap.
    pub fn overlapping_pairs(&self) -> usize {
        let n = self.particles.len();
        let mut count = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if overlapping(&self.particles[i], &self.particles[j]) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

/// Split-borrow two distinct elements of the arena.
pub(crate) fn pair_mut(
    particles: &mut [Particle],
    i: usize,
    j: usize,
) -> (&mut Particle, &mut Particle) {
    assert!(i != j, "pair_mut requires two distinct indices, got {i} twice");
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

fn overlaps_existing(existing: &[Particle], r: &[f64; DIM], radius: f64) -> bool {
    existing
        .iter()
        .any(|p| distance(r, &p.r) - (radius + p.radius()) < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn particle(r: [f64; DIM], v: [f64; DIM]) -> Particle {
        Particle::new(r, v, 10.0, 1.0, Color::default()).expect("valid particle")
    }

    #[test]
    fn initialize_reference_setup() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1234);
        let set = ParticleSet::initialize(&SimConfig::default(), [1280.0, 720.0], &mut rng)?;
        assert_eq!(set.len(), 100);
        for p in &set {
            let r = p.radius();
            assert!((10.0..=30.0).contains(&r));
            assert_eq!(r, r.trunc(), "radius {r} should be a whole number");
            assert_eq!(p.mass(), 1.0);
            assert!(p.r[0] >= 2.0 * r && p.r[0] <= 1280.0 - 2.0 * r);
            assert!(p.r[1] >= 2.0 * r && p.r[1] <= 720.0 - 2.0 * r);
        }
        assert_eq!(set.overlapping_pairs(), 0);
        Ok(())
    }

    #[test]
    fn plane_too_small_for_any_particle() {
        let mut rng = StdRng::seed_from_u64(5);
        let cfg = SimConfig {
            count: 1,
            radius_range: 20..=20,
            ..SimConfig::default()
        };
        let err = ParticleSet::initialize(&cfg, [60.0, 500.0], &mut rng).unwrap_err();
        assert!(matches!(err, Error::PlacementInfeasible { index: 0, .. }));
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut set = ParticleSet::from_particles(vec![
            particle([0.0, 0.0], [0.0, 0.0]),
            particle([50.0, 0.0], [0.0, 0.0]),
            particle([100.0, 0.0], [0.0, 0.0]),
        ]);
        let (a, b) = set.pair_mut(2, 0).expect("distinct in-bounds pair");
        assert_eq!(a.r[0], 100.0);
        assert_eq!(b.r[0], 0.0);
        let (a, b) = set.pair_mut(0, 1).expect("distinct in-bounds pair");
        assert_eq!(a.r[0], 0.0);
        assert_eq!(b.r[0], 50.0);
    }

    #[test]
    fn pair_mut_rejects_same_or_missing_index() {
        let mut set = ParticleSet::from_particles(vec![
            particle([0.0, 0.0], [0.0, 0.0]),
            particle([50.0, 0.0], [0.0, 0.0]),
        ]);
        assert!(set.pair_mut(0, 0).is_none());
        assert!(set.pair_mut(1, 2).is_none());
        assert!(set.pair_mut(7, 0).is_none());
    }

    #[test]
    fn resolve_pair_swaps_head_on() -> Result<()> {
        let mut set = ParticleSet::from_particles(vec![
            particle([0.0, 0.0], [2.0, 0.0]),
            particle([15.0, 0.0], [-2.0, 0.0]),
        ]);
        assert!(set.resolve_pair(0, 1)?);
        assert!((set.as_slice()[0].v[0] + 2.0).abs() < 1e-12);
        assert!((set.as_slice()[1].v[0] - 2.0).abs() < 1e-12);
        // Now separating: the reverse-order test is a no-op
        assert!(!set.resolve_pair(1, 0)?);
        Ok(())
    }

    #[test]
    fn resolve_pair_rejects_bad_indices() {
        let mut set = ParticleSet::from_particles(vec![
            particle([0.0, 0.0], [2.0, 0.0]),
            particle([15.0, 0.0], [-2.0, 0.0]),
        ]);
        let err = set.resolve_pair(0, 5).unwrap_err();
        assert!(matches!(err, Error::InvalidParam(_)));
        assert!(err.to_string().contains("(0, 5)"));
        let err = set.resolve_pair(1, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidParam(_)));
        // Nothing was touched by the rejected calls
        assert_eq!(set.velocities(), vec![[2.0, 0.0], [-2.0, 0.0]]);
    }

    #[test]
    fn overlapping_pairs_counts_unordered_pairs() {
        let set = ParticleSet::from_particles(vec![
            particle([0.0, 0.0], [0.0, 0.0]),
            particle([15.0, 0.0], [0.0, 0.0]),
            particle([30.0, 0.0], [0.0, 0.0]),
            particle([200.0, 0.0], [0.0, 0.0]),
        ]);
        // 0-1 and 1-2 overlap (distance 15 < 20); 0-2 are 30 apart
        assert_eq!(set.overlapping_pairs(), 2);
    }
}
