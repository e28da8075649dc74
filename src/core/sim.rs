use crate::core::config::{validate_plane, SimConfig};
use crate::core::particle::{Particle, DIM};
use crate::core::physics::advance;
use crate::core::set::ParticleSet;
use crate::error::Result;
use log::{debug, warn};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// A particle set together with the plane it lives in and a tick counter.
///
/// This is what a rendering driver holds on to: call [`Simulation::step`] once
/// per frame, then read [`Simulation::particles`] to draw.
#[derive(Debug)]
pub struct Simulation {
    tick: u64,
    plane: [f64; DIM],
    set: ParticleSet,
}

impl Simulation {
    /// Create a new simulation inside a `plane = [width, height]` area.
    ///
    /// The RNG driving placement, velocities and colors is seeded from `seed`
    /// when given, otherwise from the thread-local generator.
    pub fn new(config: &SimConfig, plane: [f64; DIM], seed: Option<u64>) -> Result<Self> {
        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        Self::with_rng(config, plane, &mut rng)
    }

    /// Create a new simulation using a caller-supplied source of randomness.
    pub fn with_rng<R: Rng>(config: &SimConfig, plane: [f64; DIM], rng: &mut R) -> Result<Self> {
        let set = ParticleSet::initialize(config, plane, rng)?;
        Ok(Self {
            tick: 0,
            plane,
            set,
        })
    }

    /// Wrap an existing particle set.
    pub fn from_set(set: ParticleSet, plane: [f64; DIM]) -> Result<Self> {
        validate_plane(plane)?;
        Ok(Self {
            tick: 0,
            plane,
            set,
        })
    }

    /// Advance one tick.
    pub fn step(&mut self) {
        advance(&mut self.set, self.plane[0], self.plane[1]);
        self.tick += 1;
    }

    /// Advance `ticks` ticks.
    pub fn advance_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Change the plane size, e.g. after a viewport resize.
    ///
    /// Particle state is kept as is; the new bounds apply from the next tick.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        validate_plane([width, height])?;
        debug!(
            "resizing plane from {}x{} to {width}x{height}",
            self.plane[0], self.plane[1]
        );
        self.plane = [width, height];
        let outside = self
            .set
            .iter()
            .filter(|p| {
                let r = p.radius();
                p.r[0] + r > width || p.r[1] + r > height
            })
            .count();
        if outside > 0 {
            warn!("{outside} particles lie outside the resized {width}x{height} plane");
        }
        Ok(())
    }

    /// Number of ticks advanced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current plane size [width, height].
    pub fn plane(&self) -> [f64; DIM] {
        self.plane
    }

    pub fn num_particles(&self) -> usize {
        self.set.len()
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.set
    }

    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.set.positions()
    }

    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.set.velocities()
    }

    /// Compute total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.set.iter().map(Particle::kinetic_energy).sum()
    }

    /// Compute total linear momentum (diagnostic).
    pub fn momentum(&self) -> [f64; DIM] {
        self.set.iter().fold([0.0; DIM], |acc, p| {
            let m = p.momentum();
            [acc[0] + m[0], acc[1] + m[1]]
        })
    }

    /// Number of currently overlapping unordered pairs (diagnostic).
    pub fn overlapping_pairs(&self) -> usize {
        self.set.overlapping_pairs()
    }
}
