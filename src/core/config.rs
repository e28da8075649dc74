use crate::error::{Error, Result};
use rand::Rng;
use std::f64::consts::PI;
use std::ops::RangeInclusive;

/// How initial velocity components are drawn from `SimConfig::velocity_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VelocitySampling {
    /// `floor(u * (max - min + 1) + min)` with `u` uniform in [0, 1).
    ///
    /// For the default range (-2.5, 2.5) this yields whole numbers in -3..=3,
    /// with the two extremes half as likely as the others.
    #[default]
    Integer,
    /// Real-valued, uniform in `[min, max]`.
    Uniform,
}

impl VelocitySampling {
    /// Draw a single velocity component.
    pub fn sample<R: Rng>(&self, rng: &mut R, (min, max): (f64, f64)) -> f64 {
        match self {
            VelocitySampling::Integer => (rng.random::<f64>() * (max - min + 1.0) + min).floor(),
            VelocitySampling::Uniform => {
                if min == max {
                    min
                } else {
                    rng.random_range(min..=max)
                }
            }
        }
    }
}

/// Rule assigning a mass to a particle of a given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MassPolicy {
    /// Every particle gets the same mass.
    Constant(f64),
    /// Mass proportional to disc area: `density * PI * radius^2`.
    Area { density: f64 },
}

impl Default for MassPolicy {
    fn default() -> Self {
        MassPolicy::Constant(1.0)
    }
}

impl MassPolicy {
    pub fn mass_for(&self, radius: f64) -> f64 {
        match *self {
            MassPolicy::Constant(m) => m,
            MassPolicy::Area { density } => density * PI * radius * radius,
        }
    }

    fn validate(&self) -> Result<()> {
        let (value, what) = match *self {
            MassPolicy::Constant(m) => (m, "constant mass"),
            MassPolicy::Area { density } => (density, "mass density"),
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidParam(format!("{what} must be finite and > 0")));
        }
        Ok(())
    }
}

/// Construction parameters for a particle set.
///
/// `Default` reproduces the classic setup: 100 unit-mass particles with
/// integer radii in 10..=30 and integer velocity components around ±2.5.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of particles (> 0).
    pub count: usize,
    /// Inclusive range radii are drawn from (non-empty, start > 0).
    pub radius_range: RangeInclusive<u32>,
    /// (min, max) range for each initial velocity component.
    pub velocity_range: (f64, f64),
    pub velocity_sampling: VelocitySampling,
    pub mass_policy: MassPolicy,
    /// Candidate centers tried per particle before giving up.
    pub max_placement_attempts: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            count: 100,
            radius_range: 10..=30,
            velocity_range: (-2.5, 2.5),
            velocity_sampling: VelocitySampling::Integer,
            mass_policy: MassPolicy::default(),
            max_placement_attempts: 1_000_000,
        }
    }
}

impl SimConfig {
    /// Default configuration with a different particle count.
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Check every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidParam("count must be > 0".into()));
        }
        if self.radius_range.is_empty() {
            return Err(Error::InvalidParam(format!(
                "radius range {}..={} is empty",
                self.radius_range.start(),
                self.radius_range.end()
            )));
        }
        if *self.radius_range.start() == 0 {
            return Err(Error::InvalidParam("radius range must start above 0".into()));
        }
        let (lo, hi) = self.velocity_range;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(Error::InvalidParam(
                "velocity range must be finite with min <= max".into(),
            ));
        }
        self.mass_policy.validate()?;
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidParam(
                "max_placement_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Validate a plane size: both dimensions finite and > 0.
pub fn validate_plane(plane: [f64; 2]) -> Result<()> {
    if !plane.iter().all(|&l| l.is_finite() && l > 0.0) {
        return Err(Error::InvalidParam(format!(
            "plane dimensions must be finite and > 0, got {}x{}",
            plane[0], plane[1]
        )));
    }
    Ok(())
}
