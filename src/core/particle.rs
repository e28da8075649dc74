use crate::error::{Error, Result};
use rand::Rng;

/// Fixed spatial dimension (2D plane).
pub const DIM: usize = 2;

/// Cosmetic RGB color carried by each particle. Ignored by the physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Random color with each channel drawn uniformly from `0..255`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: rng.random_range(0..255),
            g: rng.random_range(0..255),
            b: rng.random_range(0..255),
        }
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A rigid circular particle in D=2.
///
/// Fields:
/// - `r`: center position [x, y]
/// - `v`: velocity [vx, vy], in plane units per tick
/// - `radius`: fixed disc radius (> 0)
/// - `mass`: fixed mass (> 0)
/// - `color`: cosmetic, opaque to the physics step
///
/// Position and velocity are mutated by the physics step; radius, mass and
/// color are fixed at construction and only readable through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    radius: f64,
    mass: f64,
    color: Color,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive or any component is NaN/inf.
    pub fn new(r: [f64; DIM], v: [f64; DIM], radius: f64, mass: f64, color: Color) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            r,
            v,
            radius,
            mass,
            color,
        })
    }

    #[inline]
    pub fn position(&self) -> [f64; DIM] {
        self.r
    }

    #[inline]
    pub fn velocity(&self) -> [f64; DIM] {
        self.v
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * self.mass * vsq
    }

    /// Returns the particle's linear momentum m v.
    #[inline]
    pub fn momentum(&self) -> [f64; DIM] {
        [self.mass * self.v[0], self.mass * self.v[1]]
    }
}
