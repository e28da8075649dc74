//! Rigid circular particles bouncing around a bounded 2D plane.
//!
//! [`core::ParticleSet`] owns the particles and places them without overlap;
//! [`core::advance`] runs one tick of pairwise elastic collisions, wall
//! reflection and integration. [`core::Simulation`] bundles both with the
//! plane size for drivers that just want to step and draw.
//!
//! With the `python` feature enabled the crate also builds a Python extension
//! module exposing the simulation to numpy-based renderers.

pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{ParticleSet, SimConfig, Simulation};
pub use crate::error::{Error, Result};
