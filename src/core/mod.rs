//! Core simulation types: particles, the particle set, construction config,
//! the per-tick physics step and a small driver wrapping them.

pub mod config;
pub mod particle;
pub mod physics;
pub mod set;
pub mod sim;

pub use config::{MassPolicy, SimConfig, VelocitySampling};
pub use particle::{Color, Particle, DIM};
pub use physics::{advance, resolve, rotate};
pub use set::ParticleSet;
pub use sim::Simulation;
