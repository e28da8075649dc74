use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for particle-set construction and simulation setup.
///
/// The physics step itself never fails; every variant here is raised while
/// building or reconfiguring a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction parameter (count, plane size, radius range, ...).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Rejection sampling could not find a non-overlapping center for a particle.
    #[error(
        "placement infeasible: particle {index} could not be placed after {attempts} attempts; \
         try fewer particles, smaller radii or a larger plane"
    )]
    PlacementInfeasible {
        /// Index of the particle that could not be placed.
        index: usize,
        /// Number of candidate centers tried.
        attempts: usize,
    },
}
