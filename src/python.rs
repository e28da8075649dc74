use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::particle::DIM;
use crate::core::{SimConfig, Simulation};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// BallSim Python-facing wrapper around the Rust Simulation core.
///
/// API:
/// - __new__(width, height, num_particles=100, radius_min=10, radius_max=30, mass=1.0, seed=None)
/// - step(ticks=1)
/// - resize(width, height)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
/// - get_radii() -> np.ndarray, shape (N,)
/// - get_colors() -> np.ndarray, shape (N, 3), dtype=uint8
#[pyclass]
pub struct BallSim {
    sim: Simulation,
}

#[pymethods]
impl BallSim {
    /// Place `num_particles` non-overlapping discs in a `width` x `height` plane.
    ///
    /// Radii are whole numbers drawn from [radius_min, radius_max]; every
    /// particle gets the same `mass`.
    ///
    /// Errors: raises ValueError on invalid parameters or if the particles do not fit.
    #[new]
    #[pyo3(signature = (width, height, num_particles=100, radius_min=10, radius_max=30, mass=1.0, seed=None))]
    fn new(
        width: f64,
        height: f64,
        num_particles: usize,
        radius_min: u32,
        radius_max: u32,
        mass: f64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let config = SimConfig {
            count: num_particles,
            radius_range: radius_min..=radius_max,
            mass_policy: crate::core::MassPolicy::Constant(mass),
            ..SimConfig::default()
        };
        let sim = Simulation::new(&config, [width, height], seed).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance `ticks` ticks (releases the GIL during computation).
    #[pyo3(signature = (ticks=1))]
    fn step(&mut self, py: Python<'_>, ticks: u64) {
        py.detach(|| self.sim.advance_ticks(ticks));
    }

    /// Apply new plane dimensions from the next tick on.
    fn resize(&mut self, width: f64, height: f64) -> PyResult<()> {
        self.sim.resize(width, height).map_err(py_err)
    }

    /// Number of ticks advanced so far.
    #[getter]
    fn tick(&self) -> u64 {
        self.sim.tick()
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        Ok(to_array2(&self.sim.positions()).into_pyarray(py).to_owned().into())
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        Ok(to_array2(&self.sim.velocities()).into_pyarray(py).to_owned().into())
    }

    /// Return radii as a NumPy array of shape (N,), dtype=float64.
    fn get_radii<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray1<f64>>> {
        let radii: Array1<f64> = self.sim.particles().iter().map(|p| p.radius()).collect();
        Ok(radii.into_pyarray(py).to_owned().into())
    }

    /// Return colors as a NumPy array of shape (N, 3), dtype=uint8.
    fn get_colors<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<u8>>> {
        let n = self.sim.num_particles();
        let mut arr = Array2::<u8>::zeros((n, 3));
        for (i, p) in self.sim.particles().iter().enumerate() {
            for (k, c) in p.color().as_array().into_iter().enumerate() {
                arr[[i, k]] = c;
            }
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Total kinetic energy of all particles.
    fn get_kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }
}

fn to_array2(rows: &[[f64; DIM]]) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((rows.len(), DIM));
    for (i, row) in rows.iter().enumerate() {
        for k in 0..DIM {
            arr[[i, k]] = row[k];
        }
    }
    arr
}

/// The ballsim Python module entry point.
#[pymodule]
fn ballsim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BallSim>()?;
    Ok(())
}
