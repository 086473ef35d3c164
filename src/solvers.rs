use crate::{
    keplers_equation, keplers_equation_derivative, DEFAULT_MAX_ITERS, DEFAULT_TOLERANCE,
    DERIVATIVE_EPSILON,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for the Newton-Raphson Kepler solver.
///
/// # Example
/// ```
/// use halferth_orbits::SolverSettings;
///
/// let settings = SolverSettings::default();
/// assert_eq!(settings.tolerance, 1e-6);
/// assert_eq!(settings.max_iterations, 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverSettings {
    /// The step size, in radians, below which the solver is
    /// considered to have converged.
    pub tolerance: f64,

    /// The maximum number of Newton steps to take before giving up
    /// and returning the latest estimate.
    pub max_iterations: u32,
}

impl SolverSettings {
    /// Creates solver settings with a custom tolerance and iteration cap.
    pub const fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERS)
    }
}

/// The outcome of a run of the Kepler solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    /// The eccentric anomaly estimate, in radians.
    ///
    /// This is the best available estimate even if the solver
    /// did not converge.
    pub eccentric_anomaly: f64,

    /// The number of Newton steps that were applied.
    pub iterations: u32,

    /// Whether the last step was smaller than the tolerance.
    ///
    /// A solve that stopped early because the derivative vanished
    /// is reported as not converged.
    pub converged: bool,
}

/// Solves Kepler's equation `M = E - e sin E` for the eccentric anomaly,
/// using the default [`SolverSettings`].
///
/// If the solver runs out of iterations, the latest estimate is returned
/// silently. Use [`solve_kepler_with`] if you need to know whether the
/// result converged.
///
/// # Unchecked Operation
/// This function does not check that the eccentricity lies in `[0, 1)`.
/// Other eccentricities may produce nonsensical values.
///
/// # Example
/// ```
/// use halferth_orbits::solve_kepler;
///
/// // A circular orbit has identical mean and eccentric anomalies.
/// assert_eq!(solve_kepler(1.25, 0.0), 1.25);
///
/// let e = 0.35;
/// let ecc_anom = solve_kepler(2.0, e);
/// assert!((ecc_anom - e * ecc_anom.sin() - 2.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    solve_kepler_with(mean_anomaly, eccentricity, SolverSettings::default()).eccentric_anomaly
}

/// Solves Kepler's equation `M = E - e sin E` for the eccentric anomaly
/// using Newton's method, reporting whether the iteration converged.
///
/// The iteration starts at `E = M`, and stops when a step is smaller than
/// the tolerance, when the derivative `1 - e cos E` gets too close to zero,
/// or when the iteration cap is reached.
///
/// # Unchecked Operation
/// This function does not check that the eccentricity lies in `[0, 1)`.
///
/// # Performance
/// Newton's method converges quadratically for elliptic orbits, so this
/// usually takes only a handful of iterations. It is still recommended to
/// cache the result if you need it more than once.
///
/// # Example
/// ```
/// use halferth_orbits::{solve_kepler_with, SolverSettings};
///
/// let solution = solve_kepler_with(0.5, 0.3, SolverSettings::default());
/// assert!(solution.converged);
///
/// let starved = solve_kepler_with(3.0, 0.9, SolverSettings::new(1e-15, 1));
/// assert!(!starved.converged);
/// assert_eq!(starved.iterations, 1);
/// ```
#[must_use]
pub fn solve_kepler_with(
    mean_anomaly: f64,
    eccentricity: f64,
    settings: SolverSettings,
) -> KeplerSolution {
    let mut eccentric_anomaly = mean_anomaly;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < settings.max_iterations {
        let f = keplers_equation(mean_anomaly, eccentric_anomaly, eccentricity);
        let fp = keplers_equation_derivative(eccentric_anomaly, eccentricity);

        if fp.abs() < DERIVATIVE_EPSILON {
            // Unreachable for e < 1, but a zero slope would blow up the step
            break;
        }

        let delta = f / fp;
        eccentric_anomaly -= delta;
        iterations += 1;

        if delta.abs() < settings.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::debug!(
            mean_anomaly,
            eccentricity,
            iterations,
            eccentric_anomaly,
            "Kepler solver stopped without converging"
        );
    }

    KeplerSolution {
        eccentric_anomaly,
        iterations,
        converged,
    }
}
