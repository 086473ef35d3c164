//! # Halferth Orbits
//! This library crate computes where the bodies of the Halferth system are
//! at any given moment: the planet Halferth on its path around its sun, and
//! its two moons, Mother and Daughter, on their eccentric paths around it.
//!
//! Positions come from Keplerian two-body orbits. Nothing is integrated step
//! by step: a body's position is a pure function of its orbital elements and
//! the elapsed time, so skipping frames or running backwards never makes
//! an orbit drift.
//!
//! The numeric core is made of three pieces:
//! - [`solve_kepler`]: a Newton-Raphson solver turning a mean anomaly into
//!   an eccentric anomaly.
//! - [`position_at_eccentric_anomaly`]: the closed-form step from eccentric
//!   anomaly to a position in the orbital plane.
//! - [`initial_mean_anomaly`]: the inverse step, picking the mean anomaly
//!   at time zero that places a body at a chosen true anomaly.
//!
//! ## Getting started
//! On top of the core, this crate provides:
//! - [`Orbit`]: a validated elliptic orbit with some cached values.
//! - [`CompactOrbit`]: a plain orbit with public fields and no cache.
//! - [`Embedding`] and [`Matrix3x2`]: how an orbital plane sits in a 3D scene.
//! - [`Clock`]: the simulated time, its step, pause state and wrap-around.
//! - [`Body`] and [`System`]: bodies orbiting each other and spinning,
//!   and their absolute positions at the current clock time.
//! - [`HalferthDate`]: the day, season and civic month at a given time.
//!
//! The [`body_presets`] module contains the Halferth bodies themselves.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//!
//! use halferth_orbits::{Orbit, OrbitTrait};
//!
//! # fn main() {
//! // A perfectly circular orbit with a radius of 1 unit and a period of 1 unit
//! let orbit = Orbit::default();
//! assert_eq!(orbit.get_position_at_time(0.0), DVec2::new(1.0, 0.0));
//! # }
//! ```

#![warn(missing_docs)]

mod anomaly;
mod body;
pub mod body_presets;
mod cached_orbit;
pub mod calendar;
mod clock;
mod compact_orbit;
#[cfg(feature = "serde")]
pub mod config;
mod embedding;
mod error;
mod solvers;
mod system;

use core::f64::consts::TAU;

pub use anomaly::{
    eccentric_anomaly_at_true_anomaly, initial_mean_anomaly, mean_anomaly_at_eccentric_anomaly,
    position_at_eccentric_anomaly, position_at_true_anomaly, radius_at_eccentric_anomaly,
    radius_at_true_anomaly, true_anomaly_at_eccentric_anomaly,
};
pub use body::Body;
pub use cached_orbit::Orbit;
pub use calendar::{HalferthDate, MonthHalf, Season};
pub use clock::Clock;
pub use compact_orbit::CompactOrbit;
pub use embedding::Embedding;
#[cfg(feature = "serde")]
pub use error::ConfigError;
pub use error::{BodyAddError, ClockError, ElementsError};
pub use solvers::{solve_kepler, solve_kepler_with, KeplerSolution, SolverSettings};
pub use system::{BodyRelation, Id, System};

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default step size, in radians, below which the
/// Kepler solver is considered to have converged.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// The default maximum number of Newton steps in the Kepler solver.
///
/// This is used to prevent infinite loops in case the method fails to converge.
pub const DEFAULT_MAX_ITERS: u32 = 100;

/// Below this magnitude, the derivative of Kepler's equation is
/// treated as zero and the solver stops.
const DERIVATIVE_EPSILON: f64 = 1e-10;

/// A struct representing a 3x2 matrix.
///
/// This struct is used to store the transformation matrix
/// for transforming a 2D vector into a 3D vector.
///
/// Namely, it is used to place a position in an orbital plane into
/// a 3D scene. See [`Embedding`] for the common placements.
///
/// Each element is named `eXY`, where `X` is the row and `Y` is the column.
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
///
/// use halferth_orbits::Matrix3x2;
///
/// let matrix = Matrix3x2 {
///    e11: 1.0, e12: 0.0,
///    e21: 0.0, e22: 1.0,
///    e31: 0.0, e32: 0.0,
/// };
///
/// let vec = DVec2::new(1.0, 2.0);
///
/// let result = matrix.dot_vec(vec);
///
/// assert_eq!(result, DVec3::new(1.0, 2.0, 0.0));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix3x2 {
    // Element XY
    pub e11: f64,
    pub e12: f64,
    pub e21: f64,
    pub e22: f64,
    pub e31: f64,
    pub e32: f64,
}

impl Matrix3x2 {
    /// Builds a matrix from its two columns.
    ///
    /// `p` is where the +X axis of the orbital plane (towards periapsis)
    /// ends up, and `q` is where the +Y axis ends up.
    pub const fn from_cols(p: DVec3, q: DVec3) -> Self {
        Self {
            e11: p.x,
            e12: q.x,
            e21: p.y,
            e22: q.y,
            e31: p.z,
            e32: q.z,
        }
    }

    /// Computes a dot product between this matrix and a 2D vector.
    ///
    /// # Example
    /// ```
    /// use glam::{DVec2, DVec3};
    ///
    /// use halferth_orbits::Matrix3x2;
    ///
    /// let matrix = Matrix3x2 {
    ///     e11: 1.0, e12: 0.0,
    ///     e21: 0.0, e22: 1.0,
    ///     e31: 1.0, e32: 1.0,
    /// };
    ///
    /// let vec = DVec2::new(1.0, 2.0);
    ///
    /// let result = matrix.dot_vec(vec);
    ///
    /// assert_eq!(result, DVec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn dot_vec(&self, vec: DVec2) -> DVec3 {
        DVec3::new(
            vec.x * self.e11 + vec.y * self.e12,
            vec.x * self.e21 + vec.y * self.e22,
            vec.x * self.e31 + vec.y * self.e32,
        )
    }
}

/// A trait that defines the methods that an elliptic Keplerian orbit must implement.
///
/// This trait is implemented by both [`Orbit`] and [`CompactOrbit`].
///
/// Implementors only provide the four elements (semi-major axis,
/// eccentricity, period and mean anomaly at epoch); everything else has a
/// default implementation built on the free functions of this crate.
///
/// # Time
/// This crate doesn't impose a time unit. Use the same unit for the
/// period and for every time you pass in; the Halferth presets use
/// Halferth days.
///
/// # Examples
/// ```
/// use halferth_orbits::{Orbit, OrbitTrait, CompactOrbit};
///
/// fn accepts_orbit(orbit: &impl OrbitTrait) {
///     println!("That's an orbit!");
/// }
///
/// fn main() {
///     let orbit = Orbit::default();
///     accepts_orbit(&orbit);
///
///     let compact = CompactOrbit::default();
///     accepts_orbit(&compact);
/// }
/// ```
pub trait OrbitTrait {
    /// Gets the semi-major axis of the orbit.
    ///
    /// The semi-major axis is the average of the apoapsis and periapsis.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Semi-major_and_semi-minor_axes>
    fn get_semi_major_axis(&self) -> f64;

    /// Gets the eccentricity of the orbit.
    ///
    /// An eccentricity of 0 means the orbit is a perfect circle.
    /// Between 0 and 1, the orbit is elliptic, and has an oval shape.
    /// Nothing else is supported by this crate.
    fn get_eccentricity(&self) -> f64;

    /// Gets the time it takes to complete one revolution of the orbit.
    fn get_orbital_period(&self) -> f64;

    /// Gets the mean anomaly at time zero, in radians.
    ///
    /// This is unbounded; it is never wrapped into `[0, tau)`.
    fn get_mean_anomaly_at_epoch(&self) -> f64;

    /// Gets the settings used when solving Kepler's equation.
    fn get_solver_settings(&self) -> SolverSettings {
        SolverSettings::default()
    }

    /// Gets the mean motion of the orbit, in radians per unit of time.
    ///
    /// ```text
    /// n = 2 pi / P
    /// ```
    fn get_mean_motion(&self) -> f64 {
        TAU / self.get_orbital_period()
    }

    /// Gets the periapsis of the orbit, the closest distance to the focus.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::{CompactOrbit, OrbitTrait};
    ///
    /// let orbit = CompactOrbit::new(6.56e5, 0.35, 70.0, 0.0);
    /// assert!((orbit.get_periapsis() - 426_400.0).abs() < 1e-6);
    /// ```
    fn get_periapsis(&self) -> f64 {
        self.get_semi_major_axis() * (1.0 - self.get_eccentricity())
    }

    /// Gets the apoapsis of the orbit, the farthest distance from the focus.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::{CompactOrbit, OrbitTrait};
    ///
    /// let orbit = CompactOrbit::new(6.56e5, 0.35, 70.0, 0.0);
    /// assert!((orbit.get_apoapsis() - 885_600.0).abs() < 1e-6);
    /// ```
    fn get_apoapsis(&self) -> f64 {
        self.get_semi_major_axis() * (1.0 + self.get_eccentricity())
    }

    /// Gets the semi-minor axis of the orbit.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Semi-major_and_semi-minor_axes>
    fn get_semi_minor_axis(&self) -> f64 {
        let e = self.get_eccentricity();
        self.get_semi_major_axis() * (1.0 - e * e).sqrt()
    }

    /// Gets the semi-latus rectum of the orbit.
    ///
    /// This is the distance from the focus at a true anomaly of 90 degrees.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Ellipse#Semi-latus_rectum>
    fn get_semi_latus_rectum(&self) -> f64 {
        let e = self.get_eccentricity();
        self.get_semi_major_axis() * (1.0 - e * e)
    }

    /// Gets the linear eccentricity of the orbit.
    ///
    /// This is the distance between the center of the ellipse and the
    /// focus the body orbits around.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Eccentricity_(mathematics)#Linear_eccentricity>
    #[doc(alias = "get_focus_offset")]
    fn get_linear_eccentricity(&self) -> f64 {
        self.get_semi_major_axis() * self.get_eccentricity()
    }

    /// Gets the mean anomaly at a given time in the orbit.
    ///
    /// ```text
    /// M(t) = M0 + n t
    /// ```
    fn get_mean_anomaly_at_time(&self, t: f64) -> f64 {
        self.get_mean_anomaly_at_epoch() + self.get_mean_motion() * t
    }

    /// Solves Kepler's equation for this orbit, reporting whether
    /// the solver converged.
    fn get_kepler_solution_at_mean_anomaly(&self, mean_anomaly: f64) -> KeplerSolution {
        solve_kepler_with(
            mean_anomaly,
            self.get_eccentricity(),
            self.get_solver_settings(),
        )
    }

    /// Gets the eccentric anomaly at a given mean anomaly in the orbit.
    ///
    /// # Performance
    /// This function uses numerical approach methods and is therefore
    /// the most expensive conversion in this trait.
    /// It is recommended to cache this value if you can.
    fn get_eccentric_anomaly_at_mean_anomaly(&self, mean_anomaly: f64) -> f64 {
        self.get_kepler_solution_at_mean_anomaly(mean_anomaly)
            .eccentric_anomaly
    }

    /// Gets the eccentric anomaly at a given true anomaly in the orbit.
    fn get_eccentric_anomaly_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        eccentric_anomaly_at_true_anomaly(true_anomaly, self.get_eccentricity())
    }

    /// Gets the eccentric anomaly at a given time in the orbit.
    fn get_eccentric_anomaly_at_time(&self, t: f64) -> f64 {
        self.get_eccentric_anomaly_at_mean_anomaly(self.get_mean_anomaly_at_time(t))
    }

    /// Gets the true anomaly at a given eccentric anomaly in the orbit.
    ///
    /// The result lies in `(-pi, pi]`.
    fn get_true_anomaly_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        true_anomaly_at_eccentric_anomaly(eccentric_anomaly, self.get_eccentricity())
    }

    /// Gets the true anomaly at a given mean anomaly in the orbit.
    fn get_true_anomaly_at_mean_anomaly(&self, mean_anomaly: f64) -> f64 {
        self.get_true_anomaly_at_eccentric_anomaly(
            self.get_eccentric_anomaly_at_mean_anomaly(mean_anomaly),
        )
    }

    /// Gets the true anomaly at a given time in the orbit.
    fn get_true_anomaly_at_time(&self, t: f64) -> f64 {
        self.get_true_anomaly_at_mean_anomaly(self.get_mean_anomaly_at_time(t))
    }

    /// Gets the mean anomaly at a given eccentric anomaly in the orbit.
    fn get_mean_anomaly_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        mean_anomaly_at_eccentric_anomaly(eccentric_anomaly, self.get_eccentricity())
    }

    /// Gets the mean anomaly at a given true anomaly in the orbit.
    ///
    /// See [`initial_mean_anomaly`].
    #[doc(alias = "get_mean_anomaly_at_angle")]
    fn get_mean_anomaly_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        initial_mean_anomaly(true_anomaly, self.get_eccentricity())
    }

    /// Gets the distance from the focus at a given eccentric anomaly.
    fn get_altitude_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        radius_at_eccentric_anomaly(
            eccentric_anomaly,
            self.get_semi_major_axis(),
            self.get_eccentricity(),
        )
    }

    /// Gets the distance from the focus at a given true anomaly.
    fn get_altitude_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        radius_at_true_anomaly(
            true_anomaly,
            self.get_semi_major_axis(),
            self.get_eccentricity(),
        )
    }

    /// Gets the distance from the focus at a given time.
    fn get_altitude_at_time(&self, t: f64) -> f64 {
        self.get_altitude_at_eccentric_anomaly(self.get_eccentric_anomaly_at_time(t))
    }

    /// Gets the 2D position in the orbital plane at a given eccentric anomaly.
    ///
    /// The focus is at the origin and periapsis lies on the +X axis.
    fn get_pqw_position_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> DVec2 {
        let true_anomaly = self.get_true_anomaly_at_eccentric_anomaly(eccentric_anomaly);
        let radius = self.get_altitude_at_eccentric_anomaly(eccentric_anomaly);

        let (s, c) = true_anomaly.sin_cos();
        DVec2::new(radius * c, radius * s)
    }

    /// Gets the 2D position in the orbital plane at a given true anomaly.
    #[doc(alias = "get_pqw_position_at_angle")]
    fn get_pqw_position_at_true_anomaly(&self, true_anomaly: f64) -> DVec2 {
        position_at_true_anomaly(
            true_anomaly,
            self.get_semi_major_axis(),
            self.get_eccentricity(),
        )
    }

    /// Gets the 2D position in the orbital plane at a given time.
    ///
    /// # Example
    /// ```
    /// use glam::DVec2;
    /// use halferth_orbits::{Orbit, OrbitTrait};
    ///
    /// let orbit = Orbit::new(2.0, 0.0, 8.0, 0.0).unwrap();
    ///
    /// // A quarter of the period later, a circular orbit is a quarter turn along.
    /// let pos = orbit.get_position_at_time(2.0);
    /// assert!((pos - DVec2::new(0.0, 2.0)).length() < 1e-9);
    /// ```
    fn get_position_at_time(&self, t: f64) -> DVec2 {
        self.get_pqw_position_at_eccentric_anomaly(self.get_eccentric_anomaly_at_time(t))
    }

    /// Gets the 3D position at a given time, placing the orbital plane
    /// into a scene with the given transformation matrix.
    ///
    /// See [`Embedding`] for common matrices.
    fn get_embedded_position_at_time(&self, t: f64, matrix: &Matrix3x2) -> DVec3 {
        matrix.dot_vec(self.get_position_at_time(t))
    }
}

/// Checks a set of elliptic orbital elements.
pub(crate) fn validate_elements(
    semi_major_axis: f64,
    eccentricity: f64,
    period: f64,
    mean_anomaly: f64,
) -> Result<(), ElementsError> {
    if !semi_major_axis.is_finite() {
        return Err(ElementsError::NonFinite {
            what: "semi-major axis",
        });
    }
    if !eccentricity.is_finite() {
        return Err(ElementsError::NonFinite {
            what: "eccentricity",
        });
    }
    if !period.is_finite() {
        return Err(ElementsError::NonFinite { what: "period" });
    }
    if !mean_anomaly.is_finite() {
        return Err(ElementsError::NonFinite {
            what: "mean anomaly",
        });
    }
    if semi_major_axis <= 0.0 {
        return Err(ElementsError::NonPositiveSemiMajorAxis(semi_major_axis));
    }
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(ElementsError::EccentricityOutOfRange(eccentricity));
    }
    if period <= 0.0 {
        return Err(ElementsError::NonPositivePeriod(period));
    }

    Ok(())
}


#[inline]
fn keplers_equation(mean_anomaly: f64, eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - (eccentricity * eccentric_anomaly.sin()) - mean_anomaly
}
#[inline]
fn keplers_equation_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    1.0 - (eccentricity * eccentric_anomaly.cos())
}
