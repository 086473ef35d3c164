#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    anomaly::wrap_angle, initial_mean_anomaly, validate_elements, CompactOrbit, ElementsError,
    OrbitTrait, SolverSettings,
};

use core::f64::consts::TAU;

/// A struct representing an elliptic Keplerian orbit with some cached values.
///
/// Unlike [`CompactOrbit`], this struct validates its elements: every
/// constructor and setter rejects eccentricities outside of `[0, 1)`,
/// non-positive sizes or periods, and non-finite values.
///
/// # Example
/// ```
/// use halferth_orbits::{Orbit, OrbitTrait};
///
/// let orbit = Orbit::new(
///     // Semi-major axis
///     6.56e5,
///
///     // Eccentricity
///     0.35,
///
///     // Orbital period
///     70.0,
///
///     // Mean anomaly at epoch
///     0.0,
/// )?;
///
/// let orbit = Orbit::with_start_true_anomaly(
///     // Initialize using a starting true anomaly
///     // in place of the mean anomaly at epoch
///     6.56e5,
///     0.35,
///     70.0,
///     -std::f64::consts::FRAC_PI_2,
/// )?;
/// # Ok::<(), halferth_orbits::ElementsError>(())
/// ```
/// See [Orbit::new] and [Orbit::with_start_true_anomaly] for more information.
///
/// With the `serde` feature, an orbit is stored as its four elements plus
/// an optional `solver` table; a missing table means the default settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "OrbitRepr", into = "OrbitRepr"))]
pub struct Orbit {
    /// The semi-major axis of the orbit.
    semi_major_axis: f64,

    /// The eccentricity of the orbit, in `[0, 1)`.
    eccentricity: f64,

    /// The time it takes to complete one revolution.
    period: f64,

    /// The mean anomaly at orbit epoch, in radians.
    mean_anomaly: f64,

    solver: SolverSettings,
    cache: OrbitCachedCalculations,
}

// -------- MEMO --------
// When updating this struct, please review the following methods:
// `Orbit::get_cached_calculations()`
// `Orbit::set_*()`
#[derive(Clone, Debug, PartialEq)]
struct OrbitCachedCalculations {
    /// `2 pi / P`
    mean_motion: f64,
    /// `sqrt(1 + e)`
    sqrt_one_plus_e: f64,
    /// `sqrt(1 - e)`
    sqrt_one_minus_e: f64,
}

// Initialization and cache management
impl Orbit {
    /// Creates a new orbit with the given parameters.
    ///
    /// Note: This function takes the mean anomaly at epoch.
    /// If you want the body to start at a given point of its ellipse,
    /// consider using the [`Orbit::with_start_true_anomaly`] function instead.
    ///
    /// # Parameters
    /// - `semi_major_axis`: The semi-major axis of the orbit. Must be positive.
    /// - `eccentricity`: The eccentricity of the orbit, in `[0, 1)`.
    /// - `period`: The orbital period. Must be positive.
    /// - `mean_anomaly`: The mean anomaly of the orbit at epoch, in radians.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::{ElementsError, Orbit, OrbitTrait};
    ///
    /// let orbit = Orbit::new(4.13e5, 0.3, 35.0, 2.9)?;
    ///
    /// assert_eq!(orbit.get_semi_major_axis(), 4.13e5);
    /// assert_eq!(orbit.get_eccentricity(), 0.3);
    /// assert_eq!(orbit.get_orbital_period(), 35.0);
    /// assert_eq!(orbit.get_mean_anomaly_at_epoch(), 2.9);
    ///
    /// assert_eq!(
    ///     Orbit::new(4.13e5, 1.2, 35.0, 2.9),
    ///     Err(ElementsError::EccentricityOutOfRange(1.2))
    /// );
    /// # Ok::<(), ElementsError>(())
    /// ```
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        period: f64,
        mean_anomaly: f64,
    ) -> Result<Self, ElementsError> {
        validate_elements(semi_major_axis, eccentricity, period, mean_anomaly)?;

        Ok(Self::new_unchecked(
            semi_major_axis,
            eccentricity,
            period,
            mean_anomaly,
        ))
    }

    /// Creates a new orbit whose body sits at the given true anomaly
    /// at time zero.
    ///
    /// # Parameters
    /// - `semi_major_axis`: The semi-major axis of the orbit. Must be positive.
    /// - `eccentricity`: The eccentricity of the orbit, in `[0, 1)`.
    /// - `period`: The orbital period. Must be positive.
    /// - `true_anomaly`: Where the body should be at time zero, in radians.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::{Orbit, OrbitTrait};
    ///
    /// let orbit = Orbit::with_start_true_anomaly(6.56e5, 0.35, 70.0, -1.0)?;
    /// assert!((orbit.get_true_anomaly_at_time(0.0) + 1.0).abs() < 1e-4);
    /// # Ok::<(), halferth_orbits::ElementsError>(())
    /// ```
    pub fn with_start_true_anomaly(
        semi_major_axis: f64,
        eccentricity: f64,
        period: f64,
        true_anomaly: f64,
    ) -> Result<Self, ElementsError> {
        if !true_anomaly.is_finite() {
            return Err(ElementsError::NonFinite {
                what: "true anomaly",
            });
        }
        // Check the eccentricity before it goes into square roots
        validate_elements(semi_major_axis, eccentricity, period, 0.0)?;

        Self::new(
            semi_major_axis,
            eccentricity,
            period,
            initial_mean_anomaly(true_anomaly, eccentricity),
        )
    }

    /// Replaces the settings used when solving Kepler's equation.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::{Orbit, OrbitTrait, SolverSettings};
    ///
    /// let orbit = Orbit::default().with_solver_settings(SolverSettings::new(1e-12, 50));
    /// assert_eq!(orbit.get_solver_settings().max_iterations, 50);
    /// ```
    #[must_use]
    pub fn with_solver_settings(mut self, settings: SolverSettings) -> Self {
        self.solver = settings;
        self
    }

    /// Sets the semi-major axis of the orbit.
    pub fn set_semi_major_axis(&mut self, value: f64) -> Result<(), ElementsError> {
        validate_elements(value, self.eccentricity, self.period, self.mean_anomaly)?;
        self.semi_major_axis = value;
        Ok(())
    }

    /// Sets the eccentricity of the orbit.
    ///
    /// The mean anomaly at epoch is kept as is, so the body's position
    /// at any given time will generally move.
    pub fn set_eccentricity(&mut self, value: f64) -> Result<(), ElementsError> {
        validate_elements(self.semi_major_axis, value, self.period, self.mean_anomaly)?;
        self.eccentricity = value;
        self.update_cache();
        Ok(())
    }

    /// Sets the orbital period.
    pub fn set_orbital_period(&mut self, value: f64) -> Result<(), ElementsError> {
        validate_elements(
            self.semi_major_axis,
            self.eccentricity,
            value,
            self.mean_anomaly,
        )?;
        self.period = value;
        self.update_cache();
        Ok(())
    }

    /// Sets the mean anomaly at epoch.
    pub fn set_mean_anomaly_at_epoch(&mut self, value: f64) -> Result<(), ElementsError> {
        validate_elements(
            self.semi_major_axis,
            self.eccentricity,
            self.period,
            value,
        )?;
        self.mean_anomaly = value;
        Ok(())
    }

    /// Creates an orbit from elements that are already known to be valid.
    pub(crate) fn new_unchecked(
        semi_major_axis: f64,
        eccentricity: f64,
        period: f64,
        mean_anomaly: f64,
    ) -> Self {
        debug_assert!(
            validate_elements(semi_major_axis, eccentricity, period, mean_anomaly).is_ok()
        );

        Self {
            semi_major_axis,
            eccentricity,
            period,
            mean_anomaly,
            solver: SolverSettings::default(),
            cache: Self::get_cached_calculations(eccentricity, period),
        }
    }

    fn update_cache(&mut self) {
        self.cache = Self::get_cached_calculations(self.eccentricity, self.period);
    }

    fn get_cached_calculations(eccentricity: f64, period: f64) -> OrbitCachedCalculations {
        OrbitCachedCalculations {
            mean_motion: TAU / period,
            sqrt_one_plus_e: (1.0 + eccentricity).sqrt(),
            sqrt_one_minus_e: (1.0 - eccentricity).sqrt(),
        }
    }
}

impl OrbitTrait for Orbit {
    fn get_semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    fn get_eccentricity(&self) -> f64 {
        self.eccentricity
    }

    fn get_orbital_period(&self) -> f64 {
        self.period
    }

    fn get_mean_anomaly_at_epoch(&self) -> f64 {
        self.mean_anomaly
    }

    fn get_solver_settings(&self) -> SolverSettings {
        self.solver
    }

    fn get_mean_motion(&self) -> f64 {
        self.cache.mean_motion
    }

    fn get_true_anomaly_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        let (s, c) = (eccentric_anomaly * 0.5).sin_cos();

        let true_anomaly =
            2.0 * (self.cache.sqrt_one_plus_e * s).atan2(self.cache.sqrt_one_minus_e * c);

        wrap_angle(true_anomaly)
    }
}

impl TryFrom<CompactOrbit> for Orbit {
    type Error = ElementsError;

    fn try_from(compact: CompactOrbit) -> Result<Self, Self::Error> {
        Self::new(
            compact.semi_major_axis,
            compact.eccentricity,
            compact.period,
            compact.mean_anomaly,
        )
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct OrbitRepr {
    semi_major_axis: f64,
    eccentricity: f64,
    period: f64,
    mean_anomaly: f64,
    #[serde(default)]
    solver: SolverSettings,
}

#[cfg(feature = "serde")]
impl TryFrom<OrbitRepr> for Orbit {
    type Error = ElementsError;

    fn try_from(repr: OrbitRepr) -> Result<Self, Self::Error> {
        Ok(Self::new(
            repr.semi_major_axis,
            repr.eccentricity,
            repr.period,
            repr.mean_anomaly,
        )?
        .with_solver_settings(repr.solver))
    }
}

#[cfg(feature = "serde")]
impl From<Orbit> for OrbitRepr {
    fn from(orbit: Orbit) -> Self {
        Self {
            semi_major_axis: orbit.semi_major_axis,
            eccentricity: orbit.eccentricity,
            period: orbit.period,
            mean_anomaly: orbit.mean_anomaly,
            solver: orbit.solver,
        }
    }
}

impl Default for Orbit {
    /// Creates a unit orbit.
    ///
    /// The unit orbit is a perfect circle of radius 1 with a period of 1,
    /// starting at periapsis.
    fn default() -> Orbit {
        Self::new_unchecked(1.0, 0.0, 1.0, 0.0)
    }
}
