#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{initial_mean_anomaly, validate_elements, ElementsError, Orbit, OrbitTrait};

/// A minimal struct representing an elliptic Keplerian orbit.
///
/// This struct minimizes memory footprint by not caching variables,
/// and exposes its elements as public fields.
/// Nothing is validated on construction; call [`CompactOrbit::validate`]
/// or convert into an [`Orbit`] to check the elements.
///
/// # Example
/// ```
/// use halferth_orbits::{CompactOrbit, OrbitTrait};
///
/// let orbit = CompactOrbit::new(
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
/// );
///
/// assert!(orbit.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompactOrbit {
    /// The semi-major axis of the orbit.
    ///
    /// This is the average of the periapsis and apoapsis, in whatever
    /// length unit you want positions to come out in.
    pub semi_major_axis: f64,

    /// The eccentricity of the orbit.
    /// e = 0: circle
    /// 0 < e < 1: ellipse
    ///
    /// See more: <https://en.wikipedia.org/wiki/Orbital_eccentricity>
    pub eccentricity: f64,

    /// The time it takes to complete one revolution.
    pub period: f64,

    /// The mean anomaly at time zero, in radians.
    ///
    /// Wikipedia:
    /// The mean anomaly at epoch, `M_0`, is defined as the instantaneous mean
    /// anomaly at a given epoch, `t_0`.
    /// <https://en.wikipedia.org/wiki/Mean_anomaly#Mean_anomaly_at_epoch>
    ///
    /// In simple terms, this modifies the "offset" of the orbit progression.
    pub mean_anomaly: f64,
}

impl CompactOrbit {
    /// Creates a new [`CompactOrbit`] instance with the given parameters.
    ///
    /// # Parameters
    /// - `semi_major_axis`: The semi-major axis of the orbit.
    /// - `eccentricity`: The eccentricity of the orbit, in `[0, 1)`.
    /// - `period`: The orbital period.
    /// - `mean_anomaly`: The mean anomaly of the orbit at epoch, in radians.
    pub fn new(semi_major_axis: f64, eccentricity: f64, period: f64, mean_anomaly: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            period,
            mean_anomaly,
        }
    }

    /// Creates a new [`CompactOrbit`] whose body sits at the given
    /// true anomaly at time zero.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::{CompactOrbit, OrbitTrait};
    ///
    /// let orbit = CompactOrbit::with_start_true_anomaly(4.13e5, 0.3, 35.0, 1.0);
    /// let true_anomaly = orbit.get_true_anomaly_at_time(0.0);
    ///
    /// assert!((true_anomaly - 1.0).abs() < 1e-4);
    /// ```
    pub fn with_start_true_anomaly(
        semi_major_axis: f64,
        eccentricity: f64,
        period: f64,
        true_anomaly: f64,
    ) -> Self {
        Self::new(
            semi_major_axis,
            eccentricity,
            period,
            initial_mean_anomaly(true_anomaly, eccentricity),
        )
    }

    /// Checks that the elements describe a supported orbit.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::{CompactOrbit, ElementsError};
    ///
    /// let parabolic = CompactOrbit::new(1.0, 1.0, 1.0, 0.0);
    /// assert_eq!(
    ///     parabolic.validate(),
    ///     Err(ElementsError::EccentricityOutOfRange(1.0))
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ElementsError> {
        validate_elements(
            self.semi_major_axis,
            self.eccentricity,
            self.period,
            self.mean_anomaly,
        )
    }
}

impl OrbitTrait for CompactOrbit {
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
}

impl From<Orbit> for CompactOrbit {
    fn from(cached: Orbit) -> Self {
        Self {
            semi_major_axis: cached.get_semi_major_axis(),
            eccentricity: cached.get_eccentricity(),
            period: cached.get_orbital_period(),
            mean_anomaly: cached.get_mean_anomaly_at_epoch(),
        }
    }
}

impl Default for CompactOrbit {
    /// Creates a unit orbit.
    ///
    /// The unit orbit is a perfect circle of radius 1 with a period of 1,
    /// starting at periapsis.
    fn default() -> Self {
        Self {
            semi_major_axis: 1.0,
            eccentricity: 0.0,
            period: 1.0,
            mean_anomaly: 0.0,
        }
    }
}
