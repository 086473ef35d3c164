//! Closed-form conversions between the anomalies, the orbital radius,
//! and the position of a body in its orbital plane.
//!
//! Every function here is pure and unchecked: the eccentricity is
//! expected to lie in `[0, 1)` and the semi-major axis to be positive.
//! The validated orbit types in this crate uphold that for you.

use core::f64::consts::{PI, TAU};

use glam::DVec2;

/// Gets the true anomaly at a given eccentric anomaly.
///
/// Uses the half-angle form
/// `2 atan2(sqrt(1 + e) sin(E / 2), sqrt(1 - e) cos(E / 2))`,
/// which has no branch ambiguity. Eccentric anomalies past a half turn
/// are folded back so that the result always lies in `(-pi, pi]`.
///
/// # Example
/// ```
/// use halferth_orbits::true_anomaly_at_eccentric_anomaly;
///
/// assert_eq!(true_anomaly_at_eccentric_anomaly(0.0, 0.35), 0.0);
///
/// let f = true_anomaly_at_eccentric_anomaly(std::f64::consts::PI, 0.35);
/// assert!((f - std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn true_anomaly_at_eccentric_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let (s, c) = (eccentric_anomaly * 0.5).sin_cos();

    let true_anomaly =
        2.0 * ((1.0 + eccentricity).sqrt() * s).atan2((1.0 - eccentricity).sqrt() * c);

    wrap_angle(true_anomaly)
}

/// Gets the eccentric anomaly at a given true anomaly.
///
/// This is the inverse of [`true_anomaly_at_eccentric_anomaly`]:
///
/// ```text
/// tan(E / 2) = sqrt((1 - e) / (1 + e)) tan(f / 2)
/// ```
///
/// The result lies in `(-pi, pi)`. At `f = +/- pi` the tangent is
/// unbounded and the result approaches `+/- pi`.
pub fn eccentric_anomaly_at_true_anomaly(true_anomaly: f64, eccentricity: f64) -> f64 {
    let tan_half_ecc_anom =
        ((1.0 - eccentricity) / (1.0 + eccentricity)).sqrt() * (true_anomaly * 0.5).tan();

    2.0 * tan_half_ecc_anom.atan()
}

/// Gets the mean anomaly at a given eccentric anomaly.
///
/// This is Kepler's equation evaluated forwards:
///
/// ```text
/// M = E - e sin E
/// ```
pub fn mean_anomaly_at_eccentric_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}

/// Gets the mean anomaly that places a body at the given true anomaly.
///
/// Use this at setup time to choose where on its ellipse a body sits
/// at time zero, independently of its period or size.
///
/// # Example
/// ```
/// use halferth_orbits::{initial_mean_anomaly, solve_kepler, true_anomaly_at_eccentric_anomaly};
/// use std::f64::consts::FRAC_PI_2;
///
/// let e = 0.35;
/// let mean_anomaly = initial_mean_anomaly(-FRAC_PI_2, e);
///
/// let ecc_anom = solve_kepler(mean_anomaly, e);
/// let true_anom = true_anomaly_at_eccentric_anomaly(ecc_anom, e);
///
/// assert!((true_anom + FRAC_PI_2).abs() < 1e-4);
/// ```
#[doc(alias = "get_initial_mean_anomaly")]
pub fn initial_mean_anomaly(desired_true_anomaly: f64, eccentricity: f64) -> f64 {
    let ecc_anom = eccentric_anomaly_at_true_anomaly(desired_true_anomaly, eccentricity);
    mean_anomaly_at_eccentric_anomaly(ecc_anom, eccentricity)
}

/// Gets the distance from the focus at a given eccentric anomaly.
///
/// ```text
/// r = a (1 - e cos E)
/// ```
pub fn radius_at_eccentric_anomaly(
    eccentric_anomaly: f64,
    semi_major_axis: f64,
    eccentricity: f64,
) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos())
}

/// Gets the distance from the focus at a given true anomaly.
///
/// ```text
/// r = a (1 - e^2) / (1 + e cos f)
/// ```
pub fn radius_at_true_anomaly(true_anomaly: f64, semi_major_axis: f64, eccentricity: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos())
}

/// Gets the position in the orbital plane at a given eccentric anomaly.
///
/// The focus is at the origin and the periapsis lies on the +X axis.
///
/// # Example
/// ```
/// use glam::DVec2;
/// use halferth_orbits::position_at_eccentric_anomaly;
///
/// let pos = position_at_eccentric_anomaly(0.0, 6.56e5, 0.35);
/// assert!((pos - DVec2::new(426_400.0, 0.0)).length() < 1e-6);
/// ```
pub fn position_at_eccentric_anomaly(
    eccentric_anomaly: f64,
    semi_major_axis: f64,
    eccentricity: f64,
) -> DVec2 {
    let true_anomaly = true_anomaly_at_eccentric_anomaly(eccentric_anomaly, eccentricity);
    let radius = radius_at_eccentric_anomaly(eccentric_anomaly, semi_major_axis, eccentricity);

    let (s, c) = true_anomaly.sin_cos();
    DVec2::new(radius * c, radius * s)
}

/// Gets the position in the orbital plane at a given true anomaly.
///
/// The focus is at the origin and the periapsis lies on the +X axis.
pub fn position_at_true_anomaly(
    true_anomaly: f64,
    semi_major_axis: f64,
    eccentricity: f64,
) -> DVec2 {
    let radius = radius_at_true_anomaly(true_anomaly, semi_major_axis, eccentricity);

    let (s, c) = true_anomaly.sin_cos();
    DVec2::new(radius * c, radius * s)
}

/// Folds an angle into `(-pi, pi]`. Angles already in range are returned untouched.
#[inline]
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }

    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
