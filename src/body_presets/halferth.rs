use core::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::{initial_mean_anomaly, Body, ElementsError, Embedding, Orbit};

/// The length of a Halferth day, in hours.
pub const HALFERTH_DAY_HOURS: f64 = 21.0;

/// The length of a Halferth day, in seconds.
pub const HALFERTH_DAY_SECONDS: f64 = HALFERTH_DAY_HOURS * 3600.0;

/// How long Halferth takes to spin once, in Halferth days.
pub const HALFERTH_SPIN_PERIOD_DAYS: f64 = 1.0;

/// How fast Halferth spins, in radians per second.
pub const HALFERTH_SPIN_RATE: f64 = TAU / HALFERTH_DAY_SECONDS;

/// The length of a Halferth year, in Halferth days.
pub const HALFERTH_YEAR_DAYS: f64 = 420.0;

/// The axial tilt of Halferth, in degrees.
pub const HALFERTH_AXIAL_TILT_DEGREES: f64 = 12.5;

/// The eccentricity of Halferth's orbit around its sun.
pub const HALFERTH_SOLAR_ECCENTRICITY: f64 = 0.0167;

/// Where Halferth sits on its solar orbit at time zero, as a true anomaly.
pub const HALFERTH_START_TRUE_ANOMALY: f64 = 3.0 * PI / 2.0;

/// Where both moons sit on their orbits at time zero, as a true anomaly.
pub const MOON_START_TRUE_ANOMALY: f64 = -FRAC_PI_2;

/// The semi-major axis of Mother's orbit, in kilometers.
pub const MOTHER_SEMI_MAJOR_AXIS: f64 = 6.56e5;

/// The eccentricity of Mother's orbit.
pub const MOTHER_ECCENTRICITY: f64 = 0.35;

/// The period of Mother's orbit, in Halferth days.
pub const MOTHER_PERIOD_DAYS: f64 = 70.0;

/// The semi-major axis of Daughter's orbit, in kilometers.
pub const DAUGHTER_SEMI_MAJOR_AXIS: f64 = 4.13e5;

/// The eccentricity of Daughter's orbit.
pub const DAUGHTER_ECCENTRICITY: f64 = 0.3;

/// The period of Daughter's orbit, in Halferth days.
pub const DAUGHTER_PERIOD_DAYS: f64 = 35.0;

/// Returns Halferth, the planet.
///
/// `solar_semi_major_axis`: The semi-major axis of Halferth's orbit
/// around its sun, if any.
/// If None, the planet will not be placed in an orbit.
///
/// The solar orbit lies in the heliocentric plane, with the planet
/// starting three quarters of a turn past periapsis. The planet spins
/// once per Halferth day.
pub fn halferth(solar_semi_major_axis: Option<f64>) -> Result<Body, ElementsError> {
    let orbit = solar_semi_major_axis
        .map(|a| {
            Orbit::with_start_true_anomaly(
                a,
                HALFERTH_SOLAR_ECCENTRICITY,
                HALFERTH_YEAR_DAYS,
                HALFERTH_START_TRUE_ANOMALY,
            )
        })
        .transpose()?;

    Body::new("Halferth", 1.0, orbit)
        .with_embedding(Embedding::Heliocentric)
        .with_spin_period(HALFERTH_SPIN_PERIOD_DAYS)
}

/// Returns Mother, the larger and farther moon of Halferth.
///
/// Mother's orbit is embedded flat, as in a top-down plot of the moons.
/// Use [`Body::with_embedding`] to place it in a tilted scene instead.
pub fn mother() -> Body {
    let orbit = moon_orbit(
        MOTHER_SEMI_MAJOR_AXIS,
        MOTHER_ECCENTRICITY,
        MOTHER_PERIOD_DAYS,
    );

    Body::new("Mother", 0.5, Some(orbit))
}

/// Returns Daughter, the smaller and closer moon of Halferth.
///
/// Daughter's orbit is embedded flat, as in a top-down plot of the moons.
/// Use [`Body::with_embedding`] to place it in a tilted scene instead.
pub fn daughter() -> Body {
    let orbit = moon_orbit(
        DAUGHTER_SEMI_MAJOR_AXIS,
        DAUGHTER_ECCENTRICITY,
        DAUGHTER_PERIOD_DAYS,
    );

    Body::new("Daughter", 0.3, Some(orbit))
}

/// The embedding for moon orbits tilted along with Halferth's axis.
pub fn halferth_tilt() -> Embedding {
    Embedding::tilted_degrees(HALFERTH_AXIAL_TILT_DEGREES)
}

fn moon_orbit(semi_major_axis: f64, eccentricity: f64, period: f64) -> Orbit {
    Orbit::new_unchecked(
        semi_major_axis,
        eccentricity,
        period,
        initial_mean_anomaly(MOON_START_TRUE_ANOMALY, eccentricity),
    )
}
