use core::f64::consts::TAU;

use crate::{ElementsError, Embedding, Orbit};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// A struct representing a celestial body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// The name of the celestial body.
    pub name: String,

    /// The display radius of the celestial body.
    ///
    /// Orbit calculations never read this.
    pub radius: f64,

    /// The orbit of the celestial body, if it is orbiting one.
    pub orbit: Option<Orbit>,

    /// How the orbital plane is placed around the parent body.
    pub embedding: Embedding,

    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "deserialize_spin_period")
    )]
    spin_period: Option<f64>,
}

impl Body {
    /// Creates a new `Body` instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the celestial body.
    /// * `radius` - The radius of the celestial body.
    /// * `orbit` - An optional orbit for the celestial body.
    ///
    /// The orbit is embedded flat; see [`Body::with_embedding`].
    pub fn new(name: impl Into<String>, radius: f64, orbit: Option<Orbit>) -> Self {
        Self {
            name: name.into(),
            radius,
            orbit,
            embedding: Embedding::Flat,
            spin_period: None,
        }
    }

    /// Replaces the way this body's orbital plane is placed around its parent.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = embedding;
        self
    }

    /// Makes the body spin about its own axis, completing one turn
    /// every `period` units of simulated time.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::Body;
    ///
    /// let body = Body::new("Halferth", 1.0, None).with_spin_period(1.0)?;
    /// let rotation = body.rotation_at_time(2.25);
    /// assert!((rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    /// # Ok::<(), halferth_orbits::ElementsError>(())
    /// ```
    pub fn with_spin_period(mut self, period: f64) -> Result<Self, ElementsError> {
        validate_spin_period(period)?;
        self.spin_period = Some(period);
        Ok(self)
    }

    /// Stops the body from spinning.
    pub fn stop_spinning(&mut self) {
        self.spin_period = None;
    }

    /// Gets the time it takes the body to spin once, if it spins.
    pub fn get_spin_period(&self) -> Option<f64> {
        self.spin_period
    }

    /// Gets how far the body has turned about its axis at the given time,
    /// in radians, in `[0, tau)`.
    ///
    /// A body that doesn't spin always has a rotation of zero.
    pub fn rotation_at_time(&self, time: f64) -> f64 {
        let Some(period) = self.spin_period else {
            return 0.0;
        };

        let rotation = (TAU * time / period).rem_euclid(TAU);
        if rotation >= TAU {
            0.0
        } else {
            rotation
        }
    }

    /// Gets how many full turns the body has made about its axis since
    /// time zero. Negative before time zero.
    ///
    /// A body that doesn't spin never completes a turn.
    pub fn full_spins_at_time(&self, time: f64) -> i64 {
        match self.spin_period {
            Some(period) => (time / period).floor() as i64,
            None => 0,
        }
    }

    /// Releases the body from its orbit.
    pub fn release_from_orbit(&mut self) {
        self.orbit = None;
    }
}

fn validate_spin_period(period: f64) -> Result<(), ElementsError> {
    if !period.is_finite() {
        return Err(ElementsError::NonFinite {
            what: "spin period",
        });
    }
    if period <= 0.0 {
        return Err(ElementsError::NonPositivePeriod(period));
    }
    Ok(())
}

#[cfg(feature = "serde")]
fn deserialize_spin_period<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let period = Option::<f64>::deserialize(deserializer)?;
    if let Some(period) = period {
        validate_spin_period(period).map_err(serde::de::Error::custom)?;
    }
    Ok(period)
}
