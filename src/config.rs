//! Describing a [`System`] in a TOML document.
//!
//! ```toml
//! [clock]
//! cycle = 420.0
//! frame_rate = 100.0
//! animation_duration = 60.0
//!
//! [[bodies]]
//! name = "Halferth"
//! spin_period = 1.0
//!
//! [[bodies]]
//! name = "Mother"
//! parent = "Halferth"
//! radius = 0.5
//! embedding = { kind = "tilted", axial_tilt = 0.2181661564992912 }
//!
//! [bodies.orbit]
//! semi_major_axis = 656000.0
//! eccentricity = 0.35
//! period = 70.0
//! start_true_anomaly = -1.5707963267948966
//! ```
//!
//! Bodies are added in the order they appear, so a parent must be
//! declared before its satellites. Body names must be unique.

use std::{collections::HashMap, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Body, Clock, ConfigError, Embedding, Id, Orbit, System};

/// A whole system: its clock and its bodies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// How simulated time advances.
    #[serde(default)]
    pub clock: ClockConfig,

    /// The bodies, parents first.
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

/// How the clock of a system advances.
///
/// If `time_step` is set, it is used as is. Otherwise, if `cycle`,
/// `frame_rate` and `animation_duration` are all set, the step is chosen so
/// that one cycle plays back over `animation_duration` real seconds
/// (see [`Clock::from_playback`]). Otherwise the step is one unit per tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Simulated time per tick.
    pub time_step: Option<f64>,

    /// The length after which simulated time wraps around.
    pub cycle: Option<f64>,

    /// Ticks per real second during playback.
    pub frame_rate: Option<f64>,

    /// Real seconds one cycle should take during playback.
    pub animation_duration: Option<f64>,

    /// Whether the clock starts paused.
    #[serde(default)]
    pub paused: bool,
}

/// A single body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// The name of the body. Satellites refer to their parent by name.
    pub name: String,

    /// The name of the body this one orbits, if any.
    #[serde(default)]
    pub parent: Option<String>,

    /// The display radius of the body.
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// How the orbital plane sits around the parent.
    #[serde(default)]
    pub embedding: Embedding,

    /// How long the body takes to spin once about its axis, if it spins.
    #[serde(default)]
    pub spin_period: Option<f64>,

    /// The orbit of the body. A body without one sits on its parent.
    #[serde(default)]
    pub orbit: Option<OrbitConfig>,
}

/// The orbital elements of a body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// The semi-major axis.
    pub semi_major_axis: f64,

    /// The eccentricity, in `[0, 1)`.
    pub eccentricity: f64,

    /// The orbital period.
    pub period: f64,

    /// The mean anomaly at time zero, in radians. Defaults to zero.
    #[serde(default)]
    pub mean_anomaly: Option<f64>,

    /// Where the body sits at time zero, as a true anomaly in radians.
    ///
    /// Takes precedence over `mean_anomaly`.
    #[serde(default)]
    pub start_true_anomaly: Option<f64>,
}

fn default_radius() -> f64 {
    1.0
}

impl SystemConfig {
    /// Parses a system configuration from a TOML document.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }

    /// Builds the system described by this configuration.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::config::SystemConfig;
    ///
    /// let config = SystemConfig::from_toml_str(
    ///     r#"
    ///     [clock]
    ///     time_step = 0.2
    ///
    ///     [[bodies]]
    ///     name = "Halferth"
    ///
    ///     [[bodies]]
    ///     name = "Daughter"
    ///     parent = "Halferth"
    ///
    ///     [bodies.orbit]
    ///     semi_major_axis = 413000.0
    ///     eccentricity = 0.3
    ///     period = 35.0
    ///     "#,
    /// )?;
    ///
    /// let system = config.build()?;
    /// assert_eq!(system.len(), 2);
    /// assert_eq!(system.clock.time_step(), 0.2);
    /// # Ok::<(), halferth_orbits::ConfigError>(())
    /// ```
    pub fn build(&self) -> Result<System, ConfigError> {
        let mut system = System::new(self.clock.build()?);
        let mut ids: HashMap<&str, Id> = HashMap::with_capacity(self.bodies.len());

        for body_config in &self.bodies {
            if ids.contains_key(body_config.name.as_str()) {
                return Err(ConfigError::DuplicateBody {
                    name: body_config.name.clone(),
                });
            }

            let parent = match &body_config.parent {
                Some(parent) => match ids.get(parent.as_str()) {
                    Some(&id) => Some(id),
                    None => {
                        return Err(ConfigError::UnknownParent {
                            name: body_config.name.clone(),
                            parent: parent.clone(),
                        })
                    }
                },
                None => None,
            };

            let body = body_config.build()?;
            // Parents are always resolved above, so this can't fail
            let id = system
                .add_body(body, parent)
                .map_err(|_| ConfigError::UnknownParent {
                    name: body_config.name.clone(),
                    parent: body_config.parent.clone().unwrap_or_default(),
                })?;

            ids.insert(body_config.name.as_str(), id);
        }

        tracing::info!(
            bodies = system.len(),
            time_step = system.clock.time_step(),
            cycle = ?system.clock.cycle(),
            "built system from configuration"
        );

        Ok(system)
    }
}

impl FromStr for SystemConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}

impl ClockConfig {
    /// Builds the clock described by this configuration.
    pub fn build(&self) -> Result<Clock, ConfigError> {
        let mut clock = match (
            self.time_step,
            self.cycle,
            self.frame_rate,
            self.animation_duration,
        ) {
            (Some(step), cycle, _, _) => {
                let clock = Clock::new(step)?;
                match cycle {
                    Some(cycle) => clock.with_cycle(cycle)?,
                    None => clock,
                }
            }
            (None, Some(cycle), Some(frame_rate), Some(duration)) => {
                Clock::from_playback(cycle, frame_rate, duration)?
            }
            (None, Some(cycle), _, _) => Clock::default().with_cycle(cycle)?,
            (None, None, _, _) => Clock::default(),
        };

        if self.paused {
            clock.pause();
        }

        Ok(clock)
    }
}

impl BodyConfig {
    /// Builds the body described by this configuration.
    pub fn build(&self) -> Result<Body, ConfigError> {
        let invalid = |source| ConfigError::InvalidBody {
            name: self.name.clone(),
            source,
        };

        let orbit = self
            .orbit
            .as_ref()
            .map(OrbitConfig::build)
            .transpose()
            .map_err(invalid)?;

        let body = Body::new(self.name.clone(), self.radius, orbit).with_embedding(self.embedding);
        match self.spin_period {
            Some(period) => body.with_spin_period(period).map_err(invalid),
            None => Ok(body),
        }
    }
}

impl OrbitConfig {
    /// Builds the orbit described by this configuration.
    pub fn build(&self) -> Result<Orbit, crate::ElementsError> {
        match self.start_true_anomaly {
            Some(true_anomaly) => Orbit::with_start_true_anomaly(
                self.semi_major_axis,
                self.eccentricity,
                self.period,
                true_anomaly,
            ),
            None => Orbit::new(
                self.semi_major_axis,
                self.eccentricity,
                self.period,
                self.mean_anomaly.unwrap_or(0.0),
            ),
        }
    }
}
