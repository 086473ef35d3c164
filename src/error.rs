//! Error types for orbit construction, system building and configuration.

use thiserror::Error;

/// An error describing why a set of orbital elements was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ElementsError {
    /// ### Eccentricity outside of `[0, 1)`.
    /// Only circular and elliptic orbits are supported.
    /// Parabolic and hyperbolic trajectories have no period and
    /// cannot be driven by a repeating clock.
    #[error("eccentricity {0} is outside of the supported range [0, 1)")]
    EccentricityOutOfRange(f64),

    /// ### Semi-major axis of zero or less.
    /// An elliptic orbit always has a positive size.
    #[error("semi-major axis {0} must be greater than zero")]
    NonPositiveSemiMajorAxis(f64),

    /// ### Period of zero or less.
    /// A body needs a positive period to have a finite mean motion.
    #[error("orbital period {0} must be greater than zero")]
    NonPositivePeriod(f64),

    /// ### A NaN or infinite element.
    #[error("{what} must be finite")]
    NonFinite {
        /// The name of the offending element.
        what: &'static str,
    },
}

/// An error describing why a body could not be added to a [`System`][crate::System].
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BodyAddError {
    /// There was no body at the specified parent id.
    #[error("there was no body at the specified parent id {0}")]
    ParentNotFound(u64),
}

/// An error describing why a clock could not be configured.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ClockError {
    /// The time step was NaN or infinite.
    #[error("time step {0} must be finite")]
    NonFiniteTimeStep(f64),

    /// The current time was NaN or infinite.
    #[error("time {0} must be finite")]
    NonFiniteTime(f64),

    /// The cycle length was zero, negative, NaN or infinite.
    #[error("cycle length {0} must be finite and greater than zero")]
    InvalidCycle(f64),

    /// The playback frame rate or duration was zero, negative, NaN or infinite.
    #[error("playback {what} {value} must be finite and greater than zero")]
    InvalidPlayback {
        /// Which playback parameter was rejected.
        what: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// An error raised while loading a system configuration.
#[cfg(feature = "serde")]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document was not valid TOML, or didn't match the expected layout.
    #[error("failed to parse system configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A body's orbital elements were rejected.
    #[error("body {name:?} has invalid orbital elements: {source}")]
    InvalidBody {
        /// The name of the body.
        name: String,
        /// Why its elements were rejected.
        source: ElementsError,
    },

    /// A body referenced a parent that is not declared before it.
    #[error("body {name:?} orbits {parent:?}, which is not declared before it")]
    UnknownParent {
        /// The name of the body.
        name: String,
        /// The name of the missing parent.
        parent: String,
    },

    /// Two bodies shared the same name.
    #[error("body {name:?} is declared more than once")]
    DuplicateBody {
        /// The repeated name.
        name: String,
    },

    /// The clock section was rejected.
    #[error("invalid clock configuration: {0}")]
    InvalidClock(#[from] ClockError),
}
