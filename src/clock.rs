//! Simulated time, owned by whoever drives the animation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ClockError;

/// The simulated time of a [`System`][crate::System].
///
/// A clock advances by a fixed `time_step` per tick, can be paused,
/// and can optionally wrap around after a full cycle (for example, one
/// Halferth year), so that long-running animations loop seamlessly.
///
/// # Example
/// ```
/// use halferth_orbits::Clock;
///
/// let mut clock = Clock::new(0.5)?;
/// clock.tick();
/// clock.tick();
/// assert_eq!(clock.time(), 1.0);
///
/// clock.pause();
/// clock.tick();
/// assert_eq!(clock.time(), 1.0);
/// # Ok::<(), halferth_orbits::ClockError>(())
/// ```
///
/// Deserialized clocks go through the same checks as [`Clock::new`] and
/// [`Clock::with_cycle`], and their time is wrapped into the cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ClockRepr", into = "ClockRepr"))]
pub struct Clock {
    time: f64,
    time_step: f64,
    paused: bool,
    cycle: Option<f64>,
}

impl Clock {
    /// Creates a running clock at time zero with the given step and no cycle.
    pub fn new(time_step: f64) -> Result<Self, ClockError> {
        if !time_step.is_finite() {
            return Err(ClockError::NonFiniteTimeStep(time_step));
        }

        Ok(Self {
            time: 0.0,
            time_step,
            paused: false,
            cycle: None,
        })
    }

    /// Creates a clock that plays back one `cycle` of simulated time over
    /// `duration` real seconds at `frame_rate` ticks per second, and then
    /// wraps around.
    ///
    /// ```text
    /// time_step = cycle / (frame_rate * duration)
    /// ```
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::Clock;
    ///
    /// // One 420-day year, played over a minute at 100 frames per second.
    /// let clock = Clock::from_playback(420.0, 100.0, 60.0)?;
    /// assert!((clock.time_step() - 0.07).abs() < 1e-12);
    /// assert_eq!(clock.cycle(), Some(420.0));
    /// # Ok::<(), halferth_orbits::ClockError>(())
    /// ```
    pub fn from_playback(cycle: f64, frame_rate: f64, duration: f64) -> Result<Self, ClockError> {
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(ClockError::InvalidPlayback {
                what: "frame rate",
                value: frame_rate,
            });
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(ClockError::InvalidPlayback {
                what: "duration",
                value: duration,
            });
        }

        Self::new(cycle / (frame_rate * duration))?.with_cycle(cycle)
    }

    /// Makes the clock wrap around once it reaches `cycle`.
    pub fn with_cycle(mut self, cycle: f64) -> Result<Self, ClockError> {
        if !(cycle.is_finite() && cycle > 0.0) {
            return Err(ClockError::InvalidCycle(cycle));
        }
        self.cycle = Some(cycle);
        self.time = self.wrap(self.time);
        Ok(self)
    }

    /// Gets the current simulated time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Sets the current simulated time, wrapping it into the cycle if there is one.
    pub fn set_time(&mut self, time: f64) {
        self.time = self.wrap(time);
    }

    /// Gets the simulated time added per tick.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Sets the simulated time added per tick.
    pub fn set_time_step(&mut self, time_step: f64) -> Result<(), ClockError> {
        if !time_step.is_finite() {
            return Err(ClockError::NonFiniteTimeStep(time_step));
        }
        self.time_step = time_step;
        Ok(())
    }

    /// Gets the cycle length, if the clock wraps around.
    pub fn cycle(&self) -> Option<f64> {
        self.cycle
    }

    /// Pauses the clock. Ticks are ignored until it's resumed.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the clock.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggles the pause state, returning whether the clock is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Is the clock paused?
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances the clock by one step.
    ///
    /// Returns `false` and leaves the time untouched if the clock is paused.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }

        self.time = self.wrap(self.time + self.time_step);
        tracing::trace!(time = self.time, "clock tick");
        true
    }

    /// Advances the clock by multiple steps at once.
    ///
    /// Like [`tick`][Self::tick], this does nothing while paused.
    pub fn warp(&mut self, ticks: u64) -> bool {
        if self.paused {
            return false;
        }

        self.time = self.wrap(self.time + ticks as f64 * self.time_step);
        true
    }

    /// Folds `time` into `[0, cycle)`.
    fn wrap(&self, time: f64) -> f64 {
        match self.cycle {
            Some(cycle) => {
                // rem_euclid rounds tiny negative times up to `cycle` itself
                let wrapped = time.rem_euclid(cycle);
                if wrapped >= cycle {
                    0.0
                } else {
                    wrapped
                }
            }
            None => time,
        }
    }
}

impl Default for Clock {
    /// A running clock at time zero, stepping by one unit per tick.
    fn default() -> Self {
        Self {
            time: 0.0,
            time_step: 1.0,
            paused: false,
            cycle: None,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct ClockRepr {
    time: f64,
    time_step: f64,
    paused: bool,
    #[serde(default)]
    cycle: Option<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<ClockRepr> for Clock {
    type Error = ClockError;

    fn try_from(repr: ClockRepr) -> Result<Self, Self::Error> {
        if !repr.time.is_finite() {
            return Err(ClockError::NonFiniteTime(repr.time));
        }

        let mut clock = Self::new(repr.time_step)?;
        if let Some(cycle) = repr.cycle {
            clock = clock.with_cycle(cycle)?;
        }
        clock.set_time(repr.time);
        clock.paused = repr.paused;
        Ok(clock)
    }
}

#[cfg(feature = "serde")]
impl From<Clock> for ClockRepr {
    fn from(clock: Clock) -> Self {
        Self {
            time: clock.time,
            time_step: clock.time_step,
            paused: clock.paused,
            cycle: clock.cycle,
        }
    }
}
