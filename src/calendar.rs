//! The Halferth calendar.
//!
//! A Halferth year is 420 days long, counted from one full spin of the
//! planet to the next. It is split into six seasons of 70 days, and each
//! season into a low and a high civic month of 35 days.

use core::fmt;

use crate::body_presets::{HALFERTH_DAY_SECONDS, HALFERTH_YEAR_DAYS};

/// The number of days in a season.
pub const DAYS_PER_SEASON: u32 = 70;

/// The number of days in a civic month.
pub const DAYS_PER_MONTH: u32 = 35;

/// The six seasons of a Halferth year, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Season {
    /// Days 1 to 70.
    Nightfall,
    /// Days 71 to 140.
    LongNight,
    /// Days 141 to 210.
    Nightspring,
    /// Days 211 to 280.
    Dayspring,
    /// Days 281 to 350.
    LongDay,
    /// Days 351 to 420.
    Dayfall,
}

impl Season {
    /// Every season, starting with the first of the year.
    pub const ALL: [Season; 6] = [
        Season::Nightfall,
        Season::LongNight,
        Season::Nightspring,
        Season::Dayspring,
        Season::LongDay,
        Season::Dayfall,
    ];

    /// The name of the season as written in dates.
    pub fn name(self) -> &'static str {
        match self {
            Season::Nightfall => "Nightfall",
            Season::LongNight => "Long Night",
            Season::Nightspring => "Nightspring",
            Season::Dayspring => "Dayspring",
            Season::LongDay => "Long Day",
            Season::Dayfall => "Dayfall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which civic month of its season a day falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonthHalf {
    /// The first 35 days of a season.
    Low,
    /// The last 35 days of a season.
    High,
}

impl fmt::Display for MonthHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MonthHalf::Low => "Low",
            MonthHalf::High => "High",
        })
    }
}

/// A day of the Halferth year.
///
/// # Example
/// ```
/// use halferth_orbits::{HalferthDate, MonthHalf, Season};
///
/// let date = HalferthDate::from_days(106.4).unwrap();
/// assert_eq!(date.day_of_year(), 107);
/// assert_eq!(date.season(), Season::LongNight);
/// assert_eq!(date.month_half(), MonthHalf::High);
/// assert_eq!(date.day_of_month(), 2);
/// assert_eq!(date.to_string(), "Day 2 of High Long Night");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalferthDate {
    day_of_year: u32,
}

impl HalferthDate {
    /// Creates the date for a day of the year, counted from 1.
    ///
    /// Returns `None` if the day is zero or past the end of the year.
    pub fn new(day_of_year: u32) -> Option<Self> {
        (1..=Self::year_days()).contains(&day_of_year).then_some(Self { day_of_year })
    }

    /// Gets the date at a simulated time, in Halferth days since the
    /// start of a year.
    ///
    /// Only full days count, so the first day of the year lasts from
    /// time zero up to time one. Times past the end of the year, or
    /// before its start, fold back into the year.
    ///
    /// Returns `None` if the time is NaN or infinite.
    pub fn from_days(days: f64) -> Option<Self> {
        if !days.is_finite() {
            return None;
        }

        // Whole days modulo a whole year, so this is exact
        let day_index = days.floor().rem_euclid(HALFERTH_YEAR_DAYS) as u32;

        Some(Self {
            day_of_year: day_index + 1,
        })
    }

    /// Gets the date at a simulated time given in seconds.
    pub fn from_seconds(seconds: f64) -> Option<Self> {
        Self::from_days(seconds / HALFERTH_DAY_SECONDS)
    }

    /// The day of the year, from 1 to 420.
    pub fn day_of_year(&self) -> u32 {
        self.day_of_year
    }

    /// The season this day falls in.
    pub fn season(&self) -> Season {
        let index = (self.day_of_year - 1) / DAYS_PER_SEASON;
        Season::ALL[index as usize]
    }

    /// Whether this day falls in the low or the high month of its season.
    pub fn month_half(&self) -> MonthHalf {
        if (self.day_of_year - 1) % DAYS_PER_SEASON < DAYS_PER_MONTH {
            MonthHalf::Low
        } else {
            MonthHalf::High
        }
    }

    /// The day of the civic month, from 1 to 35.
    pub fn day_of_month(&self) -> u32 {
        (self.day_of_year - 1) % DAYS_PER_MONTH + 1
    }

    /// The simulated time, in days, at which this day starts.
    ///
    /// This is the inverse of [`HalferthDate::from_days`], for jumping a
    /// [`Clock`][crate::Clock] to a chosen day.
    pub fn start_time(&self) -> f64 {
        f64::from(self.day_of_year - 1)
    }

    fn year_days() -> u32 {
        HALFERTH_YEAR_DAYS as u32
    }
}

impl fmt::Display for HalferthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day {} of {} {}",
            self.day_of_month(),
            self.month_half(),
            self.season()
        )
    }
}
