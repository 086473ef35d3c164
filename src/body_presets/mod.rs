//! This module contains presets for the bodies of the Halferth system.
//!
//! Lengths are in kilometers and times in Halferth days of 21 hours.
//! Radii are display radii relative to Halferth.

mod halferth;

pub use halferth::*;
