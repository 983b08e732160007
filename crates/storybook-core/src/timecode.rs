//! Audio timeline positions.
//!
//! All narration timing is carried as integer milliseconds. Page files store
//! float seconds; the conversion happens exactly once at scene load, so the
//! trigger table is registered and queried with the same exact values and a
//! float-keyed lookup can never miss.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An offset into the page's narration clip, in milliseconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timecode(u64);

impl Timecode {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Converts float seconds (the page source representation) to the
    /// nearest millisecond. Negative and non-finite inputs clamp to zero.
    #[must_use]
    pub fn from_secs_f64(seconds: f64) -> Self {
        if seconds.is_finite() && seconds > 0.0 {
            Self((seconds * 1000.0).round() as u64)
        } else {
            Self::ZERO
        }
    }

    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / 1000, self.0 % 1000)
    }
}

/// A half-open span of narration, `start` inclusive on entry and `end`
/// marking the exit boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Timecode,
    pub end: Timecode,
}

impl TimeRange {
    #[must_use]
    pub const fn new(start: Timecode, end: Timecode) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secs_rounds_to_nearest_millisecond() {
        assert_eq!(Timecode::from_secs_f64(1.5), Timecode::from_millis(1500));
        assert_eq!(Timecode::from_secs_f64(0.0004), Timecode::ZERO);
        assert_eq!(Timecode::from_secs_f64(0.0006), Timecode::from_millis(1));
    }

    #[test]
    fn test_from_secs_clamps_negative_and_non_finite() {
        assert_eq!(Timecode::from_secs_f64(-3.0), Timecode::ZERO);
        assert_eq!(Timecode::from_secs_f64(f64::NAN), Timecode::ZERO);
    }

    #[test]
    fn test_display_format() {
        assert_eq!(Timecode::from_millis(1500).to_string(), "1.500s");
        assert_eq!(Timecode::from_millis(42).to_string(), "0.042s");
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(Timecode::from_millis(999) < Timecode::from_millis(1000));
    }
}
