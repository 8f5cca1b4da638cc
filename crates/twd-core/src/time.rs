//! Canonical `HH:MM:SS` duration codec.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-negative span of tracked time, in whole seconds.
///
/// The canonical text form is zero-padded `HH:MM:SS`. Hours are not capped at
/// 24 and grow past two digits for large totals; components are padded, never
/// truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TrackedTime {
    seconds: u64,
}

/// Error type for duration strings that do not match `H+:MM:SS`.
#[derive(Debug, Clone, Error)]
#[error("invalid duration: {0:?}")]
pub struct InvalidDuration(String);

impl TrackedTime {
    pub const ZERO: Self = Self { seconds: 0 };

    #[must_use]
    pub const fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    /// Absolute difference between two tracked times, never negative.
    #[must_use]
    pub const fn abs_diff(&self, other: Self) -> Self {
        Self {
            seconds: self.seconds.abs_diff(other.seconds),
        }
    }

    /// Sum that pins at `u64::MAX` instead of wrapping.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self {
            seconds: self.seconds.saturating_add(other.seconds),
        }
    }
}

impl fmt::Display for TrackedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = self.seconds % 3600 / 60;
        let seconds = self.seconds % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// A run of ASCII digits, parsed as seconds-scale integer.
fn digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for TrackedTime {
    type Err = InvalidDuration;

    /// Accepts `H+:MM:SS`: hours one or more digits, minutes and seconds
    /// exactly two. Component values are not range-checked; `timew` emits
    /// well-formed output and the shape check is what matters here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidDuration(s.to_string());

        let mut parts = s.split(':');
        let (Some(hours), Some(minutes), Some(seconds), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if minutes.len() != 2 || seconds.len() != 2 {
            return Err(invalid());
        }

        let hours = digits(hours).ok_or_else(invalid)?;
        let minutes = digits(minutes).ok_or_else(invalid)?;
        let seconds = digits(seconds).ok_or_else(invalid)?;

        hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60))
            .and_then(|hm| hm.checked_add(seconds))
            .map(Self::from_seconds)
            .ok_or_else(invalid)
    }
}

impl Serialize for TrackedTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TrackedTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
