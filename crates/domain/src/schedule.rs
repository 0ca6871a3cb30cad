//! Schedule — the on/off time window that drives a light in automatic mode.
//!
//! A schedule is a wall-clock window `[on, off)` plus the weekdays it
//! recurs on. The status of an automatic device is never stored; it is
//! recomputed from the schedule each time it is needed (the only persisted
//! value is a snapshot taken at save time).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// On/off state of a light's controlled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightStatus {
    On,
    #[default]
    Off,
}

impl LightStatus {
    /// Pure negation; persistence is the caller's concern.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl std::fmt::Display for LightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// A wall-clock time of day with no date or timezone component.
///
/// Ordering is lexicographic by (hour, minute). The display format is
/// `H:MM` — hour unpadded, minute padded — which is the exact format the
/// existing schedule records use on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a time of day, rejecting out-of-range components.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTime`] unless `hour` is in `0..=23`
    /// and `minute` in `0..=59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTime { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        u32::from(self.hour)
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        u32::from(self.minute)
    }
}

impl From<chrono::NaiveTime> for TimeOfDay {
    /// Truncate a wall-clock time to its (hour, minute) pair.
    fn from(t: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::MalformedTime(s.to_string()))?;
        let hour: u32 = hour
            .parse()
            .map_err(|_| ValidationError::MalformedTime(s.to_string()))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| ValidationError::MalformedTime(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// Day-of-week tag for schedule recurrence.
///
/// Serialized as the three-letter tags (`"Mon"`..`"Sun"`) the existing
/// device records use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        };
        f.write_str(tag)
    }
}

/// Automatic-mode configuration: a time window and the weekdays it recurs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Start of the window (inclusive).
    pub on: TimeOfDay,
    /// End of the window (exclusive).
    pub off: TimeOfDay,
    /// Weekdays the schedule is active on. Must be non-empty when
    /// automatic mode is enabled.
    pub days: BTreeSet<Weekday>,
}

impl Schedule {
    /// Create a schedule from a window and its active days.
    #[must_use]
    pub fn new(on: TimeOfDay, off: TimeOfDay, days: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            on,
            off,
            days: days.into_iter().collect(),
        }
    }

    /// Compute the effective status at `now`.
    ///
    /// Returns [`LightStatus::On`] exactly when `now` falls in the half-open
    /// window `[on, off)`. When `off <= on` the window is empty or inverted
    /// and the same comparison yields `Off` for every `now`: overnight
    /// windows do not wrap past midnight. That limitation is inherited from
    /// the records this system must stay compatible with and is pinned by
    /// tests rather than corrected here.
    #[must_use]
    pub fn evaluate(&self, now: TimeOfDay) -> LightStatus {
        if self.on <= now && now < self.off {
            LightStatus::On
        } else {
            LightStatus::Off
        }
    }

    /// Whether the schedule recurs on the given day.
    #[must_use]
    pub fn is_active_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Check schedule invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoDaysSelected`] when `days` is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.days.is_empty() {
            return Err(ValidationError::NoDaysSelected);
        }
        Ok(())
    }
}
