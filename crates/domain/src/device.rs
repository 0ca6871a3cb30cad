//! Device — a smart light with a manual switch or an automatic schedule.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};
use crate::id::DeviceId;
use crate::schedule::{LightStatus, Schedule, TimeOfDay};

/// How a device's status is determined.
///
/// Serialized as the boolean `isAutomatic` field existing device records
/// use on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Manual,
    Automatic,
}

impl Mode {
    #[must_use]
    pub fn is_automatic(self) -> bool {
        matches!(self, Self::Automatic)
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_automatic())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let automatic = bool::deserialize(deserializer)?;
        Ok(if automatic {
            Self::Automatic
        } else {
            Self::Manual
        })
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => f.write_str("Manual"),
            Self::Automatic => f.write_str("Automatic"),
        }
    }
}

/// A smart light as stored under `devices/{id}`.
///
/// In manual mode `light_status` is the externally set value. In automatic
/// mode the effective status is recomputed from the schedule on every read;
/// `light_status` then only carries the snapshot taken at the last save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "isAutomatic")]
    pub mode: Mode,
    #[serde(rename = "lightStatus")]
    pub light_status: LightStatus,
    pub schedule: Option<Schedule>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - automatic mode with no schedule ([`ValidationError::MissingSchedule`])
    /// - automatic mode with no selected day ([`ValidationError::NoDaysSelected`])
    pub fn validate(&self) -> Result<(), LumenError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.mode.is_automatic() {
            let schedule = self
                .schedule
                .as_ref()
                .ok_or(ValidationError::MissingSchedule)?;
            schedule.validate()?;
        }
        Ok(())
    }

    /// The status the controlled output should have at `now`.
    ///
    /// Manual mode returns the stored value unchanged. Automatic mode
    /// recomputes from the schedule; with no schedule present (an invalid
    /// state that [`validate`](Self::validate) rejects before persisting)
    /// this reads as off.
    #[must_use]
    pub fn effective_status(&self, now: TimeOfDay) -> LightStatus {
        match self.mode {
            Mode::Manual => self.light_status,
            Mode::Automatic => self
                .schedule
                .as_ref()
                .map_or(LightStatus::Off, |schedule| schedule.evaluate(now)),
        }
    }

    /// Flip the stored manual status.
    pub fn toggle(&mut self) {
        self.light_status = self.light_status.toggled();
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    mode: Option<Mode>,
    light_status: Option<LightStatus>,
    schedule: Option<Schedule>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn light_status(mut self, status: LightStatus) -> Self {
        self.light_status = Some(status);
        self
    }

    #[must_use]
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if required fields are missing
    /// or invariants fail.
    pub fn build(self) -> Result<Device, LumenError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
            light_status: self.light_status.unwrap_or_default(),
            schedule: self.schedule,
        };
        device.validate()?;
        Ok(device)
    }
}
