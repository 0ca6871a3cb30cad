//! Usage report — per-device, per-day activity counts derived from logs.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::log::LogEntry;

/// Activity count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Day key in `M/D/YYYY` form.
    pub date: String,
    pub count: u64,
}

/// All daily counts for one device, days in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUsage {
    pub device_name: String,
    pub daily: Vec<DailyCount>,
}

/// Aggregate log entries into per-device daily activity counts.
///
/// Devices are ordered by name, days chronologically. Each log entry counts
/// as one activity on the day it was written.
#[must_use]
pub fn usage_by_device(entries: &[LogEntry]) -> Vec<DeviceUsage> {
    let mut grouped: BTreeMap<&str, BTreeMap<NaiveDate, u64>> = BTreeMap::new();
    for entry in entries {
        *grouped
            .entry(entry.device_name.as_str())
            .or_default()
            .entry(entry.updated_at.date_naive())
            .or_default() += 1;
    }

    grouped
        .into_iter()
        .map(|(device_name, days)| DeviceUsage {
            device_name: device_name.to_string(),
            daily: days
                .into_iter()
                .map(|(date, count)| DailyCount {
                    date: format!("{}/{}/{}", date.month(), date.day(), date.year()),
                    count,
                })
                .collect(),
        })
        .collect()
}
