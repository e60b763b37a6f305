// Fleet filter criteria
use std::str::FromStr;

use super::device::{Device, DeviceStatus};
use super::error::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Connected,
    Sleep,
    Offline,
}

impl StatusFilter {
    pub fn matches(&self, status: DeviceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Connected => status == DeviceStatus::Connected,
            StatusFilter::Sleep => status == DeviceStatus::Sleeping,
            StatusFilter::Offline => matches!(status, DeviceStatus::Disconnected(_)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Connected => "connected",
            StatusFilter::Sleep => "sleep",
            StatusFilter::Offline => "offline",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(StatusFilter::All),
            "connected" => Ok(StatusFilter::Connected),
            "sleep" => Ok(StatusFilter::Sleep),
            "offline" => Ok(StatusFilter::Offline),
            other => Err(ConsoleError::UnknownStatusFilter(other.to_string())),
        }
    }
}

/// Exact match on a categorical tag, or passthrough.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(String),
}

impl TagFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "" | "all" => TagFilter::All,
            other => TagFilter::Only(other.to_string()),
        }
    }

    pub fn matches(&self, tag: Option<&str>) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Only(expected) => tag == Some(expected.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagFilter::All => "all",
            TagFilter::Only(value) => value,
        }
    }
}

/// Conjunctive filter over the fleet snapshot. Every field is neutral at its
/// default value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetFilter {
    pub search: String,
    pub status: StatusFilter,
    pub day: TagFilter,
    pub sense: TagFilter,
    /// Lower bound on `tank_volume` as typed by the operator. Ignored unless it
    /// parses to a finite number.
    pub min_level: String,
}

impl FleetFilter {
    pub fn builder() -> FleetFilterBuilder {
        FleetFilterBuilder::new()
    }

    pub fn is_neutral(&self) -> bool {
        self.search.trim().is_empty()
            && self.status == StatusFilter::All
            && self.day == TagFilter::All
            && self.sense == TagFilter::All
            && self.min_level_value().is_none()
    }

    pub fn min_level_value(&self) -> Option<f64> {
        let raw = self.min_level.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    /// Keep the devices matching every predicate, preserving input order.
    pub fn apply<'a>(&self, devices: impl IntoIterator<Item = &'a Device>) -> Vec<&'a Device> {
        let needle = self.search.trim().to_lowercase();
        let min_level = self.min_level_value();

        devices
            .into_iter()
            .filter(|device| self.matches_prepared(device, &needle, min_level))
            .collect()
    }

    fn matches_prepared(&self, device: &Device, needle: &str, min_level: Option<f64>) -> bool {
        self.matches_search(device, needle)
            && self.status.matches(device.status)
            && self.day.matches(device.day.as_deref())
            && self.sense.matches(device.sense.as_deref())
            && min_level.is_none_or(|min| f64::from(device.tank_volume) >= min)
    }

    fn matches_search(&self, device: &Device, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        [
            Some(device.serial_number.as_str()),
            Some(device.phone_number.as_str()),
            device.day.as_deref(),
            device.sense.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Default)]
pub struct FleetFilterBuilder {
    filter: FleetFilter,
}

impl FleetFilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search<S>(mut self, search: S) -> Self
    where
        S: Into<String>,
    {
        self.filter.search = search.into();
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.filter.status = status;
        self
    }

    pub fn day(mut self, day: &str) -> Self {
        self.filter.day = TagFilter::parse(day);
        self
    }

    pub fn sense(mut self, sense: &str) -> Self {
        self.filter.sense = TagFilter::parse(sense);
        self
    }

    pub fn min_level<S>(mut self, min_level: S) -> Self
    where
        S: Into<String>,
    {
        self.filter.min_level = min_level.into();
        self
    }

    pub fn build(self) -> FleetFilter {
        self.filter
    }
}
