// Fleet snapshot store
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::device::{Device, DeviceId};

/// The most recently fetched fleet. Entries are unique by id.
#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    devices: Vec<Device>,
    fetched_at: Option<DateTime<Utc>>,
}

impl FleetSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole fleet. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, devices: Vec<Device>) {
        let mut seen = HashSet::with_capacity(devices.len());
        let mut unique = Vec::with_capacity(devices.len());

        for device in devices {
            if seen.insert(device.id) {
                unique.push(device);
            } else {
                tracing::warn!("Dropping duplicate device id {} from snapshot", device.id);
            }
        }

        self.devices = unique;
        self.fetched_at = Some(Utc::now());
    }

    pub fn remove_by_id(&mut self, id: DeviceId) -> Option<Device> {
        let index = self.devices.iter().position(|d| d.id == id)?;
        Some(self.devices.remove(index))
    }

    pub fn clear(&mut self) {
        self.devices.clear();
        self.fetched_at = None;
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Distinct non-empty `day` tags in first-seen order.
    pub fn distinct_days(&self) -> Vec<String> {
        distinct(self.devices.iter().map(|d| d.day.as_deref()))
    }

    /// Distinct non-empty `sense` tags in first-seen order.
    pub fn distinct_senses(&self) -> Vec<String> {
        distinct(self.devices.iter().map(|d| d.sense.as_deref()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}
