// Fleet sort criteria
use std::cmp::Ordering;
use std::str::FromStr;

use super::device::Device;
use super::error::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    SerialNumber,
    PhoneNumber,
    BatteryAmount,
    TankVolume,
    CreationDatetime,
    DeviceStatus,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::SerialNumber => "serialNumber",
            SortKey::PhoneNumber => "phoneNumber",
            SortKey::BatteryAmount => "batteryAmount",
            SortKey::TankVolume => "tankVolume",
            SortKey::CreationDatetime => "creationDatetime",
            SortKey::DeviceStatus => "deviceStatus",
        }
    }
}

impl FromStr for SortKey {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serialNumber" => Ok(SortKey::SerialNumber),
            "phoneNumber" => Ok(SortKey::PhoneNumber),
            "batteryAmount" => Ok(SortKey::BatteryAmount),
            "tankVolume" => Ok(SortKey::TankVolume),
            "creationDatetime" => Ok(SortKey::CreationDatetime),
            "deviceStatus" => Ok(SortKey::DeviceStatus),
            other => Err(ConsoleError::UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriteria {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortCriteria {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Flip the direction when `key` is already active, otherwise start
    /// ascending on `key`.
    pub fn toggle(current: Option<SortCriteria>, key: SortKey) -> SortCriteria {
        match current {
            Some(active) if active.key == key => SortCriteria {
                key,
                direction: active.direction.flip(),
            },
            _ => SortCriteria::ascending(key),
        }
    }

    pub fn compare(&self, a: &Device, b: &Device) -> Ordering {
        let ordering = match self.key {
            SortKey::SerialNumber => a.serial_number.cmp(&b.serial_number),
            SortKey::PhoneNumber => a.phone_number.cmp(&b.phone_number),
            SortKey::BatteryAmount => a.battery_amount.total_cmp(&b.battery_amount),
            SortKey::TankVolume => a.tank_volume.cmp(&b.tank_volume),
            // unparsable timestamps order before every real instant
            SortKey::CreationDatetime => a.created_at.cmp(&b.created_at),
            SortKey::DeviceStatus => a.status.code().cmp(&b.status.code()),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Stable sort; `None` keeps the input order.
pub fn sort_devices(devices: &mut [&Device], sort: Option<SortCriteria>) {
    if let Some(criteria) = sort {
        devices.sort_by(|a, b| criteria.compare(a, b));
    }
}
