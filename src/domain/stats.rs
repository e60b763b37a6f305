// Fleet-wide aggregate statistics
use super::device::{Device, DeviceStatus};
use super::percentage::{percentage, Calibration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FleetSummary {
    pub total: usize,
    pub connected: usize,
    pub sleeping: usize,
    pub offline: usize,
    pub avg_battery_pct: u8,
    pub avg_tank_pct: i64,
}

/// Summarize fleet health over the whole snapshot, independent of any filter.
pub fn summarize(devices: &[Device], calibration: Calibration) -> FleetSummary {
    let total = devices.len();
    if total == 0 {
        return FleetSummary::default();
    }

    let connected = devices
        .iter()
        .filter(|d| d.status == DeviceStatus::Connected)
        .count();
    let sleeping = devices
        .iter()
        .filter(|d| d.status == DeviceStatus::Sleeping)
        .count();

    let battery_sum: f64 = devices
        .iter()
        .map(|d| percentage(d.battery_amount, calibration.low, calibration.high))
        .sum();
    let tank_sum: f64 = devices.iter().map(|d| f64::from(d.tank_volume)).sum();

    FleetSummary {
        total,
        connected,
        sleeping,
        offline: total - connected - sleeping,
        avg_battery_pct: (battery_sum / total as f64).round() as u8,
        avg_tank_pct: (tank_sum / total as f64).round() as i64,
    }
}
