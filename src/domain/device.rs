// Device domain model
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::location::{parse_location, Coordinate};

pub type DeviceId = i64;

/// Reported connectivity of a device. The backend sends `1` for connected,
/// `2` for sleeping and anything else for disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    Connected,
    Sleeping,
    Disconnected(i32),
}

impl DeviceStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => DeviceStatus::Connected,
            2 => DeviceStatus::Sleeping,
            other => DeviceStatus::Disconnected(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            DeviceStatus::Connected => 1,
            DeviceStatus::Sleeping => 2,
            DeviceStatus::Disconnected(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::Connected => "Connected",
            DeviceStatus::Sleeping => "Sleeping",
            DeviceStatus::Disconnected(_) => "Disconnected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: DeviceId,
    pub serial_number: String,
    pub phone_number: String,
    pub status: DeviceStatus,
    /// Raw battery voltage as reported by the sensor.
    pub battery_amount: f64,
    /// Tank fill level, already a 0-100 percentage.
    pub tank_volume: i32,
    pub creation_datetime: String,
    pub created_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub day: Option<String>,
    pub sense: Option<String>,
}

impl Device {
    pub fn new(
        id: DeviceId,
        serial_number: String,
        phone_number: String,
        status: DeviceStatus,
        battery_amount: f64,
        tank_volume: i32,
        creation_datetime: String,
    ) -> Self {
        let created_at = parse_timestamp(&creation_datetime);
        Self {
            id,
            serial_number,
            phone_number,
            status,
            battery_amount,
            tank_volume,
            creation_datetime,
            created_at,
            location: None,
            day: None,
            sense: None,
        }
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_day(mut self, day: Option<String>) -> Self {
        self.day = day;
        self
    }

    pub fn with_sense(mut self, sense: Option<String>) -> Self {
        self.sense = sense;
        self
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        parse_location(self.location.as_deref())
    }
}

/// One historical sample of a device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDetail {
    pub id: i64,
    pub battery_amount: f64,
    pub status: DeviceStatus,
    pub tank_volume: i32,
    pub creation_datetime: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl DeviceDetail {
    pub fn new(
        id: i64,
        battery_amount: f64,
        status: DeviceStatus,
        tank_volume: i32,
        creation_datetime: String,
    ) -> Self {
        let created_at = parse_timestamp(&creation_datetime);
        Self {
            id,
            battery_amount,
            status,
            tank_volume,
            creation_datetime,
            created_at,
        }
    }
}

/// Parse a backend timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_codes() {
        assert_eq!(DeviceStatus::from_code(1), DeviceStatus::Connected);
        assert_eq!(DeviceStatus::from_code(2), DeviceStatus::Sleeping);
        assert_eq!(DeviceStatus::from_code(0), DeviceStatus::Disconnected(0));
        assert_eq!(DeviceStatus::from_code(7).code(), 7);
        assert_eq!(DeviceStatus::from_code(3).label(), "Disconnected");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2024-05-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01 10:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-05-01"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
