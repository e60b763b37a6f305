// Mapper from backend wire models to domain records
use crate::domain::device::{Device, DeviceDetail, DeviceStatus};
use crate::infrastructure::backend_models::{DeviceDetailDto, DeviceDto};

pub fn device_from_dto(dto: DeviceDto) -> Device {
    Device::new(
        dto.id,
        dto.serial_number.unwrap_or_default(),
        dto.phone_number.unwrap_or_default(),
        DeviceStatus::from_code(dto.device_status),
        // missing readings normalize to 0%
        dto.battery_amount.unwrap_or(f64::NAN),
        dto.tank_volume,
        dto.creation_datetime,
    )
    .with_location(non_empty(dto.location))
    .with_day(non_empty(dto.day))
    .with_sense(non_empty(dto.sense))
}

pub fn detail_from_dto(dto: DeviceDetailDto) -> DeviceDetail {
    DeviceDetail::new(
        dto.id,
        dto.battery_amount.unwrap_or(f64::NAN),
        DeviceStatus::from_code(dto.device_status),
        dto.tank_volume,
        dto.creation_datetime,
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::Coordinate;
    use crate::domain::percentage::Calibration;

    fn dto() -> DeviceDto {
        DeviceDto {
            id: 5,
            serial_number: Some("SN-5".to_string()),
            phone_number: None,
            device_status: 0,
            battery_amount: None,
            tank_volume: 30,
            creation_datetime: "2024-05-01T08:30:00Z".to_string(),
            location: Some("35.7, 51.4".to_string()),
            sense: Some("   ".to_string()),
            day: Some("sun".to_string()),
        }
    }

    #[test]
    fn test_device_from_dto() {
        let device = device_from_dto(dto());

        assert_eq!(device.id, 5);
        assert_eq!(device.phone_number, "");
        assert_eq!(device.status, DeviceStatus::Disconnected(0));
        assert_eq!(Calibration::CURRENT.normalize(device.battery_amount), 0);
        assert!(device.created_at.is_some());
        assert_eq!(device.coordinate(), Some(Coordinate::new(35.7, 51.4)));
        assert_eq!(device.sense, None);
        assert_eq!(device.day.as_deref(), Some("sun"));
    }

    #[test]
    fn test_detail_from_dto() {
        let detail = detail_from_dto(DeviceDetailDto {
            id: 9,
            battery_amount: Some(4.2),
            device_status: 2,
            tank_volume: 80,
            creation_datetime: "not a date".to_string(),
        });

        assert_eq!(detail.status, DeviceStatus::Sleeping);
        assert_eq!(detail.battery_amount, 4.2);
        assert_eq!(detail.created_at, None);
    }
}
