// Sensor reading normalization

/// Voltage bounds mapping a raw battery reading onto 0-100%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub low: f64,
    pub high: f64,
}

impl Calibration {
    pub const CURRENT: Calibration = Calibration { low: 3.5, high: 4.2 };

    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn normalize(&self, raw: f64) -> u8 {
        normalize(raw, self.low, self.high)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration::CURRENT
    }
}

/// Linear map of `raw` into `[0, 100]`. Non-finite results clamp to 0.
pub fn percentage(raw: f64, low: f64, high: f64) -> f64 {
    let value = (raw - low) / (high - low) * 100.0;
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub fn normalize(raw: f64, low: f64, high: f64) -> u8 {
    percentage(raw, low, high).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryLevel {
    Good,
    Low,
    Critical,
}

impl BatteryLevel {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 80.0 {
            BatteryLevel::Good
        } else if pct >= 25.0 {
            BatteryLevel::Low
        } else {
            BatteryLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryLevel::Good => "good",
            BatteryLevel::Low => "low",
            BatteryLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankLevel {
    Full,
    Half,
    Low,
}

impl TankLevel {
    pub fn from_volume(volume: i32) -> Self {
        if volume >= 75 {
            TankLevel::Full
        } else if volume >= 40 {
            TankLevel::Half
        } else {
            TankLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TankLevel::Full => "full",
            TankLevel::Half => "half",
            TankLevel::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bounds() {
        assert_eq!(normalize(3.5, 3.5, 4.2), 0);
        assert_eq!(normalize(4.2, 3.5, 4.2), 100);
        assert_eq!(normalize(3.85, 3.5, 4.2), 50);
        assert_eq!(normalize(5.0, 3.5, 4.2), 100);
        assert_eq!(normalize(2.0, 3.5, 4.2), 0);
    }

    #[test]
    fn test_calibration_curves_differ() {
        assert_eq!(Calibration::CURRENT.normalize(3.9), 57);
        assert_eq!(Calibration::new(3.9, 4.2).normalize(3.9), 0);
        assert_eq!(Calibration::new(3.9, 4.2).normalize(4.05), 50);
    }

    #[test]
    fn test_non_finite_input_clamps_to_zero() {
        assert_eq!(normalize(f64::NAN, 3.5, 4.2), 0);
        assert_eq!(normalize(f64::INFINITY, 3.5, 4.2), 0);
        assert_eq!(normalize(f64::NEG_INFINITY, 3.5, 4.2), 0);
        // degenerate calibration divides by zero
        assert_eq!(normalize(4.0, 4.0, 4.0), 0);
    }

    #[test]
    fn test_level_tiers() {
        assert_eq!(BatteryLevel::from_percentage(80.0), BatteryLevel::Good);
        assert_eq!(BatteryLevel::from_percentage(79.9), BatteryLevel::Low);
        assert_eq!(BatteryLevel::from_percentage(25.0), BatteryLevel::Low);
        assert_eq!(BatteryLevel::from_percentage(10.0), BatteryLevel::Critical);

        assert_eq!(TankLevel::from_volume(75), TankLevel::Full);
        assert_eq!(TankLevel::from_volume(40), TankLevel::Half);
        assert_eq!(TankLevel::from_volume(39), TankLevel::Low);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalize_stays_in_range(raw in any::<f64>(), low in -1000.0f64..1000.0, span in 0.001f64..1000.0) {
            let high = low + span;
            prop_assert!(normalize(raw, low, high) <= 100);
            let pct = percentage(raw, low, high);
            prop_assert!((0.0..=100.0).contains(&pct));
        }

        #[test]
        fn normalize_hits_both_ends(low in -1000.0f64..1000.0, span in 0.001f64..1000.0) {
            let high = low + span;
            prop_assert_eq!(normalize(low, low, high), 0);
            prop_assert_eq!(normalize(high, low, high), 100);
        }
    }
}
