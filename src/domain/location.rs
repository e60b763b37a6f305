// Geolocation parsing

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Parse a free-text `"lat,lng"` field.
///
/// Returns `None` unless the text holds exactly two comma separated parts that
/// both parse to finite numbers. A missing location is not an error.
pub fn parse_location(raw: Option<&str>) -> Option<Coordinate> {
    let mut parts = raw?.split(',');
    let lat = parse_part(parts.next()?)?;
    let lng = parse_part(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinate::new(lat, lng))
}

fn parse_part(part: &str) -> Option<f64> {
    part.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
