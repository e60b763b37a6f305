// Map projection of the fleet view
use super::device::Device;
use super::location::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub device: Device,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapProjection {
    pub markers: Vec<MapMarker>,
    pub center: Coordinate,
}

impl MapProjection {
    pub fn has_markers(&self) -> bool {
        !self.markers.is_empty()
    }
}

/// Pair every locatable device of the view with its coordinate. The map is
/// centered on the first marker, or on `fallback_center` when nothing in the
/// view has a location.
pub fn project(view: &[&Device], fallback_center: Coordinate) -> MapProjection {
    let markers: Vec<MapMarker> = view
        .iter()
        .filter_map(|device| {
            device.coordinate().map(|coordinate| MapMarker {
                device: (*device).clone(),
                coordinate,
            })
        })
        .collect();

    let center = markers
        .first()
        .map(|marker| marker.coordinate)
        .unwrap_or(fallback_center);

    MapProjection { markers, center }
}
