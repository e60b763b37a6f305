// JSON request and response bodies
use crate::application::console_service::{DeleteOutcome, FilterOptions, FleetView, LoadState};
use crate::domain::device::{Device, DeviceDetail, DeviceId, DeviceStatus};
use crate::domain::error::ConsoleError;
use crate::domain::filter::{FleetFilter, StatusFilter};
use crate::domain::history::{HistoryPaginator, HistoryState};
use crate::domain::location::Coordinate;
use crate::domain::map::MapProjection;
use crate::domain::percentage::{BatteryLevel, Calibration, TankLevel};
use crate::domain::sort::SortCriteria;
use crate::domain::stats::FleetSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}

/// Filter criteria as sent by the front end. Empty strings mean "any".
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterBody {
    pub search: String,
    pub status: String,
    pub day: String,
    pub sense: String,
    pub min_level: String,
    pub neutral: bool,
}

impl FilterBody {
    pub fn into_filter(self) -> Result<FleetFilter, ConsoleError> {
        let status: StatusFilter = self.status.parse()?;
        Ok(FleetFilter::builder()
            .search(self.search)
            .status(status)
            .day(&self.day)
            .sense(&self.sense)
            .min_level(self.min_level)
            .build())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterView {
    pub search: String,
    pub status: &'static str,
    pub day: String,
    pub sense: String,
    pub min_level: String,
    pub neutral: bool,
}

impl From<&FleetFilter> for FilterView {
    fn from(filter: &FleetFilter) -> Self {
        Self {
            search: filter.search.clone(),
            status: filter.status.as_str(),
            day: filter.day.as_str().to_string(),
            sense: filter.sense.as_str().to_string(),
            min_level: filter.min_level.clone(),
            neutral: filter.is_neutral(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SortView {
    pub key: &'static str,
    pub direction: &'static str,
}

impl From<SortCriteria> for SortView {
    fn from(sort: SortCriteria) -> Self {
        Self {
            key: sort.key.as_str(),
            direction: sort.direction.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CoordinateView {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinate> for CoordinateView {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            lat: coordinate.lat,
            lng: coordinate.lng,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub id: DeviceId,
    pub serial_number: String,
    pub phone_number: String,
    pub status: i32,
    pub status_label: &'static str,
    pub battery_amount: f64,
    pub battery_percentage: u8,
    pub battery_level: &'static str,
    pub tank_volume: i32,
    pub tank_level: &'static str,
    pub creation_datetime: String,
    pub location: Option<String>,
    pub coordinate: Option<CoordinateView>,
    pub day: Option<String>,
    pub sense: Option<String>,
}

impl DeviceView {
    pub fn new(device: &Device, calibration: Calibration) -> Self {
        let battery_percentage = calibration.normalize(device.battery_amount);
        Self {
            id: device.id,
            serial_number: device.serial_number.clone(),
            phone_number: device.phone_number.clone(),
            status: device.status.code(),
            status_label: device.status.label(),
            // serde_json rejects NaN, so unreadable voltages go out as 0
            battery_amount: finite_or_zero(device.battery_amount),
            battery_percentage,
            battery_level: BatteryLevel::from_percentage(f64::from(battery_percentage)).as_str(),
            tank_volume: device.tank_volume,
            tank_level: TankLevel::from_volume(device.tank_volume).as_str(),
            creation_datetime: device.creation_datetime.clone(),
            location: device.location.clone(),
            coordinate: device.coordinate().map(CoordinateView::from),
            day: device.day.clone(),
            sense: device.sense.clone(),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn load_state_str(state: LoadState) -> &'static str {
    match state {
        LoadState::Idle => "idle",
        LoadState::Loading => "loading",
        LoadState::Ready => "ready",
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetViewResponse {
    pub devices: Vec<DeviceView>,
    pub result_count: usize,
    pub total: usize,
    pub fetched_at: Option<String>,
    pub load_state: &'static str,
    pub filter: FilterView,
    pub sort: Option<SortView>,
}

impl FleetViewResponse {
    pub fn new(view: &FleetView, calibration: Calibration) -> Self {
        Self {
            devices: view
                .devices
                .iter()
                .map(|d| DeviceView::new(d, calibration))
                .collect(),
            result_count: view.devices.len(),
            total: view.total,
            fetched_at: view.fetched_at.map(|ts| ts.to_rfc3339()),
            load_state: load_state_str(view.load_state),
            filter: FilterView::from(&view.filter),
            sort: view.sort.map(SortView::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub days: Vec<String>,
    pub senses: Vec<String>,
}

impl From<FilterOptions> for OptionsResponse {
    fn from(options: FilterOptions) -> Self {
        Self {
            days: options.days,
            senses: options.senses,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: usize,
    pub connected: usize,
    pub sleeping: usize,
    pub offline: usize,
    pub avg_battery_pct: u8,
    pub avg_tank_pct: i64,
}

impl From<FleetSummary> for StatsResponse {
    fn from(summary: FleetSummary) -> Self {
        Self {
            total: summary.total,
            connected: summary.connected,
            sleeping: summary.sleeping,
            offline: summary.offline,
            avg_battery_pct: summary.avg_battery_pct,
            avg_tank_pct: summary.avg_tank_pct,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkerView {
    pub device: DeviceView,
    pub coordinate: CoordinateView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    pub markers: Vec<MarkerView>,
    pub center: CoordinateView,
    pub has_markers: bool,
}

impl MapResponse {
    pub fn new(projection: &MapProjection, calibration: Calibration) -> Self {
        Self {
            markers: projection
                .markers
                .iter()
                .map(|marker| MarkerView {
                    device: DeviceView::new(&marker.device, calibration),
                    coordinate: marker.coordinate.into(),
                })
                .collect(),
            center: projection.center.into(),
            has_markers: projection.has_markers(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub device_id: DeviceId,
    pub coordinate: Option<CoordinateView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCandidateResponse {
    pub device_id: Option<DeviceId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub outcome: &'static str,
    pub device_id: Option<DeviceId>,
}

impl From<DeleteOutcome> for DeleteResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        let (outcome, device_id) = match outcome {
            DeleteOutcome::NoCandidate => ("noCandidate", None),
            DeleteOutcome::Deleted(id) => ("deleted", Some(id)),
            DeleteOutcome::Failed(id) => ("failed", Some(id)),
        };
        Self { outcome, device_id }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub id: i64,
    pub battery_amount: f64,
    pub battery_percentage: u8,
    pub status: i32,
    pub status_label: &'static str,
    pub tank_volume: i32,
    pub creation_datetime: String,
}

impl DetailView {
    fn new(detail: &DeviceDetail, calibration: Calibration) -> Self {
        let status: DeviceStatus = detail.status;
        Self {
            id: detail.id,
            battery_amount: finite_or_zero(detail.battery_amount),
            battery_percentage: calibration.normalize(detail.battery_amount),
            status: status.code(),
            status_label: status.label(),
            tank_volume: detail.tank_volume,
            creation_datetime: detail.creation_datetime.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub selected: Option<DeviceId>,
    pub page_size: u32,
    pub page_number: u32,
    pub page_sizes: Vec<u32>,
    pub state: &'static str,
    pub loading: bool,
    pub records: Vec<DetailView>,
    pub is_last_page: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl HistoryResponse {
    pub fn new(history: &HistoryPaginator, calibration: Calibration) -> Self {
        let state = match history.state() {
            HistoryState::Idle => "idle",
            HistoryState::Loading => "loading",
            HistoryState::Loaded { .. } => "loaded",
        };

        Self {
            selected: history.selected(),
            page_size: history.page_size(),
            page_number: history.page_number(),
            page_sizes: history.page_sizes().to_vec(),
            state,
            loading: history.is_loading(),
            records: history
                .records()
                .iter()
                .map(|d| DetailView::new(d, calibration))
                .collect(),
            is_last_page: history.is_last_page(),
            can_go_previous: history.can_go_previous(),
            can_go_next: history.can_go_next(),
        }
    }
}
