// Filtered and sorted fleet view
use super::device::Device;
use super::filter::FleetFilter;
use super::sort::{sort_devices, SortCriteria};

/// Derive the operator's view of the fleet. Pure; recomputed on every call.
pub fn derive_view<'a>(
    devices: &'a [Device],
    filter: &FleetFilter,
    sort: Option<SortCriteria>,
) -> Vec<&'a Device> {
    let mut view = filter.apply(devices);
    sort_devices(&mut view, sort);

    tracing::debug!(
        "Derived fleet view: {} of {} devices",
        view.len(),
        devices.len()
    );

    view
}
