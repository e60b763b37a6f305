// Detail history pagination
//
// The paginator never fetches on its own. Every cursor change hands back a
// `PageRequest`; the caller performs the fetch and passes the outcome to
// `commit`, which only accepts the most recently issued request.
use super::device::{DeviceDetail, DeviceId};
use super::error::ConsoleError;

pub const DEFAULT_PAGE_SIZES: [u32; 3] = [5, 10, 20];
pub const DEFAULT_PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub token: u64,
    pub device_id: DeviceId,
    pub page_size: u32,
    pub page_number: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryState {
    Idle,
    Loading,
    Loaded {
        records: Vec<DeviceDetail>,
        is_last_page: bool,
    },
}

#[derive(Debug, Clone)]
pub struct HistoryPaginator {
    page_sizes: Vec<u32>,
    page_size: u32,
    page_number: u32,
    selected: Option<DeviceId>,
    latest_token: u64,
    state: HistoryState,
}

impl HistoryPaginator {
    pub fn new(page_sizes: Vec<u32>, page_size: u32) -> Result<Self, ConsoleError> {
        if !page_sizes.contains(&page_size) {
            return Err(ConsoleError::InvalidPageSize {
                size: page_size,
                allowed: page_sizes,
            });
        }

        Ok(Self {
            page_sizes,
            page_size,
            page_number: 1,
            selected: None,
            latest_token: 0,
            state: HistoryState::Idle,
        })
    }

    /// Select a device: back to page 1, drop held records, request a fetch.
    pub fn select(&mut self, device_id: DeviceId) -> PageRequest {
        self.selected = Some(device_id);
        self.page_number = 1;
        self.issue(device_id)
    }

    /// Change the page size, keeping the page number. No request is issued
    /// when nothing is selected or the size is unchanged.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<Option<PageRequest>, ConsoleError> {
        if !self.page_sizes.contains(&page_size) {
            return Err(ConsoleError::InvalidPageSize {
                size: page_size,
                allowed: self.page_sizes.clone(),
            });
        }
        if page_size == self.page_size {
            return Ok(None);
        }

        self.page_size = page_size;
        Ok(self.selected.map(|id| self.issue(id)))
    }

    pub fn set_page_number(&mut self, page_number: u32) -> Result<Option<PageRequest>, ConsoleError> {
        if page_number == 0 {
            return Err(ConsoleError::InvalidPageNumber);
        }
        if page_number == self.page_number {
            return Ok(None);
        }

        self.page_number = page_number;
        Ok(self.selected.map(|id| self.issue(id)))
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        let id = self.selected?;
        self.page_number = self.page_number.saturating_add(1);
        Some(self.issue(id))
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        let id = self.selected?;
        if !self.can_go_previous() {
            return None;
        }
        self.page_number -= 1;
        Some(self.issue(id))
    }

    /// Re-request the current cursor.
    pub fn reload(&mut self) -> Option<PageRequest> {
        let id = self.selected?;
        Some(self.issue(id))
    }

    /// Deselect. Responses still in flight become stale.
    pub fn close(&mut self) {
        self.selected = None;
        self.page_number = 1;
        self.state = HistoryState::Idle;
    }

    /// Apply the records fetched for `request`. Returns `false` and leaves the
    /// state untouched when a newer request has been issued since, or the
    /// paginator was closed.
    pub fn commit(&mut self, request: &PageRequest, records: Vec<DeviceDetail>) -> bool {
        let current = request.token == self.latest_token
            && self.selected == Some(request.device_id)
            && self.state == HistoryState::Loading;
        if !current {
            return false;
        }

        let is_last_page = records.len() < request.page_size as usize;
        self.state = HistoryState::Loaded {
            records,
            is_last_page,
        };
        true
    }

    pub fn selected(&self) -> Option<DeviceId> {
        self.selected
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_sizes(&self) -> &[u32] {
        &self.page_sizes
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn records(&self) -> &[DeviceDetail] {
        match &self.state {
            HistoryState::Loaded { records, .. } => records,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == HistoryState::Loading
    }

    pub fn is_last_page(&self) -> bool {
        matches!(
            self.state,
            HistoryState::Loaded {
                is_last_page: true,
                ..
            }
        )
    }

    pub fn can_go_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.selected.is_some()
    }

    fn issue(&mut self, device_id: DeviceId) -> PageRequest {
        self.latest_token += 1;
        self.state = HistoryState::Loading;

        let request = PageRequest {
            token: self.latest_token,
            device_id,
            page_size: self.page_size,
            page_number: self.page_number,
        };
        tracing::debug!(
            "Issued history request {} for device {} (size {}, page {})",
            request.token,
            device_id,
            request.page_size,
            request.page_number
        );
        request
    }
}

impl Default for HistoryPaginator {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 1,
            selected: None,
            latest_token: 0,
            state: HistoryState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::DeviceStatus;

    fn details(count: usize) -> Vec<DeviceDetail> {
        (0..count)
            .map(|i| {
                DeviceDetail::new(
                    i as i64,
                    4.0,
                    DeviceStatus::Connected,
                    50,
                    "2024-05-01T10:00:00".to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_unknown_default() {
        assert!(HistoryPaginator::new(vec![5, 10], 10).is_ok());
        assert_eq!(
            HistoryPaginator::new(vec![5, 10], 7).unwrap_err(),
            ConsoleError::InvalidPageSize {
                size: 7,
                allowed: vec![5, 10]
            }
        );
    }

    #[test]
    fn test_select_starts_loading_page_one() {
        let mut paginator = HistoryPaginator::default();
        assert_eq!(paginator.state(), &HistoryState::Idle);

        let request = paginator.select(42);
        assert_eq!(request.device_id, 42);
        assert_eq!(request.page_number, 1);
        assert_eq!(request.page_size, 5);
        assert!(paginator.is_loading());
        assert!(paginator.records().is_empty());

        assert!(paginator.commit(&request, details(5)));
        assert_eq!(paginator.records().len(), 5);
        assert!(!paginator.is_last_page());
    }

    #[test]
    fn test_short_page_is_last_page() {
        let mut paginator = HistoryPaginator::default();
        let first = paginator.select(1);
        assert!(paginator.commit(&first, details(5)));

        let second = paginator.next_page().unwrap();
        assert_eq!(second.page_number, 2);
        assert_eq!(second.page_size, 5);
        assert!(paginator.commit(&second, details(2)));
        assert!(paginator.is_last_page());
        assert!(paginator.can_go_next());
    }

    #[test]
    fn test_failed_fetch_resolves_to_empty_page() {
        let mut paginator = HistoryPaginator::default();
        let request = paginator.select(1);
        assert!(paginator.commit(&request, Vec::new()));

        assert!(!paginator.is_loading());
        assert!(paginator.records().is_empty());
        assert!(paginator.is_last_page());
    }

    #[test]
    fn test_reselect_resets_page_number_only() {
        let mut paginator = HistoryPaginator::default();
        paginator.select(1);
        paginator.set_page_size(10).unwrap();
        paginator.set_page_number(4).unwrap();

        let request = paginator.select(2);
        assert_eq!(request.page_number, 1);
        assert_eq!(request.page_size, 10);
    }

    #[test]
    fn test_page_size_change_keeps_page_number() {
        let mut paginator = HistoryPaginator::default();
        let first = paginator.select(1);
        paginator.commit(&first, details(5));
        paginator.set_page_number(3).unwrap();

        let request = paginator.set_page_size(20).unwrap().unwrap();
        assert_eq!(request.page_number, 3);
        assert_eq!(request.page_size, 20);
        assert!(paginator.records().is_empty());

        assert_eq!(paginator.set_page_size(20), Ok(None));
        assert!(matches!(
            paginator.set_page_size(7),
            Err(ConsoleError::InvalidPageSize { size: 7, .. })
        ));
    }

    #[test]
    fn test_previous_is_disabled_on_first_page() {
        let mut paginator = HistoryPaginator::default();
        paginator.select(1);
        assert!(!paginator.can_go_previous());
        assert_eq!(paginator.previous_page(), None);

        paginator.next_page();
        assert!(paginator.can_go_previous());
        let request = paginator.previous_page().unwrap();
        assert_eq!(request.page_number, 1);
    }

    #[test]
    fn test_page_number_validation() {
        let mut paginator = HistoryPaginator::default();
        assert_eq!(paginator.set_page_number(0), Err(ConsoleError::InvalidPageNumber));
        // nothing selected: cursor moves, nothing is fetched
        assert_eq!(paginator.set_page_number(2), Ok(None));
        assert_eq!(paginator.page_number(), 2);
        assert_eq!(paginator.next_page(), None);
    }

    #[test]
    fn test_stale_response_for_previous_selection_is_ignored() {
        let mut paginator = HistoryPaginator::default();
        let for_a = paginator.select(1);
        let for_b = paginator.select(2);

        assert!(!paginator.commit(&for_a, details(5)));
        assert!(paginator.is_loading());
        assert_eq!(paginator.selected(), Some(2));

        assert!(paginator.commit(&for_b, details(3)));
        assert_eq!(paginator.records().len(), 3);

        // arriving after B was committed changes nothing either
        assert!(!paginator.commit(&for_a, details(5)));
        assert_eq!(paginator.records().len(), 3);
    }

    #[test]
    fn test_stale_response_for_same_device_is_ignored() {
        let mut paginator = HistoryPaginator::default();
        let page_one = paginator.select(1);
        let page_two = paginator.next_page().unwrap();

        assert!(!paginator.commit(&page_one, details(5)));
        assert!(paginator.commit(&page_two, details(1)));
        assert_eq!(paginator.page_number(), 2);
    }

    #[test]
    fn test_close_discards_in_flight_response() {
        let mut paginator = HistoryPaginator::default();
        let request = paginator.select(1);
        paginator.close();

        assert!(!paginator.commit(&request, details(5)));
        assert_eq!(paginator.state(), &HistoryState::Idle);
        assert_eq!(paginator.selected(), None);
    }

    #[test]
    fn test_reload_reissues_current_cursor() {
        let mut paginator = HistoryPaginator::default();
        assert_eq!(paginator.reload(), None);

        let first = paginator.select(9);
        let again = paginator.reload().unwrap();
        assert_eq!(again.device_id, 9);
        assert_eq!(again.page_number, 1);
        assert!(again.token > first.token);
    }
}
