// Console service - Owns the fleet engine state and issues explicit reloads
use crate::application::fleet_repository::FleetRepository;
use crate::application::token_provider::TokenProvider;
use crate::domain::device::{Device, DeviceId};
use crate::domain::error::ConsoleError;
use crate::domain::filter::FleetFilter;
use crate::domain::history::{HistoryPaginator, PageRequest};
use crate::domain::location::Coordinate;
use crate::domain::map::{project, MapProjection};
use crate::domain::percentage::Calibration;
use crate::domain::snapshot::FleetSnapshot;
use crate::domain::sort::{SortCriteria, SortKey};
use crate::domain::stats::{summarize, FleetSummary};
use crate::domain::view::derive_view;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    pub calibration: Calibration,
    pub default_center: Coordinate,
    pub page_sizes: Vec<u32>,
    pub default_page_size: u32,
}

#[derive(Debug, Clone)]
pub struct FleetView {
    pub devices: Vec<Device>,
    pub total: usize,
    pub fetched_at: Option<DateTime<Utc>>,
    pub load_state: LoadState,
    pub filter: FleetFilter,
    pub sort: Option<SortCriteria>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub days: Vec<String>,
    pub senses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    NoCandidate,
    Deleted(DeviceId),
    Failed(DeviceId),
}

struct ConsoleState {
    snapshot: FleetSnapshot,
    load_state: LoadState,
    fleet_generation: u64,
    filter: FleetFilter,
    sort: Option<SortCriteria>,
    delete_candidate: Option<DeviceId>,
    history: HistoryPaginator,
}

#[derive(Clone)]
pub struct ConsoleService {
    repository: Arc<dyn FleetRepository>,
    tokens: Arc<dyn TokenProvider>,
    settings: ConsoleSettings,
    state: Arc<RwLock<ConsoleState>>,
}

impl ConsoleService {
    pub fn new(
        repository: Arc<dyn FleetRepository>,
        tokens: Arc<dyn TokenProvider>,
        settings: ConsoleSettings,
    ) -> Result<Self, ConsoleError> {
        let history = HistoryPaginator::new(settings.page_sizes.clone(), settings.default_page_size)?;
        let state = ConsoleState {
            snapshot: FleetSnapshot::new(),
            load_state: LoadState::Idle,
            fleet_generation: 0,
            filter: FleetFilter::default(),
            sort: None,
            delete_candidate: None,
            history,
        };

        Ok(Self {
            repository,
            tokens,
            settings,
            state: Arc::new(RwLock::new(state)),
        })
    }

    pub fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.token().is_some()
    }

    fn session_token(&self) -> Result<String, ConsoleError> {
        self.tokens.token().ok_or(ConsoleError::NotAuthenticated)
    }

    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<()> {
        let token = self.repository.login(username, password).await?;
        self.tokens.store(token);
        tracing::info!("Operator {} logged in", username);
        Ok(())
    }

    /// Drop the session token and every piece of engine state.
    pub async fn logout(&self) {
        self.tokens.clear();

        let mut state = self.state.write().await;
        state.snapshot.clear();
        state.load_state = LoadState::Idle;
        state.fleet_generation += 1;
        state.filter = FleetFilter::default();
        state.sort = None;
        state.delete_candidate = None;
        state.history.close();
        tracing::info!("Operator logged out");
    }

    /// Refetch the fleet. A failed fetch keeps the previous snapshot.
    pub async fn reload_fleet(&self) -> Result<(), ConsoleError> {
        let token = self.session_token()?;
        let generation = {
            let mut state = self.state.write().await;
            state.fleet_generation += 1;
            state.load_state = LoadState::Loading;
            state.fleet_generation
        };

        let result = self.repository.fetch_fleet(&token).await;

        let mut state = self.state.write().await;
        if state.fleet_generation != generation {
            tracing::debug!("Discarding superseded fleet response {}", generation);
            return Ok(());
        }

        match result {
            Ok(devices) => {
                tracing::info!("Loaded fleet snapshot with {} devices", devices.len());
                state.snapshot.replace_all(devices);
            }
            Err(e) if state.snapshot.is_empty() => {
                tracing::warn!("Fleet fetch failed, no snapshot loaded yet: {:#}", e);
            }
            Err(e) => {
                tracing::warn!("Fleet fetch failed, keeping previous snapshot: {:#}", e);
            }
        }
        state.load_state = LoadState::Ready;
        Ok(())
    }

    pub async fn view(&self) -> FleetView {
        let state = self.state.read().await;
        let devices = derive_view(state.snapshot.devices(), &state.filter, state.sort)
            .into_iter()
            .cloned()
            .collect();

        FleetView {
            devices,
            total: state.snapshot.len(),
            fetched_at: state.snapshot.fetched_at(),
            load_state: state.load_state,
            filter: state.filter.clone(),
            sort: state.sort,
        }
    }

    pub async fn set_filter(&self, filter: FleetFilter) {
        self.state.write().await.filter = filter;
    }

    pub async fn toggle_sort(&self, key: SortKey) -> SortCriteria {
        let mut state = self.state.write().await;
        let sort = SortCriteria::toggle(state.sort, key);
        state.sort = Some(sort);
        sort
    }

    /// Neutral filter, snapshot order.
    pub async fn reset_criteria(&self) {
        let mut state = self.state.write().await;
        state.filter = FleetFilter::default();
        state.sort = None;
    }

    pub async fn filter_options(&self) -> FilterOptions {
        let state = self.state.read().await;
        FilterOptions {
            days: state.snapshot.distinct_days(),
            senses: state.snapshot.distinct_senses(),
        }
    }

    pub async fn summary(&self) -> FleetSummary {
        let state = self.state.read().await;
        summarize(state.snapshot.devices(), self.settings.calibration)
    }

    pub async fn map(&self) -> MapProjection {
        let state = self.state.read().await;
        let view = derive_view(state.snapshot.devices(), &state.filter, state.sort);
        project(&view, self.settings.default_center)
    }

    pub async fn locate(&self, device_id: DeviceId) -> Result<Option<Coordinate>, ConsoleError> {
        let state = self.state.read().await;
        let device = state
            .snapshot
            .get(device_id)
            .ok_or(ConsoleError::UnknownDevice(device_id))?;
        Ok(device.coordinate())
    }

    pub async fn stage_delete(&self, device_id: DeviceId) -> Result<(), ConsoleError> {
        let mut state = self.state.write().await;
        if state.snapshot.get(device_id).is_none() {
            return Err(ConsoleError::UnknownDevice(device_id));
        }
        state.delete_candidate = Some(device_id);
        Ok(())
    }

    pub async fn cancel_delete(&self) {
        self.state.write().await.delete_candidate = None;
    }

    pub async fn delete_candidate(&self) -> Option<DeviceId> {
        self.state.read().await.delete_candidate
    }

    /// Delete the staged candidate on the backend, then drop it from the
    /// snapshot without refetching. Without a candidate this is a no-op.
    /// A reload still in flight was issued before the delete, so its result
    /// is discarded.
    pub async fn confirm_delete(&self) -> Result<DeleteOutcome, ConsoleError> {
        let Some(device_id) = self.state.read().await.delete_candidate else {
            return Ok(DeleteOutcome::NoCandidate);
        };
        let token = self.session_token()?;

        match self.repository.delete_device(device_id, &token).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.snapshot.remove_by_id(device_id);
                state.fleet_generation += 1;
                if state.load_state == LoadState::Loading {
                    state.load_state = LoadState::Ready;
                }
                if state.delete_candidate == Some(device_id) {
                    state.delete_candidate = None;
                }
                if state.history.selected() == Some(device_id) {
                    state.history.close();
                }
                tracing::info!("Deleted device {}", device_id);
                Ok(DeleteOutcome::Deleted(device_id))
            }
            Err(e) => {
                tracing::warn!("Deleting device {} failed: {:#}", device_id, e);
                Ok(DeleteOutcome::Failed(device_id))
            }
        }
    }

    pub async fn history(&self) -> HistoryPaginator {
        self.state.read().await.history.clone()
    }

    pub async fn open_history(&self, device_id: DeviceId) -> Result<HistoryPaginator, ConsoleError> {
        let token = self.session_token()?;
        let request = self.state.write().await.history.select(device_id);
        Ok(self.fetch_history_page(request, &token).await)
    }

    pub async fn set_history_page_size(&self, page_size: u32) -> Result<HistoryPaginator, ConsoleError> {
        let token = self.session_token()?;
        let request = self.state.write().await.history.set_page_size(page_size)?;
        Ok(self.run_history_request(request, &token).await)
    }

    pub async fn set_history_page_number(
        &self,
        page_number: u32,
    ) -> Result<HistoryPaginator, ConsoleError> {
        let token = self.session_token()?;
        let request = self.state.write().await.history.set_page_number(page_number)?;
        Ok(self.run_history_request(request, &token).await)
    }

    pub async fn next_history_page(&self) -> Result<HistoryPaginator, ConsoleError> {
        let token = self.session_token()?;
        let request = self.state.write().await.history.next_page();
        Ok(self.run_history_request(request, &token).await)
    }

    pub async fn previous_history_page(&self) -> Result<HistoryPaginator, ConsoleError> {
        let token = self.session_token()?;
        let request = self.state.write().await.history.previous_page();
        Ok(self.run_history_request(request, &token).await)
    }

    pub async fn reload_history(&self) -> Result<HistoryPaginator, ConsoleError> {
        let token = self.session_token()?;
        let request = self.state.write().await.history.reload();
        Ok(self.run_history_request(request, &token).await)
    }

    pub async fn close_history(&self) {
        self.state.write().await.history.close();
    }

    async fn run_history_request(&self, request: Option<PageRequest>, token: &str) -> HistoryPaginator {
        match request {
            Some(request) => self.fetch_history_page(request, token).await,
            None => self.history().await,
        }
    }

    /// Fetch without holding the state lock, then commit only if the request
    /// is still the latest one.
    async fn fetch_history_page(&self, request: PageRequest, token: &str) -> HistoryPaginator {
        let records = match self
            .repository
            .fetch_device_history(request.device_id, token, request.page_size, request.page_number)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "History fetch for device {} failed, showing empty page: {:#}",
                    request.device_id,
                    e
                );
                Vec::new()
            }
        };

        let mut state = self.state.write().await;
        if !state.history.commit(&request, records) {
            tracing::debug!(
                "Discarded stale history response {} for device {}",
                request.token,
                request.device_id
            );
        }
        state.history.clone()
    }
}
