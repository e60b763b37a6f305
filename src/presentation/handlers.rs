// HTTP request handlers
use crate::domain::device::DeviceId;
use crate::domain::sort::SortKey;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use crate::presentation::responses::{
    DeleteCandidateResponse, DeleteResponse, FilterBody, FleetViewResponse, HistoryResponse,
    LocationResponse, LoginBody, MapResponse, OptionsResponse, SessionResponse, SortView,
    StatsResponse,
};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> ApiResult<SessionResponse> {
    state
        .console
        .login(&body.username, &body.password)
        .await
        .map_err(|e| {
            tracing::warn!("Login failed for {}: {:#}", body.username, e);
            ApiError::Unauthorized(e.to_string())
        })?;

    // the first snapshot is loaded right after a successful login
    state.console.reload_fleet().await?;
    Ok(Json(SessionResponse {
        authenticated: true,
    }))
}

pub async fn logout(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    state.console.logout().await;
    Json(SessionResponse {
        authenticated: false,
    })
}

pub async fn reload_fleet(State(state): State<Arc<AppState>>) -> ApiResult<FleetViewResponse> {
    state.console.reload_fleet().await?;
    Ok(fleet_view(&state).await)
}

pub async fn get_fleet(State(state): State<Arc<AppState>>) -> Json<FleetViewResponse> {
    fleet_view(&state).await
}

pub async fn set_filter(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FilterBody>,
) -> ApiResult<FleetViewResponse> {
    let filter = body.into_filter()?;
    state.console.set_filter(filter).await;
    Ok(fleet_view(&state).await)
}

pub async fn toggle_sort(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<SortView> {
    let key: SortKey = key.parse()?;
    let sort = state.console.toggle_sort(key).await;
    Ok(Json(sort.into()))
}

pub async fn reset_criteria(State(state): State<Arc<AppState>>) -> Json<FleetViewResponse> {
    state.console.reset_criteria().await;
    fleet_view(&state).await
}

pub async fn filter_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    Json(state.console.filter_options().await.into())
}

pub async fn fleet_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(state.console.summary().await.into())
}

pub async fn fleet_map(State(state): State<Arc<AppState>>) -> Json<MapResponse> {
    let projection = state.console.map().await;
    Json(MapResponse::new(&projection, state.calibration()))
}

pub async fn locate_device(
    Path(id): Path<DeviceId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<LocationResponse> {
    let coordinate = state.console.locate(id).await?;
    Ok(Json(LocationResponse {
        device_id: id,
        coordinate: coordinate.map(Into::into),
    }))
}

pub async fn stage_delete(
    Path(id): Path<DeviceId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<DeleteCandidateResponse> {
    state.console.stage_delete(id).await?;
    Ok(Json(DeleteCandidateResponse { device_id: Some(id) }))
}

pub async fn get_delete_candidate(
    State(state): State<Arc<AppState>>,
) -> Json<DeleteCandidateResponse> {
    Json(DeleteCandidateResponse {
        device_id: state.console.delete_candidate().await,
    })
}

pub async fn confirm_delete(State(state): State<Arc<AppState>>) -> ApiResult<DeleteResponse> {
    let outcome = state.console.confirm_delete().await?;
    Ok(Json(outcome.into()))
}

pub async fn cancel_delete(State(state): State<Arc<AppState>>) -> Json<DeleteCandidateResponse> {
    state.console.cancel_delete().await;
    Json(DeleteCandidateResponse { device_id: None })
}

pub async fn open_history(
    Path(id): Path<DeviceId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<HistoryResponse> {
    let history = state.console.open_history(id).await?;
    Ok(Json(HistoryResponse::new(&history, state.calibration())))
}

pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let history = state.console.history().await;
    Json(HistoryResponse::new(&history, state.calibration()))
}

pub async fn set_history_page_size(
    Path(size): Path<u32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<HistoryResponse> {
    let history = state.console.set_history_page_size(size).await?;
    Ok(Json(HistoryResponse::new(&history, state.calibration())))
}

pub async fn set_history_page_number(
    Path(page): Path<u32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<HistoryResponse> {
    let history = state.console.set_history_page_number(page).await?;
    Ok(Json(HistoryResponse::new(&history, state.calibration())))
}

pub async fn next_history_page(State(state): State<Arc<AppState>>) -> ApiResult<HistoryResponse> {
    let history = state.console.next_history_page().await?;
    Ok(Json(HistoryResponse::new(&history, state.calibration())))
}

pub async fn previous_history_page(
    State(state): State<Arc<AppState>>,
) -> ApiResult<HistoryResponse> {
    let history = state.console.previous_history_page().await?;
    Ok(Json(HistoryResponse::new(&history, state.calibration())))
}

pub async fn reload_history(State(state): State<Arc<AppState>>) -> ApiResult<HistoryResponse> {
    let history = state.console.reload_history().await?;
    Ok(Json(HistoryResponse::new(&history, state.calibration())))
}

pub async fn close_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    state.console.close_history().await;
    get_history(State(state)).await
}

async fn fleet_view(state: &AppState) -> Json<FleetViewResponse> {
    let view = state.console.view().await;
    Json(FleetViewResponse::new(&view, state.calibration()))
}
