// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::console_service::ConsoleService;
use crate::application::token_provider::SessionTokenProvider;
use crate::infrastructure::config::load_console_config;
use crate::infrastructure::http_repository::HttpFleetRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fleet_console=info,tower_http=info")),
        )
        .init();

    let config = load_console_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpFleetRepository::new(
        &config.backend.base_url,
        config.backend.timeout(),
    )?);
    let tokens = Arc::new(SessionTokenProvider::new(config.auth.token.clone()));

    // Create console (application layer)
    let console = ConsoleService::new(repository, tokens, config.console_settings())
        .context("Invalid history paging configuration")?;

    if console.is_authenticated() {
        console.reload_fleet().await?;
    }

    let state = Arc::new(AppState { console });

    let router = Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/session/login", post(handlers::login))
        .route("/session/logout", post(handlers::logout))
        .route("/fleet", get(handlers::get_fleet))
        .route("/fleet/reload", post(handlers::reload_fleet))
        .route("/fleet/filter", put(handlers::set_filter))
        .route("/fleet/sort/:key", post(handlers::toggle_sort))
        .route("/fleet/reset", post(handlers::reset_criteria))
        .route("/fleet/options", get(handlers::filter_options))
        .route("/fleet/stats", get(handlers::fleet_stats))
        .route("/fleet/map", get(handlers::fleet_map))
        .route("/fleet/delete", get(handlers::get_delete_candidate))
        .route("/fleet/delete/confirm", post(handlers::confirm_delete))
        .route("/fleet/delete/cancel", post(handlers::cancel_delete))
        .route("/devices/:id/location", get(handlers::locate_device))
        .route("/devices/:id/delete", post(handlers::stage_delete))
        .route("/devices/:id/history", post(handlers::open_history))
        .route(
            "/history",
            get(handlers::get_history).delete(handlers::close_history),
        )
        .route("/history/page-size/:size", put(handlers::set_history_page_size))
        .route("/history/page/:page", put(handlers::set_history_page_number))
        .route("/history/reload", post(handlers::reload_history))
        .route("/history/next", post(handlers::next_history_page))
        .route("/history/previous", post(handlers::previous_history_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_addr))?;
    tracing::info!("Starting fleet-console on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
