// Presentation layer - JSON API over the console view-models
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod responses;
