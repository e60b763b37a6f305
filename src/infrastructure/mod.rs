// Infrastructure layer - External dependencies and adapters
pub mod backend_models;
pub mod config;
pub mod device_mapper;
pub mod http_repository;
