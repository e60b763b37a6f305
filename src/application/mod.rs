// Application layer - Console workflows over the fleet backend
pub mod console_service;
pub mod fleet_repository;
#[cfg(test)]
pub mod mock_repository;
pub mod token_provider;
