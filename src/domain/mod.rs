// Domain layer - Fleet records and the pure view-model derivations
pub mod device;
pub mod error;
pub mod filter;
pub mod history;
pub mod location;
pub mod map;
pub mod percentage;
pub mod snapshot;
pub mod sort;
pub mod stats;
pub mod view;
