pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;

// Domain data shapes shared across layers
pub mod domain;

// Load, select and shape sightings
pub mod pipeline;

// Application use case and its ports, plus the adapters that implement them
pub mod app;
pub mod infra;
