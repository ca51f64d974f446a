//! Application Layer
//!
//! Use cases that orchestrate the domain services.

mod geo_service;

pub use geo_service::{load_or_default, GeoService};
