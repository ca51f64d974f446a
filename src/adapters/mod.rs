//! Adapters Layer
//!
//! Inbound adapters drive the application (HTTP); outbound adapters
//! implement the domain ports (config sources).

pub mod inbound;
pub mod outbound;
