//! Domain Layer
//!
//! Pure detection and validation logic with no I/O.

pub mod entities;
pub mod headers;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{CounterConfig, Detection, RedirectConfig, Settings, VpnDetection};
pub use headers::HeaderIndex;
pub use value_objects::{CountryCode, DetectionStage, Diagnostics, Environment};
