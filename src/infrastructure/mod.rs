//! Infrastructure Layer
//!
//! Cross-cutting concerns: logging setup and process lifecycle.

pub mod logging;
pub mod shutdown;

pub use logging::init_logging;
pub use shutdown::shutdown_signal;
