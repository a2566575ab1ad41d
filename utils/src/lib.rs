//! Shared utilities for the token lifecycle workspace.

pub mod logging;
pub mod time;

pub use logging::{init_tracing, init_tracing_with_format, LogFormat};
pub use time::format_duration;
