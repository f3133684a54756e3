//! Palette Core - Common infrastructure for the palette fetch pipeline
//!
//! HTTP access, the transport error type, atomic JSON output,
//! logging and progress display.

pub mod error;
pub mod http;
pub mod logging;
pub mod progress;
pub mod sink;

// Re-exports for convenience
pub use error::FetchError;
pub use http::{HttpConfig, get_text, http_client, set_http_config};
pub use logging::init_logging;
pub use progress::{ProgressContext, fmt_num};
pub use sink::JsonSink;
