//! Palette ColourLovers - top palette fetch pipeline
//!
//! Walks the ColourLovers palette listing page by page, keeps palettes
//! whose color count falls in a configured range, and writes them as one
//! JSON dataset.
//!
//! # Example
//!
//! ```ignore
//! use palette_colourlovers::{Config, run};
//! use palette_core::ProgressContext;
//!
//! let config = Config {
//!     total: 200,
//!     ..Default::default()
//! };
//!
//! let summary = run(&config, &ProgressContext::new())?;
//! println!("{}", summary.message());
//! ```

pub mod api;
pub mod config;
pub mod filter;
pub mod pipeline;
pub mod runner;
pub mod schema;

// Re-exports
pub use api::{ColourLoversClient, PageSource};
pub use config::Config;
pub use filter::ColorCountRange;
pub use pipeline::{PageError, Paginator};
pub use runner::{Summary, run, run_with_source};
pub use schema::{PageRequest, Palette, RawRecord};
