//! Fetch pipeline configuration

use std::path::PathBuf;

use crate::api::{DEFAULT_BASE_URL, MAX_PAGE_SIZE};
use crate::filter::ColorCountRange;
use crate::pipeline::{DEFAULT_TOTAL, Paginator};

/// Default dataset location, read by the UI at load time
pub const DEFAULT_OUTPUT: &str = "public/palettes.json";

/// Runtime configuration for one fetch run
#[derive(Debug, Clone)]
pub struct Config {
    /// Palette listing endpoint
    pub base_url: String,
    /// Records to walk before stopping
    pub total: usize,
    /// Upper bound on records per request
    pub max_page_size: usize,
    /// Admission criteria for records
    pub color_range: ColorCountRange,
    /// Dataset destination
    pub output: PathBuf,
    /// Indent the JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            total: DEFAULT_TOTAL,
            max_page_size: MAX_PAGE_SIZE,
            color_range: ColorCountRange::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            pretty: false,
        }
    }
}

impl Config {
    /// Reject settings that would make the walk meaningless
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.max_page_size > 0, "page size must be at least 1");
        anyhow::ensure!(
            self.max_page_size <= MAX_PAGE_SIZE,
            "page size {} exceeds the API limit of {MAX_PAGE_SIZE}",
            self.max_page_size
        );
        anyhow::ensure!(!self.base_url.is_empty(), "base URL must not be empty");
        anyhow::ensure!(
            self.output.file_name().is_some(),
            "output path must name a file: {}",
            self.output.display()
        );
        Ok(())
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.total)
            .with_max_page_size(self.max_page_size)
            .with_color_range(self.color_range.clone())
    }
}
