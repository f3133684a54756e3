//! Main execution logic: walk pages, then publish the dataset

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use palette_core::{JsonSink, ProgressContext, fmt_num};

use crate::api::{ColourLoversClient, PageSource};
use crate::config::Config;

/// Outcome of a successful run
#[derive(Debug)]
pub struct Summary {
    pub palettes: usize,
    pub pages: usize,
    pub bytes: u64,
    pub path: PathBuf,
    pub elapsed: Duration,
}

impl Summary {
    /// One-line operator report
    pub fn message(&self) -> String {
        format!(
            "Saved {} color palettes in {}",
            self.palettes,
            self.path.display()
        )
    }
}

/// Fetch from the configured ColourLovers endpoint
pub fn run(config: &Config, progress: &ProgressContext) -> anyhow::Result<Summary> {
    let client = ColourLoversClient::new(config.base_url.as_str());
    run_with_source(config, &client, progress)
}

/// Walk `source` and write the dataset.
///
/// All or nothing: if any page fails, the destination is not touched.
pub fn run_with_source(
    config: &Config,
    source: &impl PageSource,
    progress: &ProgressContext,
) -> anyhow::Result<Summary> {
    let start = Instant::now();
    config.validate()?;

    let paginator = config.paginator();
    let pages = paginator.page_count();
    log::info!(
        "Fetching {} records in {} pages of {} ({})",
        fmt_num(paginator.total() as u64),
        pages,
        paginator.page_size(),
        config.color_range
    );

    let pb = progress.page_bar("fetch", pages as u64);
    let result = paginator.collect(source, &pb);
    pb.finish_and_clear();
    let palettes = result.context("Failed to fetch palettes")?;

    log::info!(
        "Kept {} of up to {} records",
        fmt_num(palettes.len() as u64),
        fmt_num(paginator.total() as u64)
    );

    let sink = JsonSink::new(&config.output).pretty(config.pretty);
    let bytes = sink
        .write(&palettes)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    let summary = Summary {
        palettes: palettes.len(),
        pages,
        bytes,
        path: sink.path().to_path_buf(),
        elapsed: start.elapsed(),
    };
    log::debug!(
        "Wrote {} bytes in {:.1}s",
        fmt_num(summary.bytes),
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}
