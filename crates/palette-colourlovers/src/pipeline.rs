//! Sequential page walk with filter and projection

use indicatif::ProgressBar;
use palette_core::FetchError;

use crate::api::{MAX_PAGE_SIZE, PageSource};
use crate::filter::ColorCountRange;
use crate::schema::{PageRequest, Palette, RawRecord};

/// Default number of records to walk
pub const DEFAULT_TOTAL: usize = 1000;

pub type Predicate = Box<dyn Fn(&RawRecord) -> bool + Send + Sync>;
pub type Projection = Box<dyn Fn(RawRecord) -> Palette + Send + Sync>;

/// Error from a page fetch, tagged with the page that failed
#[derive(Debug)]
pub struct PageError {
    pub request: PageRequest,
    pub source: FetchError,
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "page at offset {} (size {}) failed",
            self.request.offset, self.request.page_size
        )
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Immutable walk plan: how many records, how many per page, what to keep.
///
/// Records discarded by the predicate are not backfilled, so a run can
/// return fewer than `total` palettes.
pub struct Paginator {
    total: usize,
    page_size: usize,
    predicate: Predicate,
    projection: Projection,
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("total", &self.total)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl Paginator {
    /// Walk `total` records, `min(total, MAX_PAGE_SIZE)` per page,
    /// keeping 2..=5 color palettes.
    pub fn new(total: usize) -> Self {
        let range = ColorCountRange::default();
        Self {
            total,
            page_size: clamp_page_size(total, MAX_PAGE_SIZE),
            predicate: Box::new(move |r: &RawRecord| range.admits(r)),
            projection: Box::new(|r: RawRecord| Palette::from(r)),
        }
    }

    /// Cap records per request; the effective size never exceeds `total`.
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.page_size = clamp_page_size(self.total, max_page_size);
        self
    }

    pub fn with_predicate(
        mut self,
        predicate: impl Fn(&RawRecord) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn with_color_range(self, range: ColorCountRange) -> Self {
        self.with_predicate(move |r: &RawRecord| range.admits(r))
    }

    pub fn with_projection(
        mut self,
        projection: impl Fn(RawRecord) -> Palette + Send + Sync + 'static,
    ) -> Self {
        self.projection = Box::new(projection);
        self
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of requests a full walk issues: `ceil(total / page_size)`
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Requests in walk order: offsets `0, P, 2P, …` below `total`.
    ///
    /// The last page asks only for the records still missing from `total`.
    pub fn requests(&self) -> impl Iterator<Item = PageRequest> + '_ {
        (0..self.total)
            .step_by(self.page_size)
            .map(|offset| PageRequest {
                offset,
                page_size: self.page_size.min(self.total - offset),
            })
    }

    /// Filter then project one page, preserving record order.
    pub fn admit(&self, records: Vec<RawRecord>) -> impl Iterator<Item = Palette> + '_ {
        records
            .into_iter()
            .filter(|r| (self.predicate)(r))
            .map(|r| (self.projection)(r))
    }

    /// Fetch every page in order and return the retained palettes.
    ///
    /// Strictly sequential. The first failed page aborts the walk; no
    /// later page is requested.
    pub fn collect(
        &self,
        source: &impl PageSource,
        pb: &ProgressBar,
    ) -> Result<Vec<Palette>, PageError> {
        let mut palettes = Vec::new();
        for request in self.requests() {
            pb.set_message(format!("offset {}", request.offset));
            let records = source
                .fetch_page(request)
                .map_err(|source| PageError { request, source })?;
            let received = records.len();
            let before = palettes.len();
            palettes.extend(self.admit(records));
            log::debug!(
                "offset {}: kept {}/{} records",
                request.offset,
                palettes.len() - before,
                received
            );
            pb.inc(1);
        }
        Ok(palettes)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL)
    }
}

fn clamp_page_size(total: usize, max_page_size: usize) -> usize {
    total.min(max_page_size).max(1)
}
