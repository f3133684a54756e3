//! Record admission criteria

use std::ops::RangeInclusive;

use crate::schema::RawRecord;

/// Keep records whose color count lies in an inclusive range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCountRange {
    range: RangeInclusive<usize>,
}

impl ColorCountRange {
    pub const DEFAULT_MIN: usize = 2;
    pub const DEFAULT_MAX: usize = 5;

    pub fn new(min: usize, max: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(
            min <= max,
            "min colors ({min}) must not exceed max colors ({max})"
        );
        Ok(Self { range: min..=max })
    }

    pub fn min(&self) -> usize {
        *self.range.start()
    }

    pub fn max(&self) -> usize {
        *self.range.end()
    }

    pub fn admits(&self, record: &RawRecord) -> bool {
        self.range.contains(&record.colors.len())
    }
}

impl Default for ColorCountRange {
    fn default() -> Self {
        Self {
            range: Self::DEFAULT_MIN..=Self::DEFAULT_MAX,
        }
    }
}

impl std::fmt::Display for ColorCountRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={} colors", self.min(), self.max())
    }
}
