//! In-memory SRS archive for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ArchiveSource, ReportListing, SrsArchive, TimeWindow};
use crate::error::{ArcnetError, Result};

/// In-memory archive holding raw SRS text keyed by nominal time.
///
/// Reports are listed in insertion order, which makes tie-breaking between
/// equally distant reports observable in tests.
#[derive(Debug, Clone, Default)]
pub struct MockArchive {
    reports: Vec<(DateTime<Utc>, String)>,
    fail_downloads: bool,
}

impl MockArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a report with the given nominal time.
    pub fn with_report(mut self, time: DateTime<Utc>, content: impl Into<String>) -> Self {
        self.reports.push((time, content.into()));
        self
    }

    /// Make every download fail as if the transport were down.
    pub fn failing_downloads(mut self) -> Self {
        self.fail_downloads = true;
        self
    }

    fn locator(index: usize) -> String {
        format!("mock://{index}")
    }
}

#[async_trait]
impl SrsArchive for MockArchive {
    async fn search(&self, window: &TimeWindow) -> Result<Vec<ReportListing>> {
        Ok(self
            .reports
            .iter()
            .enumerate()
            .filter(|(_, (time, _))| window.overlaps_day(*time))
            .map(|(index, (time, _))| ReportListing {
                time: *time,
                locator: Self::locator(index),
            })
            .collect())
    }

    async fn download(&self, listing: &ReportListing) -> Result<String> {
        if self.fail_downloads {
            return Err(ArcnetError::ReportDownload {
                locator: listing.locator.clone(),
                reason: "simulated transport failure".into(),
            });
        }

        self.reports
            .iter()
            .enumerate()
            .find(|(index, _)| Self::locator(*index) == listing.locator)
            .map(|(_, (_, content))| content.clone())
            .ok_or_else(|| ArcnetError::ReportMissing {
                locator: listing.locator.clone(),
            })
    }

    fn source_id(&self) -> ArchiveSource {
        ArchiveSource::Mock
    }
}
