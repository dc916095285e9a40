//! Local directory mirror of SRS products.
//!
//! Files are expected at `<root>/YYYYMMDDSRS.txt`, the naming NOAA uses for
//! the daily products.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use super::{ArchiveSource, ReportListing, SrsArchive, TimeWindow};
use crate::error::{ArcnetError, Result};

/// SRS archive backed by a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name of the product for the day of `time`.
    pub fn file_name(time: DateTime<Utc>) -> String {
        format!("{}SRS.txt", time.format("%Y%m%d"))
    }

    fn path_for(&self, time: DateTime<Utc>) -> PathBuf {
        self.root.join(Self::file_name(time))
    }
}

#[async_trait]
impl SrsArchive for DirectoryArchive {
    #[instrument(level = "debug", skip(self), fields(root = %self.root.display()))]
    async fn search(&self, window: &TimeWindow) -> Result<Vec<ReportListing>> {
        let mut listings = Vec::new();

        for day in window.days() {
            let path = self.path_for(day);
            let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
                ArcnetError::ArchiveError(format!("Failed to stat {}: {e}", path.display()))
            })?;

            debug!(path = %path.display(), exists, "Checked candidate report");
            if exists {
                listings.push(ReportListing {
                    time: day,
                    locator: path.display().to_string(),
                });
            }
        }

        Ok(listings)
    }

    async fn download(&self, listing: &ReportListing) -> Result<String> {
        tokio::fs::read_to_string(&listing.locator)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ArcnetError::ReportMissing {
                    locator: listing.locator.clone(),
                },
                _ => ArcnetError::ReportDownload {
                    locator: listing.locator.clone(),
                    reason: e.to_string(),
                },
            })
    }

    fn source_id(&self) -> ArchiveSource {
        ArchiveSource::Directory {
            path: self.root.display().to_string(),
        }
    }
}
