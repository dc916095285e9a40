//! SRS report archives.
//!
//! An archive lists the SRS products that fall inside a search window and
//! downloads the one selected. [`fetch_report`] layers the nearest-report
//! policy on top of any archive:
//!
//! 1. search `[time - 12h, time + 12h]` for reports whose day overlaps it
//! 2. pick the listing whose nominal time is closest to `time`
//!    (lowest listing index on ties)
//! 3. download it, rejecting empty content
//! 4. parse it, rejecting content that is not an SRS product
//!
//! ## Archives
//!
//! - **NOAA** - the NCEI daily reports tree over HTTPS (feature `network`)
//! - **Directory** - a local mirror of `YYYYMMDDSRS.txt` files
//! - **Mock** - in-memory reports for testing
//!
//! ```no_run
//! use arcnet_core::archive::{fetch_report, ArchiveConfig, ArchiveFactory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = ArchiveFactory::create(ArchiveConfig::Auto)?;
//! let report = fetch_report(archive.as_ref(), chrono::Utc::now()).await?;
//! println!("{} rows", report.entries.len());
//! # Ok(())
//! # }
//! ```

mod directory;
#[cfg(feature = "network")]
mod http_client;
mod mock;
#[cfg(feature = "network")]
mod noaa;
mod provider;

pub use directory::DirectoryArchive;
pub use mock::MockArchive;
#[cfg(feature = "network")]
pub use noaa::{NoaaArchive, NoaaArchiveConfig};
pub use provider::{ArchiveConfig, ArchiveFactory};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::error::{ArcnetError, Result};
use crate::parser::parse_srs;
use crate::report::SrsReport;

/// Half-width of the search window around the requested time.
pub const SEARCH_HALF_WINDOW_HOURS: i64 = 12;

/// Closed time interval searched for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The `±12h` window centred on `time`.
    pub fn around(time: DateTime<Utc>) -> Self {
        let half = Duration::hours(SEARCH_HALF_WINDOW_HOURS);
        Self {
            start: time - half,
            end: time + half,
        }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time <= self.end
    }

    /// Whether the UTC day starting at `day` overlaps the window.
    pub fn overlaps_day(&self, day: DateTime<Utc>) -> bool {
        day <= self.end && self.start < day + Duration::days(1)
    }

    /// Midnights of every UTC day overlapping the window, earliest first.
    ///
    /// A daily SRS product is nominally valid at 00:00 UTC and covers that
    /// whole day, so these are the candidate reports for date-indexed
    /// archives.
    pub fn days(&self) -> Vec<DateTime<Utc>> {
        let mut days = Vec::new();
        let mut date = self.start.date_naive();
        let last = self.end.date_naive();

        while date <= last {
            days.push(date.and_time(NaiveTime::MIN).and_utc());
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        days
    }
}

/// One report known to an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportListing {
    /// Nominal time of the report.
    pub time: DateTime<Utc>,
    /// Archive-specific location (URL, path, key).
    pub locator: String,
}

/// Identifies the archive a report came from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ArchiveSource {
    /// NOAA/NCEI daily reports archive
    Noaa,
    /// Local directory of SRS text files
    Directory { path: String },
    /// In-memory reports (testing only)
    Mock,
}

impl std::fmt::Display for ArchiveSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Noaa => write!(f, "NOAA"),
            Self::Directory { path } => write!(f, "Directory: {path}"),
            Self::Mock => write!(f, "Mock"),
        }
    }
}

/// Trait for SRS report archives.
///
/// Implementations must be thread-safe (`Send + Sync`); one archive is shared
/// by every request the server handles.
#[async_trait]
pub trait SrsArchive: Send + Sync {
    /// List the SRS reports whose coverage day overlaps `window`.
    async fn search(&self, window: &TimeWindow) -> Result<Vec<ReportListing>>;

    /// Retrieve the raw text of a listed report.
    ///
    /// Fails with [`ArcnetError::ReportDownload`] when the transport fails.
    async fn download(&self, listing: &ReportListing) -> Result<String>;

    /// Returns the archive identifier for logging and health checks.
    fn source_id(&self) -> ArchiveSource;
}

/// Pick the listing closest in time to `time`.
///
/// Ties resolve to the lowest index.
pub fn select_nearest(listings: &[ReportListing], time: DateTime<Utc>) -> Option<&ReportListing> {
    listings
        .iter()
        .min_by_key(|listing| (listing.time - time).abs())
}

/// Fetch and parse the SRS report nearest to `time`.
///
/// Errors from the archive are returned unchanged; nothing is retried here.
#[instrument(
    level = "info",
    skip(archive),
    fields(source = %archive.source_id(), time = %time.to_rfc3339())
)]
pub async fn fetch_report<A>(archive: &A, time: DateTime<Utc>) -> Result<SrsReport>
where
    A: SrsArchive + ?Sized,
{
    let window = TimeWindow::around(time);
    let listings: Vec<ReportListing> = archive
        .search(&window)
        .await?
        .into_iter()
        .filter(|listing| window.overlaps_day(listing.time))
        .collect();

    debug!(candidates = listings.len(), "Searched SRS archive");

    let listing = select_nearest(&listings, time).ok_or_else(|| {
        warn!("No SRS report in search window");
        ArcnetError::ReportNotFound { time }
    })?;

    let content = archive.download(listing).await?;
    if content.trim().is_empty() {
        warn!(locator = %listing.locator, "Downloaded SRS report is empty");
        return Err(ArcnetError::ReportMissing {
            locator: listing.locator.clone(),
        });
    }

    let report = parse_srs(&content)?;
    info!(
        locator = %listing.locator,
        report_time = %report.time.to_rfc3339(),
        rows = report.entries.len(),
        "Fetched SRS report"
    );
    Ok(report)
}
