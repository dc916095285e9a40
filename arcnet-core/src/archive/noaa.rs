//! NOAA/NCEI daily Solar Region Summary archive.
//!
//! SWPC publishes one SRS product per day; NCEI keeps the full history in a
//! date-indexed tree:
//!
//! ```text
//! .../solar_region_summaries/2022/11/20221112SRS.txt
//! ```
//!
//! Candidates for a search window are the UTC days it overlaps. Each
//! candidate is probed with `HEAD` and listed only when the product exists.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::http_client::{ArchiveHttpClient, ArchiveHttpConfig};
use super::{ArchiveSource, ReportListing, SrsArchive, TimeWindow};
use crate::error::Result;

/// Default URL template. `{year}`, `{month}` and `{date}` are substituted.
const DEFAULT_URL_TEMPLATE: &str = "https://www.ngdc.noaa.gov/stp/space-weather/swpc-products/daily_reports/solar_region_summaries/{year}/{month}/{date}SRS.txt";

/// Default timeout for archive requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Maximum number of retry attempts.
const MAX_RETRIES: u32 = 3;

/// Initial retry interval.
const INITIAL_INTERVAL: Duration = Duration::from_millis(200);

/// Maximum retry interval.
const MAX_INTERVAL: Duration = Duration::from_secs(2);

/// Configuration for the NOAA archive client.
#[derive(Debug, Clone)]
pub struct NoaaArchiveConfig {
    /// URL template for a daily product.
    pub url_template: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for transient errors.
    pub max_retries: u32,
}

impl Default for NoaaArchiveConfig {
    fn default() -> Self {
        Self {
            url_template: std::env::var("SRS_ARCHIVE_URL")
                .unwrap_or_else(|_| DEFAULT_URL_TEMPLATE.to_string()),
            timeout: DEFAULT_TIMEOUT,
            max_retries: MAX_RETRIES,
        }
    }
}

/// Client for the NOAA/NCEI SRS archive.
pub struct NoaaArchive {
    http: ArchiveHttpClient,
    config: NoaaArchiveConfig,
}

impl NoaaArchive {
    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(NoaaArchiveConfig::default())
    }

    /// Create a client with custom configuration.
    #[instrument(level = "debug", skip_all, fields(
        url_template = %config.url_template,
        timeout_ms = config.timeout.as_millis() as u64,
        max_retries = config.max_retries
    ))]
    pub fn with_config(config: NoaaArchiveConfig) -> Result<Self> {
        let http = ArchiveHttpClient::new(ArchiveHttpConfig {
            timeout: config.timeout,
            max_retries: config.max_retries,
            initial_interval: INITIAL_INTERVAL,
            max_interval: MAX_INTERVAL,
        })?;

        info!("NOAA archive client created");
        Ok(Self { http, config })
    }

    /// URL of the product for the day of `time`.
    pub fn url_for(&self, time: DateTime<Utc>) -> String {
        self.config
            .url_template
            .replace("{year}", &time.format("%Y").to_string())
            .replace("{month}", &time.format("%m").to_string())
            .replace("{date}", &time.format("%Y%m%d").to_string())
    }
}

#[async_trait]
impl SrsArchive for NoaaArchive {
    #[instrument(level = "debug", skip(self))]
    async fn search(&self, window: &TimeWindow) -> Result<Vec<ReportListing>> {
        let mut listings = Vec::new();

        for day in window.days() {
            let url = self.url_for(day);
            let exists = self.http.exists(&url).await?;
            debug!(url = %url, exists, "Probed candidate report");

            if exists {
                listings.push(ReportListing {
                    time: day,
                    locator: url,
                });
            }
        }

        Ok(listings)
    }

    #[instrument(level = "info", skip(self), fields(url = %listing.locator))]
    async fn download(&self, listing: &ReportListing) -> Result<String> {
        self.http.get_text(&listing.locator).await
    }

    fn source_id(&self) -> ArchiveSource {
        ArchiveSource::Noaa
    }
}
