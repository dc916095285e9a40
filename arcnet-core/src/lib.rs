//! ARCNET Core - Solar active region classification from NOAA SRS reports
//!
//! This crate locates the Solar Region Summary (SRS) report nearest to a
//! requested time, parses its active region table, and matches it against a
//! query.
//!
//! # Features
//!
//! - Nearest-report lookup in a ±12 hour window over pluggable archives
//! - NOAA SRS text product parser
//! - Cutout classification: nearest region within 10°, otherwise quiet Sun
//! - Full-disk detection: one 10° × 10° box per catalogued region
//!
//! # Example
//!
//! ```no_run
//! use arcnet_core::{classify_cutout, detect_ars, ArchiveConfig, ArchiveFactory};
//!
//! # async fn example() -> arcnet_core::Result<()> {
//! let archive = ArchiveFactory::create(ArchiveConfig::Auto)?;
//! let time = "2022-11-12T13:14:15Z".parse().unwrap();
//!
//! let cutout = classify_cutout(archive.as_ref(), time, -70.0, 10.0).await?;
//! println!("{} / {}", cutout.hale_class, cutout.mcintosh_class);
//!
//! for detection in detect_ars(archive.as_ref(), time).await? {
//!     println!("{:?} {}", detection.bbox, detection.mcintosh_class);
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod engine;
pub mod error;
pub mod matching;
pub mod parser;
pub mod report;
pub mod time;

// Re-export main types for convenience
pub use archive::{
    fetch_report, ArchiveConfig, ArchiveFactory, ArchiveSource, DirectoryArchive, MockArchive,
    ReportListing, SrsArchive, TimeWindow,
};
pub use engine::{classify_cutout, detect_ars};
pub use error::{ArcnetError, Result};
pub use matching::{
    BoundingBox, ClassificationResult, Detection, BBOX_HALF_WIDTH_DEG, MATCH_THRESHOLD_DEG,
    QUIET_SUN,
};
pub use parser::parse_srs;
pub use report::{ArEntry, HgsCoordinate, IdentifierKind, SrsReport};
pub use time::parse_time;

// Network-dependent exports
#[cfg(feature = "network")]
pub use archive::{NoaaArchive, NoaaArchiveConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Classification and detection against the same report agree on labels.
    #[tokio::test]
    async fn test_cutout_at_detection_center_matches_detection() {
        let day = Utc.with_ymd_and_hms(2022, 11, 12, 0, 0, 0).unwrap();
        let archive =
            MockArchive::new().with_report(day, include_str!("../testdata/20221112SRS.txt"));
        let time = Utc.with_ymd_and_hms(2022, 11, 12, 8, 0, 0).unwrap();

        let detections = detect_ars(&archive, time).await.expect("detection failed");
        assert_eq!(detections.len(), 3);

        for detection in detections {
            let center_lat =
                (detection.bbox.bottom_left.latitude + detection.bbox.top_right.latitude) / 2.0;
            let center_lon =
                (detection.bbox.bottom_left.longitude + detection.bbox.top_right.longitude) / 2.0;

            let cutout = classify_cutout(&archive, time, center_lat, center_lon)
                .await
                .expect("classification failed");

            assert_eq!(cutout.hale_class, detection.hale_class);
            assert_eq!(cutout.mcintosh_class, detection.mcintosh_class);
        }
    }
}
