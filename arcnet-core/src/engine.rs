//! Request-level operations: fetch the nearest report, then match.
//!
//! Each call performs exactly one report retrieval and holds no state
//! between calls. Archive errors are returned unchanged.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::archive::{fetch_report, SrsArchive};
use crate::error::Result;
use crate::matching::{classify, detect, ClassificationResult, Detection};

/// Classify the cutout centred on `(hgs_latitude, hgs_longitude)` at `time`.
#[instrument(level = "info", skip(archive))]
pub async fn classify_cutout<A>(
    archive: &A,
    time: DateTime<Utc>,
    hgs_latitude: f64,
    hgs_longitude: f64,
) -> Result<ClassificationResult>
where
    A: SrsArchive + ?Sized,
{
    let report = fetch_report(archive, time).await?;
    let result = classify(&report, time, hgs_latitude, hgs_longitude);

    info!(
        hale_class = %result.hale_class,
        mcintosh_class = %result.mcintosh_class,
        "Classified cutout"
    );
    Ok(result)
}

/// Detect and classify every catalogued active region at `time`.
#[instrument(level = "info", skip(archive))]
pub async fn detect_ars<A>(archive: &A, time: DateTime<Utc>) -> Result<Vec<Detection>>
where
    A: SrsArchive + ?Sized,
{
    let report = fetch_report(archive, time).await?;
    let detections = detect(&report, time);

    info!(count = detections.len(), "Detected active regions");
    Ok(detections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MockArchive;
    use crate::error::ArcnetError;
    use crate::matching::QUIET_SUN;
    use chrono::TimeZone;

    const SAMPLE: &str = include_str!("../testdata/20221112SRS.txt");
    const NO_REGIONS: &str = include_str!("../testdata/20221113SRS.txt");

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 11, d, 0, 0, 0).unwrap()
    }

    fn query_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 11, 12, 9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_classify_cutout_matches_catalogued_region() {
        let archive = MockArchive::new().with_report(day(12), SAMPLE);

        // AR 3142 sits at S68W12
        let result = classify_cutout(&archive, query_time(), -70.0, 10.0)
            .await
            .unwrap();

        assert_eq!(result.hale_class, "Alpha");
        assert_eq!(result.mcintosh_class, "Axx");
        assert_eq!(result.hgs_latitude, -70.0);
        assert_eq!(result.hgs_longitude, 10.0);
        assert_eq!(result.time, query_time());
    }

    #[tokio::test]
    async fn test_classify_cutout_ignores_plages() {
        let archive = MockArchive::new().with_report(day(12), SAMPLE);

        // Plage 3138 at N21W88 has no sunspot region nearby
        let result = classify_cutout(&archive, query_time(), 21.0, 88.0)
            .await
            .unwrap();

        assert_eq!(result.hale_class, QUIET_SUN);
        assert_eq!(result.mcintosh_class, QUIET_SUN);
    }

    #[tokio::test]
    async fn test_classify_cutout_propagates_not_found() {
        let archive = MockArchive::new();
        let err = classify_cutout(&archive, query_time(), 0.0, 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ArcnetError::ReportNotFound { .. }));
    }

    #[tokio::test]
    async fn test_detect_ars_one_per_region() {
        let archive = MockArchive::new().with_report(day(12), SAMPLE);

        let detections = detect_ars(&archive, query_time()).await.unwrap();

        let labels: Vec<(&str, &str)> = detections
            .iter()
            .map(|d| (d.hale_class.as_str(), d.mcintosh_class.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![("Beta", "Dso"), ("Beta-Gamma", "Cao"), ("Alpha", "Axx")]
        );
    }

    #[tokio::test]
    async fn test_detect_ars_empty_when_no_regions() {
        let archive = MockArchive::new().with_report(day(13), NO_REGIONS);
        let t = Utc.with_ymd_and_hms(2022, 11, 13, 2, 0, 0).unwrap();

        let detections = detect_ars(&archive, t).await.unwrap();
        assert!(detections.is_empty());
    }

    #[tokio::test]
    async fn test_non_srs_content_is_an_error_not_quiet_sun() {
        let archive = MockArchive::new()
            .with_report(day(12), "<html><body>Service maintenance</body></html>");

        let err = classify_cutout(&archive, query_time(), -70.0, 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ArcnetError::ReportParse { .. }));

        let err = detect_ars(&archive, query_time()).await.unwrap_err();
        assert!(matches!(err, ArcnetError::ReportParse { .. }));
    }

    #[tokio::test]
    async fn test_detect_ars_download_error_is_not_swallowed() {
        let archive = MockArchive::new()
            .with_report(day(12), SAMPLE)
            .failing_downloads();

        let err = detect_ars(&archive, query_time()).await.unwrap_err();
        assert!(matches!(err, ArcnetError::ReportDownload { .. }));
    }
}
