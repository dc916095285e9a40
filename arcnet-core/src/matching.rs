//! Active region matching against a parsed SRS report.
//!
//! Both operations are pure functions of the report and the query:
//!
//! - [`classify`] labels a point with the nearest catalogued region within
//!   [`MATCH_THRESHOLD_DEG`], or quiet Sun.
//! - [`detect`] boxes every catalogued region.
//!
//! Distances are planar in degree space, `sqrt(dlat^2 + dlon^2)`, not
//! great-circle separations. Changing this moves matches near the poles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::report::{ActiveRegion, HgsCoordinate, SrsReport};

/// Label used when no active region is close enough.
pub const QUIET_SUN: &str = "QS";

/// Maximum distance (inclusive) between query and region for a match.
pub const MATCH_THRESHOLD_DEG: f64 = 10.0;

/// Half-width of detection boxes on both axes.
pub const BBOX_HALF_WIDTH_DEG: f64 = 5.0;

/// Label for a cutout.
///
/// Coordinates are the query's, never the matched region's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub time: DateTime<Utc>,
    pub hgs_latitude: f64,
    pub hgs_longitude: f64,
    pub hale_class: String,
    pub mcintosh_class: String,
}

/// Corners of a detection box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub bottom_left: HgsCoordinate,
    pub top_right: HgsCoordinate,
}

impl BoundingBox {
    /// Square box centred on `center`. Corners are not clamped to valid
    /// coordinate ranges.
    pub fn centered(center: HgsCoordinate, half_width: f64) -> Self {
        Self {
            bottom_left: center.offset(-half_width),
            top_right: center.offset(half_width),
        }
    }
}

/// One detected active region on the full disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub time: DateTime<Utc>,
    pub bbox: BoundingBox,
    pub hale_class: String,
    pub mcintosh_class: String,
}

/// Planar distance in degrees between two positions.
pub fn planar_distance(a: HgsCoordinate, b: HgsCoordinate) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlon = a.longitude - b.longitude;
    (dlat * dlat + dlon * dlon).sqrt()
}

/// Index and distance of the region nearest to `point`.
///
/// Ties resolve to the lowest index.
pub fn nearest_region(regions: &[ActiveRegion<'_>], point: HgsCoordinate) -> Option<(usize, f64)> {
    regions
        .iter()
        .map(|region| planar_distance(region.position, point))
        .enumerate()
        .fold(None, |best, (index, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((index, distance)),
        })
}

/// Classify the cutout centred on `(hgs_latitude, hgs_longitude)`.
pub fn classify(
    report: &SrsReport,
    time: DateTime<Utc>,
    hgs_latitude: f64,
    hgs_longitude: f64,
) -> ClassificationResult {
    let mut result = ClassificationResult {
        time,
        hgs_latitude,
        hgs_longitude,
        hale_class: QUIET_SUN.to_string(),
        mcintosh_class: QUIET_SUN.to_string(),
    };

    let regions = report.active_regions();
    let point = HgsCoordinate::new(hgs_latitude, hgs_longitude);

    if let Some((index, distance)) = nearest_region(&regions, point) {
        let region = &regions[index];
        debug!(
            region = region.number,
            distance_deg = distance,
            "Nearest active region"
        );

        if distance <= MATCH_THRESHOLD_DEG {
            result.hale_class = region.hale_class.to_string();
            result.mcintosh_class = region.mcintosh_class.to_string();
        }
    }

    result
}

/// Box and label every active region in the report, in report order.
pub fn detect(report: &SrsReport, time: DateTime<Utc>) -> Vec<Detection> {
    report
        .active_regions()
        .into_iter()
        .map(|region| Detection {
            time,
            bbox: BoundingBox::centered(region.position, BBOX_HALF_WIDTH_DEG),
            hale_class: region.hale_class.to_string(),
            mcintosh_class: region.mcintosh_class.to_string(),
        })
        .collect()
}
