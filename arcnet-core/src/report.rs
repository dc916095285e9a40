//! Solar Region Summary data model.
//!
//! An [`SrsReport`] is the parsed form of one daily NOAA SRS product: its
//! nominal time plus every catalogued row, in file order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Section of the SRS product a row was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// `I` - regions with sunspots. The only kind eligible for matching.
    #[serde(rename = "I")]
    Region,
    /// `IA` - H-alpha plages without spots.
    #[serde(rename = "IA")]
    Plage,
    /// `II` - old regions due to return.
    #[serde(rename = "II")]
    Returning,
}

impl IdentifierKind {
    /// Section label as printed in the report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Region => "I",
            Self::Plage => "IA",
            Self::Returning => "II",
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Heliographic Stonyhurst position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HgsCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl HgsCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Shift both axes by the same number of degrees.
    pub fn offset(&self, degrees: f64) -> Self {
        Self::new(self.latitude + degrees, self.longitude + degrees)
    }
}

/// One catalogued row of an SRS report.
///
/// Which fields are populated depends on the section: sunspot regions carry
/// the full set, plages carry a location only, and returning regions carry a
/// latitude and Carrington longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArEntry {
    /// NOAA region number.
    pub number: u32,
    pub kind: IdentifierKind,
    /// Heliographic latitude, north positive.
    pub latitude: f64,
    /// Heliographic Stonyhurst longitude, west positive. Absent for returning regions.
    pub longitude: Option<f64>,
    /// Carrington longitude.
    pub carrington_longitude: Option<f64>,
    /// Area in millionths of the solar hemisphere.
    pub area: Option<u32>,
    /// Modified Zurich (McIntosh) class, e.g. `Fkc`.
    pub mcintosh_class: Option<String>,
    /// Longitudinal extent in degrees.
    pub longitudinal_extent: Option<u32>,
    /// Number of spots.
    pub number_of_spots: Option<u32>,
    /// Magnetic (Hale) class, e.g. `Beta-Gamma`.
    pub hale_class: Option<String>,
}

impl ArEntry {
    /// View this row as a matchable active region.
    ///
    /// Returns `None` unless the row is a sunspot region with a position and
    /// both classification labels.
    pub fn as_active_region(&self) -> Option<ActiveRegion<'_>> {
        if self.kind != IdentifierKind::Region {
            return None;
        }
        Some(ActiveRegion {
            number: self.number,
            position: HgsCoordinate::new(self.latitude, self.longitude?),
            hale_class: self.hale_class.as_deref()?,
            mcintosh_class: self.mcintosh_class.as_deref()?,
        })
    }
}

/// Borrowed view of a classified sunspot region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRegion<'a> {
    pub number: u32,
    pub position: HgsCoordinate,
    pub hale_class: &'a str,
    pub mcintosh_class: &'a str,
}

/// A parsed SRS product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrsReport {
    /// Nominal time of the report (00:00 UTC on the product date).
    pub time: DateTime<Utc>,
    /// Issue time from the `:Issued:` header, when present.
    pub issued: Option<DateTime<Utc>>,
    /// Every row in file order.
    pub entries: Vec<ArEntry>,
}

impl SrsReport {
    /// Sunspot regions eligible for matching, in file order.
    pub fn active_regions(&self) -> Vec<ActiveRegion<'_>> {
        self.entries
            .iter()
            .filter_map(ArEntry::as_active_region)
            .collect()
    }
}
