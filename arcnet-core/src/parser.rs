//! Parser for the NOAA Solar Region Summary text product.
//!
//! The product is a fixed-layout text file:
//!
//! ```text
//! :Product: 20221112SRS.txt
//! :Issued: 2022 Nov 12 0030 UTC
//! I.  Regions with Sunspots.  Locations Valid at 11/2400Z
//! Nmbr Location  Lo  Area  Z   LL   NN Mag Type
//! 3140 N24W35   246  0080 Dso  06   06 Beta
//! IA. H-alpha Plages without Spots.  Locations Valid at 11/2400Z
//! Nmbr  Location  Lo
//! None
//! II. Regions Due to Return 13 Nov to 15 Nov
//! Nmbr Lat    Lo
//! 3126 S20    111
//! ```
//!
//! Any malformed row fails the whole parse; no partial tables are returned.
//! Content without a dated header or without the `I.` section is not an SRS
//! product and is rejected as well.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use crate::error::{ArcnetError, Result};
use crate::report::{ArEntry, HgsCoordinate, IdentifierKind, SrsReport};

/// Parse an SRS product, taking the nominal time from its headers.
pub fn parse_srs(content: &str) -> Result<SrsReport> {
    let mut product_date: Option<NaiveDate> = None;
    let mut issued: Option<DateTime<Utc>> = None;
    let mut section: Option<IdentifierKind> = None;
    let mut seen_regions = false;
    let mut last_line = 0;
    let mut entries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix(':') {
            if let Some(value) = header.strip_prefix("Product:") {
                product_date = parse_product_date(value);
            } else if let Some(value) = header.strip_prefix("Issued:") {
                issued = parse_issued(value);
            }
            continue;
        }

        let first = line.split_whitespace().next().unwrap_or_default();

        if let Some(kind) = section_heading(first) {
            seen_regions |= kind == IdentifierKind::Region;
            section = Some(kind);
            continue;
        }

        let Some(kind) = section else {
            continue;
        };

        if first.eq_ignore_ascii_case("nmbr") || line.eq_ignore_ascii_case("none") {
            continue;
        }

        if !first.chars().all(|c| c.is_ascii_digit()) {
            // Free text after a table closes the section.
            section = None;
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let entry = match kind {
            IdentifierKind::Region => parse_region_row(&tokens, line_no)?,
            IdentifierKind::Plage => parse_plage_row(&tokens, line_no)?,
            IdentifierKind::Returning => parse_returning_row(&tokens, line_no)?,
        };
        entries.push(entry);
    }

    let time = product_date
        .or_else(|| issued.map(|t| t.date_naive()))
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| ArcnetError::parse(1, "missing :Product: and :Issued: headers"))?;

    if !seen_regions {
        return Err(ArcnetError::parse(
            last_line.max(1),
            "missing 'I. Regions with Sunspots' section",
        ));
    }

    debug!(
        report_time = %time,
        rows = entries.len(),
        "Parsed SRS report"
    );

    Ok(SrsReport {
        time,
        issued,
        entries,
    })
}

fn section_heading(token: &str) -> Option<IdentifierKind> {
    match token {
        "I." => Some(IdentifierKind::Region),
        "IA." => Some(IdentifierKind::Plage),
        "II." => Some(IdentifierKind::Returning),
        _ => None,
    }
}

/// `20221112SRS.txt` -> 2022-11-12
fn parse_product_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let digits = value.get(..8)?;
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}

/// `2022 Nov 12 0030 UTC` -> 2022-11-12T00:30:00Z
fn parse_issued(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let value = value.strip_suffix("UTC").unwrap_or(value).trim();
    NaiveDateTime::parse_from_str(value, "%Y %b %d %H%M")
        .ok()
        .map(|t| t.and_utc())
}

/// `Nmbr Location Lo Area Z LL NN MagType`
fn parse_region_row(tokens: &[&str], line: usize) -> Result<ArEntry> {
    if tokens.len() < 8 {
        return Err(ArcnetError::parse(
            line,
            format!("expected 8 columns for a sunspot region, found {}", tokens.len()),
        ));
    }

    let location = parse_location(tokens[1], line)?;
    Ok(ArEntry {
        number: parse_number(tokens[0], "Nmbr", line)?,
        kind: IdentifierKind::Region,
        latitude: location.latitude,
        longitude: Some(location.longitude),
        carrington_longitude: Some(parse_degrees(tokens[2], "Lo", line)?),
        area: Some(parse_number(tokens[3], "Area", line)?),
        mcintosh_class: Some(tokens[4].to_string()),
        longitudinal_extent: Some(parse_number(tokens[5], "LL", line)?),
        number_of_spots: Some(parse_number(tokens[6], "NN", line)?),
        hale_class: Some(tokens[7..].join(" ")),
    })
}

/// `Nmbr Location Lo`
fn parse_plage_row(tokens: &[&str], line: usize) -> Result<ArEntry> {
    if tokens.len() < 3 {
        return Err(ArcnetError::parse(
            line,
            format!("expected 3 columns for a plage, found {}", tokens.len()),
        ));
    }

    let location = parse_location(tokens[1], line)?;
    Ok(ArEntry {
        number: parse_number(tokens[0], "Nmbr", line)?,
        kind: IdentifierKind::Plage,
        latitude: location.latitude,
        longitude: Some(location.longitude),
        carrington_longitude: Some(parse_degrees(tokens[2], "Lo", line)?),
        area: None,
        mcintosh_class: None,
        longitudinal_extent: None,
        number_of_spots: None,
        hale_class: None,
    })
}

/// `Nmbr Lat Lo`
fn parse_returning_row(tokens: &[&str], line: usize) -> Result<ArEntry> {
    if tokens.len() < 3 {
        return Err(ArcnetError::parse(
            line,
            format!(
                "expected 3 columns for a returning region, found {}",
                tokens.len()
            ),
        ));
    }

    Ok(ArEntry {
        number: parse_number(tokens[0], "Nmbr", line)?,
        kind: IdentifierKind::Returning,
        latitude: parse_hemisphere(tokens[1], 'N', 'S', line)?,
        longitude: None,
        carrington_longitude: Some(parse_degrees(tokens[2], "Lo", line)?),
        area: None,
        mcintosh_class: None,
        longitudinal_extent: None,
        number_of_spots: None,
        hale_class: None,
    })
}

/// `N24W35` -> (24, 35); `S15E22` -> (-15, -22).
fn parse_location(token: &str, line: usize) -> Result<HgsCoordinate> {
    let upper = token.to_ascii_uppercase();
    let split = upper
        .char_indices()
        .skip(1)
        .find(|(_, c)| matches!(c, 'E' | 'W'))
        .map(|(i, _)| i)
        .ok_or_else(|| ArcnetError::parse(line, format!("invalid location '{token}'")))?;

    let (lat, lon) = upper.split_at(split);
    Ok(HgsCoordinate::new(
        parse_hemisphere(lat, 'N', 'S', line)?,
        parse_hemisphere(lon, 'W', 'E', line)?,
    ))
}

fn parse_hemisphere(token: &str, positive: char, negative: char, line: usize) -> Result<f64> {
    let mut chars = token.chars();
    let sign = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some(c) if c == positive => 1.0,
        Some(c) if c == negative => -1.0,
        _ => {
            return Err(ArcnetError::parse(
                line,
                format!("expected {positive}/{negative} prefix in '{token}'"),
            ))
        }
    };

    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ArcnetError::parse(
            line,
            format!("invalid angle in '{token}'"),
        ));
    }

    digits
        .parse::<f64>()
        .map(|value| sign * value)
        .map_err(|e| ArcnetError::parse(line, format!("invalid angle in '{token}': {e}")))
}

fn parse_number(token: &str, column: &str, line: usize) -> Result<u32> {
    token
        .parse()
        .map_err(|e| ArcnetError::parse(line, format!("invalid {column} '{token}': {e}")))
}

fn parse_degrees(token: &str, column: &str, line: usize) -> Result<f64> {
    token
        .parse()
        .map_err(|e| ArcnetError::parse(line, format!("invalid {column} '{token}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = include_str!("../testdata/20221112SRS.txt");
    const EMPTY_REGIONS: &str = include_str!("../testdata/20221113SRS.txt");

    #[test]
    fn test_parse_sample_report() {
        let report = parse_srs(SAMPLE).unwrap();

        assert_eq!(
            report.time,
            Utc.with_ymd_and_hms(2022, 11, 12, 0, 0, 0).unwrap()
        );
        assert_eq!(
            report.issued,
            Some(Utc.with_ymd_and_hms(2022, 11, 12, 0, 30, 0).unwrap())
        );
        assert_eq!(report.entries.len(), 5);

        let kinds: Vec<IdentifierKind> = report.entries.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IdentifierKind::Region,
                IdentifierKind::Region,
                IdentifierKind::Region,
                IdentifierKind::Plage,
                IdentifierKind::Returning,
            ]
        );
    }

    #[test]
    fn test_region_row_columns() {
        let report = parse_srs(SAMPLE).unwrap();
        let first = &report.entries[0];

        assert_eq!(first.number, 3140);
        assert_eq!(first.latitude, 24.0);
        assert_eq!(first.longitude, Some(35.0));
        assert_eq!(first.carrington_longitude, Some(246.0));
        assert_eq!(first.area, Some(80));
        assert_eq!(first.mcintosh_class.as_deref(), Some("Dso"));
        assert_eq!(first.longitudinal_extent, Some(6));
        assert_eq!(first.number_of_spots, Some(6));
        assert_eq!(first.hale_class.as_deref(), Some("Beta"));

        let second = &report.entries[1];
        assert_eq!(second.latitude, -15.0);
        assert_eq!(second.longitude, Some(-22.0));
        assert_eq!(second.hale_class.as_deref(), Some("Beta-Gamma"));
    }

    #[test]
    fn test_returning_region_has_latitude_only() {
        let report = parse_srs(SAMPLE).unwrap();
        let returning = report.entries.last().unwrap();

        assert_eq!(returning.number, 3126);
        assert_eq!(returning.latitude, -20.0);
        assert_eq!(returning.longitude, None);
        assert_eq!(returning.carrington_longitude, Some(111.0));
    }

    #[test]
    fn test_none_sections_yield_no_regions() {
        let report = parse_srs(EMPTY_REGIONS).unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].kind, IdentifierKind::Plage);
        assert!(report.active_regions().is_empty());
    }

    #[test]
    fn test_malformed_row_fails_whole_report() {
        let content = SAMPLE.replace("3141 S15E22", "3141 X15E22");
        let err = parse_srs(&content).unwrap_err();

        match err {
            ArcnetError::ReportParse { line, .. } => assert_eq!(line, 12),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_region_row_is_rejected() {
        let content = SAMPLE.replace("0010 Axx  01   01 Alpha", "0010");
        assert!(matches!(
            parse_srs(&content),
            Err(ArcnetError::ReportParse { .. })
        ));
    }

    #[test]
    fn test_missing_headers_is_rejected() {
        let content: String = SAMPLE
            .lines()
            .filter(|l| !l.starts_with(':'))
            .collect::<Vec<_>>()
            .join("\n");

        match parse_srs(&content).unwrap_err() {
            ArcnetError::ReportParse { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains(":Product:"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_html_page_is_not_a_report() {
        let err = parse_srs("<html><body>Service maintenance</body></html>").unwrap_err();
        assert!(matches!(err, ArcnetError::ReportParse { .. }));
    }

    #[test]
    fn test_missing_regions_section_is_rejected() {
        let content = ":Product: 20221112SRS.txt\n:Issued: 2022 Nov 12 0030 UTC\n<html><body>Service maintenance</body></html>\n";

        match parse_srs(content).unwrap_err() {
            ArcnetError::ReportParse { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("Regions with Sunspots"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_issued_header_used_without_product() {
        let content = SAMPLE.replace(":Product: 20221112SRS.txt\n", "");
        let report = parse_srs(&content).unwrap();
        assert_eq!(
            report.time,
            Utc.with_ymd_and_hms(2022, 11, 12, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_location_signs() {
        let c = parse_location("N05E60", 1).unwrap();
        assert_eq!((c.latitude, c.longitude), (5.0, -60.0));

        let c = parse_location("s68w12", 1).unwrap();
        assert_eq!((c.latitude, c.longitude), (-68.0, 12.0));

        assert!(parse_location("N05", 1).is_err());
        assert!(parse_location("NxxW10", 1).is_err());
    }
}
