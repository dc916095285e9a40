//! Request validation module
//!
//! Checks query times and coordinates before any archive access happens.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::ApiError;

/// Bounds accepted for `hgs_latitude`.
///
/// The two coordinate ranges are swapped with respect to heliographic
/// convention. Deployed clients rely on them, so they are kept as-is.
pub const LATITUDE_BOUNDS: (f64, f64) = (-180.0, 180.0);

/// Bounds accepted for `hgs_longitude`.
pub const LONGITUDE_BOUNDS: (f64, f64) = (-90.0, 90.0);

/// Earliest supported query time (2011-01-01T00:00:00Z).
pub fn min_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parses a query time, see [`arcnet_core::parse_time`] for the accepted forms.
pub fn parse_time(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    arcnet_core::parse_time(raw).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Invalid time '{}': expected an ISO 8601 timestamp",
            raw.trim()
        ))
    })
}

/// Validates that `time` lies in `[2011-01-01T00:00:00Z, now]`.
pub fn validate_time(time: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), ApiError> {
    let min = min_time();
    if time < min {
        return Err(ApiError::bad_request(format!(
            "time {} is before {}",
            time.to_rfc3339(),
            min.to_rfc3339()
        )));
    }
    if time > now {
        return Err(ApiError::bad_request(format!(
            "time {} is in the future",
            time.to_rfc3339()
        )));
    }
    Ok(())
}

/// Parses a request time and checks it against the supported range.
pub fn request_time(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    let time = parse_time(raw)?;
    validate_time(time, Utc::now())?;
    Ok(time)
}

/// Validates a coordinate against inclusive bounds.
pub fn validate_coordinate(name: &str, value: f64, (min, max): (f64, f64)) -> Result<(), ApiError> {
    if !value.is_finite() {
        return Err(ApiError::bad_request(format!(
            "{} must be a finite number",
            name
        )));
    }
    if value < min || value > max {
        return Err(ApiError::bad_request(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_time_accepts_date() {
        assert_eq!(
            parse_time("2022-11-12").unwrap(),
            Utc.with_ymd_and_hms(2022, 11, 12, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        let err = parse_time(" yesterday ").unwrap_err();
        assert!(err.to_string().contains("Invalid time 'yesterday'"));
        assert!(parse_time("").is_err());
    }

    #[test]
    fn test_validate_time_bounds() {
        assert!(validate_time(min_time(), now()).is_ok());
        assert!(validate_time(now(), now()).is_ok());

        let before = Utc.with_ymd_and_hms(2010, 12, 31, 23, 59, 59).unwrap();
        assert!(validate_time(before, now()).is_err());

        let future = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 1).unwrap();
        assert!(validate_time(future, now()).is_err());
    }

    #[test]
    fn test_validate_coordinate_inclusive() {
        assert!(validate_coordinate("hgs_latitude", 180.0, LATITUDE_BOUNDS).is_ok());
        assert!(validate_coordinate("hgs_latitude", -180.0, LATITUDE_BOUNDS).is_ok());
        assert!(validate_coordinate("hgs_latitude", 180.5, LATITUDE_BOUNDS).is_err());

        assert!(validate_coordinate("hgs_longitude", 90.0, LONGITUDE_BOUNDS).is_ok());
        assert!(validate_coordinate("hgs_longitude", -90.1, LONGITUDE_BOUNDS).is_err());
    }

    #[test]
    fn test_validate_coordinate_rejects_non_finite() {
        assert!(validate_coordinate("hgs_latitude", f64::NAN, LATITUDE_BOUNDS).is_err());
        assert!(validate_coordinate("hgs_longitude", f64::INFINITY, LONGITUDE_BOUNDS).is_err());
    }
}
