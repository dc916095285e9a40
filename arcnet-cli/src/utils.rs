//! Common utility functions shared across CLI commands.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arcnet_core::{ArchiveConfig, ArchiveFactory, SrsArchive, QUIET_SUN};
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

/// Parse a time argument for clap.
pub fn parse_time(raw: &str) -> Result<DateTime<Utc>, String> {
    arcnet_core::parse_time(raw).ok_or_else(|| {
        format!(
            "'{}' is not a valid time (expected e.g. 2022-11-12T13:14:15Z or 2022-11-12)",
            raw.trim()
        )
    })
}

/// Build the archive: a local directory when given, NOAA otherwise.
pub fn open_archive(archive_dir: Option<PathBuf>) -> Result<Arc<dyn SrsArchive>> {
    let config = match archive_dir {
        Some(dir) => {
            if !dir.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Archive directory not found: {}", dir.display()),
                )
                .into());
            }
            ArchiveConfig::Directory(dir)
        }
        None => ArchiveConfig::Auto,
    };

    ArchiveFactory::create(config).context("Failed to open SRS archive")
}

/// Color a class label, dimming quiet Sun.
pub fn label(class: &str) -> ColoredString {
    if class == QUIET_SUN {
        class.dimmed()
    } else {
        class.yellow().bold()
    }
}

/// Format a time for terminal output.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_time_variants() {
        let expected = Utc.with_ymd_and_hms(2022, 11, 12, 13, 14, 15).unwrap();
        assert_eq!(parse_time("2022-11-12T13:14:15Z").unwrap(), expected);
        assert_eq!(parse_time("2022-11-12T13:14:15").unwrap(), expected);
        assert_eq!(
            parse_time("2022-11-12").unwrap(),
            Utc.with_ymd_and_hms(2022, 11, 12, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        let err = parse_time("noon").unwrap_err();
        assert!(err.contains("not a valid time"));
    }

    #[test]
    fn test_open_archive_rejects_missing_directory() {
        let err = open_archive(Some(PathBuf::from("/nonexistent/arcnet/srs")))
            .err()
            .unwrap();
        assert!(err.to_string().contains("Archive directory not found"));
    }

    #[test]
    fn test_format_time() {
        let time = Utc.with_ymd_and_hms(2022, 11, 12, 9, 30, 0).unwrap();
        assert_eq!(format_time(time), "2022-11-12 09:30:00 UTC");
    }
}
