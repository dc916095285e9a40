//! Classify command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use arcnet_core::classify_cutout;
use chrono::{DateTime, Utc};
use colored::Colorize;
use tracing::info;

use crate::utils::{format_time, label, open_archive};

/// Execute the classify command.
pub async fn execute(
    archive_dir: Option<PathBuf>,
    time: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let archive = open_archive(archive_dir)?;
    info!(archive = %archive.source_id(), "Opened SRS archive");

    let result = classify_cutout(archive.as_ref(), time, latitude, longitude)
        .await
        .with_context(|| format!("Classification failed for {}", time.to_rfc3339()))?;

    if json {
        let out =
            serde_json::to_string_pretty(&result).context("Failed to serialize classification")?;
        println!("{out}");
    } else if !quiet {
        println!();
        println!("{}", "AR cutout classification".bold());
        println!("   {} {}", "Time:".dimmed(), format_time(result.time));
        println!(
            "   {} ({:.2}, {:.2})",
            "Position:".dimmed(),
            result.hgs_latitude,
            result.hgs_longitude
        );
        println!("   {} {}", "Hale:".dimmed(), label(&result.hale_class));
        println!("   {} {}", "McIntosh:".dimmed(), label(&result.mcintosh_class));
    }

    Ok(())
}
