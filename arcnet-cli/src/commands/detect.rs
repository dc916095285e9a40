//! Detect command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use arcnet_core::detect_ars;
use chrono::{DateTime, Utc};
use colored::Colorize;
use tracing::info;

use crate::utils::{format_time, label, open_archive};

/// Execute the detect command.
pub async fn execute(
    archive_dir: Option<PathBuf>,
    time: DateTime<Utc>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let archive = open_archive(archive_dir)?;
    info!(archive = %archive.source_id(), "Opened SRS archive");

    let detections = detect_ars(archive.as_ref(), time)
        .await
        .with_context(|| format!("Detection failed for {}", time.to_rfc3339()))?;

    if json {
        let out =
            serde_json::to_string_pretty(&detections).context("Failed to serialize detections")?;
        println!("{out}");
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!();
    println!(
        "{} {}",
        "Full-disk detection at".bold(),
        format_time(time).bold()
    );

    if detections.is_empty() {
        println!("   {}", "No active regions catalogued".dimmed());
        return Ok(());
    }

    for d in &detections {
        println!(
            "   [{:>7.2}, {:>7.2}] -> [{:>7.2}, {:>7.2}]  {:<12} {}",
            d.bbox.bottom_left.latitude,
            d.bbox.bottom_left.longitude,
            d.bbox.top_right.latitude,
            d.bbox.top_right.longitude,
            label(&d.hale_class),
            label(&d.mcintosh_class)
        );
    }
    println!("   {} {}", "Regions:".dimmed(), detections.len());

    Ok(())
}
