//! Example showing the NOAA archive lookup with tracing enabled.
//!
//! Run with: cargo run -p arcnet-core --example srs_lookup -- 2022-11-12T13:14:15Z

use arcnet_core::{fetch_report, NoaaArchive, NoaaArchiveConfig};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::new("arcnet_core=debug,info"))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let time: DateTime<Utc> = match std::env::args().nth(1).map(|arg| arg.parse()) {
        Some(Ok(time)) => time,
        Some(Err(e)) => {
            eprintln!("Invalid time: {}", e);
            return;
        }
        None => Utc::now(),
    };

    let config = NoaaArchiveConfig {
        timeout: Duration::from_secs(30),
        max_retries: 2,
        ..Default::default()
    };

    println!("Config: {:?}\n", config);

    let archive = match NoaaArchive::with_config(config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match fetch_report(&archive, time).await {
        Ok(report) => {
            println!("\nReport for {}", report.time.format("%Y-%m-%d"));
            for entry in report.active_regions() {
                println!(
                    "   {:>5}  lat {:>6.1}  lon {:>6.1}  {:<4} {}",
                    entry.number,
                    entry.position.latitude,
                    entry.position.longitude,
                    entry.mcintosh_class,
                    entry.hale_class
                );
            }
        }
        Err(e) => {
            println!("\nFailed: {}", e);
        }
    }
}
