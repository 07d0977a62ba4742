// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! District zone import/export tool.
//!
//! Loads the authoritative zone boundaries, optionally validates and commits
//! a candidate batch, and prints the resulting FeatureCollection to stdout.

use district_zones::config::Config;
use district_zones::services::{ImportError, ZoneRegistry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env();
    tracing::info!(path = %config.zones_file, "Loading zone boundaries");

    let registry =
        ZoneRegistry::load_from_file(&config.zones_file).expect("Failed to load zone boundaries");
    tracing::info!(count = registry.len(), "Zone boundaries loaded");

    if let Some(import_file) = &config.import_file {
        let json_data = std::fs::read_to_string(import_file)?;
        match registry.import_geojson(&json_data, config.validate_overlaps) {
            Ok(summary) => {
                tracing::info!(
                    created = summary.created,
                    updated = summary.updated,
                    "Import committed"
                );
            }
            Err(ImportError::OverlapConflict(report)) => {
                tracing::error!(conflicts = report.conflicts.len(), "Import rejected");
                println!("{}", serde_json::to_string_pretty(&report)?);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("{}", registry.export_geojson());
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("district_zones=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
