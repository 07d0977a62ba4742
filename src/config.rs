//! Configuration for the import/export tool, loaded from environment variables.

use std::env;

/// Runtime configuration for the zone import/export tool.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the authoritative zone boundaries file
    pub zones_file: String,
    /// Optional candidate batch to import
    pub import_file: Option<String>,
    /// Whether to reject batches whose boundaries overlap
    pub validate_overlaps: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            zones_file: env::var("ZONES_FILE")
                .unwrap_or_else(|_| "data/district_boundaries.geojson".to_string()),
            import_file: env::var("IMPORT_FILE").ok(),
            validate_overlaps: env::var("SKIP_OVERLAP_VALIDATION")
                .map(|v| v != "1" && !v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        }
    }
}
