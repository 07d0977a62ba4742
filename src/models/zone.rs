// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! District zone model and import/export records.

use serde::{Deserialize, Serialize};

use crate::models::Polygon;

/// A district zone held by the registry.
///
/// Zones are soft-deleted by clearing `is_active`, never destroyed. The
/// boundary is replaced wholesale on update, never edited vertex-by-vertex.
#[derive(Debug, Clone)]
pub struct Zone {
    /// Registry-assigned zone ID
    pub id: u64,
    /// Zone name (unique within the active set; import matching key)
    pub name: String,
    /// Boundary geometry, if the zone has one
    pub polygon: Option<Polygon>,
    /// Display color (e.g. "#2e7d32")
    pub color: Option<String>,
    /// Human-readable description
    pub description: Option<String>,
    /// Area in square kilometers
    pub area_km2: Option<f64>,
    /// Resident population
    pub population: Option<u64>,
    /// Active flag (false = soft-deleted)
    pub is_active: bool,
}

impl Zone {
    /// Create a zone from an import candidate.
    pub fn from_candidate(id: u64, candidate: ZoneCandidate) -> Self {
        Self {
            id,
            name: candidate.name,
            polygon: candidate.polygon,
            color: candidate.color,
            description: candidate.description,
            area_km2: candidate.area_km2,
            population: candidate.population,
            is_active: candidate.is_active,
        }
    }

    /// Replace this zone's boundary and metadata from an import candidate.
    pub fn apply_candidate(&mut self, candidate: ZoneCandidate) {
        self.polygon = candidate.polygon;
        self.color = candidate.color;
        self.description = candidate.description;
        self.area_km2 = candidate.area_km2;
        self.population = candidate.population;
        self.is_active = candidate.is_active;
    }
}

/// Zone record as exchanged with the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Zone ID (absent for records not yet stored)
    pub id: Option<u64>,
    /// Zone name
    pub name: String,
    /// Boundary as a GeoJSON Polygon geometry
    pub boundary: Option<geojson::Geometry>,
    /// Display color
    pub color: Option<String>,
    /// Human-readable description
    pub description: Option<String>,
    /// Area in square kilometers
    pub area_km2: Option<f64>,
    /// Resident population
    pub population: Option<u64>,
    /// Active flag
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// An import candidate: a zone record with its boundary already decoded.
#[derive(Debug, Clone)]
pub struct ZoneCandidate {
    pub name: String,
    pub polygon: Option<Polygon>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub area_km2: Option<f64>,
    pub population: Option<u64>,
    pub is_active: bool,
}

impl ZoneCandidate {
    /// Bare candidate with geometry only; metadata left empty, active.
    pub fn new(name: impl Into<String>, polygon: Option<Polygon>) -> Self {
        Self {
            name: name.into(),
            polygon,
            color: None,
            description: None,
            area_km2: None,
            population: None,
            is_active: true,
        }
    }
}

/// One conflicting pair found by batch overlap validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConflict {
    /// Candidate zone name
    pub district1_name: String,
    /// The other candidate's or existing zone's name
    pub district2_name: String,
    /// Existing zone ID (absent for candidate-candidate conflicts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district2_id: Option<u64>,
}

/// Result of validating a candidate batch against itself and the active set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlapReport {
    pub has_overlaps: bool,
    pub conflicts: Vec<ZoneConflict>,
}

/// Summary of a committed import batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Zones created
    pub created: u32,
    /// Existing zones updated (matched by name)
    pub updated: u32,
    /// When the batch was committed (RFC 3339)
    pub imported_at: String,
}
