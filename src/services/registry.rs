// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zone registry: point lookup, batch overlap validation, import/export.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use geojson::{feature::Id, Feature, FeatureCollection, GeoJson};

use crate::models::{
    Coordinate, ImportSummary, OverlapReport, Zone, ZoneCandidate, ZoneConflict, ZoneRecord,
};
use crate::services::geojson::{
    geojson_to_polygon, is_empty_boundary, polygon_to_geojson, record_to_candidate,
};

/// Registry of district zones, keyed by ID.
///
/// Individual zone creates and updates are applied atomically per entry.
/// Every geometry operation works off an owned snapshot of the active set
/// taken at call start, so a concurrent import cannot interleave partial
/// mutations into a single validation or lookup pass. Batch import is not
/// atomic across the whole batch.
#[derive(Default)]
pub struct ZoneRegistry {
    zones: DashMap<u64, Zone>,
    next_id: AtomicU64,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bootstrap a registry from a GeoJSON FeatureCollection file.
    ///
    /// Stored boundaries are authoritative, so the batch is committed without
    /// overlap validation.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| ImportError::Io(e.to_string()))?;

        let registry = Self::new();
        let summary = registry.import_geojson(&json_data, false)?;
        tracing::info!(count = summary.created, "Loaded zones");
        Ok(registry)
    }

    // ─── Zone Access ─────────────────────────────────────────────

    pub fn get(&self, id: u64) -> Option<Zone> {
        self.zones.get(&id).map(|z| z.value().clone())
    }

    pub fn get_by_name(&self, name: &str) -> Option<Zone> {
        self.zones
            .iter()
            .find(|z| z.name == name)
            .map(|z| z.value().clone())
    }

    /// Snapshot of the active zones, ordered by ID.
    pub fn active_zones(&self) -> Vec<Zone> {
        let mut zones: Vec<Zone> = self
            .zones
            .iter()
            .filter(|z| z.is_active)
            .map(|z| z.value().clone())
            .collect();
        zones.sort_by_key(|z| z.id);
        zones
    }

    /// Total zone count, active and deactivated.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Soft-delete a zone. Returns false if the ID is unknown.
    pub fn deactivate(&self, id: u64) -> bool {
        match self.zones.get_mut(&id) {
            Some(mut zone) => {
                zone.is_active = false;
                tracing::info!(id, name = %zone.name, "Zone deactivated");
                true
            }
            None => false,
        }
    }

    // ─── Geometry Operations ─────────────────────────────────────

    /// Find the zone whose boundary contains a point.
    ///
    /// Linear scan of the active snapshot in ID order; the first containing
    /// zone wins. If active zones overlap (possible when validation was
    /// skipped on import), the winner is order-dependent: no priority rule
    /// breaks the tie.
    pub fn lookup_by_point(&self, point: Coordinate) -> Option<Zone> {
        self.active_zones()
            .into_iter()
            .find(|z| z.polygon.as_ref().is_some_and(|p| p.contains(point)))
    }

    /// Validate a candidate batch against itself and the live active set.
    pub fn validate_batch(&self, candidates: &[ZoneCandidate]) -> OverlapReport {
        detect_overlaps(candidates, &self.active_zones())
    }

    // ─── Import / Export ─────────────────────────────────────────

    /// Commit a candidate batch.
    ///
    /// With `validate_overlaps` set, a batch with conflicts is rejected whole
    /// and the registry is left untouched. Candidates are matched to existing
    /// zones by name: a match replaces the zone's boundary and metadata, a
    /// miss creates a new zone. Candidates arrive fully decoded, so the
    /// commit loop itself cannot fail part-way through the batch.
    pub fn import_batch(
        &self,
        candidates: Vec<ZoneCandidate>,
        validate_overlaps: bool,
    ) -> Result<ImportSummary, ImportError> {
        if validate_overlaps {
            let report = self.validate_batch(&candidates);
            if report.has_overlaps {
                tracing::warn!(
                    conflicts = report.conflicts.len(),
                    "Import rejected: zone boundaries overlap"
                );
                return Err(ImportError::OverlapConflict(report));
            }
        }

        let mut name_index: HashMap<String, u64> = self
            .zones
            .iter()
            .map(|z| (z.name.clone(), z.id))
            .collect();

        let mut created = 0u32;
        let mut updated = 0u32;
        for candidate in candidates {
            match name_index.get(&candidate.name) {
                Some(&id) => {
                    if let Some(mut zone) = self.zones.get_mut(&id) {
                        zone.apply_candidate(candidate);
                        updated += 1;
                    }
                }
                None => {
                    let id = self.allocate_id();
                    name_index.insert(candidate.name.clone(), id);
                    self.zones.insert(id, Zone::from_candidate(id, candidate));
                    created += 1;
                }
            }
        }

        let summary = ImportSummary {
            created,
            updated,
            imported_at: chrono::Utc::now().to_rfc3339(),
        };
        tracing::info!(
            created = summary.created,
            updated = summary.updated,
            "Zone batch imported"
        );
        Ok(summary)
    }

    /// Import zone records from the persistence layer or an API payload.
    ///
    /// Record IDs are ignored; candidates match existing zones by name.
    pub fn import_records(
        &self,
        records: &[ZoneRecord],
        validate_overlaps: bool,
    ) -> Result<ImportSummary, ImportError> {
        let candidates = records.iter().map(record_to_candidate).collect();
        self.import_batch(candidates, validate_overlaps)
    }

    /// Import a GeoJSON FeatureCollection of zone boundaries.
    ///
    /// Each feature becomes one candidate; the zone name and display metadata
    /// come from feature properties. Features without a usable name are
    /// skipped, and a malformed geometry degrades to a zone without geometry.
    pub fn import_geojson(
        &self,
        json_data: &str,
        validate_overlaps: bool,
    ) -> Result<ImportSummary, ImportError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| ImportError::Parse(e.to_string()))?;

        let collection = match geojson {
            GeoJson::FeatureCollection(collection) => collection,
            _ => return Err(ImportError::Parse("expected a FeatureCollection".to_string())),
        };

        let mut candidates = Vec::new();
        for feature in collection.features {
            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            if name.is_empty() {
                tracing::warn!("Skipping feature without a zone name");
                continue;
            }

            let polygon = feature.geometry.as_ref().and_then(geojson_to_polygon);
            let malformed = feature
                .geometry
                .as_ref()
                .is_some_and(|g| !is_empty_boundary(g));
            if malformed && polygon.is_none() {
                tracing::warn!(
                    zone = %name,
                    "Malformed boundary geometry, importing without geometry"
                );
            }

            candidates.push(ZoneCandidate {
                name,
                polygon,
                color: property_string(&feature, "color"),
                description: property_string(&feature, "description"),
                area_km2: feature.property("area_km2").and_then(|v| v.as_f64()),
                population: feature.property("population").and_then(|v| v.as_u64()),
                is_active: feature
                    .property("is_active")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(true),
            });
        }

        self.import_batch(candidates, validate_overlaps)
    }

    /// Export the active zones as persistence records.
    pub fn export_records(&self) -> Vec<ZoneRecord> {
        self.active_zones()
            .into_iter()
            .map(|zone| ZoneRecord {
                id: Some(zone.id),
                name: zone.name,
                boundary: zone.polygon.as_ref().map(|p| polygon_to_geojson(Some(p))),
                color: zone.color,
                description: zone.description,
                area_km2: zone.area_km2,
                population: zone.population,
                is_active: zone.is_active,
            })
            .collect()
    }

    /// Export the active zones as a GeoJSON FeatureCollection.
    pub fn export_geojson(&self) -> GeoJson {
        let features = self
            .active_zones()
            .into_iter()
            .map(|zone| {
                let geometry = polygon_to_geojson(zone.polygon.as_ref());

                let mut properties = serde_json::Map::new();
                properties.insert("name".to_string(), serde_json::json!(zone.name));
                if let Some(color) = zone.color {
                    properties.insert("color".to_string(), serde_json::json!(color));
                }
                if let Some(description) = zone.description {
                    properties.insert("description".to_string(), serde_json::json!(description));
                }
                if let Some(area_km2) = zone.area_km2 {
                    properties.insert("area_km2".to_string(), serde_json::json!(area_km2));
                }
                if let Some(population) = zone.population {
                    properties.insert("population".to_string(), serde_json::json!(population));
                }
                properties.insert("is_active".to_string(), serde_json::json!(zone.is_active));

                Feature {
                    bbox: None,
                    geometry: Some(geometry),
                    id: Some(Id::Number(zone.id.into())),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Pairwise overlap validation for an import batch.
///
/// Checks every unordered pair of distinct candidates, then every candidate
/// against every existing active zone with geometry. A candidate updating the
/// existing zone of the same name is exempt from colliding with its own prior
/// boundary. Quadratic in batch size and zone count, which is fine for
/// batches in the tens to low hundreds.
pub fn detect_overlaps(candidates: &[ZoneCandidate], existing: &[Zone]) -> OverlapReport {
    let mut conflicts = Vec::new();

    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            if let (Some(a), Some(b)) = (&candidates[i].polygon, &candidates[j].polygon) {
                if a.intersects(b) {
                    conflicts.push(ZoneConflict {
                        district1_name: candidates[i].name.clone(),
                        district2_name: candidates[j].name.clone(),
                        district2_id: None,
                    });
                }
            }
        }
    }

    for candidate in candidates {
        let candidate_polygon = match &candidate.polygon {
            Some(polygon) => polygon,
            None => continue,
        };
        for zone in existing {
            if zone.name == candidate.name {
                // Updating a zone may overlap its own prior boundary.
                continue;
            }
            if let Some(zone_polygon) = &zone.polygon {
                if candidate_polygon.intersects(zone_polygon) {
                    conflicts.push(ZoneConflict {
                        district1_name: candidate.name.clone(),
                        district2_name: zone.name.clone(),
                        district2_id: Some(zone.id),
                    });
                }
            }
        }
    }

    if !conflicts.is_empty() {
        tracing::debug!(count = conflicts.len(), "Overlap conflicts detected");
    }

    OverlapReport {
        has_overlaps: !conflicts.is_empty(),
        conflicts,
    }
}

fn property_string(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Errors from zone import operations.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("Failed to parse GeoJSON: {0}")]
    Parse(String),

    #[error("Zone boundaries overlap: {} conflict(s)", .0.conflicts.len())]
    OverlapConflict(OverlapReport),
}
