// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end import/export tests against the committed fixture data.
//!
//! IMPORTANT: If these tests fail, it indicates breakage in the zone import
//! pipeline that operators won't notice until a batch silently loses
//! districts.

mod common;

use common::coord;
use district_zones::models::ZoneRecord;
use district_zones::services::{geojson_to_polygon, ZoneRegistry};
use geojson::GeoJson;

/// Load the committed district boundaries for testing.
fn load_test_registry() -> ZoneRegistry {
    ZoneRegistry::load_from_file("data/district_boundaries.geojson")
        .expect("Failed to load district boundaries - is data/ committed?")
}

#[test]
fn test_registry_loads_fixture() {
    let registry = load_test_registry();

    assert_eq!(registry.len(), 5, "Expected all 5 fixture districts");

    let names: Vec<String> = registry
        .active_zones()
        .iter()
        .map(|z| z.name.clone())
        .collect();
    assert!(names.iter().any(|n| n == "Old Town"));
    assert!(names.iter().any(|n| n == "Harbor District"));
    assert!(names.iter().any(|n| n == "Riverside"));

    // The survey-pending district loads without geometry.
    let industrial = registry
        .get_by_name("Industrial Park")
        .expect("Industrial Park should load");
    assert!(industrial.polygon.is_none());
    assert!(industrial.is_active);
}

#[test]
fn test_fixture_metadata_preserved() {
    let registry = load_test_registry();

    let old_town = registry.get_by_name("Old Town").expect("Old Town exists");
    assert_eq!(old_town.color.as_deref(), Some("#c62828"));
    assert_eq!(old_town.description.as_deref(), Some("Historic center"));
    assert_eq!(old_town.population, Some(18900));
    assert_eq!(old_town.area_km2, Some(5.1));
}

#[test]
fn test_lookup_by_point_on_fixture() {
    let registry = load_test_registry();

    let hit = registry
        .lookup_by_point(coord(56.95, 24.105))
        .expect("point should fall in Old Town");
    assert_eq!(hit.name, "Old Town");

    let hit = registry
        .lookup_by_point(coord(56.95, 24.04))
        .expect("point should fall in Riverside");
    assert_eq!(hit.name, "Riverside");

    // A point in the buffer strip between Riverside and Harbor District.
    assert!(registry.lookup_by_point(coord(56.9602, 24.02)).is_none());

    // Far outside the city.
    assert!(registry.lookup_by_point(coord(58.0, 24.0)).is_none());
}

#[test]
fn test_import_candidate_file() {
    let registry = load_test_registry();
    let json_data = std::fs::read_to_string("tests/fixtures/import_candidates.geojson")
        .expect("Failed to read candidate fixture");

    let summary = registry
        .import_geojson(&json_data, true)
        .expect("candidate batch should validate cleanly");

    // One new district, one same-name update; the nameless feature skipped.
    assert_eq!(summary.created, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(registry.len(), 6);

    let greenfield = registry
        .get_by_name("Greenfield")
        .expect("Greenfield created");
    assert!(greenfield.polygon.is_some());
    assert_eq!(greenfield.population, Some(8600));

    // The Old Town update replaced boundary and metadata wholesale.
    let old_town = registry.get_by_name("Old Town").expect("Old Town exists");
    assert_eq!(old_town.population, Some(19100));
    assert_eq!(old_town.area_km2, Some(5.4));
    assert!(old_town
        .polygon
        .as_ref()
        .expect("Old Town keeps geometry")
        .contains(coord(56.939, 24.09)));
}

#[test]
fn test_import_conflicting_candidate_rejected() {
    let registry = load_test_registry();

    // Overlaps Riverside without sharing its name.
    let json_data = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"name": "Annex"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[24.01, 56.945], [24.03, 56.945], [24.03, 56.955], [24.01, 56.955], [24.01, 56.945]]]
            }
        }]
    }"#;

    let result = registry.import_geojson(json_data, true);
    assert!(result.is_err(), "overlapping candidate must be rejected");
    assert_eq!(registry.len(), 5);
    assert!(registry.get_by_name("Annex").is_none());
}

#[test]
fn test_import_invalid_json_is_parse_error() {
    let registry = ZoneRegistry::new();
    assert!(registry.import_geojson("not geojson", true).is_err());
    assert!(registry.import_geojson("{\"type\": \"Point\"}", true).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let result = ZoneRegistry::load_from_file("data/does_not_exist.geojson");
    assert!(result.is_err());
}

#[test]
fn test_export_round_trips_through_import() {
    let registry = load_test_registry();
    let exported = registry.export_geojson().to_string();

    let reimported = ZoneRegistry::new();
    let summary = reimported
        .import_geojson(&exported, true)
        .expect("exported collection should re-import cleanly");

    assert_eq!(summary.created, 5);

    let old_town = reimported.get_by_name("Old Town").expect("Old Town exists");
    assert_eq!(old_town.population, Some(18900));
    let hit = reimported
        .lookup_by_point(coord(56.95, 24.105))
        .expect("containment survives the round trip");
    assert_eq!(hit.name, "Old Town");
}

#[test]
fn test_export_skips_deactivated_zones() {
    let registry = load_test_registry();
    let riverside = registry.get_by_name("Riverside").expect("Riverside exists");

    assert!(registry.deactivate(riverside.id));
    assert!(!registry.deactivate(9999), "unknown id reports false");

    assert_eq!(registry.active_zones().len(), 4);
    assert!(registry.lookup_by_point(coord(56.95, 24.04)).is_none());

    let records = registry.export_records();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.name != "Riverside"));

    // The zone still exists for id lookups (soft delete, not destruction).
    let still_there = registry.get(riverside.id).expect("zone still stored");
    assert!(!still_there.is_active);
}

#[test]
fn test_export_records_carry_boundaries() {
    let registry = load_test_registry();
    let records = registry.export_records();

    let old_town = records
        .iter()
        .find(|r| r.name == "Old Town")
        .expect("Old Town exported");
    assert!(old_town.id.is_some());
    assert!(old_town.is_active);

    let boundary = old_town.boundary.as_ref().expect("boundary present");
    let polygon = geojson_to_polygon(boundary).expect("boundary decodes");
    assert!(polygon.contains(coord(56.95, 24.105)));

    // Records round-trip through plain JSON for the persistence layer.
    let json = serde_json::to_string(old_town).expect("record serializes");
    let parsed: ZoneRecord = serde_json::from_str(&json).expect("record parses");
    assert_eq!(parsed.name, "Old Town");
    assert!(parsed.boundary.is_some());
}

#[test]
fn test_import_records_by_name() {
    let registry = load_test_registry();
    let mut records = registry.export_records();

    // Tweak one record and feed the batch back in: all updates, no creates.
    for record in &mut records {
        if record.name == "Harbor District" {
            record.population = Some(13000);
        }
    }

    let summary = registry
        .import_records(&records, true)
        .expect("re-import of exported records is conflict-free");
    assert_eq!(summary.created, 0);
    assert_eq!(summary.updated, 5);

    let harbor = registry
        .get_by_name("Harbor District")
        .expect("Harbor District exists");
    assert_eq!(harbor.population, Some(13000));
}

#[test]
fn test_exported_collection_is_valid_geojson() {
    let registry = load_test_registry();

    let exported = registry.export_geojson().to_string();
    let parsed: GeoJson = exported.parse().expect("export parses as GeoJSON");

    match parsed {
        GeoJson::FeatureCollection(collection) => {
            assert_eq!(collection.features.len(), 5);
            for feature in &collection.features {
                let name = feature.property("name").and_then(|v| v.as_str());
                assert!(name.is_some(), "every exported feature is named");
            }
        }
        other => panic!("expected FeatureCollection, got {:?}", other),
    }
}
