// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON wire conversion for zone boundaries.

use geojson::{Geometry, Value};

use crate::models::{Coordinate, Polygon, ZoneCandidate, ZoneRecord};

/// Encode a boundary as a GeoJSON Polygon geometry.
///
/// Emits a single outer ring with longitude-first positions, the inverse of
/// the internal latitude-first order. Vertices are written as stored; the
/// ring stays implicitly closed. `None` becomes a Polygon geometry with an
/// empty coordinates array, the placeholder for zones without geometry.
pub fn polygon_to_geojson(polygon: Option<&Polygon>) -> Geometry {
    let rings = match polygon {
        Some(p) => {
            let ring = p
                .vertices()
                .iter()
                .map(|v| vec![v.longitude(), v.latitude()])
                .collect();
            vec![ring]
        }
        None => Vec::new(),
    };
    Geometry::new(Value::Polygon(rings))
}

/// Decode a GeoJSON Polygon geometry into a boundary.
///
/// Reads only the first (outer) ring; holes are ignored. Each `[lng, lat]`
/// position maps to one vertex. Anything malformed (wrong geometry type,
/// empty coordinates, short positions, out-of-range values, fewer than 3
/// vertices) decodes to `None` rather than an error, so a bad boundary from
/// a heterogeneous import source degrades to "no geometry".
pub fn geojson_to_polygon(geometry: &Geometry) -> Option<Polygon> {
    let rings = match &geometry.value {
        Value::Polygon(rings) => rings,
        _ => return None,
    };
    let ring = rings.first()?;

    let mut vertices = Vec::with_capacity(ring.len());
    for position in ring {
        let lng = *position.first()?;
        let lat = *position.get(1)?;
        vertices.push(Coordinate::new(lat, lng).ok()?);
    }
    Polygon::new(vertices).ok()
}

/// True for the placeholder geometry that encodes "no boundary".
pub fn is_empty_boundary(geometry: &Geometry) -> bool {
    matches!(&geometry.value, Value::Polygon(rings) if rings.is_empty())
}

/// Decode a wire record into an import candidate.
pub fn record_to_candidate(record: &ZoneRecord) -> ZoneCandidate {
    let polygon = record.boundary.as_ref().and_then(geojson_to_polygon);
    let malformed = record
        .boundary
        .as_ref()
        .is_some_and(|g| !is_empty_boundary(g));
    if malformed && polygon.is_none() {
        tracing::warn!(
            zone = %record.name,
            "Malformed boundary geometry, importing without geometry"
        );
    }

    ZoneCandidate {
        name: record.name.clone(),
        polygon,
        color: record.color.clone(),
        description: record.description.clone(),
        area_km2: record.area_km2,
        population: record.population,
        is_active: record.is_active,
    }
}
