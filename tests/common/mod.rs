// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use district_zones::models::{Coordinate, Polygon, ZoneCandidate};

/// Build a coordinate, panicking on invalid test input.
#[allow(dead_code)]
pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("valid test coordinate")
}

/// Build a polygon from (lat, lng) pairs.
#[allow(dead_code)]
pub fn polygon(points: &[(f64, f64)]) -> Polygon {
    let vertices = points.iter().map(|&(lat, lng)| coord(lat, lng)).collect();
    Polygon::new(vertices).expect("valid test polygon")
}

/// Axis-aligned square with its lower-left corner at (lat, lng).
#[allow(dead_code)]
pub fn square(lat: f64, lng: f64, side: f64) -> Polygon {
    polygon(&[
        (lat, lng),
        (lat, lng + side),
        (lat + side, lng + side),
        (lat + side, lng),
    ])
}

/// Candidate carrying geometry only.
#[allow(dead_code)]
pub fn candidate(name: &str, poly: Polygon) -> ZoneCandidate {
    ZoneCandidate::new(name, Some(poly))
}
