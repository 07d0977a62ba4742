// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! District boundary polygon and its geometry predicates.

use crate::error::ValidationError;
use crate::models::Coordinate;

/// An ordered ring of coordinates forming a district boundary.
///
/// The ring is implicitly closed: the last vertex connects back to the first,
/// and the first vertex is not required to repeat at the end. Immutable value
/// type; a zone owns its polygon exclusively and replaces it wholesale on
/// update.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Coordinate>,
}

impl Polygon {
    /// Create a polygon from at least 3 vertices.
    pub fn new(vertices: Vec<Coordinate>) -> Result<Self, ValidationError> {
        if vertices.len() < 3 {
            return Err(ValidationError::TooFewVertices {
                count: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Ray-casting (even-odd) point-in-polygon test.
    ///
    /// Casts a ray from the point toward increasing latitude and toggles on
    /// each edge crossing. This is a planar test on (longitude, latitude)
    /// pairs: geodesic curvature and the antimeridian are not handled. A
    /// point exactly on an edge may report either side depending on which
    /// edge the ray meets; callers must not rely on boundary points.
    pub fn contains(&self, point: Coordinate) -> bool {
        let lat = point.latitude();
        let lng = point.longitude();

        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let vi = self.vertices[i];
            let vj = self.vertices[j];

            if (vi.longitude() > lng) != (vj.longitude() > lng) {
                // Latitude of the edge at the point's longitude.
                let edge_lat = (vj.latitude() - vi.latitude()) * (lng - vi.longitude())
                    / (vj.longitude() - vi.longitude())
                    + vi.latitude();
                if lat < edge_lat {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Arithmetic mean of the vertices.
    ///
    /// This is a plain vertex mean, not an area-weighted centroid: for
    /// non-convex rings or rings with unevenly spaced (or repeated) vertices
    /// it can fall outside the polygon. Map display for existing boundaries
    /// depends on exactly this value, so it must not be upgraded to a true
    /// centroid.
    pub fn center(&self) -> Coordinate {
        let n = self.vertices.len() as f64;
        let lat_sum: f64 = self.vertices.iter().map(|v| v.latitude()).sum();
        let lng_sum: f64 = self.vertices.iter().map(|v| v.longitude()).sum();

        // The mean of in-range components stays in range.
        Coordinate {
            latitude: lat_sum / n,
            longitude: lng_sum / n,
        }
    }

    /// Approximate overlap test between two boundaries.
    ///
    /// True when any vertex of either polygon lies inside the other, or when
    /// any two edges properly cross. Collinear and endpoint-touching edges do
    /// not count as crossing. Good enough to answer "do these district
    /// boundaries conflict"; not a general polygon-boolean engine.
    pub fn intersects(&self, other: &Polygon) -> bool {
        // Disjoint bounding boxes can never intersect.
        if !self.bounds().overlaps(&other.bounds()) {
            return false;
        }

        if self.vertices.iter().any(|&v| other.contains(v)) {
            return true;
        }
        if other.vertices.iter().any(|&v| self.contains(v)) {
            return true;
        }

        for i in 0..self.vertices.len() {
            let p1 = self.vertices[i];
            let p2 = self.vertices[(i + 1) % self.vertices.len()];
            for k in 0..other.vertices.len() {
                let q1 = other.vertices[k];
                let q2 = other.vertices[(k + 1) % other.vertices.len()];
                if edges_cross(p1, p2, q1, q2) {
                    return true;
                }
            }
        }
        false
    }

    fn bounds(&self) -> Bounds {
        Bounds::of(&self.vertices)
    }
}

/// Strict segment-crossing test via orientation signs.
fn edges_cross(p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> bool {
    let d1 = direction(q1, q2, p1);
    let d2 = direction(q1, q2, p2);
    let d3 = direction(p1, p2, q1);
    let d4 = direction(p1, p2, q2);

    opposite_signs(d1, d2) && opposite_signs(d3, d4)
}

/// Cross product of (b - a) and (c - a) in (longitude, latitude) coordinates.
fn direction(a: Coordinate, b: Coordinate, c: Coordinate) -> f64 {
    (c.latitude() - a.latitude()) * (b.longitude() - a.longitude())
        - (b.latitude() - a.latitude()) * (c.longitude() - a.longitude())
}

fn opposite_signs(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

/// Axis-aligned bounding box used to short-circuit intersection tests.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl Bounds {
    fn of(vertices: &[Coordinate]) -> Self {
        let mut bounds = Bounds {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lng: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
        };
        for v in vertices {
            bounds.min_lat = bounds.min_lat.min(v.latitude());
            bounds.max_lat = bounds.max_lat.max(v.latitude());
            bounds.min_lng = bounds.min_lng.min(v.longitude());
            bounds.max_lng = bounds.max_lng.max(v.longitude());
        }
        bounds
    }

    fn overlaps(&self, other: &Bounds) -> bool {
        self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
            && self.min_lng <= other.max_lng
            && other.min_lng <= self.max_lng
    }
}
