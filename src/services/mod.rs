// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - zone registry and wire conversion.

pub mod geojson;
pub mod registry;

pub use self::geojson::{geojson_to_polygon, polygon_to_geojson, record_to_candidate};
pub use registry::{detect_overlaps, ImportError, ZoneRegistry};
