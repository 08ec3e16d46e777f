//! Coordinate lattice for geo fan-out and the identity merge of its results.
//!
//! Offsets are converted with an equirectangular approximation: latitude
//! moves by `d / R`, longitude by `d / (R cos lat)`. This is accurate for
//! moderate radii away from the poles only.

use std::collections::HashMap;

use serde::Serialize;

use crate::item::NormalizedItem;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Largest lattice half-width, in steps. A radius/step ratio beyond this is
/// treated like an unusable step and yields the center only.
pub const MAX_GRID_STEPS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
    pub dx: i32,
    pub dy: i32,
    /// Straight-line distance from the center, in km.
    pub offset_km: f64,
}

impl GridPoint {
    /// `"lat,lng"` with six decimals, as the search endpoint expects.
    pub fn location(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Lattice points within `radius_km` of `center`, spaced `step_km` apart.
/// Ordered by `dx` then `dy`, so the output is stable for fixed inputs.
pub fn grid(center: Coordinate, step_km: f64, radius_km: f64) -> Vec<GridPoint> {
    let origin = GridPoint {
        lat: center.lat,
        lng: center.lng,
        dx: 0,
        dy: 0,
        offset_km: 0.0,
    };
    if !(step_km.is_finite() && step_km > 0.0) || !(radius_km.is_finite() && radius_km >= 0.0) {
        return vec![origin];
    }

    let ratio = (radius_km / step_km).ceil();
    if ratio > f64::from(MAX_GRID_STEPS) {
        return vec![origin];
    }
    let steps = ratio as i32;
    let lat_scale = (step_km / EARTH_RADIUS_KM).to_degrees();
    let lng_scale = (step_km / (EARTH_RADIUS_KM * center.lat.to_radians().cos())).to_degrees();

    let mut points = Vec::new();
    for dx in -steps..=steps {
        for dy in -steps..=steps {
            let offset_km = step_km * f64::from(dx).hypot(f64::from(dy));
            if offset_km > radius_km {
                continue;
            }
            points.push(GridPoint {
                lat: center.lat + lat_scale * f64::from(dx),
                lng: center.lng + lng_scale * f64::from(dy),
                dx,
                dy,
                offset_km,
            });
        }
    }
    points
}

/// Merge result lists keyed by identity. A later duplicate replaces the
/// earlier value but keeps the position where the id was first seen.
pub fn merge_by_identity<I>(branches: I) -> Vec<NormalizedItem>
where
    I: IntoIterator<Item = Vec<NormalizedItem>>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<NormalizedItem> = Vec::new();
    for item in branches.into_iter().flatten() {
        let existing = positions.get(item.identity()).copied();
        if let Some(idx) = existing {
            merged[idx] = item;
        } else {
            positions.insert(item.identity().to_string(), merged.len());
            merged.push(item);
        }
    }
    merged
}
