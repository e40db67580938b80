//! GPS consistency checks between reported and surveyed coordinates.

use serde::{Deserialize, Serialize};

use crate::api::InspectionId;
use crate::models::{GeoPoint, Inspection, Station, StationKind};

/// Mean earth radius in meters (spherical approximation).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Reported coordinates farther than this from the station's surveyed
/// position are flagged.
pub const GPS_DISTANCE_THRESHOLD_M: f64 = 30.0;

/// Kind of GPS inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GpsIssue {
    /// No coordinate captured where one was expected.
    MissingGps,
    /// Reported coordinate too far from the surveyed position.
    TooFar,
}

/// A flagged inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsFlag {
    pub station_code: String,
    pub inspection_id: InspectionId,
    pub issue: GpsIssue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
}

/// Great-circle distance between two points via the haversine formula.
///
/// Inputs in decimal degrees. The full formula is used rather than a
/// flat-earth shortcut so the function stays correct near poles and the
/// antimeridian, even though a single hotel property never gets there.
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Check one inspection's reported coordinate against its station.
///
/// A missing coordinate is only a defect for outdoor rodent-bait stations;
/// indoor kinds are exempt because indoor GPS is unreliable by design.
/// Returns `None` when nothing is wrong.
pub fn check_inspection_gps(station: &Station, inspection: &Inspection) -> Option<GpsFlag> {
    match (inspection.location, station.location) {
        (None, _) => (station.kind == StationKind::Rodent).then(|| GpsFlag {
            station_code: station.code.clone(),
            inspection_id: inspection.id,
            issue: GpsIssue::MissingGps,
            distance_m: None,
        }),
        (Some(reported), Some(fixed)) => {
            let distance = haversine_distance_m(reported, fixed);
            (distance > GPS_DISTANCE_THRESHOLD_M).then(|| GpsFlag {
                station_code: station.code.clone(),
                inspection_id: inspection.id,
                issue: GpsIssue::TooFar,
                distance_m: Some(distance),
            })
        }
        // Station has no surveyed position: nothing to compare against
        (Some(_), None) => None,
    }
}

/// GPS flags for every inspection joined to its station.
/// Inspections referencing unknown stations are skipped.
pub fn gps_flags(stations: &[Station], inspections: &[Inspection]) -> Vec<GpsFlag> {
    use std::collections::HashMap;

    let by_id: HashMap<_, &Station> = stations.iter().map(|s| (s.id, s)).collect();
    inspections
        .iter()
        .filter_map(|inspection| {
            let station = by_id.get(&inspection.station_id)?;
            check_inspection_gps(station, inspection)
        })
        .collect()
}
