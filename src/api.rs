//! Public API surface for the analytics backend.
//!
//! This file consolidates the DTO types produced by the engine.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::wire::DataAnomaly;
pub use crate::services::alerts::AlertBucket;
pub use crate::services::alerts::AlertEntry;
pub use crate::services::alerts::AlertKind;
pub use crate::services::alerts::ConditionBand;
pub use crate::services::cycle_report::CounterCrossCheck;
pub use crate::services::cycle_report::CycleReport;
pub use crate::services::distributions::CategoryCount;
pub use crate::services::geo::GpsFlag;
pub use crate::services::geo::GpsIssue;
pub use crate::services::ranking::RankDirection;
pub use crate::services::ranking::RankedEntry;
pub use crate::services::station_report::StationDetail;
pub use crate::services::station_report::StationOpsReport;
pub use crate::services::station_report::StationSummary;
pub use crate::services::temporal::Staleness;
pub use crate::services::velocity::CycleVelocity;

use serde::{Deserialize, Serialize};

/// Station identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId(pub i64);

/// Inspection identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InspectionId(pub i64);

/// Fumigation cycle identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CycleId(pub i64);

/// Room fumigation record identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomFumigationId(pub i64);

impl StationId {
    pub fn new(value: i64) -> Self {
        StationId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl InspectionId {
    pub fn new(value: i64) -> Self {
        InspectionId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl CycleId {
    pub fn new(value: i64) -> Self {
        CycleId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl RoomFumigationId {
    pub fn new(value: i64) -> Self {
        RoomFumigationId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for InspectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for RoomFumigationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StationId> for i64 {
    fn from(id: StationId) -> Self {
        id.0
    }
}
impl From<CycleId> for i64 {
    fn from(id: CycleId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_newtypes() {
        let station = StationId::new(7);
        assert_eq!(station.value(), 7);
        assert_eq!(format!("{}", station), "7");

        let cycle = CycleId::new(42);
        assert_eq!(i64::from(cycle), 42);
    }

    #[test]
    fn test_id_equality_and_hash() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        seen.insert(StationId::new(1));
        seen.insert(StationId::new(1));
        seen.insert(StationId::new(2));
        assert_eq!(seen.len(), 2);
    }
}
