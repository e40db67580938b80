//! The aggregation engine.
//!
//! Each module is one pipeline stage over immutable snapshot slices: pure
//! functions of the form `f(records, params) -> summary`, no I/O and no
//! mutation. The two report assemblers compose the stages and carry the only
//! async code in this tree, the `get_*` twins that fetch their inputs from an
//! injected repository.

pub mod alerts;
pub mod cycle_report;
pub mod distributions;
pub mod enrichment;
pub mod geo;
pub mod ranking;
pub mod station_report;
pub mod temporal;
pub mod velocity;

pub use alerts::{AlertBucket, AlertEntry, AlertKind, ConditionBand};
pub use cycle_report::{CounterCrossCheck, CycleReport};
pub use distributions::CategoryCount;
pub use geo::{GpsFlag, GpsIssue};
pub use ranking::{RankDirection, RankedEntry};
pub use station_report::{StationDetail, StationOpsReport, StationSummary};
pub use temporal::Staleness;
pub use velocity::CycleVelocity;
