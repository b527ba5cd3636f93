//! Report and snapshot types produced by the aggregation engine

pub mod connectivity;
pub mod reports;
pub mod snapshot;

pub use connectivity::{ConnectivityGraph, QubitGroup, QubitLink, QubitNode};
pub use reports::{
    BackendCompletion, ChartPoint, DailySummary, PeriodicPoint, PeriodicReport, StatusCounts,
};
pub use snapshot::{FleetReport, FleetSnapshot, SourceTelemetry};
