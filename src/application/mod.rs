//! Application layer - Pipeline, planning, and command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The pipeline is the engine's only entry point; the planner and the
//! handler are the caller-side collaborators that feed it.

mod decision_pipeline;
mod rank_carriers;
mod report;
mod shipment_planner;

pub use decision_pipeline::{DecisionPipeline, DecisionRequest};
pub use rank_carriers::{RankCarriersCommand, RankCarriersHandler, RankCarriersResult};
pub use report::{
    DecisionReport, ReportedAlternative, ReportedConsistency, STRENGTH_THRESHOLD,
    WEAKNESS_THRESHOLD,
};
pub use shipment_planner::{PlannedDecision, ShipmentPlanner};
