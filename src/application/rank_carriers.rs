//! RankCarriersHandler - Command handler for ranking carriers for a shipment.

use std::sync::Arc;

use crate::application::{DecisionPipeline, ShipmentPlanner};
use crate::domain::foundation::DomainError;
use crate::domain::gate::GatedOutcome;
use crate::domain::shipment::{CarrierCatalog, ShipmentContext};
use crate::ports::CarrierCatalogSource;

/// Command to rank the catalog for one shipment.
#[derive(Debug, Clone)]
pub struct RankCarriersCommand {
    pub shipment: ShipmentContext,
    /// Mark the result as a stand-in; it can never be truth-bound.
    pub placeholder: bool,
}

impl RankCarriersCommand {
    pub fn new(shipment: ShipmentContext) -> Self {
        Self {
            shipment,
            placeholder: false,
        }
    }
}

/// Result of a ranking: the gated outcome and the catalog it ranked.
#[derive(Debug, Clone)]
pub struct RankCarriersResult {
    pub gated: GatedOutcome,
    pub catalog: CarrierCatalog,
}

/// Handler for ranking carriers.
pub struct RankCarriersHandler {
    catalog_source: Arc<dyn CarrierCatalogSource>,
    planner: ShipmentPlanner,
    pipeline: DecisionPipeline,
}

impl RankCarriersHandler {
    pub fn new(
        catalog_source: Arc<dyn CarrierCatalogSource>,
        planner: ShipmentPlanner,
        pipeline: DecisionPipeline,
    ) -> Self {
        Self {
            catalog_source,
            planner,
            pipeline,
        }
    }

    pub fn pipeline(&self) -> &DecisionPipeline {
        &self.pipeline
    }

    pub fn handle(&self, cmd: RankCarriersCommand) -> Result<RankCarriersResult, DomainError> {
        // 1. Snapshot the catalog
        let catalog = self.catalog_source.load()?;

        // 2. Apply the weighting and unknown-carrier policies
        let planned = self.planner.plan(&cmd.shipment, &catalog)?;
        let request = if cmd.placeholder {
            planned.request.as_placeholder()
        } else {
            planned.request
        };

        // 3. Rank and gate
        let gated = self.pipeline.decide(&request, &planned.catalog)?;

        tracing::info!(
            decision_id = %gated.outcome.decision_id,
            mode = %gated.mode,
            origin = %cmd.shipment.origin,
            destination = %cmd.shipment.destination,
            "carriers ranked for shipment"
        );

        Ok(RankCarriersResult {
            gated,
            catalog: planned.catalog,
        })
    }
}
