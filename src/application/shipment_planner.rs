//! ShipmentPlanner - Turns a shipment context into a decision request.

use crate::application::DecisionRequest;
use crate::config::EngineConfig;
use crate::domain::analysis::DataQuality;
use crate::domain::foundation::DecisionError;
use crate::domain::shipment::{CarrierCatalog, DefaultProfilePolicy, ShipmentContext, WeightPolicy};

/// A request ready for the pipeline together with the catalog it ranks.
///
/// The catalog is the caller's catalog, extended with an estimated entry when
/// a declared carrier was unknown and the default profile policy admits it.
#[derive(Debug, Clone)]
pub struct PlannedDecision {
    pub request: DecisionRequest,
    pub catalog: CarrierCatalog,
}

/// Applies the weighting policy and the unknown-carrier policy to a shipment.
#[derive(Debug, Clone, Default)]
pub struct ShipmentPlanner {
    policy: WeightPolicy,
    default_profile: DefaultProfilePolicy,
}

impl ShipmentPlanner {
    pub fn new(policy: WeightPolicy, default_profile: DefaultProfilePolicy) -> Self {
        Self {
            policy,
            default_profile,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.weighting.policy(),
            config.weighting.default_profile.clone(),
        )
    }

    pub fn policy(&self) -> &WeightPolicy {
        &self.policy
    }

    /// Builds the request for `context` over `catalog`.
    ///
    /// # Errors
    /// `Validation` for an invalid context, `InvalidCriteria` for unusable
    /// base weights.
    pub fn plan(
        &self,
        context: &ShipmentContext,
        catalog: &CarrierCatalog,
    ) -> Result<PlannedDecision, DecisionError> {
        context.validate()?;

        let criteria = self.policy.criteria_for(context)?;
        let uncertainty = self.policy.uncertainty_for(context);
        let data_quality = DataQuality::from(context.has_rich_context());

        let catalog = match context.declared_carrier() {
            Some(declared) if catalog.find(declared).is_none() => {
                self.admit_declared(declared, catalog)
            }
            _ => catalog.clone(),
        };

        tracing::info!(
            origin = %context.origin,
            destination = %context.destination,
            urgency = %context.urgency,
            perishable = context.perishable,
            uncertainty,
            carriers = catalog.len(),
            "shipment planned"
        );

        Ok(PlannedDecision {
            request: DecisionRequest::new(criteria)
                .with_uncertainty(uncertainty)
                .with_data_quality(data_quality),
            catalog,
        })
    }

    fn admit_declared(&self, declared: &str, catalog: &CarrierCatalog) -> CarrierCatalog {
        let Some(carrier) = self.default_profile.resolve(declared) else {
            tracing::info!(carrier = declared, "declared carrier unknown, excluded");
            return catalog.clone();
        };

        match catalog.with_carrier(carrier) {
            Ok(extended) => {
                tracing::info!(carrier = declared, "declared carrier unknown, ranked with default profile");
                extended
            }
            Err(err) => {
                tracing::warn!(carrier = declared, error = %err, "declared carrier not admitted");
                catalog.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shipment::{Carrier, CarrierScores, Urgency};

    fn catalog() -> CarrierCatalog {
        CarrierCatalog::new(vec![
            Carrier::new("kn", "Kuehne & Nagel", CarrierScores::new(0.8, 0.7, 0.9, 0.6, 0.8).unwrap()),
            Carrier::new("dhl", "DHL Express", CarrierScores::new(0.5, 0.9, 0.8, 0.7, 0.7).unwrap()),
        ])
        .unwrap()
    }

    fn weight(planned: &PlannedDecision, id: &str) -> f64 {
        planned
            .request
            .criteria
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.weight)
            .unwrap()
    }

    #[test]
    fn normal_shipment_uses_base_policy() {
        let context = ShipmentContext::new("Mombasa", "Kigali");
        let planned = ShipmentPlanner::default().plan(&context, &catalog()).unwrap();

        assert_eq!(planned.request.criteria.len(), 5);
        assert!((weight(&planned, "cost") - 0.30).abs() < 1e-12);
        assert!((planned.request.uncertainty - 0.125).abs() < 1e-12);
        assert_eq!(planned.request.data_quality, Some(DataQuality::Sparse));
        assert_eq!(planned.catalog.len(), 2);
    }

    #[test]
    fn critical_shipment_shifts_weight_to_time() {
        let context = ShipmentContext::new("Mombasa", "Kigali")
            .with_cargo("vaccines")
            .with_urgency(Urgency::Critical);
        let planned = ShipmentPlanner::default().plan(&context, &catalog()).unwrap();

        assert!(weight(&planned, "time") > weight(&planned, "cost"));
        assert_eq!(planned.request.data_quality, Some(DataQuality::Rich));
        assert!((planned.request.uncertainty - 0.05).abs() < 1e-9);
    }

    #[test]
    fn unknown_declared_carrier_gets_estimated_entry() {
        let context = ShipmentContext::new("Mombasa", "Kigali").with_declared_carrier("Bolloré Logistics");
        let planned = ShipmentPlanner::default().plan(&context, &catalog()).unwrap();

        assert_eq!(planned.catalog.len(), 3);
        let entry = planned.catalog.find("Bolloré Logistics").unwrap();
        assert!(entry.estimated);
    }

    #[test]
    fn known_declared_carrier_leaves_catalog_alone() {
        let context = ShipmentContext::new("Mombasa", "Kigali").with_declared_carrier("dhl express");
        let planned = ShipmentPlanner::default().plan(&context, &catalog()).unwrap();
        assert_eq!(planned.catalog, catalog());
    }

    #[test]
    fn exclude_policy_drops_unknown_carrier() {
        let planner = ShipmentPlanner::new(WeightPolicy::default(), DefaultProfilePolicy::Exclude);
        let context = ShipmentContext::new("Mombasa", "Kigali").with_declared_carrier("Unknown Freight");
        let planned = planner.plan(&context, &catalog()).unwrap();
        assert_eq!(planned.catalog.len(), 2);
    }

    #[test]
    fn missing_origin_is_rejected() {
        let context = ShipmentContext::new("  ", "Kigali");
        let err = ShipmentPlanner::default().plan(&context, &catalog()).unwrap_err();
        assert!(matches!(err, DecisionError::Validation(_)));
    }
}
