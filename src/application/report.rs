//! DecisionReport - Serialized view of a gated outcome for external consumers.
//!
//! A BLOCKED report never carries ranking fields: only the verdict, the
//! reason and the override challenge.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::analysis::{ConfidenceBand, RankedAlternative};
use crate::domain::foundation::{DecisionId, Timestamp};
use crate::domain::gate::{Emergency, GatedOutcome, TrustMode};
use crate::domain::shipment::{Carrier, CarrierCatalog, CARRIER_CRITERIA};

/// Catalog score above which a criterion is listed as a strength.
pub const STRENGTH_THRESHOLD: f64 = 0.75;

/// Catalog score below which a criterion is listed as a weakness.
pub const WEAKNESS_THRESHOLD: f64 = 0.70;

/// Share of reliability in the recommended carrier's resilience.
pub const RESILIENCE_RELIABILITY_SHARE: f64 = 0.6;

/// Share of the risk score in the recommended carrier's resilience.
pub const RESILIENCE_RISK_SHARE: f64 = 0.4;

/// One ranked carrier as shown to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedAlternative {
    pub id: String,
    pub name: String,
    pub rank: usize,
    pub closeness: f64,
    pub is_top_choice: bool,
    pub estimated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weaknesses: Vec<String>,
}

impl ReportedAlternative {
    fn from_ranked(ranked: &RankedAlternative, carrier: Option<&Carrier>) -> Self {
        let (strengths, weaknesses) = carrier.map(profile).unwrap_or_default();
        Self {
            id: ranked.id.clone(),
            name: ranked.name.clone(),
            rank: ranked.rank,
            closeness: ranked.closeness,
            is_top_choice: ranked.is_top_choice,
            estimated: ranked.estimated,
            strengths,
            weaknesses,
        }
    }
}

/// Consistency verdict with the raw ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportedConsistency {
    pub is_consistent: bool,
    pub ncr: f64,
}

/// Flat, serializable decision result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    pub decision_id: DecisionId,
    pub mode: TrustMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(default)]
    pub overridden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency: Option<Emergency>,
    pub produced_at: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
    /// Reliability and risk composite of the recommended carrier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resilience: Option<f64>,
    /// Plain-language reason for the recommendation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<ReportedAlternative>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency: Option<ReportedConsistency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<ConfidenceBand>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weights: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl DecisionReport {
    /// Builds the report; `catalog` supplies the strengths and weaknesses.
    pub fn from_gated(gated: &GatedOutcome, catalog: Option<&CarrierCatalog>) -> Self {
        let outcome = &gated.outcome;
        let mut report = Self {
            decision_id: outcome.decision_id,
            mode: gated.mode,
            reason: gated.reason.clone(),
            challenge: gated.challenge.clone(),
            overridden: gated.overridden,
            emergency: outcome.emergency.clone(),
            produced_at: outcome.produced_at,
            recommended: None,
            resilience: None,
            explanation: None,
            alternatives: Vec::new(),
            consistency: None,
            confidence: None,
            band: None,
            weights: BTreeMap::new(),
            fingerprint: None,
        };

        if !gated.is_surfaced() {
            return report;
        }

        if let Some(ranking) = gated.ranking() {
            report.alternatives = ranking
                .alternatives
                .iter()
                .map(|a| ReportedAlternative::from_ranked(a, catalog.and_then(|c| c.find(&a.id))))
                .collect();
            if let Some(top) = ranking.top_choice() {
                let carrier = catalog.and_then(|c| c.find(&top.id));
                report.recommended = Some(top.name.clone());
                report.resilience = carrier.map(resilience);
                report.explanation = Some(explain(top, carrier));
            }
        }
        report.consistency = outcome.consistency.as_ref().map(|c| ReportedConsistency {
            is_consistent: c.is_consistent,
            ncr: c.ncr,
        });
        if let Some(confidence) = &outcome.confidence {
            report.confidence = Some(confidence.confidence);
            report.band = Some(confidence.band);
        }
        if let Some(weights) = &outcome.weights {
            report.weights = weights
                .criterion_ids
                .iter()
                .cloned()
                .zip(weights.weights.iter().copied())
                .collect();
        }
        report.fingerprint = outcome.fingerprint.clone();
        report
    }

    pub fn is_blocked(&self) -> bool {
        self.mode == TrustMode::Blocked
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn resilience(carrier: &Carrier) -> f64 {
    let score = |criterion: &str| carrier.scores.get(criterion).unwrap_or_default();
    RESILIENCE_RELIABILITY_SHARE * score("reliability") + RESILIENCE_RISK_SHARE * score("risk")
}

fn explain(top: &RankedAlternative, carrier: Option<&Carrier>) -> String {
    let (strengths, weaknesses) = carrier.map(profile).unwrap_or_default();

    let mut text = if strengths.is_empty() {
        format!("{} is recommended as the closest match to the ideal carrier.", top.name)
    } else {
        let phrases: Vec<&str> = strengths.iter().map(|c| strength_phrase(c)).collect();
        format!("{} is recommended based on {}.", top.name, phrases.join(", "))
    };
    if !weaknesses.is_empty() {
        let phrases: Vec<&str> = weaknesses.iter().map(|c| weakness_phrase(c)).collect();
        text.push_str(&format!(" Areas for attention include {}.", phrases.join(", ")));
    }
    if top.estimated {
        text.push_str(" Its profile is estimated, not measured.");
    }
    text.push_str(&format!(" Overall score is {:.0}%.", top.closeness * 100.0));
    text
}

fn strength_phrase(criterion: &str) -> &str {
    match criterion {
        "cost" => "competitive pricing",
        "time" => "fast delivery times",
        "reliability" => "high reliability",
        "flexibility" => "flexible service",
        "risk" => "low risk profile",
        other => other,
    }
}

fn weakness_phrase(criterion: &str) -> &str {
    match criterion {
        "cost" => "higher costs",
        "time" => "longer delivery times",
        "reliability" => "reliability concerns",
        "flexibility" => "limited flexibility",
        "risk" => "elevated risk",
        other => other,
    }
}

fn profile(carrier: &Carrier) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    for criterion in CARRIER_CRITERIA {
        match carrier.scores.get(criterion) {
            Some(score) if score > STRENGTH_THRESHOLD => strengths.push(criterion.to_string()),
            Some(score) if score < WEAKNESS_THRESHOLD => weaknesses.push(criterion.to_string()),
            _ => {}
        }
    }
    (strengths, weaknesses)
}
