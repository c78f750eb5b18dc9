//! Default profile policy for declared carriers missing from the catalog.

use serde::{Deserialize, Serialize};

use super::{Carrier, CarrierScores};
use crate::domain::foundation::UnitInterval;

/// Neutral score given to every criterion of an unknown carrier.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// What to do when the caller declares a carrier the catalog does not know.
///
/// The result is deterministic: an unknown carrier either stays out of the
/// ranking or enters with a fixed profile flagged as `estimated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum DefaultProfilePolicy {
    /// Leave unknown carriers out of the ranking.
    Exclude,

    /// Rank unknown carriers with these scores.
    Fixed { scores: CarrierScores },
}

impl Default for DefaultProfilePolicy {
    fn default() -> Self {
        Self::neutral()
    }
}

impl DefaultProfilePolicy {
    /// Fixed profile scoring [`NEUTRAL_SCORE`] on every criterion.
    pub fn neutral() -> Self {
        DefaultProfilePolicy::Fixed {
            scores: CarrierScores::uniform(UnitInterval::clamped(NEUTRAL_SCORE)),
        }
    }

    /// Carrier entry for an unknown declared carrier, if the policy admits one.
    pub fn resolve(&self, declared: &str) -> Option<Carrier> {
        let name = declared.trim();
        if name.is_empty() {
            return None;
        }
        match self {
            DefaultProfilePolicy::Exclude => None,
            DefaultProfilePolicy::Fixed { scores } => Some(Carrier {
                id: slug(name),
                name: name.to_string(),
                scores: *scores,
                estimated: true,
            }),
        }
    }
}

fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
