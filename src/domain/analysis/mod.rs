//! Analysis Module - Pure domain services for multi-criteria carrier ranking.
//!
//! This module contains stateless functions that turn criteria weights and a
//! carrier decision matrix into a ranked recommendation.
//!
//! # Components
//!
//! - `PairwiseMatrixBuilder` - Neutrosophic pairwise comparison of criteria
//! - `AhpWeightSolver` - Geometric-mean AHP weights from the pairwise matrix
//! - `ConsistencyChecker` - Neutrosophic consistency ratio (NCR)
//! - `GreyTopsisRanker` - TOPSIS closeness blended with grey relational grades
//! - `ConfidenceFusionEstimator` - One confidence scalar from the signals above
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! values as input and return computed results, so any number of requests
//! can run them concurrently without coordination.

mod confidence_fusion;
mod consistency_checker;
mod criteria;
mod decision_matrix;
mod grey_topsis;
mod pairwise_matrix;
mod weight_solver;

pub use confidence_fusion::{
    ConfidenceBand, ConfidenceConfig, ConfidenceFusionEstimator, ConfidenceReport, DataQuality,
};
pub use consistency_checker::{
    ConsistencyChecker, ConsistencyReport, CONSISTENCY_THRESHOLD, RANDOM_INDEX,
};
pub use criteria::{
    normalize_weights, validate_criteria, Criterion, CriterionDirection, WEIGHT_SUM_TOLERANCE,
};
pub use decision_matrix::{AlternativeRow, DecisionMatrix, DecisionMatrixBuilder};
pub use grey_topsis::{
    GreyTopsisRanker, RankedAlternative, RankingResult, DISTINGUISHING_COEFFICIENT, GREY_BLEND,
};
pub use pairwise_matrix::{
    ratio_to_score, score_to_ratio, Judgment, PairwiseMatrix, PairwiseMatrixBuilder,
    DEFAULT_UNCERTAINTY,
};
pub use weight_solver::{AhpWeightSolver, WeightVector};
