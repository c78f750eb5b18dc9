//! Property tests for weighting, ranking, and confidence fusion.

use freight_decision::domain::analysis::{
    AhpWeightSolver, ConfidenceFusionEstimator, ConsistencyChecker, Criterion,
    CriterionDirection, DataQuality, DecisionMatrix, GreyTopsisRanker, PairwiseMatrixBuilder,
    RankingResult, WeightVector,
};
use proptest::prelude::*;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|j| format!("c{}", j)).collect()
}

fn criteria(raw: &[f64]) -> Vec<Criterion> {
    let total: f64 = raw.iter().sum();
    ids(raw.len())
        .into_iter()
        .zip(raw)
        .map(|(id, w)| Criterion::benefit(id, w / total))
        .collect()
}

/// Raw criterion weights and a score matrix with at least one alternative.
fn matrix_inputs() -> impl Strategy<Value = (Vec<f64>, Vec<Vec<f64>>)> {
    (2usize..=5, 1usize..=6).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(0.05f64..1.0, n),
            prop::collection::vec(prop::collection::vec(0.0f64..=1.0, n), m),
        )
    })
}

fn rank(raw_weights: &[f64], rows: &[Vec<f64>]) -> RankingResult {
    let n = raw_weights.len();
    let mut builder = DecisionMatrix::builder().criteria(ids(n));
    for (i, row) in rows.iter().enumerate() {
        builder = builder.alternative(format!("alt-{}", i), row.clone());
    }
    let matrix = builder.build().unwrap();
    let weights = WeightVector::from_weights(ids(n), raw_weights.to_vec()).unwrap();
    GreyTopsisRanker::rank(&matrix, &weights, &vec![CriterionDirection::Benefit; n]).unwrap()
}

proptest! {
    #[test]
    fn ahp_weights_sum_to_one(
        raw in prop::collection::vec(0.05f64..1.0, 2..=9),
        uncertainty in 0.0f64..0.5,
    ) {
        let matrix = PairwiseMatrixBuilder::new()
            .with_uncertainty(uncertainty)
            .build(&criteria(&raw))
            .unwrap();
        let weights = AhpWeightSolver::solve(&matrix).unwrap();

        prop_assert!((weights.sum() - 1.0).abs() < 1e-6);
        prop_assert!(weights.weights.iter().all(|w| *w > 0.0));
    }

    #[test]
    fn ahp_weights_sum_to_one_for_extreme_ratios(
        exponents in prop::collection::vec(-300i32..=0, 2..=9),
    ) {
        let raw: Vec<f64> = exponents.iter().map(|e| 10f64.powi(*e)).collect();
        let criteria = criteria(&raw);
        let matrix = PairwiseMatrixBuilder::new().build(&criteria).unwrap();
        let weights = AhpWeightSolver::solve(&matrix).unwrap();

        prop_assert!((weights.sum() - 1.0).abs() < 1e-6);
        prop_assert!(weights.weights.iter().all(|w| w.is_finite() && *w > 0.0));
        ConsistencyChecker::check(&matrix).unwrap();
    }

    #[test]
    fn weight_derived_matrix_is_consistent(raw in prop::collection::vec(0.05f64..1.0, 3..=9)) {
        let matrix = PairwiseMatrixBuilder::new().build(&criteria(&raw)).unwrap();
        let report = ConsistencyChecker::check(&matrix).unwrap();

        prop_assert!(report.ncr.abs() < 1e-6, "ncr = {}", report.ncr);
        prop_assert!(report.is_consistent);
    }

    #[test]
    fn recovered_weights_match_criteria(raw in prop::collection::vec(0.05f64..1.0, 2..=7)) {
        let criteria = criteria(&raw);
        let matrix = PairwiseMatrixBuilder::new().build(&criteria).unwrap();
        let weights = AhpWeightSolver::solve(&matrix).unwrap();

        for (criterion, weight) in criteria.iter().zip(&weights.weights) {
            prop_assert!((criterion.weight - weight).abs() < 1e-9);
        }
    }

    #[test]
    fn closeness_is_bounded_with_single_top_choice((raw, rows) in matrix_inputs()) {
        let ranking = rank(&raw, &rows);

        prop_assert_eq!(ranking.len(), rows.len());
        prop_assert_eq!(ranking.alternatives.iter().filter(|a| a.is_top_choice).count(), 1);
        prop_assert!(ranking.alternatives[0].is_top_choice);
        for (position, alternative) in ranking.alternatives.iter().enumerate() {
            prop_assert!((0.0..=1.0).contains(&alternative.closeness));
            prop_assert_eq!(alternative.rank, position + 1);
        }
        for pair in ranking.alternatives.windows(2) {
            prop_assert!(pair[0].closeness >= pair[1].closeness);
        }
    }

    #[test]
    fn raising_a_score_never_lowers_closeness(
        (raw, rows) in matrix_inputs(),
        pick in any::<prop::sample::Index>(),
        column in any::<prop::sample::Index>(),
        delta in 0.0f64..0.5,
    ) {
        let i = pick.index(rows.len());
        let j = column.index(raw.len());
        let id = format!("alt-{}", i);

        let before = rank(&raw, &rows);
        let mut raised = rows.clone();
        raised[i][j] = (raised[i][j] + delta).min(1.0);
        let after = rank(&raw, &raised);

        let old = before.get(&id).unwrap().closeness;
        let new = after.get(&id).unwrap().closeness;
        prop_assert!(new >= old - 1e-9, "closeness fell from {} to {}", old, new);
    }

    #[test]
    fn ranking_ignores_catalog_order((raw, rows) in matrix_inputs()) {
        let forward = rank(&raw, &rows);

        let n = raw.len();
        let mut builder = DecisionMatrix::builder().criteria(ids(n));
        for (i, row) in rows.iter().enumerate().rev() {
            builder = builder.alternative(format!("alt-{}", i), row.clone());
        }
        let weights = WeightVector::from_weights(ids(n), raw.clone()).unwrap();
        let backward = GreyTopsisRanker::rank(
            &builder.build().unwrap(),
            &weights,
            &vec![CriterionDirection::Benefit; n],
        )
        .unwrap();

        prop_assert_eq!(forward.order(), backward.order());
    }

    #[test]
    fn confidence_is_bounded_and_monotone_in_closeness(
        low in 0.0f64..=1.0,
        bump in 0.0f64..=1.0,
        rich in any::<bool>(),
    ) {
        let high = (low + bump).min(1.0);
        let estimator = ConfidenceFusionEstimator::default();
        let quality = Some(DataQuality::from(rich));

        let a = estimator.estimate(None, quality, Some(low));
        let b = estimator.estimate(None, quality, Some(high));

        prop_assert!((0.0..=1.0).contains(&a.confidence));
        prop_assert!((0.0..=1.0).contains(&b.confidence));
        prop_assert!(b.confidence >= a.confidence);
    }
}
