use proptest::prelude::*;
use speech_assessor::config::{BaselineRange, Direction, EngineConfig};
use speech_assessor::model::{AudioSample, Dimension, FeatureName, FeatureSet};
use speech_assessor::scoring::{normalize, score_dimension};
use speech_assessor::AssessmentEngine;

const VOCAL: [FeatureName; 6] = [
    FeatureName::PitchStdHz,
    FeatureName::PitchRangeHz,
    FeatureName::JitterPct,
    FeatureName::ShimmerPct,
    FeatureName::HnrDb,
    FeatureName::LoudnessRms,
];

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::HigherIsBetter),
        Just(Direction::LowerIsBetter),
        Just(Direction::OptimalBand),
    ]
}

fn range() -> impl Strategy<Value = BaselineRange> {
    (-1000.0f64..1000.0, 0.001f64..500.0, direction())
        .prop_map(|(low, width, direction)| BaselineRange::new(low, low + width, direction))
}

/// Every scored feature, each present or not, with values across and beyond
/// their healthy ranges
fn feature_set() -> impl Strategy<Value = FeatureSet> {
    proptest::collection::vec(proptest::option::of(-50.0f64..500.0), FeatureName::ALL.len())
        .prop_map(|values| {
            FeatureName::ALL
                .iter()
                .zip(values)
                .filter_map(|(name, value)| value.map(|v| (*name, v)))
                .collect()
        })
}

fn sample() -> AudioSample {
    AudioSample::new(vec![0.05; 12_000], 1000).unwrap()
}

proptest! {
    /// Normalised scores never leave [0, 100].
    #[test]
    fn normalized_score_is_bounded(value in -1e6f64..1e6, range in range()) {
        let n = normalize(value, &range).unwrap();
        prop_assert!((0.0..=100.0).contains(&n.score.value()));
    }

    /// Range bounds map exactly onto 0 and 100.
    #[test]
    fn bounds_map_to_extremes(low in -1000.0f64..1000.0, width in 0.001f64..500.0) {
        let high = low + width;

        let higher = BaselineRange::higher_is_better(low, high);
        prop_assert_eq!(normalize(low, &higher).unwrap().score.value(), 0.0);
        prop_assert_eq!(normalize(high, &higher).unwrap().score.value(), 100.0);

        let lower = BaselineRange::lower_is_better(low, high);
        prop_assert_eq!(normalize(low, &lower).unwrap().score.value(), 100.0);
        prop_assert_eq!(normalize(high, &lower).unwrap().score.value(), 0.0);

        let band = BaselineRange::optimal_band(low, high);
        prop_assert_eq!(normalize(low, &band).unwrap().score.value(), 100.0);
        prop_assert_eq!(normalize(high, &band).unwrap().score.value(), 100.0);
    }

    /// Dimension and overall scores stay within [0, 100].
    #[test]
    fn report_scores_are_bounded(features in feature_set()) {
        let engine = AssessmentEngine::default();
        if let Ok(report) = engine.analyze(sample(), features) {
            prop_assert!((0.0..=100.0).contains(&report.overall_score().value()));
            for dimension in report.dimension_scores() {
                if let Some(score) = dimension.score() {
                    prop_assert!((0.0..=100.0).contains(&score.value()));
                }
                for sub in dimension.sub_scores() {
                    prop_assert!((0.0..=100.0).contains(&sub.score.value()));
                }
            }
        }
    }

    /// Same input and snapshot give the same report.
    #[test]
    fn analysis_is_deterministic(features in feature_set()) {
        let engine = AssessmentEngine::default();
        let first = engine.analyze(sample(), features.clone());
        let second = engine.analyze(sample(), features);
        prop_assert_eq!(first, second);
    }

    /// Dropping one feature moves the dimension score by at most that
    /// feature's share of the scale.
    #[test]
    fn removing_a_feature_is_bounded(
        values in proptest::collection::vec(-50.0f64..500.0, VOCAL.len()),
        removed in 0usize..VOCAL.len(),
    ) {
        let config = EngineConfig::default();
        let full: FeatureSet = VOCAL.iter().copied().zip(values).collect();
        let mut partial = full.clone();
        partial.remove(VOCAL[removed]);

        let before = score_dimension(Dimension::VocalQuality, &full, &config);
        let after = score_dimension(Dimension::VocalQuality, &partial, &config);

        let share = before.sub_score(VOCAL[removed]).unwrap().weight;
        let delta = (before.score().unwrap().value() - after.score().unwrap().value()).abs();
        prop_assert!(delta <= share * 100.0 + 1e-9, "delta {} > share {}", delta, share);
    }
}
