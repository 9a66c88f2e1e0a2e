//! Per-dimension scoring and findings

use super::normalizer::normalize;
use crate::config::EngineConfig;
use crate::model::{
    Dimension, DimensionScore, FeatureName, FeatureSet, Finding, FindingKind, Score, SubScore,
};

/// Message of the single finding of a dimension with no usable feature
pub const DIMENSION_UNAVAILABLE: &str = "dimension unavailable — insufficient signal";

fn missing_message(feature: FeatureName) -> String {
    format!("insufficient data for {}", feature.key())
}

/// Score one dimension from the available features.
///
/// Missing features are left out and the remaining weights renormalised.
/// Findings follow the configured feature order.
///
/// When only zero-weight features are available the dimension cannot be
/// scored and is reported unavailable; the findings those features produced
/// are discarded (logged at debug level).
pub fn score_dimension(
    dimension: Dimension,
    features: &FeatureSet,
    config: &EngineConfig,
) -> DimensionScore {
    let mut scored = Vec::new();
    let mut findings = Vec::new();

    for entry in config.features(dimension) {
        let normalized = config.baseline(entry.feature).and_then(|range| {
            features
                .get(entry.feature)
                .and_then(|value| normalize(value, range).map(|n| (value, n)))
        });

        let Some((raw_value, n)) = normalized else {
            log::warn!("{}: {} unavailable", dimension, entry.feature);
            findings.push(Finding {
                dimension,
                feature: Some(entry.feature),
                kind: FindingKind::MissingFeature,
                message: missing_message(entry.feature),
            });
            continue;
        };

        let sub = SubScore {
            feature: entry.feature,
            raw_value,
            score: n.score,
            weight: entry.weight,
            tendency: n.tendency,
        };
        findings.extend(threshold_finding(dimension, &sub, config));
        scored.push(sub);
    }

    let total_weight: f64 = scored.iter().map(|s| s.weight).sum();
    if scored.is_empty() || total_weight <= 0.0 {
        log::warn!("{}: no usable features", dimension);
        for dropped in findings.iter().filter(|f| f.kind != FindingKind::MissingFeature) {
            log::debug!(
                "{}: discarding {:?} finding for zero-weight {:?}: {}",
                dimension,
                dropped.kind,
                dropped.feature,
                dropped.message
            );
        }
        let finding = Finding {
            dimension,
            feature: None,
            kind: FindingKind::DimensionUnavailable,
            message: DIMENSION_UNAVAILABLE.to_string(),
        };
        return DimensionScore::new(dimension, Vec::new(), None, vec![finding]);
    }

    for sub in &mut scored {
        sub.weight /= total_weight;
        log::debug!(
            "{}: {} = {} -> {} (weight {:.3})",
            dimension,
            sub.feature,
            sub.raw_value,
            sub.score,
            sub.weight
        );
    }

    let weighted: f64 = scored.iter().map(|s| s.weight * s.score.value()).sum();
    let score = Score::new(weighted);
    log::debug!("{}: score {}", dimension, score);

    DimensionScore::new(dimension, scored, Some(score), findings)
}

fn threshold_finding(dimension: Dimension, sub: &SubScore, config: &EngineConfig) -> Option<Finding> {
    let thresholds = config.thresholds();
    let feedback = config.feedback().get(sub.feature);
    let value = sub.score.value();

    if value < thresholds.flag {
        let message = feedback
            .and_then(|f| f.advice(sub.tendency))
            .map(|advice| advice.finding.clone())
            .unwrap_or_else(|| format!("{} is outside the healthy range", sub.feature.label()));
        Some(Finding {
            dimension,
            feature: Some(sub.feature),
            kind: FindingKind::Weakness,
            message,
        })
    } else if value >= thresholds.strength {
        let message = feedback
            .map(|f| f.strength.clone())
            .unwrap_or_else(|| format!("Healthy {}", sub.feature.label()));
        Some(Finding {
            dimension,
            feature: Some(sub.feature),
            kind: FindingKind::Strength,
            message,
        })
    } else {
        None
    }
}
