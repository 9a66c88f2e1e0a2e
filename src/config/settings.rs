//! Validated engine configuration

use super::baseline::BaselineRange;
use super::defaults;
use super::feedback::FeedbackCatalog;
use crate::error::{AssessError, Result};
use crate::model::{Dimension, FeatureName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Allowed deviation of the dimension weight sum from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-3;

/// Sub-score thresholds that trigger findings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Below this a weakness finding is emitted (default: 40)
    pub flag: f64,
    /// At or above this a strength finding is emitted (default: 80)
    pub strength: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            flag: 40.0,
            strength: 80.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        if !self.flag.is_finite() || !self.strength.is_finite() {
            return Err(AssessError::config("thresholds must be finite"));
        }
        if self.flag < 0.0 || self.strength > 100.0 || self.flag > self.strength {
            return Err(AssessError::config(format!(
                "thresholds must satisfy 0 <= flag <= strength <= 100 (got flag {}, strength {})",
                self.flag, self.strength
            )));
        }
        Ok(())
    }
}

/// Accepted recording length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationBounds {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl Default for DurationBounds {
    fn default() -> Self {
        Self {
            min_secs: 10.0,
            max_secs: 20.0,
        }
    }
}

impl DurationBounds {
    /// Inclusive range check
    pub fn contains(&self, duration_secs: f64) -> bool {
        duration_secs >= self.min_secs && duration_secs <= self.max_secs
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_secs.is_finite() || !self.max_secs.is_finite() {
            return Err(AssessError::config("duration bounds must be finite"));
        }
        if self.min_secs < 0.0 || self.min_secs >= self.max_secs {
            return Err(AssessError::config(format!(
                "duration bounds must satisfy 0 <= min < max (got {}..{})",
                self.min_secs, self.max_secs
            )));
        }
        Ok(())
    }
}

/// Feature with its relative weight inside a dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedFeature {
    pub feature: FeatureName,
    pub weight: f64,
}

impl WeightedFeature {
    pub fn new(feature: FeatureName, weight: f64) -> Self {
        Self { feature, weight }
    }

    /// Uniform weight
    pub fn uniform(feature: FeatureName) -> Self {
        Self::new(feature, 1.0)
    }
}

/// Weight of each dimension in the overall score
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionWeights {
    weights: BTreeMap<Dimension, f64>,
}

impl DimensionWeights {
    pub fn new(weights: impl IntoIterator<Item = (Dimension, f64)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    /// Weight of `dimension` (0 if unset)
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.weights.get(&dimension).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.weights.iter().map(|(d, w)| (*d, *w))
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            let weight = self.weights.get(&dimension).ok_or_else(|| {
                AssessError::config(format!("missing weight for dimension {}", dimension))
            })?;
            if !weight.is_finite() || *weight < 0.0 || *weight > 1.0 {
                return Err(AssessError::config(format!(
                    "weight for dimension {} must be in [0, 1] (got {})",
                    dimension, weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AssessError::config(format!(
                "dimension weights must sum to 1.0, but sum to {:.4}",
                sum
            )));
        }
        Ok(())
    }
}

/// Immutable, validated configuration consumed by the scoring core
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    baselines: BTreeMap<FeatureName, BaselineRange>,
    weights: DimensionWeights,
    layout: BTreeMap<Dimension, Vec<WeightedFeature>>,
    thresholds: Thresholds,
    duration: DurationBounds,
    feedback: FeedbackCatalog,
}

impl EngineConfig {
    /// Assemble and validate a configuration. Nothing partially valid is
    /// ever returned.
    pub fn new(
        baselines: BTreeMap<FeatureName, BaselineRange>,
        weights: DimensionWeights,
        layout: BTreeMap<Dimension, Vec<WeightedFeature>>,
        thresholds: Thresholds,
        duration: DurationBounds,
        feedback: FeedbackCatalog,
    ) -> Result<Self> {
        let config = Self {
            baselines,
            weights,
            layout,
            thresholds,
            duration,
            feedback,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every load-time invariant
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.thresholds.validate()?;
        self.duration.validate()?;

        for (feature, range) in &self.baselines {
            range.validate(*feature)?;
        }

        for dimension in Dimension::ALL {
            let features = self.layout.get(&dimension).ok_or_else(|| {
                AssessError::config(format!("dimension {} lists no features", dimension))
            })?;
            self.validate_dimension(dimension, features)?;
        }

        Ok(())
    }

    fn validate_dimension(&self, dimension: Dimension, features: &[WeightedFeature]) -> Result<()> {
        if features.is_empty() {
            return Err(AssessError::config(format!(
                "dimension {} lists no features",
                dimension
            )));
        }

        let mut seen = BTreeSet::new();
        let mut total = 0.0;
        for entry in features {
            if !seen.insert(entry.feature) {
                return Err(AssessError::config(format!(
                    "feature {} listed twice in dimension {}",
                    entry.feature, dimension
                )));
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(AssessError::config(format!(
                    "weight of {} in dimension {} must be a non-negative number (got {})",
                    entry.feature, dimension, entry.weight
                )));
            }
            total += entry.weight;

            let range = self.baselines.get(&entry.feature).ok_or_else(|| {
                AssessError::config(format!(
                    "feature {} in dimension {} has no baseline range",
                    entry.feature, dimension
                ))
            })?;
            self.feedback.validate_for(entry.feature, range.direction)?;
        }

        if total <= 0.0 {
            return Err(AssessError::config(format!(
                "feature weights of dimension {} sum to zero",
                dimension
            )));
        }

        Ok(())
    }

    pub fn baseline(&self, feature: FeatureName) -> Option<&BaselineRange> {
        self.baselines.get(&feature)
    }

    pub fn baselines(&self) -> &BTreeMap<FeatureName, BaselineRange> {
        &self.baselines
    }

    pub fn weights(&self) -> &DimensionWeights {
        &self.weights
    }

    /// Constituent features of `dimension`, in configured order
    pub fn features(&self, dimension: Dimension) -> &[WeightedFeature] {
        self.layout
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn duration(&self) -> DurationBounds {
        self.duration
    }

    pub fn feedback(&self) -> &FeedbackCatalog {
        &self.feedback
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baselines: defaults::baselines(),
            weights: defaults::weights(),
            layout: defaults::layout(),
            thresholds: Thresholds::default(),
            duration: DurationBounds::default(),
            feedback: defaults::feedback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> (
        BTreeMap<FeatureName, BaselineRange>,
        DimensionWeights,
        BTreeMap<Dimension, Vec<WeightedFeature>>,
        FeedbackCatalog,
    ) {
        (
            defaults::baselines(),
            defaults::weights(),
            defaults::layout(),
            defaults::feedback(),
        )
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let (baselines, _, layout, feedback) = parts();
        let weights = DimensionWeights::new([
            (Dimension::VocalQuality, 0.3),
            (Dimension::ArticulationClarity, 0.3),
            (Dimension::ProsodicVariation, 0.3),
            (Dimension::SpeechTiming, 0.3),
        ]);
        let result = EngineConfig::new(
            baselines,
            weights,
            layout,
            Thresholds::default(),
            DurationBounds::default(),
            feedback,
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_weight_sum_within_tolerance_accepted() {
        let weights = DimensionWeights::new([
            (Dimension::VocalQuality, 0.3005),
            (Dimension::ArticulationClarity, 0.3),
            (Dimension::ProsodicVariation, 0.25),
            (Dimension::SpeechTiming, 0.15),
        ]);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = DimensionWeights::new([
            (Dimension::VocalQuality, -0.2),
            (Dimension::ArticulationClarity, 0.6),
            (Dimension::ProsodicVariation, 0.4),
            (Dimension::SpeechTiming, 0.2),
        ]);
        assert!(matches!(
            weights.validate(),
            Err(AssessError::ConfigValidation(_))
        ));
    }

    #[test]
    fn test_negative_feature_weight_rejected() {
        let (baselines, weights, mut layout, feedback) = parts();
        layout.insert(
            Dimension::ProsodicVariation,
            vec![
                WeightedFeature::new(FeatureName::PitchVariation, -1.0),
                WeightedFeature::uniform(FeatureName::EnergyVariation),
            ],
        );
        let result = EngineConfig::new(
            baselines,
            weights,
            layout,
            Thresholds::default(),
            DurationBounds::default(),
            feedback,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_without_baseline_rejected() {
        let (mut baselines, weights, layout, feedback) = parts();
        baselines.remove(&FeatureName::HnrDb);
        let err = EngineConfig::new(
            baselines,
            weights,
            layout,
            Thresholds::default(),
            DurationBounds::default(),
            feedback,
        )
        .unwrap_err();
        assert!(err.to_string().contains("hnr_db"));
        assert!(err.to_string().contains("no baseline"));
    }

    #[test]
    fn test_duplicate_feature_rejected() {
        let (baselines, weights, mut layout, feedback) = parts();
        layout.insert(
            Dimension::SpeechTiming,
            vec![
                WeightedFeature::uniform(FeatureName::PauseRatio),
                WeightedFeature::uniform(FeatureName::PauseRatio),
            ],
        );
        let result = EngineConfig::new(
            baselines,
            weights,
            layout,
            Thresholds::default(),
            DurationBounds::default(),
            feedback,
        );
        assert!(result.unwrap_err().to_string().contains("listed twice"));
    }

    #[test]
    fn test_thresholds_and_duration_validation() {
        assert!(Thresholds {
            flag: 90.0,
            strength: 80.0
        }
        .validate()
        .is_err());
        assert!(DurationBounds {
            min_secs: 20.0,
            max_secs: 10.0
        }
        .validate()
        .is_err());

        let bounds = DurationBounds::default();
        assert!(bounds.contains(10.0));
        assert!(bounds.contains(20.0));
        assert!(!bounds.contains(9.99));
    }
}
