//! TOML configuration files
//!
//! A file overlays the built-in defaults section by section: any baseline,
//! dimension or feedback entry it names replaces the default entry, and
//! everything else is kept. The merged result is validated before it is
//! handed out.

use super::baseline::BaselineRange;
use super::feedback::FeatureFeedback;
use super::settings::{DimensionWeights, DurationBounds, EngineConfig, Thresholds, WeightedFeature};
use crate::error::{AssessError, Result};
use crate::model::{Dimension, FeatureName};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk configuration, loosely typed by string keys
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationBounds>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub baselines: BTreeMap<String, BaselineRange>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dimensions: BTreeMap<String, DimensionEntry>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub feedback: BTreeMap<String, FeatureFeedback>,
}

/// One `[dimensions.<name>]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionEntry {
    pub weight: f64,
    pub features: Vec<FeatureEntry>,
}

/// A feature reference: a bare name (weight 1.0) or `{ name, weight }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureEntry {
    Name(String),
    Weighted { name: String, weight: f64 },
}

impl FeatureEntry {
    fn into_weighted(self) -> Result<WeightedFeature> {
        match self {
            FeatureEntry::Name(name) => Ok(WeightedFeature::uniform(parse_feature(&name)?)),
            FeatureEntry::Weighted { name, weight } => {
                Ok(WeightedFeature::new(parse_feature(&name)?, weight))
            }
        }
    }

    fn from_weighted(entry: &WeightedFeature) -> Self {
        if entry.weight == 1.0 {
            FeatureEntry::Name(entry.feature.key().to_string())
        } else {
            FeatureEntry::Weighted {
                name: entry.feature.key().to_string(),
                weight: entry.weight,
            }
        }
    }
}

fn parse_feature(key: &str) -> Result<FeatureName> {
    FeatureName::from_key(key)
        .ok_or_else(|| AssessError::config(format!("unknown feature name: {}", key)))
}

fn parse_dimension(key: &str) -> Result<Dimension> {
    Dimension::from_key(key)
        .ok_or_else(|| AssessError::config(format!("unknown dimension name: {}", key)))
}

impl ConfigFile {
    /// Parse TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse configuration TOML")
    }

    /// Merge onto the built-in defaults and validate
    pub fn into_config(self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();

        let mut baselines = defaults.baselines().clone();
        for (key, range) in self.baselines {
            baselines.insert(parse_feature(&key)?, range);
        }

        let mut weights: BTreeMap<Dimension, f64> = defaults.weights().iter().collect();
        let mut layout: BTreeMap<Dimension, Vec<WeightedFeature>> = Dimension::ALL
            .iter()
            .map(|d| (*d, defaults.features(*d).to_vec()))
            .collect();
        for (key, entry) in self.dimensions {
            let dimension = parse_dimension(&key)?;
            let features = entry
                .features
                .into_iter()
                .map(FeatureEntry::into_weighted)
                .collect::<Result<Vec<_>>>()?;
            weights.insert(dimension, entry.weight);
            layout.insert(dimension, features);
        }

        let mut feedback = defaults.feedback().clone();
        for (key, entry) in self.feedback {
            feedback.insert(parse_feature(&key)?, entry);
        }

        EngineConfig::new(
            baselines,
            DimensionWeights::new(weights),
            layout,
            self.thresholds.unwrap_or_else(|| defaults.thresholds()),
            self.duration.unwrap_or_else(|| defaults.duration()),
            feedback,
        )
    }

    /// Fully explicit file describing `config`
    pub fn from_config(config: &EngineConfig) -> Self {
        let baselines = config
            .baselines()
            .iter()
            .map(|(f, r)| (f.key().to_string(), *r))
            .collect();

        let dimensions = Dimension::ALL
            .iter()
            .map(|d| {
                let entry = DimensionEntry {
                    weight: config.weights().get(*d),
                    features: config
                        .features(*d)
                        .iter()
                        .map(FeatureEntry::from_weighted)
                        .collect(),
                };
                (d.key().to_string(), entry)
            })
            .collect();

        let feedback = config
            .feedback()
            .iter()
            .map(|(f, fb)| (f.key().to_string(), fb.clone()))
            .collect();

        Self {
            thresholds: Some(config.thresholds()),
            duration: Some(config.duration()),
            baselines,
            dimensions,
            feedback,
        }
    }
}

/// Load, merge and validate a configuration file
pub fn load_config(path: &Path) -> anyhow::Result<EngineConfig> {
    log::debug!("Loading configuration from {:?}", path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {:?}", path))?;
    let file = ConfigFile::from_toml(&content)
        .with_context(|| format!("Failed to load configuration file: {:?}", path))?;
    let config = file
        .into_config()
        .with_context(|| format!("Invalid configuration in {:?}", path))?;

    log::info!("Configuration loaded from {:?}", path);
    Ok(config)
}

/// Write `config` as a complete TOML file
pub fn save_config(config: &EngineConfig, path: &Path) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(&ConfigFile::from_config(config))
        .context("Failed to serialize configuration")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write configuration file: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Direction;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = ConfigFile::from_toml("").unwrap().into_config().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_overlay_baseline_and_thresholds() {
        let toml = r#"
            [thresholds]
            flag = 35.0
            strength = 85.0

            [baselines.jitter_pct]
            low = 0.0
            high = 2.0
            direction = "lower_is_better"
        "#;
        let config = ConfigFile::from_toml(toml).unwrap().into_config().unwrap();

        assert_eq!(config.thresholds().flag, 35.0);
        let jitter = config.baseline(FeatureName::JitterPct).unwrap();
        assert_eq!(jitter.high, 2.0);
        assert_eq!(jitter.direction, Direction::LowerIsBetter);
        // untouched entries keep their defaults
        assert_eq!(
            config.baseline(FeatureName::HnrDb),
            EngineConfig::default().baseline(FeatureName::HnrDb)
        );
    }

    #[test]
    fn test_explicit_feature_weights() {
        let toml = r#"
            [dimensions.prosodic_variation]
            weight = 0.25
            features = ["pitch_variation", { name = "energy_variation", weight = 3.0 }]
        "#;
        let config = ConfigFile::from_toml(toml).unwrap().into_config().unwrap();
        let features = config.features(Dimension::ProsodicVariation);

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].weight, 1.0);
        assert_eq!(features[1].feature, FeatureName::EnergyVariation);
        assert_eq!(features[1].weight, 3.0);
    }

    #[test]
    fn test_unknown_feature_is_validation_error() {
        let toml = r#"
            [baselines.charisma]
            low = 0.0
            high = 1.0
            direction = "higher_is_better"
        "#;
        let err = ConfigFile::from_toml(toml)
            .unwrap()
            .into_config()
            .unwrap_err();
        assert_eq!(
            err,
            AssessError::ConfigValidation("unknown feature name: charisma".into())
        );
    }

    #[test]
    fn test_reweighting_one_dimension_breaks_sum() {
        let toml = r#"
            [dimensions.speech_timing]
            weight = 0.5
            features = ["pause_ratio"]
        "#;
        let result = ConfigFile::from_toml(toml).unwrap().into_config();
        assert!(matches!(result, Err(AssessError::ConfigValidation(_))));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assessor.toml");

        save_config(&EngineConfig::default(), &path).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded, EngineConfig::default());
    }

    #[test]
    fn test_invalid_file_keeps_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "[baselines.hnr_db]\nlow = 25.0\nhigh = 10.0\ndirection = \"higher_is_better\"\n",
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssessError>(),
            Some(AssessError::ConfigValidation(_))
        ));
    }
}
