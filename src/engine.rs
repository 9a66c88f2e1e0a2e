//! Analysis entry point

use crate::config::{ConfigSnapshot, EngineConfig, SharedConfig};
use crate::error::{AssessError, Result};
use crate::model::{AnalysisReport, AudioSample, Dimension, FeatureSet};
use crate::scoring::{aggregate, recommend, score_dimension};

/// Runs analyses against the current configuration snapshot
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    config: SharedConfig,
}

impl AssessmentEngine {
    /// Engine with its own configuration handle
    pub fn new(config: EngineConfig) -> Self {
        Self::with_shared(SharedConfig::new(config))
    }

    /// Engine sharing a configuration handle that may be reloaded elsewhere
    pub fn with_shared(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Analyse one recording's features.
    ///
    /// The configuration snapshot is pinned for the whole call, so a
    /// concurrent reload cannot change the result halfway.
    pub fn analyze(&self, sample: AudioSample, features: FeatureSet) -> Result<AnalysisReport> {
        let snapshot = self.config.snapshot();
        analyze_with(&snapshot, sample, features)
    }
}

/// Pure analysis against an explicit snapshot
pub fn analyze_with(
    snapshot: &ConfigSnapshot,
    sample: AudioSample,
    features: FeatureSet,
) -> Result<AnalysisReport> {
    let config = snapshot.config();

    let bounds = config.duration();
    let duration_secs = sample.duration_secs();
    if !bounds.contains(duration_secs) {
        return Err(AssessError::AudioDuration {
            duration_secs,
            min_secs: bounds.min_secs,
            max_secs: bounds.max_secs,
        });
    }
    // only the duration is needed from the waveform
    drop(sample);

    log::debug!(
        "Scoring {} features ({:.2}s sample, config v{})",
        features.len(),
        duration_secs,
        snapshot.version()
    );

    let dimension_scores: Vec<_> = Dimension::ALL
        .iter()
        .map(|d| score_dimension(*d, &features, config))
        .collect();

    let (overall_score, quality_label) = aggregate(&dimension_scores, config.weights())?;
    let recommendations = recommend(&dimension_scores, config.feedback());

    Ok(AnalysisReport::new(
        dimension_scores,
        overall_score,
        quality_label,
        recommendations,
        snapshot.version(),
    ))
}
