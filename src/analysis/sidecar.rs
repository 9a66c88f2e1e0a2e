//! Feature values precomputed by an external extractor
//!
//! A sidecar is a flat JSON object stored next to the recording as
//! `<stem>.features.json`, mapping feature names to numbers or `null`.

use super::traits::FeatureExtractor;
use crate::model::{AudioSample, FeatureSet};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default sidecar location for `audio_path`
pub fn sidecar_path(audio_path: &Path) -> PathBuf {
    audio_path.with_extension("features.json")
}

/// Parse sidecar JSON. Unknown keys and non-numeric values are skipped.
/// `null` marks a feature the extractor could not measure; it is kept as a
/// non-finite value so it still overrides estimates from other sources.
pub fn parse_feature_json(content: &str) -> Result<FeatureSet> {
    let raw: BTreeMap<String, Value> =
        serde_json::from_str(content).context("Feature file must be a JSON object")?;

    let mut features = FeatureSet::new();
    for (key, value) in raw {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(v) => {
                    if !features.insert_key(&key, v) {
                        log::warn!("Ignoring unknown feature: {}", key);
                    }
                }
                None => log::warn!("Feature {} is not representable as f64", key),
            },
            Value::Null => {
                if features.insert_key(&key, f64::NAN) {
                    log::debug!("Feature {} reported as unavailable", key);
                } else {
                    log::warn!("Ignoring unknown feature: {}", key);
                }
            }
            other => log::warn!("Ignoring non-numeric value for {}: {}", key, other),
        }
    }

    Ok(features)
}

/// Reads features from sidecar JSON files
#[derive(Debug, Clone, Default)]
pub struct SidecarExtractor {
    /// Fixed file to read instead of the per-recording sidecar
    path: Option<PathBuf>,
}

impl SidecarExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always read `path`, whatever recording is analysed
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// File this extractor reads for `audio_path`
    pub fn locate(&self, audio_path: &Path) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| sidecar_path(audio_path))
    }

    /// True when a fixed path was configured rather than the per-file default
    pub fn is_explicit(&self) -> bool {
        self.path.is_some()
    }

    pub fn read(&self, audio_path: &Path) -> Result<FeatureSet> {
        let path = self.locate(audio_path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read feature file: {:?}", path))?;
        let features = parse_feature_json(&content)
            .with_context(|| format!("Failed to parse feature file: {:?}", path))?;

        log::debug!("Read {} features from {:?}", features.len(), path);
        Ok(features)
    }
}

impl FeatureExtractor for SidecarExtractor {
    fn extract(&self, audio_path: &Path, _sample: &AudioSample) -> Result<FeatureSet> {
        self.read(audio_path)
    }
}
