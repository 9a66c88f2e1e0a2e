//! Feature extraction seam

use crate::model::{AudioSample, FeatureSet};
use anyhow::Result;
use std::path::Path;

/// Produces the measurements the engine scores.
///
/// Implementations may read companion files next to `audio_path` or work on
/// the decoded waveform directly.
pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, audio_path: &Path, sample: &AudioSample) -> Result<FeatureSet>;
}
