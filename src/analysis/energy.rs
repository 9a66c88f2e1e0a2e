//! Energy and timing features computed from the waveform
//!
//! Frames are 40 ms with a 50% hop. A frame counts as speech when its RMS
//! reaches the silence threshold. Syllables are approximated by peaks of
//! the speech-frame energy envelope at least 100 ms apart. Zero-crossing
//! rates are expressed per sample at 22.05 kHz whatever the file's rate.

use super::sidecar::SidecarExtractor;
use super::traits::FeatureExtractor;
use crate::model::{AudioSample, FeatureName, FeatureSet};
use anyhow::Result;
use std::path::Path;

/// Default RMS level separating speech from silence
pub const DEFAULT_SILENCE_THRESHOLD: f32 = 0.01;

const FRAME_SECS: f64 = 0.040;
const MIN_PAUSE_SECS: f64 = 0.200;
const MIN_PEAK_GAP_SECS: f64 = 0.100;

/// Rate the zero-crossing baseline is calibrated at
pub const ZCR_REFERENCE_RATE: f64 = 22_050.0;

/// Level statistics of one analysis frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub rms: f64,
    pub zcr: f64,
    pub voiced: bool,
}

/// Split `samples` into overlapping frames
pub fn frames(samples: &[f32], sample_rate: u32, threshold: f32) -> (Vec<Frame>, f64) {
    let frame_len = ((sample_rate as f64 * FRAME_SECS).round() as usize).max(2);
    let hop = (frame_len / 2).max(1);
    let hop_secs = hop as f64 / sample_rate as f64;

    if samples.is_empty() {
        return (Vec::new(), hop_secs);
    }

    let mut result = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + frame_len).min(samples.len());
        result.push(frame_stats(&samples[start..end], sample_rate, threshold));
        if end == samples.len() {
            break;
        }
        start += hop;
    }

    (result, hop_secs)
}

fn frame_stats(window: &[f32], sample_rate: u32, threshold: f32) -> Frame {
    let sum_sq: f64 = window.iter().map(|s| (*s as f64) * (*s as f64)).sum();
    let rms = (sum_sq / window.len() as f64).sqrt();

    let crossings = window
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count();
    let zcr = if window.len() > 1 {
        let per_sample = crossings as f64 / (window.len() - 1) as f64;
        per_sample * sample_rate as f64 / ZCR_REFERENCE_RATE
    } else {
        0.0
    };

    Frame {
        rms,
        zcr,
        voiced: rms >= threshold as f64,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Count silent runs of at least `min_frames` that follow speech
fn count_pauses(frames: &[Frame], min_frames: usize) -> usize {
    let mut pauses = 0;
    let mut seen_speech = false;
    let mut silent_run = 0;

    for frame in frames {
        if frame.voiced {
            if seen_speech && silent_run >= min_frames {
                pauses += 1;
            }
            seen_speech = true;
            silent_run = 0;
        } else {
            silent_run += 1;
        }
    }

    // trailing silence after the last word is not a pause
    pauses
}

/// Local maxima of the speech-frame envelope, at least `min_gap` frames apart
fn count_peaks(frames: &[Frame], min_gap: usize) -> usize {
    let mut peaks = 0;
    let mut last_peak: Option<usize> = None;

    for i in 0..frames.len() {
        let current = &frames[i];
        if !current.voiced {
            continue;
        }
        let rising = i == 0 || current.rms > frames[i - 1].rms;
        let falling = i + 1 == frames.len() || current.rms >= frames[i + 1].rms;
        let spaced = last_peak.map_or(true, |p| i - p >= min_gap);

        if rising && falling && spaced {
            peaks += 1;
            last_peak = Some(i);
        }
    }

    peaks
}

/// Compute level and timing features. Features that need speech frames are
/// left out when nothing reaches the threshold.
pub fn energy_features(sample: &AudioSample, threshold: f32) -> FeatureSet {
    let (frames, hop_secs) = frames(sample.samples(), sample.sample_rate(), threshold);
    let mut features = FeatureSet::new();

    let total_secs = sample.duration_secs();
    if frames.is_empty() || total_secs <= 0.0 {
        return features;
    }

    let voiced: Vec<&Frame> = frames.iter().filter(|f| f.voiced).collect();
    let voiced_ratio = voiced.len() as f64 / frames.len() as f64;
    features.insert(FeatureName::PauseRatio, 1.0 - voiced_ratio);

    let min_pause_frames = (MIN_PAUSE_SECS / hop_secs).ceil() as usize;
    let pauses = count_pauses(&frames, min_pause_frames);
    features.insert(FeatureName::PauseFrequencyHz, pauses as f64 / total_secs);

    if voiced.is_empty() {
        log::debug!("No frame reached the speech threshold {}", threshold);
        return features;
    }

    let levels: Vec<f64> = voiced.iter().map(|f| f.rms).collect();
    let level_mean = mean(&levels);
    features.insert(FeatureName::LoudnessRms, level_mean);
    if level_mean > 0.0 {
        features.insert(
            FeatureName::EnergyVariation,
            std_dev(&levels, level_mean) / level_mean,
        );
    }

    let crossings: Vec<f64> = voiced.iter().map(|f| f.zcr).collect();
    features.insert(FeatureName::ZcrMean, mean(&crossings));

    let min_gap = (MIN_PEAK_GAP_SECS / hop_secs).ceil() as usize;
    let syllables = count_peaks(&frames, min_gap.max(1)) as f64;
    let voiced_secs = total_secs * voiced_ratio;
    features.insert(FeatureName::SpeechRateSps, syllables / total_secs);
    if voiced_secs > 0.0 {
        features.insert(FeatureName::ArticulationRateSps, syllables / voiced_secs);
    }

    log::debug!(
        "Energy features: {} frames, {:.0}% speech, {} pauses, {} syllable peaks",
        frames.len(),
        voiced_ratio * 100.0,
        pauses,
        syllables
    );

    features
}

/// Waveform-based extractor, overlaid with sidecar values when present
#[derive(Debug, Clone)]
pub struct EnergyExtractor {
    silence_threshold: f32,
    sidecar: Option<SidecarExtractor>,
}

impl EnergyExtractor {
    pub fn new() -> Self {
        Self {
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            sidecar: Some(SidecarExtractor::new()),
        }
    }

    pub fn with_silence_threshold(mut self, threshold: f32) -> Self {
        self.silence_threshold = threshold;
        self
    }

    /// Replace (or with `None`, disable) the sidecar overlay
    pub fn with_sidecar(mut self, sidecar: Option<SidecarExtractor>) -> Self {
        self.sidecar = sidecar;
        self
    }

    pub fn silence_threshold(&self) -> f32 {
        self.silence_threshold
    }
}

impl Default for EnergyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for EnergyExtractor {
    fn extract(&self, audio_path: &Path, sample: &AudioSample) -> Result<FeatureSet> {
        let mut features = energy_features(sample, self.silence_threshold);

        if let Some(sidecar) = &self.sidecar {
            let path = sidecar.locate(audio_path);
            // a configured file must exist; the per-recording default is optional
            if sidecar.is_explicit() || path.exists() {
                let precomputed = sidecar.read(audio_path)?;
                log::info!(
                    "Using {} precomputed features from {:?}",
                    precomputed.len(),
                    path
                );
                features.merge(precomputed);
            }
        }

        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 1000;

    /// 100 ms bursts of a 200 Hz tone separated by gaps of `gap_ms`
    fn bursts(count: usize, gap_ms: usize) -> Vec<f32> {
        let mut samples = Vec::new();
        for _ in 0..count {
            for i in 0..100 {
                let t = i as f32 / RATE as f32;
                samples.push(0.5 * (2.0 * std::f32::consts::PI * 200.0 * t).sin());
            }
            samples.extend(std::iter::repeat(0.0).take(gap_ms));
        }
        samples
    }

    #[test]
    fn test_frame_layout() {
        let (frames, hop_secs) = frames(&vec![0.0; 1000], RATE, 0.01);
        // 40-sample frames with a 20-sample hop
        assert_eq!(hop_secs, 0.02);
        assert_eq!(frames.len(), 49);
        assert!(frames.iter().all(|f| !f.voiced));
    }

    #[test]
    fn test_silence_has_full_pause_ratio() {
        let sample = AudioSample::new(vec![0.0; 2000], RATE).unwrap();
        let features = energy_features(&sample, 0.01);

        assert_eq!(features.get(FeatureName::PauseRatio), Some(1.0));
        assert_eq!(features.get(FeatureName::PauseFrequencyHz), Some(0.0));
        assert_eq!(features.get(FeatureName::LoudnessRms), None);
        assert_eq!(features.get(FeatureName::SpeechRateSps), None);
    }

    #[test]
    fn test_steady_tone() {
        let tone: Vec<f32> = (0..2000)
            .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 100.0 * i as f32 / RATE as f32).sin())
            .collect();
        let sample = AudioSample::new(tone, RATE).unwrap();
        let features = energy_features(&sample, 0.01);

        assert_eq!(features.get(FeatureName::PauseRatio), Some(0.0));
        let loudness = features.get(FeatureName::LoudnessRms).unwrap();
        assert!((loudness - 0.5 / 2f64.sqrt()).abs() < 0.02);
        assert!(features.get(FeatureName::EnergyVariation).unwrap() < 0.1);
        // 100 Hz crosses zero 200 times a second
        let expected = 200.0 / ZCR_REFERENCE_RATE;
        assert!((features.get(FeatureName::ZcrMean).unwrap() - expected).abs() < 0.002);
    }

    fn tone(freq: f32, rate: u32, secs: f32) -> AudioSample {
        let samples = (0..(rate as f32 * secs) as usize)
            .map(|i| 0.5 * (2.0 * std::f32::consts::PI * freq * i as f32 / rate as f32).sin())
            .collect();
        AudioSample::new(samples, rate).unwrap()
    }

    #[test]
    fn test_zcr_independent_of_sample_rate() {
        let zcr = |rate| {
            energy_features(&tone(1500.0, rate, 1.0), 0.01)
                .get(FeatureName::ZcrMean)
                .unwrap()
        };
        let reference = zcr(22_050);
        assert!((reference - 3000.0 / ZCR_REFERENCE_RATE).abs() < 0.005);

        for rate in [16_000, 44_100, 48_000] {
            let value = zcr(rate);
            assert!(
                (value - reference).abs() < 0.005,
                "{} Hz gave {}, 22050 Hz gave {}",
                rate,
                value,
                reference
            );
        }
    }

    #[test]
    fn test_null_in_sidecar_overrides_waveform_value() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("answer.wav");
        std::fs::write(
            dir.path().join("answer.features.json"),
            r#"{"pause_ratio": null}"#,
        )
        .unwrap();

        let sample = AudioSample::new(vec![0.0; 2000], RATE).unwrap();
        assert!(energy_features(&sample, 0.01)
            .get(FeatureName::PauseRatio)
            .is_some());

        let features = EnergyExtractor::new().extract(&audio, &sample).unwrap();
        assert_eq!(features.get(FeatureName::PauseRatio), None);
        assert!(features.raw(FeatureName::PauseRatio).unwrap().value.is_nan());
    }

    #[test]
    fn test_pauses_and_syllables_counted() {
        // five bursts, each followed by 300 ms of silence
        let sample = AudioSample::new(bursts(5, 300), RATE).unwrap();
        let features = energy_features(&sample, 0.01);

        // four gaps lie between speech; the trailing one does not count
        let expected_rate = 4.0 / sample.duration_secs();
        let pause_rate = features.get(FeatureName::PauseFrequencyHz).unwrap();
        assert!((pause_rate - expected_rate).abs() < 1e-9);

        let speech_rate = features.get(FeatureName::SpeechRateSps).unwrap();
        assert!((speech_rate - 5.0 / sample.duration_secs()).abs() < 1e-9);
        assert!(features.get(FeatureName::ArticulationRateSps).unwrap() > speech_rate);
    }

    #[test]
    fn test_short_gaps_are_not_pauses() {
        let sample = AudioSample::new(bursts(5, 100), RATE).unwrap();
        let features = energy_features(&sample, 0.01);
        assert_eq!(features.get(FeatureName::PauseFrequencyHz), Some(0.0));
    }

    #[test]
    fn test_sidecar_values_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("answer.wav");
        std::fs::write(
            dir.path().join("answer.features.json"),
            r#"{"pause_ratio": 0.33, "hnr_db": 18.5}"#,
        )
        .unwrap();

        let sample = AudioSample::new(vec![0.0; 2000], RATE).unwrap();
        let features = EnergyExtractor::new().extract(&audio, &sample).unwrap();

        assert_eq!(features.get(FeatureName::PauseRatio), Some(0.33));
        assert_eq!(features.get(FeatureName::HnrDb), Some(18.5));
        assert_eq!(features.get(FeatureName::PauseFrequencyHz), Some(0.0));
    }

    #[test]
    fn test_no_sidecar_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("answer.wav");
        let sample = AudioSample::new(vec![0.0; 2000], RATE).unwrap();

        let features = EnergyExtractor::new().extract(&audio, &sample).unwrap();
        assert!(features.get(FeatureName::HnrDb).is_none());
    }
}
