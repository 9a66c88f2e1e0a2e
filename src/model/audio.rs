use crate::error::{AssessError, Result};

/// Mono waveform handed to the engine by the capture/decode front-end
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSample {
    /// Samples, nominally in -1.0..=1.0
    samples: Vec<f32>,

    /// Samples per second
    sample_rate: u32,
}

impl AudioSample {
    /// Wrap decoded samples. Fails if the sample rate is zero.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AssessError::InvalidAudio(
                "sample rate must be greater than 0".into(),
            ));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Root-mean-square level over the whole sample
    pub fn rms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.samples.iter().map(|s| (*s as f64) * (*s as f64)).sum();
        (sum_sq / self.samples.len() as f64).sqrt() as f32
    }

    /// True if the overall level stays below `threshold` (no voice recorded)
    pub fn is_silent(&self, threshold: f32) -> bool {
        self.samples.is_empty() || self.rms() < threshold
    }
}
