use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Acoustic measurement recognised by the engine
///
/// This is a closed set. Feature inputs carrying any other key are
/// ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    // Pitch
    PitchMeanHz,
    PitchStdHz,
    PitchRangeHz,
    PitchVariation,

    // Voice perturbation
    JitterPct,
    ShimmerPct,
    HnrDb,

    // Energy
    LoudnessRms,
    EnergyVariation,

    // Spectral
    SpectralCentroidHz,
    SpectralContrastDb,
    ZcrMean,
    FormantDispersionHz,

    // Timing
    SpeechRateSps,
    ArticulationRateSps,
    PauseRatio,
    PauseFrequencyHz,
}

/// Measurement unit of a feature value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Hertz,
    Percent,
    Decibel,
    Amplitude,
    Ratio,
    SyllablesPerSecond,
    PerSecond,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Hertz => "Hz",
            Unit::Percent => "%",
            Unit::Decibel => "dB",
            Unit::Amplitude => "rms",
            Unit::Ratio => "",
            Unit::SyllablesPerSecond => "syl/s",
            Unit::PerSecond => "/s",
        }
    }
}

impl FeatureName {
    pub const ALL: [FeatureName; 17] = [
        FeatureName::PitchMeanHz,
        FeatureName::PitchStdHz,
        FeatureName::PitchRangeHz,
        FeatureName::PitchVariation,
        FeatureName::JitterPct,
        FeatureName::ShimmerPct,
        FeatureName::HnrDb,
        FeatureName::LoudnessRms,
        FeatureName::EnergyVariation,
        FeatureName::SpectralCentroidHz,
        FeatureName::SpectralContrastDb,
        FeatureName::ZcrMean,
        FeatureName::FormantDispersionHz,
        FeatureName::SpeechRateSps,
        FeatureName::ArticulationRateSps,
        FeatureName::PauseRatio,
        FeatureName::PauseFrequencyHz,
    ];

    /// Key used in feature inputs and configuration files
    pub fn key(&self) -> &'static str {
        match self {
            FeatureName::PitchMeanHz => "pitch_mean_hz",
            FeatureName::PitchStdHz => "pitch_std_hz",
            FeatureName::PitchRangeHz => "pitch_range_hz",
            FeatureName::PitchVariation => "pitch_variation",
            FeatureName::JitterPct => "jitter_pct",
            FeatureName::ShimmerPct => "shimmer_pct",
            FeatureName::HnrDb => "hnr_db",
            FeatureName::LoudnessRms => "loudness_rms",
            FeatureName::EnergyVariation => "energy_variation",
            FeatureName::SpectralCentroidHz => "spectral_centroid_hz",
            FeatureName::SpectralContrastDb => "spectral_contrast_db",
            FeatureName::ZcrMean => "zcr_mean",
            FeatureName::FormantDispersionHz => "formant_dispersion_hz",
            FeatureName::SpeechRateSps => "speech_rate_sps",
            FeatureName::ArticulationRateSps => "articulation_rate_sps",
            FeatureName::PauseRatio => "pause_ratio",
            FeatureName::PauseFrequencyHz => "pause_frequency_hz",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            FeatureName::PitchMeanHz
            | FeatureName::PitchStdHz
            | FeatureName::PitchRangeHz
            | FeatureName::SpectralCentroidHz
            | FeatureName::FormantDispersionHz => Unit::Hertz,
            FeatureName::JitterPct | FeatureName::ShimmerPct => Unit::Percent,
            FeatureName::HnrDb | FeatureName::SpectralContrastDb => Unit::Decibel,
            FeatureName::LoudnessRms => Unit::Amplitude,
            FeatureName::PitchVariation
            | FeatureName::EnergyVariation
            | FeatureName::ZcrMean
            | FeatureName::PauseRatio => Unit::Ratio,
            FeatureName::SpeechRateSps | FeatureName::ArticulationRateSps => {
                Unit::SyllablesPerSecond
            }
            FeatureName::PauseFrequencyHz => Unit::PerSecond,
        }
    }

    /// Short description used in report text
    pub fn label(&self) -> &'static str {
        match self {
            FeatureName::PitchMeanHz => "average pitch",
            FeatureName::PitchStdHz => "pitch variation",
            FeatureName::PitchRangeHz => "pitch range",
            FeatureName::PitchVariation => "intonation",
            FeatureName::JitterPct => "voice stability",
            FeatureName::ShimmerPct => "loudness stability",
            FeatureName::HnrDb => "voice clarity",
            FeatureName::LoudnessRms => "loudness",
            FeatureName::EnergyVariation => "vocal emphasis",
            FeatureName::SpectralCentroidHz => "brightness",
            FeatureName::SpectralContrastDb => "articulation precision",
            FeatureName::ZcrMean => "consonant definition",
            FeatureName::FormantDispersionHz => "vowel definition",
            FeatureName::SpeechRateSps => "speech rate",
            FeatureName::ArticulationRateSps => "articulation rate",
            FeatureName::PauseRatio => "pause time",
            FeatureName::PauseFrequencyHz => "pause frequency",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Scalar measurement with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureValue {
    pub value: f64,
    pub unit: Unit,
}

/// Measurements extracted from one audio sample
///
/// Absent keys and non-finite values are both "unavailable".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    values: BTreeMap<FeatureName, FeatureValue>,
}

impl FeatureSet {
    /// Create an empty feature set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: FeatureName, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Record a measurement, replacing any previous value
    pub fn insert(&mut self, name: FeatureName, value: f64) {
        self.values.insert(
            name,
            FeatureValue {
                value,
                unit: name.unit(),
            },
        );
    }

    /// Record a measurement by key. Returns false (and records nothing)
    /// for keys outside the recognised set.
    pub fn insert_key(&mut self, key: &str, value: f64) -> bool {
        match FeatureName::from_key(key) {
            Some(name) => {
                self.insert(name, value);
                true
            }
            None => false,
        }
    }

    /// Remove a measurement
    pub fn remove(&mut self, name: FeatureName) -> Option<FeatureValue> {
        self.values.remove(&name)
    }

    /// Usable value of a feature; `None` if absent or not finite
    pub fn get(&self, name: FeatureName) -> Option<f64> {
        self.values
            .get(&name)
            .map(|v| v.value)
            .filter(|v| v.is_finite())
    }

    /// Stored value as supplied, including non-finite values
    pub fn raw(&self, name: FeatureName) -> Option<&FeatureValue> {
        self.values.get(&name)
    }

    /// Overlay `other` onto this set; values in `other` win
    pub fn merge(&mut self, other: FeatureSet) {
        self.values.extend(other.values);
    }

    /// Iterate measurements in feature order
    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, &FeatureValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(FeatureName, f64)> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = (FeatureName, f64)>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_and_are_unique() {
        let mut keys: Vec<&str> = FeatureName::ALL.iter().map(|f| f.key()).collect();
        for name in FeatureName::ALL {
            assert_eq!(FeatureName::from_key(name.key()), Some(name));
        }
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), FeatureName::ALL.len());
    }

    #[test]
    fn test_serde_key_matches_key() {
        for name in FeatureName::ALL {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.key()));
        }
    }

    #[test]
    fn test_non_finite_is_unavailable() {
        let set = FeatureSet::new()
            .with(FeatureName::JitterPct, f64::NAN)
            .with(FeatureName::HnrDb, f64::INFINITY)
            .with(FeatureName::PauseRatio, 0.0);

        assert_eq!(set.get(FeatureName::JitterPct), None);
        assert_eq!(set.get(FeatureName::HnrDb), None);
        assert_eq!(set.get(FeatureName::PauseRatio), Some(0.0));
        assert_eq!(set.get(FeatureName::ShimmerPct), None);
        assert!(set.raw(FeatureName::JitterPct).is_some());
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut set = FeatureSet::new();
        assert!(!set.insert_key("charisma_index", 9.0));
        assert!(set.insert_key("hnr_db", 18.0));
        assert_eq!(set.len(), 1);
        assert_eq!(set.raw(FeatureName::HnrDb).unwrap().unit, Unit::Decibel);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = FeatureSet::new()
            .with(FeatureName::PauseRatio, 0.4)
            .with(FeatureName::ZcrMean, 0.1);
        let overlay = FeatureSet::new().with(FeatureName::PauseRatio, 0.2);
        base.merge(overlay);

        assert_eq!(base.get(FeatureName::PauseRatio), Some(0.2));
        assert_eq!(base.get(FeatureName::ZcrMean), Some(0.1));
    }
}
