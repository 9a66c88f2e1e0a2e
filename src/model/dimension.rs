use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level axis of speech quality
///
/// Declaration order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    VocalQuality,
    ArticulationClarity,
    ProsodicVariation,
    SpeechTiming,
}

impl Dimension {
    /// All dimensions in canonical order
    pub const ALL: [Dimension; 4] = [
        Dimension::VocalQuality,
        Dimension::ArticulationClarity,
        Dimension::ProsodicVariation,
        Dimension::SpeechTiming,
    ];

    /// Configuration key
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::VocalQuality => "vocal_quality",
            Dimension::ArticulationClarity => "articulation_clarity",
            Dimension::ProsodicVariation => "prosodic_variation",
            Dimension::SpeechTiming => "speech_timing",
        }
    }

    /// Human-readable name
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::VocalQuality => "Vocal Quality",
            Dimension::ArticulationClarity => "Articulation Clarity",
            Dimension::ProsodicVariation => "Prosodic Variation",
            Dimension::SpeechTiming => "Speech Timing",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
