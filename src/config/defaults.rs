//! Built-in healthy-speech baselines, layout and feedback texts

use super::baseline::BaselineRange;
use super::feedback::{Advice, FeatureFeedback, FeedbackCatalog};
use super::settings::{DimensionWeights, WeightedFeature};
use crate::model::{Dimension, FeatureName};
use std::collections::BTreeMap;

pub(crate) fn weights() -> DimensionWeights {
    DimensionWeights::new([
        (Dimension::VocalQuality, 0.30),
        (Dimension::ArticulationClarity, 0.30),
        (Dimension::ProsodicVariation, 0.25),
        (Dimension::SpeechTiming, 0.15),
    ])
}

pub(crate) fn baselines() -> BTreeMap<FeatureName, BaselineRange> {
    use FeatureName::*;

    BTreeMap::from([
        // Vocal quality
        (PitchStdHz, BaselineRange::optimal_band(20.0, 60.0)),
        (PitchRangeHz, BaselineRange::optimal_band(80.0, 250.0)),
        (JitterPct, BaselineRange::lower_is_better(0.0, 1.0)),
        (ShimmerPct, BaselineRange::lower_is_better(1.0, 6.0)),
        (HnrDb, BaselineRange::higher_is_better(10.0, 25.0)),
        (LoudnessRms, BaselineRange::optimal_band(0.02, 0.25)),
        // Articulation
        (SpectralContrastDb, BaselineRange::higher_is_better(10.0, 20.0)),
        (ZcrMean, BaselineRange::optimal_band(0.05, 0.15)),
        (SpectralCentroidHz, BaselineRange::optimal_band(1000.0, 3000.0)),
        (FormantDispersionHz, BaselineRange::optimal_band(800.0, 1400.0)),
        // Prosody
        (PitchVariation, BaselineRange::higher_is_better(0.08, 0.15)),
        (EnergyVariation, BaselineRange::higher_is_better(0.15, 0.30)),
        // Timing
        (SpeechRateSps, BaselineRange::optimal_band(4.0, 6.5)),
        (ArticulationRateSps, BaselineRange::optimal_band(4.5, 7.0)),
        (PauseRatio, BaselineRange::lower_is_better(0.2, 0.5)),
        (PauseFrequencyHz, BaselineRange::lower_is_better(0.1, 0.5)),
    ])
}

pub(crate) fn layout() -> BTreeMap<Dimension, Vec<WeightedFeature>> {
    use FeatureName::*;

    let uniform = |features: &[FeatureName]| -> Vec<WeightedFeature> {
        features.iter().copied().map(WeightedFeature::uniform).collect()
    };

    BTreeMap::from([
        (
            Dimension::VocalQuality,
            uniform(&[
                PitchStdHz,
                PitchRangeHz,
                JitterPct,
                ShimmerPct,
                HnrDb,
                LoudnessRms,
            ]),
        ),
        (
            Dimension::ArticulationClarity,
            uniform(&[
                SpectralContrastDb,
                ZcrMean,
                SpectralCentroidHz,
                FormantDispersionHz,
            ]),
        ),
        (
            Dimension::ProsodicVariation,
            uniform(&[PitchVariation, EnergyVariation]),
        ),
        (
            Dimension::SpeechTiming,
            uniform(&[SpeechRateSps, ArticulationRateSps, PauseRatio, PauseFrequencyHz]),
        ),
    ])
}

fn entry(strength: &str, too_low: Option<Advice>, too_high: Option<Advice>) -> FeatureFeedback {
    FeatureFeedback {
        strength: strength.to_string(),
        too_low,
        too_high,
    }
}

pub(crate) fn feedback() -> FeedbackCatalog {
    use FeatureName::*;

    let mut catalog = FeedbackCatalog::new();

    catalog.insert(
        PitchStdHz,
        entry(
            "Good pitch variation - your speech is expressive",
            Some(Advice::new(
                "Limited pitch variation detected (monotone speech)",
                &["Practice varying your pitch - try reading with more expression"],
            )),
            Some(Advice::new(
                "Pitch swings are erratic",
                &["Let pitch rise and fall with meaning; slow down when you feel nervous"],
            )),
        ),
    );
    catalog.insert(
        PitchRangeHz,
        entry(
            "Healthy pitch range",
            Some(Advice::new(
                "Narrow pitch range",
                &["Let your voice rise on key points and fall at the end of statements"],
            )),
            Some(Advice::new(
                "Pitch range is unusually wide",
                &["Keep your voice in a comfortable register instead of jumping between extremes"],
            )),
        ),
    );
    catalog.insert(
        JitterPct,
        entry(
            "Stable voice with little pitch perturbation",
            None,
            Some(Advice::new(
                "Voice instability detected",
                &["Practice vocal exercises to improve voice stability"],
            )),
        ),
    );
    catalog.insert(
        ShimmerPct,
        entry(
            "Even loudness from syllable to syllable",
            None,
            Some(Advice::new(
                "Loudness wavers within syllables",
                &["Support your breath from the diaphragm to keep your volume even"],
            )),
        ),
    );
    catalog.insert(
        HnrDb,
        entry(
            "Clear, resonant voice",
            Some(Advice::new(
                "Voice clarity could be improved",
                &["Practice breath support and speak with more vocal energy"],
            )),
            None,
        ),
    );
    catalog.insert(
        LoudnessRms,
        entry(
            "Comfortable speaking volume",
            Some(Advice::new(
                "Voice is quiet",
                &["Project your voice as if speaking to someone across the room"],
            )),
            Some(Advice::new(
                "Voice is very loud or clipping",
                &["Move slightly away from the microphone or lower your volume"],
            )),
        ),
    );
    catalog.insert(
        SpectralContrastDb,
        entry(
            "Clear articulation - words are well-pronounced",
            Some(Advice::new(
                "Articulation could be clearer",
                &[
                    "Practice speaking slowly and clearly, emphasizing consonants",
                    "Try tongue twisters and articulation exercises",
                ],
            )),
            None,
        ),
    );
    catalog.insert(
        ZcrMean,
        entry(
            "Crisp consonants",
            Some(Advice::new(
                "Consonants sound soft or swallowed",
                &["Finish each word crisply, especially final consonants"],
            )),
            Some(Advice::new(
                "Speech sounds hissy or breathy",
                &["Reduce breathiness by humming briefly before you start speaking"],
            )),
        ),
    );
    catalog.insert(
        SpectralCentroidHz,
        entry(
            "Bright, forward voice placement",
            Some(Advice::new(
                "Speech sounds muffled",
                &["Open your mouth more and keep your head up so the sound projects forward"],
            )),
            Some(Advice::new(
                "Speech sounds harsh or sibilant",
                &["Relax your jaw and soften 's' and 'sh' sounds"],
            )),
        ),
    );
    catalog.insert(
        FormantDispersionHz,
        entry(
            "Well-separated vowel sounds",
            Some(Advice::new(
                "Vowels sound compressed",
                &["Exaggerate mouth movements slightly to separate vowel sounds"],
            )),
            Some(Advice::new(
                "Vowel articulation is unstable",
                &["Practice sustained vowels to keep each sound consistent"],
            )),
        ),
    );
    catalog.insert(
        PitchVariation,
        entry(
            "Good prosodic variation - natural and engaging speech",
            Some(Advice::new(
                "Limited intonation variation",
                &["Practice speaking with more emotional expression"],
            )),
            None,
        ),
    );
    catalog.insert(
        EnergyVariation,
        entry(
            "Good use of emphasis",
            Some(Advice::new(
                "Speech energy could be more varied",
                &["Try emphasizing important words and varying your volume"],
            )),
            None,
        ),
    );
    catalog.insert(
        SpeechRateSps,
        entry(
            "Good speech timing and pacing",
            Some(Advice::new(
                "Speech rate is slower than average",
                &["Practice speaking at a comfortable but steady pace"],
            )),
            Some(Advice::new(
                "Speech rate is faster than average",
                &["Try slowing down and pausing between thoughts"],
            )),
        ),
    );
    catalog.insert(
        ArticulationRateSps,
        entry(
            "Fluent articulation rate",
            Some(Advice::new(
                "Words are drawn out",
                &["Keep syllables short and move on to the next word without stretching vowels"],
            )),
            Some(Advice::new(
                "Words are rushed",
                &["Give each syllable its full shape; slow down within phrases"],
            )),
        ),
    );
    catalog.insert(
        PauseRatio,
        entry(
            "Pauses are well balanced",
            None,
            Some(Advice::new(
                "Long silences break up your answer",
                &["Plan your next point while finishing the current one to shorten gaps"],
            )),
        ),
    );
    catalog.insert(
        PauseFrequencyHz,
        entry(
            "Continuous, fluent delivery",
            None,
            Some(Advice::new(
                "Frequent pauses detected",
                &["Practice continuous speech with fewer interruptions"],
            )),
        ),
    );

    catalog
}
