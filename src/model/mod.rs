//! Data model for one speech assessment
//!
//! These types are independent of both the audio front-end and the
//! report renderers. Everything the scoring core produces is immutable
//! once constructed.

mod audio;
mod dimension;
mod feature;
mod report;

pub use audio::AudioSample;
pub use dimension::Dimension;
pub use feature::{FeatureName, FeatureSet, FeatureValue, Unit};
pub use report::{
    AnalysisReport, DimensionScore, Finding, FindingKind, QualityLabel, Recommendation, Score,
    SubScore, Tendency,
};
