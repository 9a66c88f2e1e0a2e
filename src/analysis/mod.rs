//! Audio front-end
//!
//! Decodes recordings and produces the feature sets the engine scores.
//! Feature extraction sits behind the `FeatureExtractor` trait so that
//! precomputed sidecar files and waveform-derived features are
//! interchangeable.

mod decode;
mod energy;
mod sidecar;
mod traits;

pub use decode::{decode_audio, is_supported, MAX_DECODE_SECS, SUPPORTED_EXTENSIONS};
pub use energy::{
    energy_features, frames, EnergyExtractor, Frame, DEFAULT_SILENCE_THRESHOLD, ZCR_REFERENCE_RATE,
};
pub use sidecar::{parse_feature_json, sidecar_path, SidecarExtractor};
pub use traits::FeatureExtractor;
