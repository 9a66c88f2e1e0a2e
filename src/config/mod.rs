//! Engine configuration: baselines, weights, thresholds and feedback
//! templates, loaded from TOML and validated once

mod baseline;
mod defaults;
mod feedback;
mod file;
mod settings;
mod snapshot;

pub use baseline::{BaselineRange, Direction};
pub use feedback::{Advice, FeatureFeedback, FeedbackCatalog};
pub use file::{load_config, save_config, ConfigFile, DimensionEntry, FeatureEntry};
pub use settings::{
    DimensionWeights, DurationBounds, EngineConfig, Thresholds, WeightedFeature, WEIGHT_TOLERANCE,
};
pub use snapshot::{ConfigSnapshot, SharedConfig};
