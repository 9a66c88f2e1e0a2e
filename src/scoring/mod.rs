//! Feature-to-score pipeline stages
//!
//! Every stage is a pure function of its inputs and the configuration:
//! normalise each feature, score each dimension, aggregate the dimensions,
//! then derive recommendations from the weakness findings.

mod aggregator;
mod dimension;
mod feedback;
mod normalizer;

pub use aggregator::{aggregate, quality_label, QUALITY_BANDS};
pub use dimension::{score_dimension, DIMENSION_UNAVAILABLE};
pub use feedback::recommend;
pub use normalizer::{normalize, Normalized};
