//! Speech Assessor - speech quality scoring for practice recordings
//!
//! This library turns acoustic measurements of a short spoken answer into
//! dimension scores, an overall score with a quality label, and actionable
//! feedback.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod scoring;

pub use config::{EngineConfig, SharedConfig};
pub use engine::AssessmentEngine;
pub use error::AssessError;
pub use export::config::ExportConfig;
pub use export::pipeline::AssessmentPipeline;
