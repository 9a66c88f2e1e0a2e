//! Batch orchestration and report output

pub mod config;
pub mod organizer;
pub mod pipeline;
pub mod report;

pub use config::{ExportConfig, ReportFormat};
pub use organizer::{common_root, ReportOrganizer};
pub use pipeline::{collect_audio_files, AssessmentPipeline, FileOutcome};
pub use report::{render_json, render_text};
