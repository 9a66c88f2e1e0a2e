//! Batch assessment settings

use crate::analysis::DEFAULT_SILENCE_THRESHOLD;
use std::path::PathBuf;

/// Report file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// Configuration for a batch of recordings
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Where report files go (None = don't write reports)
    pub output_dir: Option<PathBuf>,

    /// Format of written reports
    pub format: ReportFormat,

    /// Recordings whose overall RMS stays below this are rejected as silent
    pub silence_threshold: f32,
}

impl ExportConfig {
    pub fn new() -> Self {
        Self {
            output_dir: None,
            format: ReportFormat::Text,
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
        }
    }

    /// Write one report file per recording into `dir`
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_silence_threshold(mut self, threshold: f32) -> Self {
        self.silence_threshold = threshold;
        self
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}
