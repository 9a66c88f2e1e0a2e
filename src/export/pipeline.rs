//! Batch assessment: decode → extract → analyze → write

use super::config::{ExportConfig, ReportFormat};
use super::organizer::ReportOrganizer;
use super::report::{render_json, render_text};
use crate::analysis::{decode_audio, is_supported, FeatureExtractor};
use crate::engine::{analyze_with, AssessmentEngine};
use crate::error::AssessError;
use crate::model::AnalysisReport;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result for one input recording
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<AnalysisReport>,
    /// Report file, when an output directory is configured
    pub report_path: Option<PathBuf>,
}

/// Assessment pipeline over audio files
pub struct AssessmentPipeline<E: FeatureExtractor> {
    config: ExportConfig,
    organizer: Option<ReportOrganizer>,
    engine: AssessmentEngine,
    extractor: E,
}

impl<E: FeatureExtractor> AssessmentPipeline<E> {
    pub fn new(config: ExportConfig, engine: AssessmentEngine, extractor: E) -> Result<Self> {
        let organizer = match &config.output_dir {
            Some(dir) => {
                let organizer = ReportOrganizer::new(dir.clone());
                organizer.init()?;
                Some(organizer)
            }
            None => None,
        };

        Ok(Self {
            config,
            organizer,
            engine,
            extractor,
        })
    }

    /// Assess one recording.
    ///
    /// One configuration snapshot covers the duration check and the scoring,
    /// so a reload midway cannot mix two configurations.
    pub fn assess_file(&self, path: &Path) -> Result<AnalysisReport> {
        let sample = decode_audio(path)?;
        let snapshot = self.engine.config().snapshot();

        let bounds = snapshot.config().duration();
        let duration_secs = sample.duration_secs();
        if !bounds.contains(duration_secs) {
            return Err(AssessError::AudioDuration {
                duration_secs,
                min_secs: bounds.min_secs,
                max_secs: bounds.max_secs,
            })
            .with_context(|| format!("Recording rejected: {:?}", path));
        }

        if sample.is_silent(self.config.silence_threshold) {
            return Err(AssessError::InsufficientSignal(format!(
                "no voice detected (RMS {:.4} below {})",
                sample.rms(),
                self.config.silence_threshold
            )))
            .with_context(|| format!("Recording rejected: {:?}", path));
        }

        let features = self
            .extractor
            .extract(path, &sample)
            .with_context(|| format!("Failed to extract features: {:?}", path))?;
        log::debug!("Extracted {} features from {:?}", features.len(), path);

        analyze_with(&snapshot, sample, features)
            .with_context(|| format!("Failed to analyze recording: {:?}", path))
    }

    fn process(
        &self,
        path: &Path,
        dest: Option<Result<PathBuf>>,
    ) -> Result<(AnalysisReport, Option<PathBuf>)> {
        // a clashing destination fails before any work is done
        let dest = dest.transpose()?;
        let report = self.assess_file(path)?;

        let written = match (&self.organizer, dest) {
            (Some(organizer), Some(dest)) => {
                let content = match self.config.format {
                    ReportFormat::Text => {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        render_text(&report, &name, chrono::Local::now())
                    }
                    ReportFormat::Json => render_json(&report)?,
                };
                organizer.write_report(&dest, &content)?;
                Some(dest)
            }
            _ => None,
        };

        Ok((report, written))
    }

    /// Assess all `paths` in parallel. Outcomes come back in input order.
    pub fn run(&self, paths: &[PathBuf]) -> Vec<FileOutcome> {
        log::info!("Assessing {} recording(s)", paths.len());

        let destinations: Vec<Option<Result<PathBuf>>> = match &self.organizer {
            Some(organizer) => organizer
                .plan(paths, self.config.format)
                .into_iter()
                .map(Some)
                .collect(),
            None => paths.iter().map(|_| None).collect(),
        };

        let outcomes: Vec<FileOutcome> = paths
            .par_iter()
            .zip(destinations)
            .map(|(path, dest)| {
                let (result, report_path) = match self.process(path, dest) {
                    Ok((report, written)) => {
                        log::info!(
                            "{:?}: {} ({})",
                            path,
                            report.overall_score(),
                            report.quality_label()
                        );
                        (Ok(report), written)
                    }
                    Err(e) => {
                        log::warn!("{:?}: {:#}", path, e);
                        (Err(e), None)
                    }
                };
                FileOutcome {
                    path: path.clone(),
                    result,
                    report_path,
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        log::info!(
            "Assessment complete: {} succeeded, {} failed",
            outcomes.len() - failed,
            failed
        );
        outcomes
    }
}

/// Expand inputs into audio files. Directories are walked recursively for
/// supported extensions, in sorted order; files are taken as given.
pub fn collect_audio_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let before = files.len();
            for entry in WalkDir::new(input).sort_by_file_name() {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_supported(entry.path()) => {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Error accessing entry: {}", e),
                }
            }
            log::debug!("Found {} recording(s) in {:?}", files.len() - before, input);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            anyhow::bail!("Input not found: {:?}", input);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_walks_directories_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("week2");
        std::fs::create_dir(&nested).unwrap();
        for name in ["b.wav", "a.mp3", "notes.txt", "a.features.json"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::write(nested.join("c.flac"), b"").unwrap();

        let files = collect_audio_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a.mp3"),
                PathBuf::from("b.wav"),
                PathBuf::from("week2/c.flac"),
            ]
        );
    }

    #[test]
    fn test_collect_missing_input_fails() {
        let result = collect_audio_files(&[PathBuf::from("/nonexistent/take.wav")]);
        assert!(result.is_err());
    }
}
