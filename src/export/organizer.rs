//! Report file layout
//!
//! Reports mirror the recordings' folder structure below the deepest folder
//! shared by every input, so `week1/answer.wav` and `week2/answer.wav` land
//! in different places.

use super::config::ReportFormat;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Deepest directory containing every path in `paths`
pub fn common_root(paths: &[PathBuf]) -> PathBuf {
    let mut parents = paths.iter().map(|p| p.parent().unwrap_or(Path::new("")));
    let Some(first) = parents.next() else {
        return PathBuf::new();
    };

    let mut root: Vec<Component> = first.components().collect();
    for parent in parents {
        let shared = root
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        root.truncate(shared);
    }
    root.into_iter().collect()
}

/// Places report files in the output directory, one per recording
pub struct ReportOrganizer {
    output_dir: PathBuf,
}

impl ReportOrganizer {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Create the output directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", self.output_dir))?;
        log::info!("Writing reports to {:?}", self.output_dir);
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output>/<path below root>/<stem>.report.<ext>`
    pub fn report_path(&self, audio_path: &Path, root: &Path, format: ReportFormat) -> PathBuf {
        let relative = audio_path.strip_prefix(root).unwrap_or(audio_path);
        // only plain names, so nothing escapes the output directory
        let folder: PathBuf = relative
            .parent()
            .map(|p| {
                p.components()
                    .filter(|c| matches!(c, Component::Normal(_)))
                    .collect()
            })
            .unwrap_or_default();
        let stem = audio_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording".to_string());

        self.output_dir
            .join(folder)
            .join(format!("{}.report.{}", stem, format.extension()))
    }

    /// Destinations for a whole batch. A recording whose destination was
    /// already claimed by an earlier one gets an error naming that recording.
    pub fn plan(&self, paths: &[PathBuf], format: ReportFormat) -> Vec<Result<PathBuf>> {
        let root = common_root(paths);
        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();

        paths
            .iter()
            .map(|path| -> Result<PathBuf> {
                let dest = self.report_path(path, &root, format);
                if let Some(owner) = claimed.get(&dest) {
                    anyhow::bail!(
                        "Report {:?} is already written for {:?}; rename one of the recordings",
                        dest,
                        owner
                    );
                }
                claimed.insert(dest.clone(), path.as_path());
                Ok(dest)
            })
            .collect()
    }

    /// Write rendered report content to `dest`, creating its folder
    pub fn write_report(&self, dest: &Path, content: &str) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report folder: {:?}", parent))?;
        }
        fs::write(dest, content).with_context(|| format!("Failed to write report: {:?}", dest))?;
        log::debug!("Report written to {:?}", dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_root() {
        let paths = vec![
            PathBuf::from("/rec/week1/answer.wav"),
            PathBuf::from("/rec/week2/deep/answer.wav"),
        ];
        assert_eq!(common_root(&paths), PathBuf::from("/rec"));
        assert_eq!(
            common_root(&[PathBuf::from("/rec/take.wav")]),
            PathBuf::from("/rec")
        );
        assert_eq!(common_root(&[]), PathBuf::new());
    }

    #[test]
    fn test_report_path() {
        let organizer = ReportOrganizer::new(PathBuf::from("/out"));
        assert_eq!(
            organizer.report_path(
                Path::new("/rec/answer one.m4a"),
                Path::new("/rec"),
                ReportFormat::Text
            ),
            PathBuf::from("/out/answer one.report.txt")
        );
        assert_eq!(
            organizer.report_path(
                Path::new("/rec/week2/take2.wav"),
                Path::new("/rec"),
                ReportFormat::Json
            ),
            PathBuf::from("/out/week2/take2.report.json")
        );
    }

    #[test]
    fn test_unrelated_roots_stay_inside_output() {
        let organizer = ReportOrganizer::new(PathBuf::from("/out"));
        let dest = organizer.report_path(
            Path::new("/abs/take.wav"),
            Path::new("rel"),
            ReportFormat::Text,
        );
        assert_eq!(dest, PathBuf::from("/out/abs/take.report.txt"));
    }

    #[test]
    fn test_plan_separates_same_stem_in_subfolders() {
        let organizer = ReportOrganizer::new(PathBuf::from("/out"));
        let plan = organizer.plan(
            &[
                PathBuf::from("/rec/week1/answer.wav"),
                PathBuf::from("/rec/week2/answer.wav"),
            ],
            ReportFormat::Json,
        );

        assert_eq!(
            plan[0].as_ref().unwrap(),
            &PathBuf::from("/out/week1/answer.report.json")
        );
        assert_eq!(
            plan[1].as_ref().unwrap(),
            &PathBuf::from("/out/week2/answer.report.json")
        );
    }

    #[test]
    fn test_plan_rejects_repeated_destination() {
        let organizer = ReportOrganizer::new(PathBuf::from("/out"));
        let plan = organizer.plan(
            &[PathBuf::from("/rec/answer.wav"), PathBuf::from("/rec/answer.mp3")],
            ReportFormat::Text,
        );

        assert!(plan[0].is_ok());
        let err = plan[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("already written for"));
    }

    #[test]
    fn test_init_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let organizer = ReportOrganizer::new(dir.path().join("reports"));
        organizer.init().unwrap();

        let dest = organizer.output_dir().join("nested").join("a.report.txt");
        organizer.write_report(&dest, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "hello");
    }
}
