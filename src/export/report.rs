//! Report rendering

use crate::model::AnalysisReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt::{self, Write};

/// Plain-text results sheet
///
/// The timestamp only appears in the rendered text, so the report itself
/// stays identical across runs.
pub fn render_text(report: &AnalysisReport, recording: &str, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_text(&mut out, report, recording, generated_at);
    out
}

fn write_text(
    out: &mut String,
    report: &AnalysisReport,
    recording: &str,
    generated_at: DateTime<Local>,
) -> fmt::Result {
    writeln!(out, "Speech Analysis Results")?;
    writeln!(out, "=======================")?;
    writeln!(out)?;
    writeln!(out, "Recording: {}", recording)?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Overall Score: {}/100", report.overall_score())?;
    writeln!(out, "Quality Level: {}", report.quality_label())?;
    writeln!(out)?;

    writeln!(out, "Detailed Scores:")?;
    for dimension in report.dimension_scores() {
        let title = dimension.dimension().title();
        match dimension.score() {
            Some(score) => writeln!(out, "- {}: {}/100", title, score)?,
            None => writeln!(out, "- {}: n/a", title)?,
        }
    }
    writeln!(out)?;

    writeln!(out, "Key Findings:")?;
    for finding in report.findings() {
        writeln!(out, "- {}", finding)?;
    }
    writeln!(out)?;

    writeln!(out, "Recommendations:")?;
    if report.recommendations().is_empty() {
        writeln!(out, "- None, keep it up")?;
    }
    for recommendation in report.recommendations() {
        writeln!(out, "- {}", recommendation)?;
    }
    writeln!(out)?;

    writeln!(out, "Summary: {}", report.summary())?;
    if report.is_partial() {
        writeln!(out, "Note: partial analysis, some measurements were unavailable.")?;
    }
    Ok(())
}

/// Pretty-printed JSON of the full report
pub fn render_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}
