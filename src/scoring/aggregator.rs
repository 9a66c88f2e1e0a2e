//! Overall score and quality label

use crate::config::DimensionWeights;
use crate::error::{AssessError, Result};
use crate::model::{DimensionScore, QualityLabel, Score};

/// Lower bound (inclusive) of each label, highest first
pub const QUALITY_BANDS: [(f64, QualityLabel); 4] = [
    (70.0, QualityLabel::Excellent),
    (50.0, QualityLabel::Good),
    (30.0, QualityLabel::Fair),
    (0.0, QualityLabel::NeedsImprovement),
];

/// Rounding residue of the weighted mean that still counts as reaching a bound
const BAND_EPSILON: f64 = 1e-9;

/// Look up the label band containing `score`
pub fn quality_label(score: Score) -> QualityLabel {
    QUALITY_BANDS
        .iter()
        .find(|(floor, _)| score.value() + BAND_EPSILON >= *floor)
        .map(|(_, label)| *label)
        .unwrap_or(QualityLabel::NeedsImprovement)
}

/// Weighted mean over the available dimensions, renormalised over their
/// weights. Fails when no weighted dimension produced a score.
pub fn aggregate(
    dimensions: &[DimensionScore],
    weights: &DimensionWeights,
) -> Result<(Score, QualityLabel)> {
    let available: Vec<(f64, Score)> = dimensions
        .iter()
        .filter_map(|d| d.score().map(|s| (weights.get(d.dimension()), s)))
        .collect();

    let total_weight: f64 = available.iter().map(|(w, _)| *w).sum();
    if available.is_empty() || total_weight <= 0.0 {
        return Err(AssessError::InsufficientSignal(
            "no dimension could be scored from the supplied features".into(),
        ));
    }

    let weighted: f64 = available
        .iter()
        .map(|(w, s)| (w / total_weight) * s.value())
        .sum();
    let overall = Score::new(weighted);
    let label = quality_label(overall);

    log::debug!(
        "Overall score {} from {}/{} dimensions ({})",
        overall,
        available.len(),
        dimensions.len(),
        label
    );

    Ok((overall, label))
}
