use super::{Dimension, FeatureName};
use serde::Serialize;
use std::fmt;

/// Score on the 0-100 scale
///
/// The constructor clamps, so a `Score` can never leave [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const MIN: Score = Score(0.0);
    pub const MAX: Score = Score(100.0);

    /// Clamp `value` into [0, 100]. NaN maps to 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Score::MIN
        } else {
            Score(value.clamp(0.0, 100.0))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Which way a measurement deviates from its healthy range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tendency {
    TooLow,
    OnTarget,
    TooHigh,
}

/// Normalised value of a single feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScore {
    pub feature: FeatureName,
    pub raw_value: f64,
    pub score: Score,
    /// Intra-dimension weight, renormalised over the available features
    pub weight: f64,
    pub tendency: Tendency,
}

/// What a finding reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Sub-score below the flag threshold
    Weakness,
    /// Sub-score at or above the strength threshold
    Strength,
    /// Feature value missing or not finite
    MissingFeature,
    /// No feature of the dimension was available
    DimensionUnavailable,
}

/// Human-readable observation tied to a (dimension, feature, kind) slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub dimension: Dimension,
    pub feature: Option<FeatureName>,
    pub kind: FindingKind,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Actionable suggestion keyed to a weakness finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub dimension: Dimension,
    pub feature: FeatureName,
    pub text: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Score and findings for one dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    dimension: Dimension,
    sub_scores: Vec<SubScore>,
    score: Option<Score>,
    findings: Vec<Finding>,
}

impl DimensionScore {
    pub(crate) fn new(
        dimension: Dimension,
        sub_scores: Vec<SubScore>,
        score: Option<Score>,
        findings: Vec<Finding>,
    ) -> Self {
        Self {
            dimension,
            sub_scores,
            score,
            findings,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Sub-scores in configured feature order
    pub fn sub_scores(&self) -> &[SubScore] {
        &self.sub_scores
    }

    pub fn sub_score(&self, feature: FeatureName) -> Option<&SubScore> {
        self.sub_scores.iter().find(|s| s.feature == feature)
    }

    /// `None` when no feature of this dimension was available
    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn is_available(&self) -> bool {
        self.score.is_some()
    }

    /// Findings in configured feature order
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
}

/// Qualitative band of the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl QualityLabel {
    pub fn title(&self) -> &'static str {
        match self {
            QualityLabel::Excellent => "Excellent",
            QualityLabel::Good => "Good",
            QualityLabel::Fair => "Fair",
            QualityLabel::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Result of one analysis call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    dimension_scores: Vec<DimensionScore>,
    overall_score: Score,
    quality_label: QualityLabel,
    recommendations: Vec<Recommendation>,
    config_version: u64,
}

impl AnalysisReport {
    pub(crate) fn new(
        dimension_scores: Vec<DimensionScore>,
        overall_score: Score,
        quality_label: QualityLabel,
        recommendations: Vec<Recommendation>,
        config_version: u64,
    ) -> Self {
        Self {
            dimension_scores,
            overall_score,
            quality_label,
            recommendations,
            config_version,
        }
    }

    /// Dimension scores in canonical order
    pub fn dimension_scores(&self) -> &[DimensionScore] {
        &self.dimension_scores
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimension_scores
            .iter()
            .find(|d| d.dimension() == dimension)
    }

    pub fn overall_score(&self) -> Score {
        self.overall_score
    }

    pub fn quality_label(&self) -> QualityLabel {
        self.quality_label
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Version of the configuration snapshot that produced this report
    pub fn config_version(&self) -> u64 {
        self.config_version
    }

    /// All findings, dimension by dimension
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.dimension_scores.iter().flat_map(|d| d.findings())
    }

    /// True when some data was missing and scores were renormalised
    pub fn is_partial(&self) -> bool {
        self.findings().any(|f| {
            matches!(
                f.kind,
                FindingKind::MissingFeature | FindingKind::DimensionUnavailable
            )
        })
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Speech quality: {}. Overall score: {}/100.",
            self.quality_label, self.overall_score
        )
    }
}
