//! Finding and recommendation templates

use super::baseline::Direction;
use crate::error::{AssessError, Result};
use crate::model::{FeatureName, Tendency};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Finding text plus what to do about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub finding: String,
    pub recommendations: Vec<String>,
}

impl Advice {
    pub fn new(finding: &str, recommendations: &[&str]) -> Self {
        Self {
            finding: finding.to_string(),
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Templates for one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFeedback {
    /// Finding emitted when the sub-score reaches the strength threshold
    pub strength: String,

    /// Weakness when the value falls short
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub too_low: Option<Advice>,

    /// Weakness when the value overshoots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub too_high: Option<Advice>,
}

impl FeatureFeedback {
    /// Advice for a weakness leaning in `tendency`
    pub fn advice(&self, tendency: Tendency) -> Option<&Advice> {
        match tendency {
            Tendency::TooLow => self.too_low.as_ref(),
            Tendency::TooHigh => self.too_high.as_ref(),
            Tendency::OnTarget => None,
        }
    }
}

/// Feedback templates keyed by feature
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackCatalog {
    entries: BTreeMap<FeatureName, FeatureFeedback>,
}

impl FeedbackCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: FeatureName, feedback: FeatureFeedback) {
        self.entries.insert(feature, feedback);
    }

    pub fn get(&self, feature: FeatureName) -> Option<&FeatureFeedback> {
        self.entries.get(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, &FeatureFeedback)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Every weakness side `direction` can produce must carry at least one
    /// recommendation, so no weakness finding is left without advice.
    pub fn validate_for(&self, feature: FeatureName, direction: Direction) -> Result<()> {
        let feedback = self.get(feature).ok_or_else(|| {
            AssessError::config(format!("no feedback templates for feature {}", feature))
        })?;

        let required: &[Tendency] = match direction {
            Direction::HigherIsBetter => &[Tendency::TooLow],
            Direction::LowerIsBetter => &[Tendency::TooHigh],
            Direction::OptimalBand => &[Tendency::TooLow, Tendency::TooHigh],
        };

        for tendency in required {
            let side = match tendency {
                Tendency::TooLow => "too_low",
                _ => "too_high",
            };
            match feedback.advice(*tendency) {
                Some(advice) if !advice.recommendations.is_empty() => {}
                Some(_) => {
                    return Err(AssessError::config(format!(
                        "feedback for {}.{} has no recommendations",
                        feature, side
                    )))
                }
                None => {
                    return Err(AssessError::config(format!(
                        "feedback for {} is missing {} advice",
                        feature, side
                    )))
                }
            }
        }

        Ok(())
    }
}
