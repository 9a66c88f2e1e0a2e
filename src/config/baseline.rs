//! Healthy-range baselines for raw features

use crate::error::{AssessError, Result};
use crate::model::FeatureName;
use serde::{Deserialize, Serialize};

/// How a raw value maps onto the healthy range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// 0 at `low`, 100 at `high`
    HigherIsBetter,
    /// 100 at `low`, 0 at `high`
    LowerIsBetter,
    /// 100 anywhere inside `[low, high]`, falling off by one band width outside
    OptimalBand,
}

/// Healthy interval for one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineRange {
    pub low: f64,
    pub high: f64,
    pub direction: Direction,
}

impl BaselineRange {
    pub fn new(low: f64, high: f64, direction: Direction) -> Self {
        Self {
            low,
            high,
            direction,
        }
    }

    pub fn higher_is_better(low: f64, high: f64) -> Self {
        Self::new(low, high, Direction::HigherIsBetter)
    }

    pub fn lower_is_better(low: f64, high: f64) -> Self {
        Self::new(low, high, Direction::LowerIsBetter)
    }

    pub fn optimal_band(low: f64, high: f64) -> Self {
        Self::new(low, high, Direction::OptimalBand)
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Check bounds for `feature`
    pub fn validate(&self, feature: FeatureName) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(AssessError::config(format!(
                "baseline for {} must have finite bounds",
                feature
            )));
        }

        match self.direction {
            Direction::OptimalBand => {
                if self.width() == 0.0 {
                    return Err(AssessError::config(format!(
                        "baseline band for {} has zero width",
                        feature
                    )));
                }
                if self.width() < 0.0 {
                    return Err(AssessError::config(format!(
                        "baseline band for {} is inverted (low {} > high {})",
                        feature, self.low, self.high
                    )));
                }
            }
            Direction::HigherIsBetter | Direction::LowerIsBetter => {
                if self.low >= self.high {
                    return Err(AssessError::config(format!(
                        "baseline for {} requires low < high (got low {}, high {})",
                        feature, self.low, self.high
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ranges() {
        assert!(BaselineRange::lower_is_better(0.0, 1.0)
            .validate(FeatureName::JitterPct)
            .is_ok());
        assert!(BaselineRange::optimal_band(4.0, 6.5)
            .validate(FeatureName::SpeechRateSps)
            .is_ok());
    }

    #[test]
    fn test_low_not_below_high_rejected() {
        let result = BaselineRange::higher_is_better(25.0, 10.0).validate(FeatureName::HnrDb);
        assert!(matches!(result, Err(AssessError::ConfigValidation(_))));

        let equal = BaselineRange::lower_is_better(1.0, 1.0).validate(FeatureName::JitterPct);
        assert!(equal.is_err());
    }

    #[test]
    fn test_zero_width_band_rejected() {
        let result = BaselineRange::optimal_band(5.0, 5.0).validate(FeatureName::SpeechRateSps);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("zero width"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result =
            BaselineRange::optimal_band(f64::NAN, 5.0).validate(FeatureName::SpeechRateSps);
        assert!(result.is_err());
    }

    #[test]
    fn test_direction_serde_names() {
        let range: BaselineRange =
            toml::from_str("low = 0.0\nhigh = 1.0\ndirection = \"lower_is_better\"").unwrap();
        assert_eq!(range.direction, Direction::LowerIsBetter);
    }
}
