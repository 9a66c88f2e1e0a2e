//! Raw feature value → 0-100 sub-score

use crate::config::{BaselineRange, Direction};
use crate::model::{Score, Tendency};

/// Normalised value of one measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    pub score: Score,
    pub tendency: Tendency,
}

/// Map `value` onto 0-100 against its baseline.
///
/// Returns `None` for non-finite values, which count as missing.
pub fn normalize(value: f64, range: &BaselineRange) -> Option<Normalized> {
    if !value.is_finite() {
        return None;
    }

    let width = range.width();
    let normalized = match range.direction {
        Direction::HigherIsBetter => {
            let fraction = ((value - range.low) / width).clamp(0.0, 1.0);
            let tendency = if fraction < 1.0 {
                Tendency::TooLow
            } else {
                Tendency::OnTarget
            };
            Normalized {
                score: Score::new(100.0 * fraction),
                tendency,
            }
        }
        Direction::LowerIsBetter => {
            let fraction = ((range.high - value) / width).clamp(0.0, 1.0);
            let tendency = if fraction < 1.0 {
                Tendency::TooHigh
            } else {
                Tendency::OnTarget
            };
            Normalized {
                score: Score::new(100.0 * fraction),
                tendency,
            }
        }
        Direction::OptimalBand => {
            let (distance, tendency) = if value < range.low {
                (range.low - value, Tendency::TooLow)
            } else if value > range.high {
                (value - range.high, Tendency::TooHigh)
            } else {
                (0.0, Tendency::OnTarget)
            };
            // zero-width bands never pass validation; score them as a step
            let penalty = if width > 0.0 {
                (distance / width).clamp(0.0, 1.0)
            } else if distance > 0.0 {
                1.0
            } else {
                0.0
            };
            Normalized {
                score: Score::new(100.0 * (1.0 - penalty)),
                tendency,
            }
        }
    };

    Some(normalized)
}
