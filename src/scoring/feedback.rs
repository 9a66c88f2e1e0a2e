//! Recommendations for weakness findings

use crate::config::FeedbackCatalog;
use crate::model::{DimensionScore, FindingKind, Recommendation, Tendency};

/// Recommendations for every weakness finding, in finding order.
///
/// Each recommendation shares its (dimension, feature) slot with the
/// weakness that triggered it.
pub fn recommend(dimensions: &[DimensionScore], catalog: &FeedbackCatalog) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for dimension in dimensions {
        for finding in dimension.findings() {
            if finding.kind != FindingKind::Weakness {
                continue;
            }
            let Some(feature) = finding.feature else {
                continue;
            };

            let tendency = dimension
                .sub_score(feature)
                .map(|s| s.tendency)
                .unwrap_or(Tendency::OnTarget);
            let texts = catalog
                .get(feature)
                .and_then(|f| f.advice(tendency))
                .map(|advice| advice.recommendations.clone())
                .filter(|texts| !texts.is_empty())
                .unwrap_or_else(|| vec![format!("Work on your {}", feature.label())]);

            recommendations.extend(texts.into_iter().map(|text| Recommendation {
                dimension: dimension.dimension(),
                feature,
                text,
            }));
        }
    }

    recommendations
}
