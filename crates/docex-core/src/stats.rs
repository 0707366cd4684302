//! Dashboard summary over a result set.

use serde::Serialize;

use crate::models::result::{ExtractionResult, ExtractionStatus};

/// Number of results listed as recent activity.
const RECENT_LIMIT: usize = 3;

/// Entry in the recent-activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentExtraction {
    pub id: String,
    pub file_name: String,
    pub status: ExtractionStatus,
}

/// Totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_extractions: usize,
    /// Percentage of successful results, one decimal.
    pub success_rate: f64,
    pub recent_extractions: Vec<RecentExtraction>,
}

impl DashboardStats {
    pub fn from_results(results: &[ExtractionResult]) -> Self {
        let recent_extractions = results
            .iter()
            .take(RECENT_LIMIT)
            .enumerate()
            .map(|(i, r)| RecentExtraction {
                id: i.to_string(),
                file_name: r.file_name.clone(),
                status: r.status,
            })
            .collect();

        Self {
            total_extractions: results.len(),
            success_rate: success_rate(results),
            recent_extractions,
        }
    }
}

/// Successful share of `results` in percent, rounded to one decimal.
///
/// An empty result set has a rate of `0.0`.
pub fn success_rate(results: &[ExtractionResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let successes = results.iter().filter(|r| r.is_success()).count();
    let rate = successes as f64 / results.len() as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}
