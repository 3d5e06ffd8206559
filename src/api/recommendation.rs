use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::Dataset;
use crate::core::types::{ChartKind, Selection};
use crate::core::value::{Row, Scalar};
use crate::error::ChartResult;

/// Column-name fragments that mark a text column as a date column.
const DATE_NAME_KEYWORDS: [&str; 6] = ["date", "tarih", "time", "zaman", "year", "yıl"];

/// Rows handed to a recommender as an example of the data.
pub const RECOMMENDER_SAMPLE_ROWS: usize = 10;

/// Recommendation payload as produced by an external recommender.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default)]
    pub chart_type: String,
    #[serde(default)]
    pub x_column: String,
    #[serde(default)]
    pub y_column: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u16>,
}

impl Recommendation {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Coerces the payload onto `columns`.
    ///
    /// Unknown chart types become bar, an X outside the columns becomes the
    /// first column, a Y outside the columns becomes the second column (or
    /// the first when only one exists).
    #[must_use]
    pub fn normalize(&self, columns: &[String]) -> (ChartKind, Selection) {
        let kind = self.chart_type.parse::<ChartKind>().unwrap_or_default();
        let known = |name: &str| columns.iter().any(|column| column == name);
        let fallback = fallback_selection(columns);

        let x = if known(&self.x_column) {
            self.x_column.clone()
        } else {
            fallback.x
        };
        let y = if known(&self.y_column) {
            self.y_column.clone()
        } else {
            fallback.y
        };
        (kind, Selection { x, y })
    }
}

/// First column for X, second for Y (or the first when only one exists).
#[must_use]
pub fn fallback_selection(columns: &[String]) -> Selection {
    let x = columns.first().cloned().unwrap_or_default();
    let y = columns.get(1).or(columns.first()).cloned().unwrap_or_default();
    Selection { x, y }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// User-facing note about which recommendation ended up applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationNotice {
    pub level: NoticeLevel,
    pub message: String,
}

fn failure_message(error_code: Option<u16>) -> String {
    match error_code {
        Some(429) => {
            "Recommendation quota exceeded. Default chart settings were used.".to_owned()
        }
        Some(401) => {
            "Recommendation service rejected the credentials. Default chart settings were used."
                .to_owned()
        }
        Some(500 | 503) => {
            "Recommendation service is unavailable. Default chart settings were used.".to_owned()
        }
        Some(code) => {
            format!("Recommendation failed (code {code}). Default chart settings were used.")
        }
        None => "Recommendation failed. Default chart settings were used.".to_owned(),
    }
}

/// Chart kind and selection chosen for a dataset, plus the notice to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRecommendation {
    pub kind: ChartKind,
    pub selection: Selection,
    pub notice: RecommendationNotice,
}

impl AppliedRecommendation {
    /// Bar chart over the first two columns. Y stays unset unless a second
    /// column exists.
    #[must_use]
    pub fn fallback(columns: &[String], error_code: Option<u16>) -> Self {
        let selection = Selection {
            x: columns.first().cloned().unwrap_or_default(),
            y: columns.get(1).cloned().unwrap_or_default(),
        };
        Self {
            kind: ChartKind::Bar,
            selection,
            notice: RecommendationNotice {
                level: NoticeLevel::Warning,
                message: failure_message(error_code),
            },
        }
    }
}

/// Resolves a recommender outcome against the dataset columns.
///
/// Errors and payloads flagged with `error` both produce the bar fallback.
#[must_use]
pub fn apply_recommendation(
    outcome: ChartResult<Recommendation>,
    columns: &[String],
) -> AppliedRecommendation {
    match outcome {
        Ok(recommendation) if !recommendation.error => {
            let (kind, selection) = recommendation.normalize(columns);
            debug!(%kind, x = %selection.x, y = %selection.y, "applied recommendation");
            AppliedRecommendation {
                kind,
                selection,
                notice: RecommendationNotice {
                    level: NoticeLevel::Info,
                    message: recommendation.reason,
                },
            }
        }
        Ok(recommendation) => {
            warn!(error_code = ?recommendation.error_code, "recommender reported failure");
            AppliedRecommendation::fallback(columns, recommendation.error_code)
        }
        Err(err) => {
            warn!(error = %err, "recommender call failed");
            AppliedRecommendation::fallback(columns, None)
        }
    }
}

/// Column summary handed to recommenders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub columns: Vec<String>,
    pub numeric: Vec<String>,
    pub date: Vec<String>,
    pub categorical: Vec<String>,
}

/// Splits columns into numeric, date and categorical groups.
///
/// Columns without any non-null value are left out of every group. Numeric
/// means every non-null value is numeric; other columns count as dates when
/// their name carries a date keyword.
#[must_use]
pub fn profile_columns(dataset: &Dataset) -> ColumnProfile {
    let mut profile = ColumnProfile {
        columns: dataset.columns.clone(),
        ..ColumnProfile::default()
    };

    for column in &dataset.columns {
        let mut present = dataset
            .rows
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|cell| !cell.is_null())
            .peekable();
        if present.peek().is_none() {
            continue;
        }

        if present.all(Scalar::is_numeric) {
            profile.numeric.push(column.clone());
        } else {
            let lowered = column.to_lowercase();
            if DATE_NAME_KEYWORDS
                .iter()
                .any(|keyword| lowered.contains(keyword))
            {
                profile.date.push(column.clone());
            } else {
                profile.categorical.push(column.clone());
            }
        }
    }

    profile
}

/// Port to the external chart recommendation service.
pub trait ChartRecommender {
    fn recommend(&self, profile: &ColumnProfile, sample: &[Row]) -> ChartResult<Recommendation>;
}

/// Asks `recommender` about `dataset` and resolves the answer, never failing.
#[must_use]
pub fn recommend_for(recommender: &dyn ChartRecommender, dataset: &Dataset) -> AppliedRecommendation {
    let profile = profile_columns(dataset);
    let sample_len = dataset.rows.len().min(RECOMMENDER_SAMPLE_ROWS);
    let outcome = recommender.recommend(&profile, &dataset.rows[..sample_len]);
    apply_recommendation(outcome, &dataset.columns)
}
