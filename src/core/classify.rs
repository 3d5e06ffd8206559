use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::types::{ColumnKind, Selection};
use crate::core::value::{Row, Scalar};
use crate::error::{ChartError, ChartResult};

/// Which test wins when every sampled value is both numeric and date-like
/// (for example a column of `"2020"`, `"2021"` strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePriority {
    /// Date detection runs first; such columns are bucketed by year.
    #[default]
    DateFirst,
    /// Numeric detection runs first; such columns plot on a linear scale.
    NumericFirst,
}

/// Sampling bounds and policy for column classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierTuning {
    #[serde(default = "default_x_sample_size")]
    pub x_sample_size: usize,
    #[serde(default = "default_y_sample_size")]
    pub y_sample_size: usize,
    #[serde(default)]
    pub x_date_priority: DatePriority,
}

fn default_x_sample_size() -> usize {
    200
}

fn default_y_sample_size() -> usize {
    50
}

impl Default for ClassifierTuning {
    fn default() -> Self {
        Self {
            x_sample_size: default_x_sample_size(),
            y_sample_size: default_y_sample_size(),
            x_date_priority: DatePriority::default(),
        }
    }
}

impl ClassifierTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if self.x_sample_size == 0 || self.y_sample_size == 0 {
            return Err(ChartError::InvalidConfig(
                "classifier sample sizes must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Classification of both axes, computed once per render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisKinds {
    pub x: ColumnKind,
    pub y_numeric: bool,
}

/// Classifies `column` from its first `sample_size` rows.
///
/// Missing cells count as null and fail both tests. An empty sample is
/// categorical.
#[must_use]
pub fn classify(
    rows: &[Row],
    column: &str,
    sample_size: usize,
    priority: DatePriority,
) -> ColumnKind {
    let sample: Vec<&Scalar> = rows
        .iter()
        .take(sample_size)
        .map(|row| row.get(column).unwrap_or(&Scalar::Null))
        .collect();

    if sample.is_empty() {
        return ColumnKind::Categorical;
    }

    let all_numeric = || sample.iter().all(|cell| cell.is_numeric());
    let all_dates = || sample.iter().all(|cell| cell.is_date_like());

    match priority {
        DatePriority::DateFirst if all_dates() => ColumnKind::Date,
        DatePriority::DateFirst if all_numeric() => ColumnKind::Numeric,
        DatePriority::NumericFirst if all_numeric() => ColumnKind::Numeric,
        DatePriority::NumericFirst if all_dates() => ColumnKind::Date,
        _ => ColumnKind::Categorical,
    }
}

/// Classifies the X column with the configured date policy and the Y column
/// with the numeric test only.
#[must_use]
pub fn classify_axes(rows: &[Row], selection: &Selection, tuning: ClassifierTuning) -> AxisKinds {
    let x = classify(
        rows,
        &selection.x,
        tuning.x_sample_size,
        tuning.x_date_priority,
    );
    let y_numeric = classify(
        rows,
        &selection.y,
        tuning.y_sample_size,
        DatePriority::NumericFirst,
    )
    .is_numeric();

    trace!(x_column = %selection.x, y_column = %selection.y, ?x, y_numeric, "classified axes");
    AxisKinds { x, y_numeric }
}
