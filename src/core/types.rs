use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Fixed-size drawing surface with a uniform padding around the plot rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: 40.0,
        }
    }
}

impl PlotArea {
    #[must_use]
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        let finite = self.width.is_finite() && self.height.is_finite() && self.padding.is_finite();
        if !finite
            || self.padding < 0.0
            || self.inner_width() <= 0.0
            || self.inner_height() <= 0.0
        {
            return Err(ChartError::InvalidPlotArea {
                width: self.width,
                height: self.height,
                padding: self.padding,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn inner_width(self) -> f64 {
        self.width - self.padding * 2.0
    }

    #[must_use]
    pub fn inner_height(self) -> f64 {
        self.height - self.padding * 2.0
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.padding + self.inner_width()
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.padding + self.inner_height()
    }
}

/// Inferred type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Date,
    Categorical,
}

impl ColumnKind {
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric)
    }

    /// Categorical and date-bucketed columns are plotted on a band scale.
    #[must_use]
    pub fn is_banded(self) -> bool {
        !self.is_numeric()
    }
}

/// Closed set of chart kinds the geometry generator knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Area,
    Scatter,
    Pie,
    Table,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Table,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Scatter => "scatter",
            Self::Pie => "pie",
            Self::Table => "table",
        }
    }

    /// Kinds drawn inside cartesian axes.
    #[must_use]
    pub fn is_cartesian(self) -> bool {
        matches!(self, Self::Bar | Self::Line | Self::Area | Self::Scatter)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown chart kind `{input}`")))
    }
}

/// Chosen X/Y columns. Empty names mean "unset".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub x: String,
    pub y: String,
}

impl Selection {
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.x.is_empty() && !self.y.is_empty()
    }
}

/// X coordinate of a plot point: a raw number for numeric X, a bucket label otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlotX {
    Number(f64),
    Label(String),
}

impl PlotX {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Label(_) => None,
        }
    }

    /// Text used for tick labels and pie slice names.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(value) => format_plain_number(*value),
            Self::Label(label) => label.clone(),
        }
    }
}

impl From<f64> for PlotX {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PlotX {
    fn from(value: &str) -> Self {
        Self::Label(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: PlotX,
    pub y: f64,
}

impl PlotPoint {
    #[must_use]
    pub fn new(x: impl Into<PlotX>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

/// Ordered plot points plus the axis classification they were built under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x_kind: ColumnKind,
    pub y_numeric: bool,
    pub points: Vec<PlotPoint>,
}

impl Series {
    #[must_use]
    pub fn empty(x_kind: ColumnKind, y_numeric: bool) -> Self {
        Self {
            x_kind,
            y_numeric,
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Closed `[min, max]` value range of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range; a zero or overflowing span is replaced by 1.
    #[must_use]
    pub fn span(self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            1.0
        } else {
            span
        }
    }

    /// Relative position of `value`, `0` at `min` and `1` at `max`.
    ///
    /// Domains wider than `f64::MAX` are interpolated on halved bounds.
    #[must_use]
    pub fn fraction(self, value: f64) -> f64 {
        if (self.max - self.min).is_infinite() {
            let half_min = self.min / 2.0;
            return (value / 2.0 - half_min) / (self.max / 2.0 - half_min);
        }
        (value - self.min) / self.span()
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Renders integral values without a trailing `.0`.
#[must_use]
pub fn format_plain_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
