use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::geometry::{GeometryTuning, Vertex};
use crate::core::scale::ChartScales;
use crate::core::types::{ColumnKind, Selection, Series, format_plain_number};

/// Vertical gap between the plot bottom and rotated X tick labels.
const X_TICK_LABEL_OFFSET_PX: f64 = 18.0;
/// Gap between the plot left edge and right-aligned Y tick labels.
const Y_TICK_LABEL_OFFSET_PX: f64 = 8.0;
/// Baseline nudge that vertically centers Y tick text on its grid line.
const Y_TICK_BASELINE_NUDGE_PX: f64 = 4.0;
const X_TITLE_OFFSET_PX: f64 = 20.0;
const Y_TITLE_OFFSET_PX: f64 = 10.0;
pub const X_TICK_ROTATION_DEG: f64 = -30.0;
pub const DATE_TITLE_SUFFIX: &str = " (year)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub anchor: Vertex,
    pub label: String,
    pub rotation_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSegment {
    pub from: Vertex,
    pub to: Vertex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub anchor: Vertex,
    pub text: String,
}

/// Axis lines, grid, tick labels and titles of a cartesian chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisGeometry {
    pub x_axis: AxisSegment,
    pub y_axis: AxisSegment,
    pub grid_lines: SmallVec<[AxisSegment; 5]>,
    pub x_ticks: SmallVec<[AxisTick; 12]>,
    pub y_ticks: SmallVec<[AxisTick; 5]>,
    pub x_title: AxisTitle,
    pub y_title: AxisTitle,
}

/// Label stride that keeps at most `budget` labels out of `count`.
#[must_use]
pub fn decimation_step(count: usize, budget: usize) -> usize {
    count.div_ceil(budget.max(1)).max(1)
}

/// Short human form of a tick value: `1.2K`, `3.4M`, `2B`, `45`.
///
/// Magnitudes of 10 and above round to an integer, smaller ones keep one
/// decimal.
#[must_use]
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return format_plain_number(value);
    }

    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    let magnitude = value.abs();
    let (unit, suffix) = UNITS
        .iter()
        .copied()
        .find(|(unit, _)| magnitude >= *unit)
        .unwrap_or((1.0, ""));

    let scaled = value / unit;
    let rounded = if scaled.abs() >= 10.0 {
        scaled.round()
    } else {
        (scaled * 10.0).round() / 10.0
    };
    if rounded.abs() >= 1000.0 && suffix != "T" {
        return format_compact(rounded * unit);
    }

    format!("{}{suffix}", format_plain_number(rounded))
}

fn x_ticks(series: &Series, scales: &ChartScales, budget: usize) -> SmallVec<[AxisTick; 12]> {
    if series.x_kind.is_numeric() {
        return SmallVec::new();
    }

    let count = series.len();
    let y = scales.area.bottom() + X_TICK_LABEL_OFFSET_PX;
    series
        .points
        .iter()
        .enumerate()
        .step_by(decimation_step(count, budget))
        .map(|(index, point)| AxisTick {
            anchor: Vertex::new(scales.scale_x(&point.x, index, count), y),
            label: point.x.label(),
            rotation_deg: X_TICK_ROTATION_DEG,
        })
        .collect()
}

fn y_fractions(count: usize) -> impl Iterator<Item = f64> {
    let steps = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |index| index as f64 / steps)
}

/// Projects axis lines, evenly spaced grid lines and tick labels.
///
/// Y labels run top to bottom from the domain max to the domain min. X labels
/// exist only for banded X and are decimated to the label budget.
#[must_use]
pub fn project_axes(
    series: &Series,
    scales: &ChartScales,
    selection: &Selection,
    tuning: GeometryTuning,
) -> AxisGeometry {
    let area = scales.area;
    let domain = scales.domains.y;

    let grid_lines = y_fractions(tuning.y_tick_count)
        .map(|fraction| {
            let y = area.top() + fraction * area.inner_height();
            AxisSegment {
                from: Vertex::new(area.left(), y),
                to: Vertex::new(area.right(), y),
            }
        })
        .collect();

    let y_ticks = y_fractions(tuning.y_tick_count)
        .map(|fraction| {
            let y = area.top() + fraction * area.inner_height();
            let value = domain.max - fraction * (domain.max - domain.min);
            AxisTick {
                anchor: Vertex::new(
                    area.left() - Y_TICK_LABEL_OFFSET_PX,
                    y + Y_TICK_BASELINE_NUDGE_PX,
                ),
                label: format_compact(value),
                rotation_deg: 0.0,
            }
        })
        .collect();

    let x_suffix = if series.x_kind == ColumnKind::Date {
        DATE_TITLE_SUFFIX
    } else {
        ""
    };

    AxisGeometry {
        x_axis: AxisSegment {
            from: Vertex::new(area.left(), area.bottom()),
            to: Vertex::new(area.right(), area.bottom()),
        },
        y_axis: AxisSegment {
            from: Vertex::new(area.left(), area.top()),
            to: Vertex::new(area.left(), area.bottom()),
        },
        grid_lines,
        x_ticks: x_ticks(series, scales, tuning.max_x_labels),
        y_ticks,
        x_title: AxisTitle {
            anchor: Vertex::new(area.right(), area.bottom() + X_TITLE_OFFSET_PX),
            text: format!("{}{x_suffix}", selection.x),
        },
        y_title: AxisTitle {
            anchor: Vertex::new(area.left(), area.top() - Y_TITLE_OFFSET_PX),
            text: selection.y.clone(),
        },
    }
}
