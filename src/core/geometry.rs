use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis_ticks::{AxisGeometry, project_axes};
use crate::core::bar_series::{BarRect, project_bars};
use crate::core::line_series::{
    AreaGeometry, LineGeometry, ScatterGeometry, project_area, project_line, project_scatter,
};
use crate::core::pie_series::{PieGeometry, project_pie};
use crate::core::scale::ChartScales;
use crate::core::types::{ChartKind, Selection, Series};
use crate::error::{ChartError, ChartResult};

/// Point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Circular point marker in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Visual constants shared by every geometry builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryTuning {
    #[serde(default = "default_bar_width_ratio")]
    pub bar_width_ratio: f64,
    #[serde(default = "default_pie_max_slices")]
    pub pie_max_slices: usize,
    #[serde(default = "default_pie_label_radius_ratio")]
    pub pie_label_radius_ratio: f64,
    #[serde(default = "default_max_x_labels")]
    pub max_x_labels: usize,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
    #[serde(default = "default_line_marker_radius")]
    pub line_marker_radius: f64,
    #[serde(default = "default_scatter_marker_radius")]
    pub scatter_marker_radius: f64,
}

fn default_bar_width_ratio() -> f64 {
    0.7
}

fn default_pie_max_slices() -> usize {
    20
}

fn default_pie_label_radius_ratio() -> f64 {
    0.6
}

fn default_max_x_labels() -> usize {
    12
}

fn default_y_tick_count() -> usize {
    5
}

fn default_line_marker_radius() -> f64 {
    2.5
}

fn default_scatter_marker_radius() -> f64 {
    4.0
}

impl Default for GeometryTuning {
    fn default() -> Self {
        Self {
            bar_width_ratio: default_bar_width_ratio(),
            pie_max_slices: default_pie_max_slices(),
            pie_label_radius_ratio: default_pie_label_radius_ratio(),
            max_x_labels: default_max_x_labels(),
            y_tick_count: default_y_tick_count(),
            line_marker_radius: default_line_marker_radius(),
            scatter_marker_radius: default_scatter_marker_radius(),
        }
    }
}

impl GeometryTuning {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, ratio) in [
            ("bar_width_ratio", self.bar_width_ratio),
            ("pie_label_radius_ratio", self.pie_label_radius_ratio),
        ] {
            if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and in (0, 1]"
                )));
            }
        }
        for (name, radius) in [
            ("line_marker_radius", self.line_marker_radius),
            ("scatter_marker_radius", self.scatter_marker_radius),
        ] {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if self.pie_max_slices == 0 || self.max_x_labels == 0 {
            return Err(ChartError::InvalidConfig(
                "pie slice cap and x label budget must be > 0".to_owned(),
            ));
        }
        if self.y_tick_count < 2 {
            return Err(ChartError::InvalidConfig(
                "y tick count must be >= 2".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Per-kind drawable output. `Table` carries no geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartGeometry {
    Bar { bars: Vec<BarRect> },
    Line(LineGeometry),
    Area(AreaGeometry),
    Scatter(ScatterGeometry),
    Pie(PieGeometry),
    Table,
}

impl ChartGeometry {
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match self {
            Self::Bar { bars } => bars.len(),
            Self::Line(line) => usize::from(!line.path.is_empty()) + line.markers.len(),
            Self::Area(area) => {
                usize::from(!area.line.is_empty())
                    + usize::from(!area.fill_polygon.is_empty())
                    + area.markers.len()
            }
            Self::Scatter(scatter) => scatter.markers.len(),
            Self::Pie(pie) => pie.slices.len(),
            Self::Table => 0,
        }
    }
}

/// Everything one render pass draws: the chart body plus optional axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPrimitives {
    pub chart: ChartGeometry,
    pub axes: Option<AxisGeometry>,
}

impl GeometryPrimitives {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chart.primitive_count() == 0 && self.axes.is_none()
    }
}

fn empty_geometry(kind: ChartKind) -> ChartGeometry {
    match kind {
        ChartKind::Bar => ChartGeometry::Bar { bars: Vec::new() },
        ChartKind::Line => ChartGeometry::Line(LineGeometry::empty()),
        ChartKind::Area => ChartGeometry::Area(AreaGeometry::empty()),
        ChartKind::Scatter => ChartGeometry::Scatter(ScatterGeometry::default()),
        ChartKind::Pie => ChartGeometry::Pie(PieGeometry::empty(Vertex::new(0.0, 0.0), 0.0)),
        ChartKind::Table => ChartGeometry::Table,
    }
}

/// Builds the primitives for `kind`. Each kind dispatches to exactly one
/// projector; an empty series yields no primitives at all.
#[must_use]
pub fn build_geometry(
    series: &Series,
    kind: ChartKind,
    scales: &ChartScales,
    selection: &Selection,
    tuning: GeometryTuning,
) -> GeometryPrimitives {
    if series.is_empty() {
        return GeometryPrimitives {
            chart: empty_geometry(kind),
            axes: None,
        };
    }

    let chart = match kind {
        ChartKind::Bar => ChartGeometry::Bar {
            bars: project_bars(series, scales, tuning.bar_width_ratio),
        },
        ChartKind::Line => ChartGeometry::Line(project_line(series, scales, tuning.line_marker_radius)),
        ChartKind::Area => ChartGeometry::Area(project_area(series, scales, tuning.line_marker_radius)),
        ChartKind::Scatter => {
            ChartGeometry::Scatter(project_scatter(series, scales, tuning.scatter_marker_radius))
        }
        ChartKind::Pie => ChartGeometry::Pie(project_pie(series, scales.area, tuning)),
        ChartKind::Table => ChartGeometry::Table,
    };

    let axes = kind
        .is_cartesian()
        .then(|| project_axes(series, scales, selection, tuning));

    trace!(
        %kind,
        primitives = chart.primitive_count(),
        with_axes = axes.is_some(),
        "built geometry"
    );

    GeometryPrimitives { chart, axes }
}
