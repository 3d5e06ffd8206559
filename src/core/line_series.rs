use serde::{Deserialize, Serialize};

use crate::core::geometry::{Marker, Vertex};
use crate::core::scale::ChartScales;
use crate::core::types::Series;

/// Open polyline in pixel coordinates, in series order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinePath {
    pub vertices: Vec<Vertex>,
}

impl LinePath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// SVG path data: `M` to the first vertex and `L` to each following one.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        svg_path_data(&self.vertices, false)
    }
}

pub(crate) fn svg_path_data(vertices: &[Vertex], closed: bool) -> String {
    let mut commands: Vec<String> = vertices
        .iter()
        .enumerate()
        .map(|(index, vertex)| {
            let command = if index == 0 { 'M' } else { 'L' };
            format!("{command} {} {}", vertex.x, vertex.y)
        })
        .collect();
    if closed && !commands.is_empty() {
        commands.push("Z".to_owned());
    }
    commands.join(" ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub path: LinePath,
    pub markers: Vec<Marker>,
}

impl LineGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            path: LinePath::default(),
            markers: Vec::new(),
        }
    }
}

/// Area geometry.
///
/// `line` follows the mapped points. `fill_polygon` is explicitly closed
/// against the zero baseline: it starts and ends on the baseline below the
/// first point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub line: LinePath,
    pub fill_polygon: Vec<Vertex>,
    pub baseline_y: f64,
    pub markers: Vec<Marker>,
}

impl AreaGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            line: LinePath::default(),
            fill_polygon: Vec::new(),
            baseline_y: 0.0,
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn fill_svg_path(&self) -> String {
        svg_path_data(&self.fill_polygon, true)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScatterGeometry {
    pub markers: Vec<Marker>,
}

fn project_vertices(series: &Series, scales: &ChartScales) -> Vec<Vertex> {
    let count = series.len();
    series
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            Vertex::new(
                scales.scale_x(&point.x, index, count),
                scales.scale_y(point.y),
            )
        })
        .collect()
}

fn markers_at(vertices: &[Vertex], radius: f64) -> Vec<Marker> {
    vertices
        .iter()
        .map(|vertex| Marker {
            cx: vertex.x,
            cy: vertex.y,
            radius,
        })
        .collect()
}

#[must_use]
pub fn project_line(series: &Series, scales: &ChartScales, marker_radius: f64) -> LineGeometry {
    let vertices = project_vertices(series, scales);
    let markers = markers_at(&vertices, marker_radius);
    LineGeometry {
        path: LinePath { vertices },
        markers,
    }
}

#[must_use]
pub fn project_area(series: &Series, scales: &ChartScales, marker_radius: f64) -> AreaGeometry {
    let vertices = project_vertices(series, scales);
    let (Some(first), Some(last)) = (vertices.first().copied(), vertices.last().copied()) else {
        return AreaGeometry::empty();
    };

    let baseline_y = scales.baseline_y();
    let mut fill_polygon = Vec::with_capacity(vertices.len() + 3);
    fill_polygon.push(Vertex::new(first.x, baseline_y));
    fill_polygon.extend(vertices.iter().copied());
    fill_polygon.push(Vertex::new(last.x, baseline_y));
    fill_polygon.push(Vertex::new(first.x, baseline_y));

    let markers = markers_at(&vertices, marker_radius);
    AreaGeometry {
        line: LinePath { vertices },
        fill_polygon,
        baseline_y,
        markers,
    }
}

#[must_use]
pub fn project_scatter(
    series: &Series,
    scales: &ChartScales,
    marker_radius: f64,
) -> ScatterGeometry {
    ScatterGeometry {
        markers: markers_at(&project_vertices(series, scales), marker_radius),
    }
}
