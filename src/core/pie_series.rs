use serde::{Deserialize, Serialize};

use crate::core::geometry::{GeometryTuning, Vertex};
use crate::core::types::{PlotArea, PlotPoint, Series};

/// Label of the synthetic slice that absorbs everything past the slice cap.
pub const OTHERS_LABEL: &str = "Others";

/// Tolerance below 360 degrees at which a wedge is drawn as a full disc.
const FULL_TURN_EPSILON: f64 = 1e-9;

/// One pie wedge. Angles are in degrees, clockwise from 3 o'clock, so the
/// first slice starts at -90 (12 o'clock).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub percent: f64,
    pub percent_label: String,
    pub label_anchor: Vertex,
    pub path: String,
    pub hue: u16,
}

impl PieSlice {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieGeometry {
    pub center: Vertex,
    pub radius: f64,
    pub total: f64,
    pub slices: Vec<PieSlice>,
}

impl PieGeometry {
    #[must_use]
    pub fn empty(center: Vertex, radius: f64) -> Self {
        Self {
            center,
            radius,
            total: 0.0,
            slices: Vec::new(),
        }
    }
}

/// Keeps the `cap` largest points in descending order and folds the rest
/// into one `Others` point. Non-finite values are skipped and the folded
/// remainder saturates at `f64::MAX`.
#[must_use]
pub fn fold_top_slices(points: &[PlotPoint], cap: usize) -> Vec<(String, f64)> {
    let mut sorted: Vec<&PlotPoint> = points.iter().filter(|point| point.y.is_finite()).collect();
    sorted.sort_by(|a, b| b.y.total_cmp(&a.y));

    let split = cap.min(sorted.len());
    let (top, rest) = sorted.split_at(split);
    let mut folded: Vec<(String, f64)> = top
        .iter()
        .map(|point| (point.x.label(), point.y))
        .collect();
    if !rest.is_empty() {
        let remainder: f64 = rest.iter().map(|point| point.y).sum();
        let remainder = if remainder.is_nan() {
            0.0
        } else {
            remainder.clamp(f64::MIN, f64::MAX)
        };
        folded.push((OTHERS_LABEL.to_owned(), remainder));
    }
    folded
}

fn polar(center: Vertex, radius: f64, degrees: f64) -> Vertex {
    let radians = degrees.to_radians();
    Vertex::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

fn wedge_path(center: Vertex, radius: f64, start: f64, end: f64) -> String {
    if end - start >= 360.0 - FULL_TURN_EPSILON {
        // Start and end points coincide on a full turn, so split into two arcs.
        let top = polar(center, radius, start);
        let bottom = polar(center, radius, start + 180.0);
        return format!(
            "M {} {} A {radius} {radius} 0 1 1 {} {} A {radius} {radius} 0 1 1 {} {} Z",
            top.x, top.y, bottom.x, bottom.y, top.x, top.y
        );
    }

    let from = polar(center, radius, start);
    let to = polar(center, radius, end);
    let large_arc = u8::from(end - start > 180.0);
    format!(
        "M {} {} L {} {} A {radius} {radius} 0 {large_arc} 1 {} {} Z",
        center.x, center.y, from.x, from.y, to.x, to.y
    )
}

/// Projects a series into pie wedges centered on the drawing surface.
///
/// Negative values contribute zero angle. A zero total is treated as 1 so
/// the slices collapse instead of dividing by zero. Angles are computed on
/// values divided by the largest slice, so totals beyond `f64::MAX` still
/// close the turn.
#[must_use]
pub fn project_pie(series: &Series, area: PlotArea, tuning: GeometryTuning) -> PieGeometry {
    let center = Vertex::new(area.width / 2.0, area.height / 2.0);
    let radius = area.inner_width().min(area.inner_height()) / 2.0;
    if series.is_empty() {
        return PieGeometry::empty(center, radius);
    }

    let folded = fold_top_slices(&series.points, tuning.pie_max_slices);
    let largest = folded
        .iter()
        .map(|(_, value)| value.max(0.0))
        .fold(0.0_f64, f64::max);
    let unit = if largest > 0.0 { largest } else { 1.0 };
    let weight = |value: f64| value.max(0.0) / unit;

    let weight_total: f64 = folded.iter().map(|(_, value)| weight(*value)).sum();
    let total = if weight_total > 0.0 { weight_total } else { 1.0 };
    let positive_total = (weight_total * unit).min(f64::MAX);

    let label_radius = radius * tuning.pie_label_radius_ratio;
    let mut accumulated = 0.0;
    let slices = folded
        .into_iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let start_angle = accumulated / total * 360.0 - 90.0;
            accumulated += weight(value);
            let end_angle = accumulated / total * 360.0 - 90.0;
            let percent = weight(value) / total * 100.0;

            PieSlice {
                label,
                value,
                start_angle,
                end_angle,
                percent,
                percent_label: format!("{}%", percent.round()),
                label_anchor: polar(center, label_radius, (start_angle + end_angle) / 2.0),
                path: wedge_path(center, radius, start_angle, end_angle),
                hue: ((index * 47) % 360) as u16,
            }
        })
        .collect();

    PieGeometry {
        center,
        radius,
        total: positive_total,
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_keeps_largest_and_sums_rest() {
        let points = vec![
            PlotPoint::new("a", 1.0),
            PlotPoint::new("b", 5.0),
            PlotPoint::new("c", 3.0),
            PlotPoint::new("d", 2.0),
        ];
        let folded = fold_top_slices(&points, 2);
        assert_eq!(
            folded,
            vec![
                ("b".to_owned(), 5.0),
                ("c".to_owned(), 3.0),
                ("Others".to_owned(), 3.0)
            ]
        );
    }

    #[test]
    fn fold_skips_non_finite_and_saturates_remainder() {
        let points = vec![
            PlotPoint::new("a", f64::INFINITY),
            PlotPoint::new("b", 5.0),
            PlotPoint::new("c", 1e308),
            PlotPoint::new("d", 1e308),
            PlotPoint::new("e", 1e308),
        ];
        let folded = fold_top_slices(&points, 1);
        assert_eq!(
            folded,
            vec![("c".to_owned(), 1e308), ("Others".to_owned(), f64::MAX)]
        );
    }

    #[test]
    fn single_slice_draws_full_disc() {
        let path = wedge_path(Vertex::new(400.0, 200.0), 160.0, -90.0, 270.0);
        assert_eq!(path.matches(" A ").count(), 2);
    }

    #[test]
    fn large_arc_flag_set_past_half_turn() {
        let path = wedge_path(Vertex::new(0.0, 0.0), 10.0, -90.0, 162.0);
        assert!(path.contains(" 0 1 1 "));
        let path = wedge_path(Vertex::new(0.0, 0.0), 10.0, 162.0, 270.0);
        assert!(path.contains(" 0 0 1 "));
    }
}
