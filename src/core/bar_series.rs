use serde::{Deserialize, Serialize};

use crate::core::scale::ChartScales;
use crate::core::types::Series;

/// Bar rectangle in pixel coordinates, already clipped to the plot rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: f64,
}

/// Projects a banded series into bars centered on their bands.
///
/// Bars take `width_ratio` of the band and extend from the zero baseline to
/// the scaled value. Numeric X has no bar rendering and yields no bars.
#[must_use]
pub fn project_bars(series: &Series, scales: &ChartScales, width_ratio: f64) -> Vec<BarRect> {
    if series.x_kind.is_numeric() {
        return Vec::new();
    }

    let area = scales.area;
    let count = series.len();
    let bar_width = scales.band_width() * width_ratio;
    let baseline = scales.baseline_y();

    series
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let center = scales.scale_x(&point.x, index, count);
            let left = center - bar_width / 2.0;
            let value_px = scales.scale_y(point.y);

            let x = left.max(area.left());
            let right = (left + bar_width).min(area.right());
            let y = value_px.min(baseline).max(area.top());
            let bottom = value_px.max(baseline).min(area.bottom());

            BarRect {
                x,
                y,
                width: (right - x).max(0.0),
                height: (bottom - y).max(0.0),
                label: point.x.label(),
                value: point.y,
            }
        })
        .collect()
}
