use serde::{Deserialize, Serialize};

use crate::core::types::{Domain, PlotArea, PlotX, Series};

/// Axis domains of one series. `x` is only present for numeric X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesDomains {
    pub x: Option<Domain>,
    pub y: Domain,
}

/// Computes axis domains.
///
/// Y always includes zero and reaches at least 1. X spans the numeric X
/// values and falls back to `[0, 1]` for an empty series.
#[must_use]
pub fn compute_domains(series: &Series) -> SeriesDomains {
    let mut y_min = 0.0_f64;
    let mut y_max = 1.0_f64;
    for point in &series.points {
        if point.y.is_finite() {
            y_min = y_min.min(point.y);
            y_max = y_max.max(point.y);
        }
    }

    let x = series.x_kind.is_numeric().then(|| {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in series.points.iter().filter_map(|point| point.x.as_number()) {
            if value.is_finite() {
                min = min.min(value);
                max = max.max(value);
            }
        }
        if min.is_finite() && max.is_finite() {
            Domain::new(min, max)
        } else {
            Domain::new(0.0, 1.0)
        }
    });

    SeriesDomains {
        x,
        y: Domain::new(y_min, y_max),
    }
}

/// Linear mapping from a domain onto a pixel interval.
///
/// `range_start` receives `domain.min`; an inverted axis simply passes a
/// start greater than the end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: Domain,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: Domain, range_start: f64, range_end: f64) -> Self {
        Self {
            domain,
            range_start,
            range_end,
        }
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        self.range_start + self.domain.fraction(value) * (self.range_end - self.range_start)
    }
}

/// Equal-width bands with points placed on band centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    range_start: f64,
    range_end: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(count: usize, range_start: f64, range_end: f64) -> Self {
        Self {
            count,
            range_start,
            range_end,
        }
    }

    #[must_use]
    pub fn band_width(self) -> f64 {
        (self.range_end - self.range_start) / self.count.max(1) as f64
    }

    #[must_use]
    pub fn center(self, index: usize) -> f64 {
        let bands = self.count.max(1) as f64;
        self.range_start + ((index as f64 + 0.5) / bands) * (self.range_end - self.range_start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum XScale {
    Linear(LinearScale),
    Band(BandScale),
}

/// Scales for one render pass, fixed to a plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub area: PlotArea,
    pub domains: SeriesDomains,
    pub x: XScale,
    pub y: LinearScale,
}

impl ChartScales {
    #[must_use]
    pub fn from_series(series: &Series, area: PlotArea) -> Self {
        let domains = compute_domains(series);
        let x = match domains.x {
            Some(domain) => XScale::Linear(LinearScale::new(domain, area.left(), area.right())),
            None => XScale::Band(BandScale::new(series.len(), area.left(), area.right())),
        };
        let y = LinearScale::new(domains.y, area.bottom(), area.top());
        Self {
            area,
            domains,
            x,
            y,
        }
    }

    /// Pixel X of the point at `index` out of `count`.
    #[must_use]
    pub fn scale_x(&self, value: &PlotX, index: usize, count: usize) -> f64 {
        match (self.x, value) {
            (XScale::Linear(scale), PlotX::Number(number)) => scale.to_pixel(*number),
            _ => BandScale::new(count, self.area.left(), self.area.right()).center(index),
        }
    }

    #[must_use]
    pub fn scale_y(&self, value: f64) -> f64 {
        self.y.to_pixel(value)
    }

    /// Width of one categorical band; the full plot width for numeric X.
    #[must_use]
    pub fn band_width(&self) -> f64 {
        match self.x {
            XScale::Band(band) => band.band_width(),
            XScale::Linear(_) => self.area.inner_width(),
        }
    }

    /// Pixel row of `y = 0`, which always lies inside the Y domain.
    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        self.scale_y(0.0)
    }
}
