use crate::core::axis_ticks::AxisGeometry;
use crate::core::geometry::{ChartGeometry, GeometryPrimitives, Marker};
use crate::core::types::PlotArea;
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, RenderStyle, TextHAlign,
    TextPrimitive,
};

/// Backend-agnostic scene for one chart draw pass.
///
/// Backends draw lines first, then rects, paths, circles and finally texts,
/// so axis furniture sits below the series and labels sit on top.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub area: PlotArea,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl ChartFrame {
    #[must_use]
    pub fn new(area: PlotArea) -> Self {
        Self {
            area,
            lines: Vec::new(),
            rects: Vec::new(),
            paths: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: CirclePrimitive) -> Self {
        self.circles.push(circle);
        self
    }

    /// Adds a label unless its text is empty.
    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        if !text.text.is_empty() {
            self.texts.push(text);
        }
        self
    }

    /// Converts pipeline geometry into draw commands.
    #[must_use]
    pub fn from_geometry(
        area: PlotArea,
        geometry: &GeometryPrimitives,
        style: &RenderStyle,
    ) -> Self {
        let mut frame = Self::new(area);
        if let Some(axes) = &geometry.axes {
            frame = frame.with_axes(axes, style);
        }

        match &geometry.chart {
            ChartGeometry::Bar { bars } => {
                let fill = style.series_color.with_alpha(style.bar_opacity);
                for bar in bars {
                    frame = frame.with_rect(RectPrimitive {
                        x: bar.x,
                        y: bar.y,
                        width: bar.width,
                        height: bar.height,
                        corner_radius: style.bar_corner_radius.min(bar.width / 2.0),
                        fill,
                    });
                }
            }
            ChartGeometry::Line(line) => {
                if !line.path.is_empty() {
                    frame = frame.with_path(PathPrimitive {
                        data: line.path.to_svg_path(),
                        fill: None,
                        stroke: Some(style.series_color),
                        stroke_width: style.line_stroke_width,
                    });
                }
                frame = frame.with_markers(&line.markers, style);
            }
            ChartGeometry::Area(area_geometry) => {
                if !area_geometry.fill_polygon.is_empty() {
                    frame = frame.with_path(PathPrimitive {
                        data: area_geometry.fill_svg_path(),
                        fill: Some(style.series_color.with_alpha(style.area_fill_opacity)),
                        stroke: None,
                        stroke_width: 0.0,
                    });
                }
                if !area_geometry.line.is_empty() {
                    frame = frame.with_path(PathPrimitive {
                        data: area_geometry.line.to_svg_path(),
                        fill: None,
                        stroke: Some(style.series_color),
                        stroke_width: style.line_stroke_width,
                    });
                }
                frame = frame.with_markers(&area_geometry.markers, style);
            }
            ChartGeometry::Scatter(scatter) => {
                frame = frame.with_markers(&scatter.markers, style);
            }
            ChartGeometry::Pie(pie) => {
                for slice in &pie.slices {
                    if slice.span() <= 0.0 {
                        continue;
                    }
                    frame = frame
                        .with_path(PathPrimitive {
                            data: slice.path.clone(),
                            fill: Some(style.pie_color(slice.hue)),
                            stroke: None,
                            stroke_width: 0.0,
                        })
                        .with_text(
                            TextPrimitive::new(
                                slice.percent_label.clone(),
                                slice.label_anchor.x,
                                slice.label_anchor.y,
                                style.pie_label_font_px,
                                style.pie_label_color,
                                TextHAlign::Center,
                            )
                            .bold(),
                        );
                }
            }
            ChartGeometry::Table => {}
        }

        frame
    }

    fn with_markers(mut self, markers: &[Marker], style: &RenderStyle) -> Self {
        for marker in markers {
            self = self.with_circle(CirclePrimitive {
                cx: marker.cx,
                cy: marker.cy,
                radius: marker.radius,
                fill: style.marker_fill,
                stroke: style.marker_stroke,
            });
        }
        self
    }

    fn with_axes(mut self, axes: &AxisGeometry, style: &RenderStyle) -> Self {
        for grid in &axes.grid_lines {
            self = self.with_line(LinePrimitive::new(
                grid.from.x,
                grid.from.y,
                grid.to.x,
                grid.to.y,
                1.0,
                style.grid_color,
            ));
        }
        for axis in [axes.y_axis, axes.x_axis] {
            self = self.with_line(LinePrimitive::new(
                axis.from.x,
                axis.from.y,
                axis.to.x,
                axis.to.y,
                1.0,
                style.axis_color,
            ));
        }

        self = self
            .with_text(TextPrimitive::new(
                axes.y_title.text.clone(),
                axes.y_title.anchor.x,
                axes.y_title.anchor.y,
                style.title_font_px,
                style.title_color,
                TextHAlign::Left,
            ))
            .with_text(TextPrimitive::new(
                axes.x_title.text.clone(),
                axes.x_title.anchor.x,
                axes.x_title.anchor.y,
                style.title_font_px,
                style.title_color,
                TextHAlign::Right,
            ));

        for tick in axes.x_ticks.iter().chain(axes.y_ticks.iter()) {
            self = self.with_text(
                TextPrimitive::new(
                    tick.label.clone(),
                    tick.anchor.x,
                    tick.anchor.y,
                    style.tick_font_px,
                    style.tick_label_color,
                    TextHAlign::Right,
                )
                .rotated(tick.rotation_deg),
            );
        }
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.area.validate()?;
        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.paths.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }
}
