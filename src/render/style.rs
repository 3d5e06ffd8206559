use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Colors, strokes and font sizes used when geometry becomes draw commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub series_color: Color,
    pub bar_opacity: f64,
    pub bar_corner_radius: f64,
    pub line_stroke_width: f64,
    pub area_fill_opacity: f64,
    pub marker_fill: Color,
    pub marker_stroke: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub tick_label_color: Color,
    pub title_color: Color,
    pub pie_label_color: Color,
    pub pie_saturation: f64,
    pub pie_lightness: f64,
    pub pie_opacity: f64,
    pub tick_font_px: f64,
    pub title_font_px: f64,
    pub pie_label_font_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            series_color: Color::hex(0x06b6d4),
            bar_opacity: 0.9,
            bar_corner_radius: 6.0,
            line_stroke_width: 2.0,
            area_fill_opacity: 0.2,
            marker_fill: Color::hex(0x67e8f9),
            marker_stroke: Color::hex(0x0ea5e9),
            axis_color: Color::hex(0x94a3b8),
            grid_color: Color::hex(0x475569).with_alpha(0.3),
            tick_label_color: Color::hex(0x94a3b8),
            title_color: Color::hex(0xcbd5e1),
            pie_label_color: Color::hex(0xf8fafc),
            pie_saturation: 0.7,
            pie_lightness: 0.45,
            pie_opacity: 0.9,
            tick_font_px: 10.0,
            title_font_px: 12.0,
            pie_label_font_px: 11.0,
        }
    }
}

impl RenderStyle {
    /// Fill color of the pie slice with palette hue `hue`.
    #[must_use]
    pub fn pie_color(&self, hue: u16) -> Color {
        Color::hsl(f64::from(hue), self.pie_saturation, self.pie_lightness)
            .with_alpha(self.pie_opacity)
    }
}
