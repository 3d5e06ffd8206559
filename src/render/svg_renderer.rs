
use crate::error::ChartResult;
use crate::render::{ChartFrame, Color, Renderer, TextHAlign};

/// Renders frames into a standalone SVG document string.
///
/// The document uses a `viewBox` of the plot area's surface so it scales like
/// the browser chart. Each call replaces the previous document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered document, empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn paint(attribute: &str, color: Option<Color>) -> String {
    match color {
        Some(color) => format!(
            " {attribute}=\"{}\" {attribute}-opacity=\"{}\"",
            color.to_hex(),
            color.alpha
        ),
        None => format!(" {attribute}=\"none\""),
    }
}

fn text_anchor(align: TextHAlign) -> &'static str {
    match align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;

        let area = frame.area;
        let mut elements = Vec::new();
        elements.push(format!(
            "<svg viewBox=\"0 0 {} {}\" preserveAspectRatio=\"xMidYMid meet\" xmlns=\"http://www.w3.org/2000/svg\">",
            area.width, area.height
        ));

        for line in &frame.lines {
            elements.push(format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke-width=\"{}\"{} />",
                line.x1,
                line.y1,
                line.x2,
                line.y2,
                line.stroke_width,
                paint("stroke", Some(line.color))
            ));
        }
        for rect in &frame.rects {
            elements.push(format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\"{} />",
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                rect.corner_radius,
                paint("fill", Some(rect.fill))
            ));
        }
        for path in &frame.paths {
            let stroke_width = if path.stroke.is_some() {
                format!(" stroke-width=\"{}\"", path.stroke_width)
            } else {
                String::new()
            };
            elements.push(format!(
                "<path d=\"{}\"{}{}{stroke_width} />",
                path.data,
                paint("fill", path.fill),
                paint("stroke", path.stroke)
            ));
        }
        for circle in &frame.circles {
            elements.push(format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}{} />",
                circle.cx,
                circle.cy,
                circle.radius,
                paint("fill", Some(circle.fill)),
                paint("stroke", Some(circle.stroke))
            ));
        }
        for text in &frame.texts {
            let transform = if text.rotation_deg == 0.0 {
                String::new()
            } else {
                format!(
                    " transform=\"rotate({} {} {})\"",
                    text.rotation_deg, text.x, text.y
                )
            };
            let weight = if text.bold { " font-weight=\"600\"" } else { "" };
            elements.push(format!(
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"{}\"{}{weight}{transform}>{}</text>",
                text.x,
                text.y,
                text.font_size_px,
                text_anchor(text.h_align),
                paint("fill", Some(text.color)),
                escape_text(&text.text)
            ));
        }

        elements.push("</svg>\n".to_owned());
        self.document = elements.join("\n");
        Ok(())
    }
}
