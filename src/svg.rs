use crate::canvas::{Canvas, Command, DisplayList};
use std::fmt::Write;

#[derive(Debug, Clone, Copy)]
enum Segment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Circle(f64, f64, f64),
}

/// Replays a recorded canvas as an SVG element.
///
/// The viewBox is the device-pixel size of the surface while the element is
/// displayed at its client size, so strokes stay crisp on dense screens.
pub fn render_svg(list: &DisplayList, element_id: &str) -> String {
    let mut elements: Vec<String> = Vec::new();
    let mut path: Vec<Segment> = Vec::new();
    let mut stroke_style = String::from("#000");
    let mut fill_style = String::from("#000");
    let mut line_width = 1.0;

    for command in list.commands() {
        match command {
            Command::Resize { .. } => elements.clear(),
            Command::ClearRect { x, y, width, height } => {
                if *x <= 0.0
                    && *y <= 0.0
                    && *width >= f64::from(list.width())
                    && *height >= f64::from(list.height())
                {
                    elements.clear();
                }
            }
            Command::StrokeStyle(style) => stroke_style = style.clone(),
            Command::FillStyle(style) => fill_style = style.clone(),
            Command::LineWidth(width) => line_width = *width,
            Command::BeginPath => path.clear(),
            Command::MoveTo { x, y } => path.push(Segment::MoveTo(*x, *y)),
            Command::LineTo { x, y } => path.push(Segment::LineTo(*x, *y)),
            Command::Arc { x, y, radius, .. } => path.push(Segment::Circle(*x, *y, *radius)),
            Command::Stroke => {
                if let Some(d) = path_data(&path) {
                    elements.push(format!(
                        r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" />"#,
                        escape_attr(&stroke_style),
                        num(line_width)
                    ));
                }
                for segment in &path {
                    if let Segment::Circle(cx, cy, r) = segment {
                        elements.push(format!(
                            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}" />"#,
                            num(*cx),
                            num(*cy),
                            num(*r),
                            escape_attr(&stroke_style),
                            num(line_width)
                        ));
                    }
                }
            }
            Command::Fill => {
                for segment in &path {
                    if let Segment::Circle(cx, cy, r) = segment {
                        elements.push(format!(
                            r#"<circle class="chart-point" cx="{}" cy="{}" r="{}" fill="{}" />"#,
                            num(*cx),
                            num(*cy),
                            num(*r),
                            escape_attr(&fill_style)
                        ));
                    }
                }
            }
        }
    }

    let (client_width, client_height) = list.client_size();
    let mut svg = format!(
        r#"<svg id="{}" viewBox="0 0 {} {}" width="{}" height="{}" role="img" aria-label="Monthly trend">"#,
        escape_attr(element_id),
        list.width(),
        list.height(),
        num(client_width),
        num(client_height)
    );
    for element in elements {
        svg.push_str(&element);
    }
    svg.push_str("</svg>");
    svg
}

fn path_data(path: &[Segment]) -> Option<String> {
    let mut d = String::new();
    for segment in path {
        match segment {
            Segment::MoveTo(x, y) => {
                let _ = write!(d, "M{} {} ", num(*x), num(*y));
            }
            Segment::LineTo(x, y) => {
                if d.is_empty() {
                    let _ = write!(d, "M{} {} ", num(*x), num(*y));
                } else {
                    let _ = write!(d, "L{} {} ", num(*x), num(*y));
                }
            }
            Segment::Circle(..) => {}
        }
    }
    let d = d.trim_end().to_string();
    if d.contains('L') { Some(d) } else { None }
}

fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroked_path_becomes_svg_path() {
        let mut canvas = DisplayList::new(100.0, 50.0, 2.0);
        canvas.resize(200, 100);
        canvas.set_stroke_style("#123456");
        canvas.set_line_width(4.0);
        canvas.begin_path();
        canvas.move_to(0.0, 10.0);
        canvas.line_to(50.5, 20.25);
        canvas.stroke();

        let svg = render_svg(&canvas, "lineChart");
        assert!(svg.starts_with(r#"<svg id="lineChart" viewBox="0 0 200 100" width="100" height="50""#));
        assert!(svg.contains(r##"<path d="M0 10 L50.5 20.25" fill="none" stroke="#123456" stroke-width="4""##));
    }

    #[test]
    fn filled_arc_becomes_circle() {
        let mut canvas = DisplayList::new(10.0, 10.0, 1.0);
        canvas.set_fill_style("red");
        canvas.begin_path();
        canvas.circle(3.0, 4.0, 2.5);
        canvas.fill();
        let svg = render_svg(&canvas, "c");
        assert!(svg.contains(r#"<circle class="chart-point" cx="3" cy="4" r="2.5" fill="red" />"#));
    }

    #[test]
    fn full_clear_drops_earlier_shapes() {
        let mut canvas = DisplayList::new(10.0, 10.0, 1.0);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(5.0, 5.0);
        canvas.stroke();
        canvas.clear_rect(0.0, 0.0, 10.0, 10.0);
        let svg = render_svg(&canvas, "c");
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn single_move_is_not_drawn() {
        let mut canvas = DisplayList::new(10.0, 10.0, 1.0);
        canvas.begin_path();
        canvas.move_to(1.0, 1.0);
        canvas.stroke();
        assert!(!render_svg(&canvas, "c").contains("<path"));
    }
}
