use crate::canvas::Canvas;
use crate::models::Trend;
use crate::theme::{ACCENT, ACCENT_3, ACCENT_3_FALLBACK, ACCENT_FALLBACK, ThemeSource};

/// Inset reserved for the axes, in CSS pixels.
pub const PADDING: f64 = 32.0;
pub const GRID_DIVISIONS: usize = 5;
const GRID_COLOR: &str = "rgba(255,255,255,0.08)";
const AXIS_COLOR: &str = "rgba(255,255,255,0.15)";
const GRID_WIDTH: f64 = 1.0;
const SERIES_WIDTH: f64 = 2.0;
const MARKER_RADIUS: f64 = 2.5;

/// Geometry of the plot in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub ratio: f64,
    pub padding: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub scale: f64,
}

impl PlotArea {
    pub fn new(client_width: f64, client_height: f64, ratio: f64, scale: f64) -> Self {
        let ratio = normalize_ratio(ratio);
        let width = client_width * ratio;
        let height = client_height * ratio;
        let padding = PADDING * ratio;
        Self {
            width,
            height,
            ratio,
            padding,
            plot_width: width - padding * 2.0,
            plot_height: height - padding * 2.0,
            scale: scale.max(1.0),
        }
    }

    /// Position of sample `index` of a `count`-long series holding `value`.
    pub fn point(&self, index: usize, value: f64, count: usize) -> (f64, f64) {
        let denominator = count.saturating_sub(1).max(1) as f64;
        let x = self.padding + self.plot_width * (index as f64 / denominator);
        let y = self.padding + self.plot_height * (1.0 - value / self.scale);
        (x, y)
    }
}

fn normalize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}

/// Largest value across every series, floored at 1.
pub fn scale_reference(series: &[&[f64]]) -> f64 {
    series
        .iter()
        .flat_map(|values| values.iter().copied())
        .fold(1.0, f64::max)
}

pub(super) fn draw(canvas: &mut dyn Canvas, trend: &Trend, theme: &dyn ThemeSource) {
    let visits = trend.visits_series();
    let deals = trend.deals_series();
    let (client_width, client_height) = canvas.client_size();
    let area = PlotArea::new(
        client_width,
        client_height,
        canvas.device_pixel_ratio(),
        scale_reference(&[visits.as_slice(), deals.as_slice()]),
    );

    canvas.resize(area.width as u32, area.height as u32);
    canvas.clear_rect(0.0, 0.0, area.width, area.height);

    draw_grid(canvas, &area);
    draw_axes(canvas, &area);

    let visits_color = theme.color_or(ACCENT, ACCENT_FALLBACK);
    let deals_color = theme.color_or(ACCENT_3, ACCENT_3_FALLBACK);
    draw_series(canvas, &area, &visits, &visits_color);
    draw_series(canvas, &area, &deals, &deals_color);
}

fn draw_grid(canvas: &mut dyn Canvas, area: &PlotArea) {
    canvas.set_stroke_style(GRID_COLOR);
    canvas.set_line_width(GRID_WIDTH * area.ratio);
    canvas.begin_path();
    for step in 0..=GRID_DIVISIONS {
        let y = area.padding + area.plot_height * step as f64 / GRID_DIVISIONS as f64;
        canvas.move_to(area.padding, y);
        canvas.line_to(area.padding + area.plot_width, y);
    }
    canvas.stroke();
}

fn draw_axes(canvas: &mut dyn Canvas, area: &PlotArea) {
    let bottom = area.padding + area.plot_height;
    canvas.set_stroke_style(AXIS_COLOR);
    canvas.begin_path();
    canvas.move_to(area.padding, area.padding);
    canvas.line_to(area.padding, bottom);
    canvas.move_to(area.padding, bottom);
    canvas.line_to(area.padding + area.plot_width, bottom);
    canvas.stroke();
}

fn draw_series(canvas: &mut dyn Canvas, area: &PlotArea, values: &[f64], color: &str) {
    let count = values.len();

    canvas.begin_path();
    for (index, value) in values.iter().enumerate() {
        let (x, y) = area.point(index, *value, count);
        if index == 0 {
            canvas.move_to(x, y);
        } else {
            canvas.line_to(x, y);
        }
    }
    canvas.set_stroke_style(color);
    canvas.set_line_width(SERIES_WIDTH * area.ratio);
    canvas.stroke();

    for (index, value) in values.iter().enumerate() {
        let (x, y) = area.point(index, *value, count);
        canvas.begin_path();
        canvas.circle(x, y, MARKER_RADIUS * area.ratio);
        canvas.set_fill_style(color);
        canvas.fill();
    }
}
