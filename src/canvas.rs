use std::f64::consts::TAU;

/// Raster drawing surface with the shape of a browser 2D context.
///
/// Sizes passed to [`Canvas::resize`] are device pixels; [`Canvas::client_size`]
/// reports the displayed (CSS) size the surface occupies on the page.
pub trait Canvas {
    fn client_size(&self) -> (f64, f64);
    fn device_pixel_ratio(&self) -> f64;
    fn resize(&mut self, width: u32, height: u32);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_stroke_style(&mut self, style: &str);
    fn set_fill_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn circle(&mut self, x: f64, y: f64, radius: f64) {
        self.arc(x, y, radius, 0.0, TAU);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Resize { width: u32, height: u32 },
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    StrokeStyle(String),
    FillStyle(String),
    LineWidth(f64),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    Stroke,
    Fill,
}

/// Canvas that records every call so it can be replayed or inspected.
#[derive(Debug, Clone)]
pub struct DisplayList {
    client_width: f64,
    client_height: f64,
    ratio: f64,
    width: u32,
    height: u32,
    commands: Vec<Command>,
}

impl DisplayList {
    pub fn new(client_width: f64, client_height: f64, ratio: f64) -> Self {
        Self {
            client_width,
            client_height,
            ratio,
            width: client_width as u32,
            height: client_height as u32,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Centres of every arc drawn, in order.
    pub fn markers(&self) -> Vec<(f64, f64)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Arc { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, command: Command) {
        self.commands.push(command);
    }
}

impl Canvas for DisplayList {
    fn client_size(&self) -> (f64, f64) {
        (self.client_width, self.client_height)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.ratio
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Resizing a canvas wipes it, so earlier commands are dead.
        self.width = width;
        self.height = height;
        self.commands.clear();
        self.record(Command::Resize { width, height });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(Command::ClearRect { x, y, width, height });
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.record(Command::StrokeStyle(style.to_string()));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.record(Command::FillStyle(style.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(Command::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.record(Command::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(Command::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(Command::LineTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        self.record(Command::Arc { x, y, radius, start, end });
    }

    fn stroke(&mut self) {
        self.record(Command::Stroke);
    }

    fn fill(&mut self) {
        self.record(Command::Fill);
    }
}
