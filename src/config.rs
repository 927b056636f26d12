use crate::theme::{ACCENT, ACCENT_3, Theme};
use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CHART_WIDTH: f64 = 640.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 260.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    /// Displayed size of the trend chart in CSS pixels.
    pub chart_width: f64,
    pub chart_height: f64,
    pub theme: Theme,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_dir = lookup("DASHBOARD_DATA_DIR")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        let mut theme = Theme::new();
        if let Some(accent) = lookup("DASHBOARD_ACCENT") {
            theme.set(ACCENT, accent);
        }
        if let Some(accent) = lookup("DASHBOARD_ACCENT_3") {
            theme.set(ACCENT_3, accent);
        }

        Self {
            port,
            data_dir,
            chart_width: dimension(lookup("DASHBOARD_CHART_WIDTH"), DEFAULT_CHART_WIDTH),
            chart_height: dimension(lookup("DASHBOARD_CHART_HEIGHT"), DEFAULT_CHART_HEIGHT),
            theme,
        }
    }
}

fn dimension(value: Option<String>, default: f64) -> f64 {
    value
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(default)
}
