//! Dashboard renderer: binds a [`DashboardPayload`] onto the page's output
//! targets.
//!
//! Rendering is best-effort per target. A target missing from [`Targets`]
//! is skipped and the others are still drawn; every missing payload field
//! has a display fallback, so a render never fails.

mod bars;
mod kpis;
mod line_chart;
mod tables;

pub use bars::bar_width_percent;
pub use line_chart::{GRID_DIVISIONS, PADDING, PlotArea, scale_reference};

use crate::models::DashboardPayload;
use crate::targets::Targets;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardRenderer;

impl DashboardRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders every present target from `payload`, replacing whatever the
    /// targets held before.
    pub fn render(&self, payload: &DashboardPayload, targets: &mut Targets<'_>) {
        kpis::bind(targets.slots, &payload.kpis);

        if let Some(list) = targets.bars.as_deref_mut() {
            bars::draw(list, &payload.by_rep);
        }

        if let Some(canvas) = targets.line_chart.as_deref_mut() {
            line_chart::draw(canvas, &payload.trend, targets.theme);
        }

        if let Some(body) = targets.recent.as_deref_mut() {
            tables::fill(body, payload.recent.iter().map(|row| row.cells()));
        }

        if let Some(body) = targets.upcoming.as_deref_mut() {
            tables::fill(body, payload.upcoming.iter().map(|row| row.cells()));
        }
    }

    /// Parses the page's embedded data block and renders it. Returns `false`
    /// and leaves every target untouched when the block is absent or malformed.
    pub fn render_block(&self, block: Option<&str>, targets: &mut Targets<'_>) -> bool {
        match parse_block(block) {
            Some(payload) => {
                self.render(&payload, targets);
                true
            }
            None => false,
        }
    }
}

/// Parses an embedded data block. A blank block reads as an empty object.
pub fn parse_block(block: Option<&str>) -> Option<DashboardPayload> {
    let Some(block) = block else {
        debug!("no dashboard data block");
        return None;
    };
    let text = if block.trim().is_empty() { "{}" } else { block };
    match serde_json::from_str(text) {
        Ok(payload) => Some(payload),
        Err(err) => {
            warn!("failed to parse dashboard data block: {err}");
            None
        }
    }
}
