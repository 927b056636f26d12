use crate::errors::AppError;
use crate::models::DashboardPayload;
use crate::range::ReportRange;
use crate::render::parse_block;
use crate::state::AppState;
use crate::storage::load_block;
use crate::ui::DashboardPage;
use axum::{
    extract::{OriginalUri, Query, State},
    response::Html,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use tracing::info;

const MAX_PIXEL_RATIO: f64 = 4.0;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub range: Option<String>,
    pub dpr: Option<String>,
}

impl DashboardQuery {
    fn range(&self) -> ReportRange {
        ReportRange::parse(self.range.as_deref())
    }

    fn pixel_ratio(&self) -> f64 {
        self.dpr
            .as_deref()
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
            .map_or(1.0, |ratio| ratio.min(MAX_PIXEL_RATIO))
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    OriginalUri(uri): OriginalUri,
) -> Result<Html<String>, AppError> {
    let range = query.range();
    let block = load_block(&state.config.data_dir, range).await?;
    let current = uri.path_and_query().map_or("/", |value| value.as_str());

    let mut page = DashboardPage::new(
        &state.config,
        range,
        query.pixel_ratio(),
        Local::now().date_naive(),
        current,
    );
    if !page.load(block) {
        info!("serving dashboard for range {range} without data");
    }

    Ok(Html(page.to_html()?))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardPayload>, AppError> {
    let range = query.range();
    let Some(block) = load_block(&state.config.data_dir, range).await? else {
        return Err(AppError::not_found(format!("no dashboard data for range {range}")));
    };

    parse_block(Some(&block))
        .map(Json)
        .ok_or_else(|| AppError::unprocessable("dashboard data block is malformed"))
}
