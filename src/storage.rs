use crate::errors::AppError;
use crate::range::ReportRange;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub const FALLBACK_FILE: &str = "dashboard.json";

/// Candidate files for a window's data block, most specific first.
pub fn block_paths(dir: &Path, range: ReportRange) -> [PathBuf; 2] {
    [
        dir.join(format!("{}.json", range.query_value())),
        dir.join(FALLBACK_FILE),
    ]
}

/// Reads the data block the page embeds for `range`. `Ok(None)` when no
/// file exists for the window.
pub async fn load_block(dir: &Path, range: ReportRange) -> Result<Option<String>, AppError> {
    for path in block_paths(dir, range) {
        match fs::read_to_string(&path).await {
            Ok(block) => {
                debug!("loaded dashboard data from {}", path.display());
                return Ok(Some(block));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => {
                error!("failed to read {}: {err}", path.display());
                return Err(AppError::internal(err));
            }
        }
    }
    debug!("no dashboard data for range {range}");
    Ok(None)
}
