pub mod app;
pub mod canvas;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod range;
pub mod render;
pub mod state;
pub mod storage;
pub mod svg;
pub mod targets;
pub mod theme;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use models::DashboardPayload;
pub use render::DashboardRenderer;
pub use state::AppState;
pub use targets::Targets;
