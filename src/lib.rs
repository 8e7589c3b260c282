pub mod app;
pub mod chart;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod palette;
pub mod simulation;
pub mod state;
pub mod storage;
pub mod ui;
pub mod views;

pub use app::router;
pub use config::Config;
pub use controller::{ChartRenderers, DashboardController};
pub use state::AppState;
