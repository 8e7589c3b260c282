use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/period", post(handlers::switch_period))
        .route("/api/theme/toggle", post(handlers::toggle_theme))
        .route("/api/devices/:id/toggle", post(handlers::toggle_device))
        .route("/api/charts/:name", get(handlers::get_chart))
        .route("/api/simulation/tick", post(handlers::simulation_tick))
        .route("/api/simulation/stop", post(handlers::simulation_stop))
        .with_state(state)
}
