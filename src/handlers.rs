use crate::chart::ChartView;
use crate::controller::DashboardController;
use crate::errors::AppError;
use crate::models::{ChartsSnapshot, DashboardSnapshot, PeriodRequest};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::Local;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dashboard = state.dashboard.lock().await;
    Html(render_index(dashboard.mode().theme))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let dashboard = state.dashboard.lock().await;
    Json(snapshot(&state, &dashboard))
}

pub async fn switch_period(
    State(state): State<AppState>,
    Json(payload): Json<PeriodRequest>,
) -> Json<DashboardSnapshot> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.switch_period(&payload.period);
    Json(snapshot(&state, &dashboard))
}

pub async fn toggle_theme(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.toggle_theme();
    Json(snapshot(&state, &dashboard))
}

pub async fn toggle_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DashboardSnapshot> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.toggle_device(&id);
    Json(snapshot(&state, &dashboard))
}

pub async fn get_chart(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ChartView>, AppError> {
    let view = match name.as_str() {
        "usage" => state.charts.usage.borrow().clone(),
        "hourly" => state.charts.hourly.borrow().clone(),
        _ => return Err(AppError::not_found(format!("unknown chart '{name}'"))),
    };
    Ok(Json(view))
}

pub async fn simulation_tick(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let mut dashboard = state.dashboard.lock().await;
    {
        let mut rng = state.rng.lock().await;
        dashboard.simulated_tick(&mut *rng);
    }
    Json(snapshot(&state, &dashboard))
}

pub async fn simulation_stop(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    state.simulation.stop();
    let dashboard = state.dashboard.lock().await;
    Json(snapshot(&state, &dashboard))
}

// Callers hold the dashboard lock, so the view and both charts come from the same state.
fn snapshot(state: &AppState, dashboard: &DashboardController) -> DashboardSnapshot {
    DashboardSnapshot {
        view: dashboard.view().clone(),
        charts: ChartsSnapshot {
            usage: state.charts.usage.borrow().clone(),
            hourly: state.charts.hourly.borrow().clone(),
        },
        simulation_running: state.simulation.is_running(),
        generated_at: Local::now().to_rfc3339(),
    }
}
