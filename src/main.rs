use energy_dashboard::{
    chart::PublishedChart,
    models::Dataset,
    router,
    simulation::Simulation,
    state::{ChartFeeds, SharedDashboard},
    storage::FilePreferenceStore,
    AppState, ChartRenderers, Config, DashboardController,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    info!(prefs = %config.prefs_path.display(), tick = ?config.tick_interval, "starting dashboard");

    let prefs = FilePreferenceStore::load(config.prefs_path.clone()).await;
    let (usage_chart, usage_feed) = PublishedChart::channel();
    let (hourly_chart, hourly_feed) = PublishedChart::channel();

    let mut controller = DashboardController::new(
        Dataset::default(),
        Box::new(prefs),
        ChartRenderers {
            usage: Box::new(usage_chart),
            hourly: Box::new(hourly_chart),
        },
    );
    controller.initialize();
    let dashboard: SharedDashboard = Arc::new(Mutex::new(controller));

    let (simulation, simulation_task) =
        Simulation::spawn(dashboard.clone(), config.tick_interval, rng(config.seed));

    let state = AppState::new(
        dashboard,
        ChartFeeds {
            usage: usage_feed,
            hourly: hourly_feed,
        },
        simulation.clone(),
        rng(config.seed.map(|seed| seed.wrapping_add(1))),
    );
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    simulation.stop();
    simulation_task.await?;
    Ok(())
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
