use crate::chart::ChartView;
use crate::controller::DashboardController;
use crate::simulation::SimulationHandle;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

pub type SharedDashboard = Arc<Mutex<DashboardController>>;

#[derive(Clone)]
pub struct ChartFeeds {
    pub usage: watch::Receiver<ChartView>,
    pub hourly: watch::Receiver<ChartView>,
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard: SharedDashboard,
    pub charts: ChartFeeds,
    pub simulation: SimulationHandle,
    /// Random source for ticks requested over HTTP.
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(
        dashboard: SharedDashboard,
        charts: ChartFeeds,
        simulation: SimulationHandle,
        rng: StdRng,
    ) -> Self {
        Self {
            dashboard,
            charts,
            simulation,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}
