use crate::state::SharedDashboard;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Stops the periodic simulation. Clones share the same task.
#[derive(Clone, Debug)]
pub struct SimulationHandle {
    cancel: CancellationToken,
}

impl SimulationHandle {
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            info!("stopping simulation");
            self.cancel.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }
}

pub struct Simulation;

impl Simulation {
    /// Spawns the tick loop. The first tick fires one full `every` after spawning.
    pub fn spawn(
        dashboard: SharedDashboard,
        every: Duration,
        mut rng: StdRng,
    ) -> (SimulationHandle, JoinHandle<()>) {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        dashboard.lock().await.simulated_tick(&mut rng);
                        debug!("simulation tick");
                    }
                }
            }
        });

        (SimulationHandle { cancel }, task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::PublishedChart;
    use crate::controller::{ChartRenderers, DashboardController};
    use crate::models::Dataset;
    use crate::storage::MemoryPreferenceStore;
    use rand::SeedableRng;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn dashboard() -> SharedDashboard {
        let (usage, _) = PublishedChart::channel();
        let (hourly, _) = PublishedChart::channel();
        let mut controller = DashboardController::new(
            Dataset::default(),
            Box::new(MemoryPreferenceStore::new()),
            ChartRenderers {
                usage: Box::new(usage),
                hourly: Box::new(hourly),
            },
        );
        controller.initialize();
        Arc::new(Mutex::new(controller))
    }

    #[tokio::test]
    async fn stop_ends_the_task() {
        let (handle, task) = Simulation::spawn(
            dashboard(),
            Duration::from_secs(3600),
            StdRng::seed_from_u64(1),
        );
        assert!(handle.is_running());

        handle.clone().stop();
        handle.stop();
        assert!(!handle.is_running());
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("task should finish after stop")
            .expect("task should not panic");
    }

    #[tokio::test]
    async fn ticks_drift_running_devices() {
        let shared = dashboard();
        let before = shared.lock().await.dataset().devices.clone();
        let (handle, task) =
            Simulation::spawn(shared.clone(), Duration::from_millis(10), StdRng::seed_from_u64(5));

        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.stop();
        task.await.expect("task should not panic");

        let after = shared.lock().await.dataset().devices.clone();
        let aircon_before = before.iter().find(|d| d.id == "aircon").unwrap();
        let aircon_after = after.iter().find(|d| d.id == "aircon").unwrap();
        assert_ne!(aircon_before.consumption_kwh, aircon_after.consumption_kwh);
    }
}
