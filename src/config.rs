use crate::simulation::DEFAULT_TICK_INTERVAL;
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub prefs_path: PathBuf,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let prefs_path = lookup("DASHBOARD_PREFS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/preferences.json"));

        let tick_interval = lookup("DASHBOARD_TICK_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .map(|millis| Duration::from_millis(millis.max(1)))
            .unwrap_or(DEFAULT_TICK_INTERVAL);

        let seed = lookup("DASHBOARD_SEED").and_then(|value| value.parse::<u64>().ok());

        Self {
            port,
            prefs_path,
            tick_interval,
            seed,
        }
    }
}
