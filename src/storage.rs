use crate::errors::AppError;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::{
    fs,
    runtime::{Handle, RuntimeFlavor},
    task,
};
use tracing::error;

pub const THEME_KEY: &str = "dashboard-theme";

pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    pub async fn load(path: PathBuf) -> Self {
        let values = load_preferences(&path).await;
        Self { path, values }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        if self.values.get(key).map(String::as_str) == Some(value) && self.path.exists() {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        persist_preferences(&self.path, &self.values)
    }
}

async fn load_preferences(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(values) => values,
            Err(err) => {
                error!("failed to parse preferences file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read preferences file: {err}");
            BTreeMap::new()
        }
    }
}

// Controller operations are synchronous; on a multi-thread runtime the write
// moves off the worker so other tasks keep running.
fn persist_preferences(path: &Path, values: &BTreeMap<String, String>) -> Result<(), AppError> {
    let on_multi_thread_runtime = Handle::try_current()
        .map(|handle| handle.runtime_flavor() == RuntimeFlavor::MultiThread)
        .unwrap_or(false);
    if on_multi_thread_runtime {
        task::block_in_place(|| write_preferences(path, values))
    } else {
        write_preferences(path, values)
    }
}

fn write_preferences(path: &Path, values: &BTreeMap<String, String>) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_vec_pretty(values)?;
    std::fs::write(path, payload)?;
    Ok(())
}
