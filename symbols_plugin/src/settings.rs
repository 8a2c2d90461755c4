use crate::protocol::ParameterSet;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

pub const SETTINGS_KEY: &str = "material-symbols-settings";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Persistent key/value storage provided by the host environment.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError>;
    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError>;
}

/// Reads the saved parameters merged over the defaults. Any failure falls back to defaults.
pub fn load_parameters(store: &dyn SettingsStore) -> ParameterSet {
    let saved = match store.get(SETTINGS_KEY) {
        Ok(Some(v)) => v,
        Ok(None) => return ParameterSet::default(),
        Err(e) => {
            warn!("failed to load settings: {e}");
            return ParameterSet::default();
        }
    };
    merge_over_defaults(saved)
}

/// Applies each saved field on top of the defaults, dropping only the fields that do not fit.
fn merge_over_defaults(saved: Value) -> ParameterSet {
    let defaults = ParameterSet::default();
    let Value::Object(fields) = saved else {
        warn!("ignoring malformed settings record: expected an object");
        return defaults;
    };
    let Ok(Value::Object(mut merged)) = serde_json::to_value(defaults) else {
        return defaults;
    };

    for (key, value) in fields {
        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value);
        match serde_json::from_value::<ParameterSet>(Value::Object(candidate.clone())) {
            Ok(_) => merged = candidate,
            Err(e) => warn!("ignoring saved setting {key}: {e}"),
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or(defaults)
}

pub fn save_parameters(store: &dyn SettingsStore, params: &ParameterSet) {
    let result = serde_json::to_value(params)
        .map_err(SettingsError::from)
        .and_then(|v| store.set(SETTINGS_KEY, v));
    if let Err(e) = result {
        warn!("failed to save settings: {e}");
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        let guard = self.entries.lock().map_err(|_| SettingsError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut guard = self.entries.lock().map_err(|_| SettingsError::Poisoned)?;
        guard.insert(key.to_string(), value);
        Ok(())
    }
}

/// A single JSON object on disk mapping keys to values.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, SettingsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&all)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
