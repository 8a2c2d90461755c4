use crate::url_builder::DEFAULT_BASE_URL;
use std::path::PathBuf;

pub const DEFAULT_UI_ADDR: &str = "127.0.0.1:9002";
pub const DEFAULT_SETTINGS_PATH: &str = "material-symbols-settings.json";
/// Initial size of the plugin's UI surface.
pub const DEFAULT_UI_SIZE: (u32, u32) = (320, 480);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    pub base_url: String,
    pub ui_addr: String,
    pub settings_path: PathBuf,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ui_addr: DEFAULT_UI_ADDR.to_string(),
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
        }
    }
}

impl PluginConfig {
    /// Defaults overridden by `SYMBOLS_BASE_URL`, `SYMBOLS_UI_ADDR` and `SYMBOLS_SETTINGS_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = non_empty("SYMBOLS_BASE_URL") {
            cfg.base_url = v;
        }
        if let Some(v) = non_empty("SYMBOLS_UI_ADDR") {
            cfg.ui_addr = v;
        }
        if let Some(v) = non_empty("SYMBOLS_SETTINGS_PATH") {
            cfg.settings_path = PathBuf::from(v);
        }
        cfg
    }
}
