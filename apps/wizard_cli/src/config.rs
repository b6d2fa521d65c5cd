use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "wizard.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub redirect_url: String,
    pub redirect_delay_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api/".into(),
            redirect_url: "/quotations/".into(),
            redirect_delay_secs: 5,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_secs(self.redirect_delay_secs)
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Reads `path` if present, then applies environment overrides looked up
/// through `env`. Unreadable files and unparseable values are ignored.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => {
                let file_cfg: HashMap<String, String> = file_cfg
                    .into_iter()
                    .map(|(key, value)| (key, scalar_text(value)))
                    .collect();
                if let Some(v) = file_cfg.get("api_base_url") {
                    settings.api_base_url = v.clone();
                }
                if let Some(v) = file_cfg.get("redirect_url") {
                    settings.redirect_url = v.clone();
                }
                if let Some(v) = file_cfg.get("redirect_delay_secs") {
                    match v.parse::<u64>() {
                        Ok(parsed) => settings.redirect_delay_secs = parsed,
                        Err(_) => warn!(value = %v, "ignoring invalid redirect_delay_secs"),
                    }
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable settings file")
            }
        }
    }

    if let Some(v) = env("WIZARD_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__REDIRECT_URL") {
        settings.redirect_url = v;
    }

    if let Some(v) = env("APP__REDIRECT_DELAY_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.redirect_delay_secs = parsed;
        }
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

fn scalar_text(value: toml::Value) -> String {
    match value {
        toml::Value::String(text) => text,
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
