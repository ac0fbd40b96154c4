use std::{collections::HashMap, fs, path::Path, time::Duration};

use board::BoardOptions;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub signup_message_ms: u64,
    pub unregister_message_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 30,
            signup_message_ms: 5000,
            unregister_message_ms: 4000,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            signup_message_ttl: Duration::from_millis(self.signup_message_ms),
            unregister_message_ttl: Duration::from_millis(self.unregister_message_ms),
        }
    }
}

/// Defaults, then `config_path` if it exists, then environment overrides.
pub fn load_settings(config_path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        apply_file(&mut settings, &raw, config_path);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str, origin: &Path) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(path = %origin.display(), %error, "ignoring unreadable config file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
        settings.server_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("request_timeout_secs").and_then(as_u64) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.get("signup_message_ms").and_then(as_u64) {
        settings.signup_message_ms = v;
    }
    if let Some(v) = file_cfg.get("unregister_message_ms").and_then(as_u64) {
        settings.unregister_message_ms = v;
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("BOARD_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = lookup("APP__SIGNUP_MESSAGE_MS").and_then(|v| v.parse().ok()) {
        settings.signup_message_ms = v;
    }
    if let Some(v) = lookup("APP__UNREGISTER_MESSAGE_MS").and_then(|v| v.parse().ok()) {
        settings.unregister_message_ms = v;
    }
}

fn as_u64(value: &toml::Value) -> Option<u64> {
    match value {
        toml::Value::Integer(v) => u64::try_from(*v).ok(),
        toml::Value::String(v) => v.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
