use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/produtos";
pub const DEFAULT_CONFIG_FILE: &str = "produtos.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Collection endpoint, e.g. `http://localhost:5000/produtos`.
    pub api_url: String,
    /// Per-request timeout. `None` or `0` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> ClientSettings {
    let mut settings = read_settings_file(path).unwrap_or_default();
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    info!(api_url = %settings.api_url, "produtos: settings loaded");
    settings
}

fn read_settings_file(path: &Path) -> Option<ClientSettings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), "failed to read settings file: {err}");
            return None;
        }
    };

    match toml::from_str::<ClientSettings>(&raw) {
        Ok(file_cfg) => Some(file_cfg),
        Err(err) => {
            warn!(path = %path.display(), "ignoring malformed settings file: {err}");
            None
        }
    }
}

pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("PRODUTOS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
