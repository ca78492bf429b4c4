use std::env;
use std::str::FromStr;

use super::types::ConfigError;

const DEFAULT_CORS_ORIGINS: [&str; 3] =
    ["http://localhost:5173", "http://localhost:3000", "http://127.0.0.1:5173"];

/// Trimmed value of `key`; blank counts as unset.
pub(super) fn var(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

pub(super) fn var_or(key: &'static str, default: &str) -> String {
    var(key).unwrap_or_else(|| default.to_string())
}

pub(super) fn flag(key: &str) -> bool {
    var(key).is_some_and(|value| {
        matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
    })
}

pub(super) fn number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match var(key) {
        None => Ok(default),
        Some(value) => {
            value.parse::<T>().map_err(|_| ConfigError::InvalidValue { field: key, value })
        }
    }
}

/// Accepts a JSON array or a comma-separated list. Anything that yields no
/// origins falls back to the local dev servers.
pub(super) fn cors_origins(raw: Option<String>) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = match raw {
        None => Vec::new(),
        Some(raw) if raw.starts_with('[') => {
            serde_json::from_str(&raw).map_err(|_| ConfigError::InvalidCors(raw.clone()))?
        }
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect(),
    };

    if origins.is_empty() {
        return Ok(DEFAULT_CORS_ORIGINS.iter().map(|origin| origin.to_string()).collect());
    }
    Ok(origins)
}

/// `api/`, `/api` and ` /api/ ` all become `/api`; a bare `/` is rejected
/// since routes cannot be nested at the root.
pub(super) fn route_prefix(raw: &str) -> Result<String, ConfigError> {
    let segments = raw.trim().trim_matches('/');
    if segments.is_empty() {
        return Err(ConfigError::Empty { field: "API_PREFIX" });
    }
    Ok(format!("/{segments}"))
}
