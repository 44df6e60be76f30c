//! Startup configuration.
//!
//! Every deployment-specific value (model location, API credentials,
//! endpoints) is read once from `HEART_COMPANION_*` environment variables and
//! passed down explicitly. Nothing below the composition root reads the
//! environment on its own.

use std::path::PathBuf;
use std::time::Duration;

use zeroize::Zeroizing;

pub const ENV_PREFIX: &str = "HEART_COMPANION_";

/// Not shipped; `models/demo_model.json` is the bundled stand-in.
pub const DEFAULT_MODEL_PATH: &str = "models/heart_model.json";
pub const DEFAULT_EXERCISE_API_HOST: &str = "exercisedb.p.rapidapi.com";
pub const DEFAULT_EXERCISE_ENDPOINT: &str = "https://exercisedb.p.rapidapi.com/exercises";
pub const DEFAULT_NUTRITION_ENDPOINT: &str = "https://api.edamam.com/api/nutrition-details";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    Empty { name: String },

    #[error("{name} is not a valid number of seconds: {value:?}")]
    InvalidTimeout { name: String, value: String },
}

/// Runtime configuration, constructed once at startup.
#[derive(Clone)]
pub struct AppConfig {
    /// Path to the XGBoost JSON model artifact
    pub model_path: PathBuf,

    /// RapidAPI key for the exercise catalog
    pub exercise_api_key: Zeroizing<String>,

    /// Value of the `x-rapidapi-host` header
    pub exercise_api_host: String,

    /// Exercise catalog URL
    pub exercise_endpoint: String,

    /// Edamam application id
    pub nutrition_app_id: Zeroizing<String>,

    /// Edamam application key
    pub nutrition_app_key: Zeroizing<String>,

    /// Nutrition analysis URL (credentials are appended as query parameters)
    pub nutrition_endpoint: String,

    /// Per-request HTTP timeout; `None` waits indefinitely
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            exercise_api_key: Zeroizing::new(String::new()),
            exercise_api_host: DEFAULT_EXERCISE_API_HOST.to_string(),
            exercise_endpoint: DEFAULT_EXERCISE_ENDPOINT.to_string(),
            nutrition_app_id: Zeroizing::new(String::new()),
            nutrition_app_key: Zeroizing::new(String::new()),
            nutrition_endpoint: DEFAULT_NUTRITION_ENDPOINT.to_string(),
            http_timeout: Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
        }
    }
}

// Credentials never appear in Debug output (and therefore never in logs).
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("model_path", &self.model_path)
            .field("exercise_api_key", &redacted(&self.exercise_api_key))
            .field("exercise_api_host", &self.exercise_api_host)
            .field("exercise_endpoint", &self.exercise_endpoint)
            .field("nutrition_app_id", &redacted(&self.nutrition_app_id))
            .field("nutrition_app_key", &redacted(&self.nutrition_app_key))
            .field("nutrition_endpoint", &self.nutrition_endpoint)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `lookup` receives the full variable name (including the prefix).
    ///
    /// # Errors
    /// Returns error if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));
        let mut config = Self::default();

        if let Some(path) = get("MODEL_PATH") {
            if path.trim().is_empty() {
                return Err(ConfigError::Empty {
                    name: format!("{ENV_PREFIX}MODEL_PATH"),
                });
            }
            config.model_path = PathBuf::from(path.trim());
        }
        if let Some(key) = get("EXERCISE_API_KEY") {
            config.exercise_api_key = Zeroizing::new(key.trim().to_string());
        }
        if let Some(host) = get("EXERCISE_API_HOST").filter(|v| !v.trim().is_empty()) {
            config.exercise_api_host = host.trim().to_string();
        }
        if let Some(url) = get("EXERCISE_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            config.exercise_endpoint = url.trim().to_string();
        }
        if let Some(id) = get("NUTRITION_APP_ID") {
            config.nutrition_app_id = Zeroizing::new(id.trim().to_string());
        }
        if let Some(key) = get("NUTRITION_APP_KEY") {
            config.nutrition_app_key = Zeroizing::new(key.trim().to_string());
        }
        if let Some(url) = get("NUTRITION_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            config.nutrition_endpoint = url.trim().to_string();
        }
        if let Some(raw) = get("HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout {
                    name: format!("{ENV_PREFIX}HTTP_TIMEOUT_SECS"),
                    value: raw.clone(),
                })?;
            config.http_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if config.exercise_api_key.is_empty() {
            tracing::warn!("{ENV_PREFIX}EXERCISE_API_KEY is not set; exercise requests will be rejected upstream");
        }
        if config.nutrition_app_key.is_empty() {
            tracing::warn!("{ENV_PREFIX}NUTRITION_APP_KEY is not set; nutrition requests will be rejected upstream");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None).expect("Should load defaults");
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.exercise_api_host, DEFAULT_EXERCISE_API_HOST);
        assert_eq!(config.exercise_endpoint, DEFAULT_EXERCISE_ENDPOINT);
        assert_eq!(config.nutrition_endpoint, DEFAULT_NUTRITION_ENDPOINT);
        assert_eq!(
            config.http_timeout,
            Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
        );
        assert!(config.exercise_api_key.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MODEL_PATH", "/srv/model.json"),
            ("EXERCISE_API_KEY", "rk-123"),
            ("NUTRITION_APP_ID", "955037bf"),
            ("NUTRITION_APP_KEY", "ek-456"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .expect("Should load");

        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.exercise_api_key.as_str(), "rk-123");
        assert_eq!(config.nutrition_app_id.as_str(), "955037bf");
        assert_eq!(config.nutrition_app_key.as_str(), "ek-456");
        assert_eq!(config.http_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = AppConfig::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "0")]))
            .expect("Should load");
        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "soon")]));
        assert!(matches!(err, Err(ConfigError::InvalidTimeout { .. })));

        let err = AppConfig::from_lookup(lookup_from(&[("MODEL_PATH", "  ")]));
        assert!(matches!(err, Err(ConfigError::Empty { .. })));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("EXERCISE_API_KEY", "super-secret-rapidapi"),
            ("NUTRITION_APP_KEY", "super-secret-edamam"),
        ]))
        .expect("Should load");

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
