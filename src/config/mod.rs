//! Configuration module
//!
//! Runtime settings resolved from the process environment, with optional
//! defaults from the persisted `config.toml`. The API credential comes from
//! the environment only and its absence is a fatal startup error.

pub mod storage;

use crate::error::{Result, VerbForgeError};
use std::env;

/// Environment variable holding the completion API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Fallback database when neither environment nor config file name one.
const DEFAULT_DATABASE_URL: &str = "sqlite:verbforge.db";

/// Default chat-completion model.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Semaphore capacity for batch verb fetches.
const DEFAULT_FETCH_CONCURRENCY: usize = 15;

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Completion API credential
    pub api_key: String,
    /// Database connection URL
    pub database_url: String,
    /// Chat-completion model identifier
    pub model: String,
    /// Maximum concurrent verb fetches during batch initialization
    pub fetch_concurrency: usize,
}

impl Settings {
    /// Load settings from the environment and the persisted config file.
    pub fn load() -> Result<Self> {
        let file = storage::FileConfig::load().unwrap_or_default();
        Self::from_sources(&file, |key| env::var(key).ok())
    }

    /// Resolve settings from explicit sources. Split out so tests can
    /// substitute the environment.
    fn from_sources(
        file: &storage::FileConfig,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let api_key = env_var(API_KEY_VAR).filter(|key| !key.is_empty()).ok_or_else(|| {
            VerbForgeError::Config(format!("{} must be set in the environment", API_KEY_VAR))
        })?;

        let database_url = env_var("DATABASE_URL")
            .or_else(|| file.database_url.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let model = env_var("VERBFORGE_MODEL")
            .or_else(|| file.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let fetch_concurrency = match env_var("VERBFORGE_CONCURRENCY") {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                VerbForgeError::Config(format!(
                    "VERBFORGE_CONCURRENCY must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            None => file.fetch_concurrency.unwrap_or(DEFAULT_FETCH_CONCURRENCY),
        };

        if fetch_concurrency == 0 {
            return Err(VerbForgeError::Config(
                "fetch concurrency must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            database_url,
            model,
            fetch_concurrency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let file = storage::FileConfig::default();
        let result = Settings::from_sources(&file, env_from(&[]));
        assert!(matches!(result, Err(VerbForgeError::Config(_))));
    }

    #[test]
    fn test_defaults_apply_without_overrides() {
        let file = storage::FileConfig::default();
        let settings =
            Settings::from_sources(&file, env_from(&[(API_KEY_VAR, "sk-test")])).unwrap();

        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.fetch_concurrency, DEFAULT_FETCH_CONCURRENCY);
    }

    #[test]
    fn test_environment_wins_over_file() {
        let file = storage::FileConfig {
            database_url: Some("sqlite:file.db".to_string()),
            model: Some("file-model".to_string()),
            fetch_concurrency: Some(3),
        };

        let settings = Settings::from_sources(
            &file,
            env_from(&[
                (API_KEY_VAR, "sk-test"),
                ("DATABASE_URL", "postgres://localhost/verbs"),
                ("VERBFORGE_MODEL", "env-model"),
                ("VERBFORGE_CONCURRENCY", "7"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.database_url, "postgres://localhost/verbs");
        assert_eq!(settings.model, "env-model");
        assert_eq!(settings.fetch_concurrency, 7);
    }

    #[test]
    fn test_file_defaults_apply_without_environment() {
        let file = storage::FileConfig {
            database_url: Some("sqlite:file.db".to_string()),
            model: None,
            fetch_concurrency: Some(3),
        };

        let settings =
            Settings::from_sources(&file, env_from(&[(API_KEY_VAR, "sk-test")])).unwrap();

        assert_eq!(settings.database_url, "sqlite:file.db");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.fetch_concurrency, 3);
    }

    #[test]
    fn test_invalid_concurrency_is_rejected() {
        let file = storage::FileConfig::default();

        let result = Settings::from_sources(
            &file,
            env_from(&[(API_KEY_VAR, "sk-test"), ("VERBFORGE_CONCURRENCY", "many")]),
        );
        assert!(matches!(result, Err(VerbForgeError::Config(_))));

        let result = Settings::from_sources(
            &file,
            env_from(&[(API_KEY_VAR, "sk-test"), ("VERBFORGE_CONCURRENCY", "0")]),
        );
        assert!(matches!(result, Err(VerbForgeError::Config(_))));
    }
}
