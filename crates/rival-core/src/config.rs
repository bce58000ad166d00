//! Analyst configuration.
//!
//! Built once by the caller and passed into the pipeline; nothing in the
//! analysis flow reads the environment itself.

use std::time::Duration;

use crate::llm::DEFAULT_API_BASE;

/// Model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Credential variables, in precedence order.
pub const API_KEY_VARS: [&str; 2] = ["OPENAI_API_KEY", "OPENAI_KEY"];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalystConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
    pub redis_url: String,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            redis_url: rival_db::DEFAULT_REDIS_URL.to_string(),
        }
    }
}

impl AnalystConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api_key = API_KEY_VARS.iter().find_map(|name| get(*name));
        let timeout = get("OPENAI_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            api_key,
            model: get("OPENAI_MODEL").unwrap_or(defaults.model),
            api_base: get("OPENAI_BASE_URL").unwrap_or(defaults.api_base),
            timeout,
            redis_url: get("REDIS_URL").unwrap_or(defaults.redis_url),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AnalystConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AnalystConfig::default());
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_primary_key_wins() {
        let config = AnalystConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "primary"),
            ("OPENAI_KEY", "secondary"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_fallback_key() {
        let config = AnalystConfig::from_lookup(lookup(&[("OPENAI_KEY", "secondary")]));
        assert_eq!(config.api_key.as_deref(), Some("secondary"));

        let config = AnalystConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", ""),
            ("OPENAI_KEY", "secondary"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("secondary"));
    }

    #[test]
    fn test_overrides() {
        let config = AnalystConfig::from_lookup(lookup(&[
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
            ("OPENAI_TIMEOUT_SECS", "5"),
            ("REDIS_URL", "redis://cache:6379"),
        ]));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_base, "http://localhost:11434/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.redis_url, "redis://cache:6379");
    }

    #[test]
    fn test_bad_timeout_uses_default() {
        let config = AnalystConfig::from_lookup(lookup(&[("OPENAI_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
