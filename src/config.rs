// src/config.rs

use super::prompt::PromptLocale;
use super::upstream::DEFAULT_BASE_URL;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} is required but not set (add it to the environment or .env)")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub locale: PromptLocale,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let locale = match get("PROMPT_LOCALE") {
            Some(raw) => raw.parse::<PromptLocale>().map_err(|reason| ConfigError::Invalid {
                key: "PROMPT_LOCALE",
                value: raw.clone(),
                reason,
            })?,
            None => PromptLocale::default(),
        };

        Ok(Config {
            api_key,
            model: get_or("OPENAI_MODEL", DEFAULT_MODEL),
            base_url: get_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            host: get_or("HOST", DEFAULT_HOST),
            port,
            static_dir: get_or("STATIC_DIR", DEFAULT_STATIC_DIR),
            locale,
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        })
    }
}

// Keep the credential out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("static_dir", &self.static_dir)
            .field("locale", &self.locale)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn applies_defaults() {
        let config = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.locale, PromptLocale::ZhTw);
        assert_eq!(config.cors_allowed_origin, None);
    }

    #[test]
    fn missing_or_blank_api_key_is_fatal() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("OPENAI_API_KEY"));
        assert_eq!(
            load(&[("OPENAI_API_KEY", "  ")]).unwrap_err(),
            ConfigError::Missing("OPENAI_API_KEY")
        );
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4.1"),
            ("PORT", "8080"),
            ("PROMPT_LOCALE", "en"),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.locale, PromptLocale::En);
        assert_eq!(config.cors_allowed_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn rejects_bad_port_and_locale() {
        let err = load(&[("OPENAI_API_KEY", "k"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = load(&[("OPENAI_API_KEY", "k"), ("PROMPT_LOCALE", "fr")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PROMPT_LOCALE", .. }));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = load(&[("OPENAI_API_KEY", "sk-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
