use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Default timezone used to decide what "today" is on the calendar
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Default location of the persisted session
pub const DEFAULT_SESSION_PATH: &str = "session.json";

/// Location of the optional components file
pub const COMPONENTS_FILE: &str = "config/app.toml";

/// Defaults applied to every fetch unless overridden per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSettings {
    pub timeout_ms: u64,
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            retries: 2,
            retry_delay_ms: 1_000,
        }
    }
}

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the ExpertMeet REST API
    pub api_base_url: String,
    /// Timezone for the calendar
    pub timezone: String,
    /// Where the session context is persisted
    pub session_path: PathBuf,
    /// Fetch defaults
    pub fetch: FetchSettings,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL").map_err(|_| env_error("API_BASE_URL"))?;
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));
        let session_path = env::var("SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_PATH));

        let defaults = FetchSettings::default();
        let fetch = FetchSettings {
            timeout_ms: parse_env("FETCH_TIMEOUT_MS", defaults.timeout_ms)?,
            retries: parse_env("FETCH_RETRIES", defaults.retries)?,
            retry_delay_ms: parse_env("FETCH_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
        };

        let mut components = default_components();
        if let Ok(content) = fs::read_to_string(COMPONENTS_FILE) {
            let file_components = toml::from_str::<HashMap<String, bool>>(&content)?;
            components.extend(file_components);
        }

        let config = Config {
            api_base_url,
            timezone,
            session_path,
            fetch,
            components,
        };
        config.validate()?;

        Ok(config)
    }

    /// Configuration pointing at `api_base_url` with every default applied
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            fetch: FetchSettings::default(),
            components: default_components(),
        }
    }

    /// Check values that cannot be verified by parsing alone
    pub fn validate(&self) -> AppResult<()> {
        url::Url::parse(&self.api_base_url)?;
        self.tz()?;
        Ok(())
    }

    /// Parsed calendar timezone
    pub fn tz(&self) -> AppResult<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }
}

fn default_components() -> HashMap<String, bool> {
    let mut components = HashMap::new();
    components.insert("calendar".to_string(), true);
    components
}

fn parse_env<T: FromStr>(var: &str, default: T) -> AppResult<T> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| config_error(&format!("Invalid {} value: {}", var, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_defaults_match_documented_values() {
        let settings = FetchSettings::default();
        assert_eq!(settings.timeout_ms, 10_000);
        assert_eq!(settings.retries, 2);
        assert_eq!(settings.retry_delay_ms, 1_000);
    }

    #[test]
    fn with_base_url_enables_calendar() {
        let config = Config::with_base_url("https://api.example.com/");
        assert!(config.validate().is_ok());
        assert!(config.is_component_enabled("calendar"));
        assert!(!config.is_component_enabled("booking"));
        assert_eq!(config.tz().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn invalid_timezone_is_rejected() {
        let mut config = Config::with_base_url("https://api.example.com/");
        config.timezone = "Mars/Olympus".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = Config::with_base_url("not a url");
        assert!(config.validate().is_err());
    }
}
