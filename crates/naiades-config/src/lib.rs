use std::fmt;

use serde::{Deserialize, Serialize};

pub const BACKEND_HOST_VAR: &str = "NAIADES_BACKEND_HOST";
pub const THEME_VAR: &str = "NAIADES_THEME";
pub const DEFAULT_BACKEND_HOST: &str = "localhost";
pub const BACKEND_PORT: u16 = 8001;
pub const DOWNLOADS_PATH: &str = "/downloads";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid backend host {0:?}: expected a bare host name or address")]
    InvalidHost(String),
    #[error("unknown theme {0:?}: expected terminal_dark or terminal_light")]
    UnknownTheme(String),
}

/// Location of the listing service and presentation preferences.
///
/// Built once at startup; nothing re-reads the environment afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub backend_host: String,
    pub backend_port: u16,
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    TerminalDark,
    TerminalLight,
}

impl Theme {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "terminal_dark" | "dark" => Ok(Self::TerminalDark),
            "terminal_light" | "light" => Ok(Self::TerminalLight),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            backend_host: DEFAULT_BACKEND_HOST.to_string(),
            backend_port: BACKEND_PORT,
            theme: Theme::TerminalDark,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the config from an arbitrary variable source. Unset or blank
    /// variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = non_blank(lookup(BACKEND_HOST_VAR)) {
            config.backend_host = validate_host(&host)?;
        } else {
            tracing::debug!(
                "{} not set, using {}",
                BACKEND_HOST_VAR,
                DEFAULT_BACKEND_HOST
            );
        }

        if let Some(theme) = non_blank(lookup(THEME_VAR)) {
            config.theme = Theme::parse(&theme)?;
        }

        Ok(config)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.backend_host, self.backend_port)
    }

    pub fn downloads_url(&self) -> String {
        format!("{}{}", self.base_url(), DOWNLOADS_PATH)
    }
}

impl fmt::Display for ViewerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (theme {:?})", self.base_url(), self.theme)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_host(host: &str) -> Result<String, ConfigError> {
    let rejected = host.contains("://")
        || host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | ':' | '?' | '#' | '@'));

    if rejected {
        return Err(ConfigError::InvalidHost(host.to_string()));
    }

    Ok(host.to_string())
}
