//! Environment-backed suite configuration.
//!
//! Values are read from `STORY_SPOILER_*` variables. Unset variables fall back
//! to the defaults below; set-but-empty or non-UTF-8 values are rejected
//! rather than silently replaced.

use std::env::{self, VarError};

use spoiler_domain::{ApiRoutes, Credentials, DomainResult};
use thiserror::Error;
use url::Url;

/// Base URL of the public Story Spoiler deployment.
pub const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";
/// Account used when no username is configured.
pub const DEFAULT_USERNAME: &str = "yoana15yoana15";
/// Password used when no password is configured.
pub const DEFAULT_PASSWORD: &str = "yoana15yoana15";

/// Environment keys read by [`SuiteConfig::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEnv {
    /// API base URL.
    BaseUrl,
    /// Login username.
    Username,
    /// Login password.
    Password,
}

impl SuiteEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "STORY_SPOILER_BASE_URL",
            Self::Username => "STORY_SPOILER_USERNAME",
            Self::Password => "STORY_SPOILER_PASSWORD",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but blank.
    #[error("{key} must not be empty")]
    Empty {
        /// Variable name.
        key: &'static str,
    },

    /// A variable is not valid UTF-8.
    #[error("{key} is not valid UTF-8")]
    NotUnicode {
        /// Variable name.
        key: &'static str,
    },

    /// The base URL does not parse or is not http(s).
    #[error("{key} is not a valid http(s) URL: {message}")]
    InvalidUrl {
        /// Variable name.
        key: &'static str,
        /// Parse failure.
        message: String,
    },
}

/// Typed suite configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// API base URL.
    pub base_url: Url,
    /// Login credentials.
    pub credentials: Credentials,
}

impl SuiteConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is empty, not valid UTF-8, or (for
    /// the base URL) not an http(s) URL.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(read_env)
    }

    /// Loads configuration through `lookup`, which returns `Ok(None)` for
    /// unset keys.
    ///
    /// # Errors
    ///
    /// Same as [`SuiteConfig::load`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(SuiteEnv) -> Result<Option<String>, ConfigError>,
    {
        let nonempty = |key: SuiteEnv| -> Result<Option<String>, ConfigError> {
            match lookup(key)? {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key: key.as_str() }),
                other => Ok(other),
            }
        };

        let base_url = nonempty(SuiteEnv::BaseUrl)?;
        let base_url = parse_base_url(
            SuiteEnv::BaseUrl.as_str(),
            base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        )?;
        let username = nonempty(SuiteEnv::Username)?.unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password = nonempty(SuiteEnv::Password)?.unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        Ok(Self {
            base_url,
            credentials: Credentials::new(username, password),
        })
    }

    /// Route table for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry API paths.
    pub fn routes(&self) -> DomainResult<ApiRoutes> {
        ApiRoutes::new(self.base_url.clone())
    }
}

/// Parses and checks a base URL; `key` names its source in errors.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] unless `raw` is an http(s) URL.
pub fn parse_base_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        key,
        message: format!("{e}: {raw}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            key,
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

fn read_env(key: SuiteEnv) -> Result<Option<String>, ConfigError> {
    match env::var(key.as_str()) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { key: key.as_str() }),
    }
}
