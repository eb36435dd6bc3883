//! Configuration management for the Azure DevOps wiki client.
//!
//! Parses `azd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `connection.organization_url`
//! - `connection.project`
//! - `connection.personal_access_token`
//!
//! ## Example
//!
//! ```toml
//! [connection]
//! organization_url = "https://dev.azure.com/fabrikam"
//! project = "Fabrikam-Fiber"
//! personal_access_token = "${AZURE_DEVOPS_PAT}"
//! timeout_secs = 60
//! ```

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override organization URL.
    pub organization_url: Option<String>,
    /// Override default project.
    pub project: Option<String>,
    /// Override personal access token.
    pub personal_access_token: Option<String>,
    /// Override request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "azd.toml";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection configuration.
    pub connection: Option<ConnectionConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Connection to an Azure DevOps organization.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Organization base URL (e.g. `https://dev.azure.com/fabrikam`).
    pub organization_url: String,
    /// Project that scopes every wiki request.
    pub project: String,
    /// Personal access token, sent as HTTP basic credentials.
    #[serde(default)]
    pub personal_access_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ConnectionConfig {
    /// Create a connection config with default timeout and no token.
    #[must_use]
    pub fn new(organization_url: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            organization_url: organization_url.into(),
            project: project.into(),
            personal_access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.organization_url, "connection.organization_url")?;
        require_http_url(&self.organization_url, "connection.organization_url")?;
        require_non_empty(&self.project, "connection.project")?;
        if let Some(token) = &self.personal_access_token {
            require_non_empty(token, "connection.personal_access_token")?;
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "connection.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.organization_url =
            expand::expand_env(&self.organization_url, "connection.organization_url")?;
        self.project = expand::expand_env(&self.project, "connection.project")?;
        if let Some(token) = &self.personal_access_token {
            self.personal_access_token = Some(expand::expand_env(
                token,
                "connection.personal_access_token",
            )?);
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`connection.personal_access_token`").
        field: String,
        /// Error message (e.g., "${`AZURE_DEVOPS_PAT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `azd.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Organization URL and project together create a `[connection]` section
    /// when the file had none.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if self.connection.is_none()
            && let (Some(url), Some(project)) = (&settings.organization_url, &settings.project)
        {
            self.connection = Some(ConnectionConfig::new(url.clone(), project.clone()));
        }

        let Some(connection) = self.connection.as_mut() else {
            return;
        };
        if let Some(url) = &settings.organization_url {
            connection.organization_url.clone_from(url);
        }
        if let Some(project) = &settings.project {
            connection.project.clone_from(project);
        }
        if let Some(token) = &settings.personal_access_token {
            connection.personal_access_token = Some(token.clone());
        }
        if let Some(timeout) = settings.timeout_secs {
            connection.timeout_secs = timeout;
        }
    }

    /// Get validated connection configuration.
    ///
    /// Use this instead of accessing the `connection` field directly when the
    /// caller needs to talk to the server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_connection(&self) -> Result<&ConnectionConfig, ConfigError> {
        let connection = self.connection.as_ref().ok_or_else(|| {
            ConfigError::Validation("[connection] section required in config".into())
        })?;
        connection.validate()?;
        Ok(connection)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(current)
    }

    fn discover_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        if let Some(connection) = config.connection.as_mut() {
            connection.expand_env_vars()?;
            connection.validate()?;
        }
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }
}
