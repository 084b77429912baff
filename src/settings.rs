//! Credentials file loading
//!
//! The provider URI and basic-auth credentials live in an INI file:
//!
//! ```ini
//! [Uptime]
//! uri = https://uptime.example.com/api
//! username = monitor
//! password = secret
//! ```
//!
//! Without an explicit path the file is looked up next to the executable,
//! then in the current directory.

use config::{File, FileFormat, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// File name searched for when no path is given
pub const CONFIG_FILE_NAME: &str = "linode-uptime.ini";

const SECTION: &str = "Uptime";

/// Provider connection settings
#[derive(Clone)]
pub struct Config {
    /// API base URI, e.g. `https://uptime.example.com/api`
    pub api_uri: String,

    /// Basic-auth user name
    pub username: String,

    /// Basic-auth password
    pub password: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_uri", &self.api_uri)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    /// Create config from explicit values
    pub fn new(
        api_uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            api_uri: api_uri.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load from `path`, or from the default locations when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => locate(&default_candidates())?,
        };
        Self::from_file(&path)
    }

    /// Read and parse a specific INI file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading config");

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_ini_str(&text).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        tracing::info!(path = %path.display(), api_uri = %config.api_uri, "Config loaded");
        Ok(config)
    }

    /// Parse INI text; the `[Uptime]` section is required
    ///
    /// Section and key names are matched case-insensitively.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let parse_err = |message: String| ConfigError::Parse {
            path: PathBuf::new(),
            message,
        };

        let sections: HashMap<String, Value> = config::Config::builder()
            .add_source(File::from_str(text, FileFormat::Ini))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| parse_err(e.to_string()))?;

        let section = sections
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SECTION))
            .ok_or_else(|| parse_err(format!("missing section [{}]", SECTION)))?
            .1
            .into_table()
            .map_err(|e| parse_err(e.to_string()))?;

        let keys: HashMap<String, Value> = section
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        let field = |name: &str| -> Result<String, ConfigError> {
            keys.get(name)
                .cloned()
                .ok_or_else(|| parse_err(format!("missing key `{}` in [{}]", name, SECTION)))?
                .into_string()
                .map_err(|e| parse_err(e.to_string()))
        };

        let config = Self {
            api_uri: field("uri")?,
            username: field("username")?,
            password: field("password")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that `api_uri` is an absolute URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidUri {
            uri: self.api_uri.clone(),
            message: message.to_string(),
        };

        if self.api_uri.trim().is_empty() {
            return Err(invalid("uri is empty"));
        }

        let url = reqwest::Url::parse(&self.api_uri).map_err(|e| invalid(&e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("uri cannot be used as a base URL"));
        }

        Ok(())
    }

    /// Base URI without trailing slashes
    pub fn base_uri(&self) -> &str {
        self.api_uri.trim_end_matches('/')
    }
}

/// Default search order: executable directory, then working directory
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);

    match std::env::current_exe() {
        Ok(exe) => {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join(CONFIG_FILE_NAME));
            }
        }
        Err(e) => tracing::debug!(error = %e, "Cannot resolve executable path"),
    }

    candidates.push(PathBuf::from(CONFIG_FILE_NAME));
    candidates
}

/// First candidate that exists on disk
pub fn locate(candidates: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| ConfigError::NotFound {
            searched: candidates.to_vec(),
        })
}
