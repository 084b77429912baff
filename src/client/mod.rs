//! Uptime provider API client
//!
//! Thin wrapper over the provider's REST endpoints:
//! - `GET  {base}/checks` lists checks
//! - `PUT  {base}/checks` creates a check
//! - `POST {base}/checks/{id}` updates (and re-activates) a check
//!
//! Every request carries basic-auth credentials from [`Config`]. Create and
//! update bodies are sent as `application/x-www-form-urlencoded`.

use reqwest::{Client, Method, Url};

use crate::contracts::{Check, CheckForm};
use crate::error::ApiError;
use crate::settings::Config;

/// Path of the checks collection, relative to the API base
pub const CHECKS_PATH: &str = "checks";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Uptime provider client
pub struct UptimeClient {
    base_uri: String,
    username: String,
    password: String,
    client: Client,
}

impl UptimeClient {
    /// Create client from connection settings
    ///
    /// No timeout or retry policy is applied.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            base_uri: config.base_uri().to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            client,
        })
    }

    /// Absolute URL for a path relative to the API base
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base_uri, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }

    /// Issue a request and return the raw response body
    ///
    /// `form` is only sent for POST and PUT.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        form: Option<&CheckForm>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(method = %method, url = %url, "Sending API request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .basic_auth(&self.username, Some(&self.password));

        if let Some(form) = form {
            if method == Method::POST || method == Method::PUT {
                request = request.form(form);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            tracing::debug!(status = status.as_u16(), path = path, "API request rejected");
            Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }

    /// Fetch and decode every check known to the provider
    pub async fn list_checks(&self) -> Result<Vec<Check>, ApiError> {
        let body = self.request(Method::GET, CHECKS_PATH, None).await?;
        let checks: Vec<Check> = serde_json::from_slice(&body)?;

        tracing::info!(checks = checks.len(), "Fetched check list");
        Ok(checks)
    }

    /// Create a new check
    pub async fn create_check(&self, form: &CheckForm) -> Result<Vec<u8>, ApiError> {
        self.request(Method::PUT, CHECKS_PATH, Some(form)).await
    }

    /// Update an existing check by id
    pub async fn update_check(&self, id: &str, form: &CheckForm) -> Result<Vec<u8>, ApiError> {
        let path = format!("{}/{}", CHECKS_PATH, id);
        self.request(Method::POST, &path, Some(form)).await
    }
}
