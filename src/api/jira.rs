use reqwest::Client;
use tracing::{debug, info};

use crate::config::credentials::Credentials;
use crate::errors::{FieldsError, Result};

/// Appended to the site URL to form the REST API base.
pub const REST_ENDPOINT: &str = "/rest/api/2";

const CREATE_META_EXPAND: &str = "projects.issuetypes.fields";

pub struct JiraClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl JiraClient {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}{}", credentials.base_url(), REST_ENDPOINT),
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        }
    }

    /// Fetches the raw `issue/createmeta` document with every project's issue
    /// types and fields expanded.
    pub async fn get_create_meta(&self) -> Result<Vec<u8>> {
        let url = format!("{}/issue/createmeta", self.base_url);
        info!(url = %url, "Fetching create metadata");

        let response = self
            .client
            .get(&url)
            .query(&[("expand", CREATE_META_EXPAND)])
            .header("Content-Type", "application/json")
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "Jira responded");

        if status.is_client_error() || status.is_server_error() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => FieldsError::AuthenticationFailed(status.as_u16()),
                code => FieldsError::ApiError(code, text),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Read create metadata body");

        Ok(body.to_vec())
    }
}
