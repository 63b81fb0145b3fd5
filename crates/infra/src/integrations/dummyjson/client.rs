//! DummyJSON user-directory client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use syncline_core::directory_ports::{
    DirectoryClient as DirectoryClientTrait, DirectoryUser, DirectoryUserId, NewDirectoryUser,
};
use syncline_domain::{DirectoryConfig, Result, SynclineError};
use tracing::{debug, warn};

use super::types::{CreatedUserDto, DirectoryUserDto};
use crate::http::HttpClient;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP client for the DummyJSON users API
pub struct DummyJsonClient {
    base_url: String,
    http_client: HttpClient,
}

impl DummyJsonClient {
    /// Create a new client from the directory configuration.
    ///
    /// A zero timeout in the config falls back to the 60 second default.
    pub fn new(config: &DirectoryConfig) -> Result<Self> {
        let timeout_seconds = if config.timeout_seconds == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            config.timeout_seconds
        };

        let http_client =
            HttpClient::builder().timeout(Duration::from_secs(timeout_seconds)).build()?;

        Ok(Self { base_url: config.base_url.trim_end_matches('/').to_string(), http_client })
    }
}

#[async_trait]
impl DirectoryClientTrait for DummyJsonClient {
    async fn fetch_user(&self, id: &str) -> Result<DirectoryUser> {
        let url = format!("{}/users/{}", self.base_url, urlencoding::encode(id));

        let response = self.http_client.send(self.http_client.request(Method::GET, &url)).await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SynclineError::RemoteStatus(format!(
                "directory fetch failed (HTTP {status}): {body}"
            )));
        }

        let dto: DirectoryUserDto = response.json().await.map_err(|err| {
            SynclineError::InvalidInput(format!("failed to parse directory user response: {err}"))
        })?;

        debug!(user_id = id, "fetched directory user");
        Ok(dto.into())
    }

    async fn create_user(&self, user: &NewDirectoryUser) -> Result<DirectoryUserId> {
        let url = format!("{}/users/add", self.base_url);

        let request = self
            .http_client
            .request(Method::POST, &url)
            .header("Content-Type", "application/json")
            .json(user);

        let response = self.http_client.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SynclineError::RemoteStatus(format!(
                "directory create failed (HTTP {status}): {body}"
            )));
        }

        match response.json::<CreatedUserDto>().await {
            Ok(created) => Ok(created.id.into_string()),
            Err(err) => {
                // The push already succeeded at the HTTP level; a broken echo
                // body is not a sync failure
                warn!(error = %err, "created-user echo was not valid JSON; reporting submitted id");
                Ok(user.id.clone())
            }
        }
    }
}
