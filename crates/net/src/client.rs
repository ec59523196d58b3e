//! HTTP client over reqwest

use crate::transport::{Transport, TransportResponse};
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt, TryStreamExt};
use haul_config::NetworkSettings;
use haul_errors::{Error, NetworkError};
use reqwest::{redirect, Client};
use std::time::Duration;
use url::Url;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub user_agent: String,
    /// Redirects followed per request, `0` disables following
    pub max_redirects: usize,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self::from(&NetworkSettings::default())
    }
}

impl From<&NetworkSettings> for NetConfig {
    fn from(settings: &NetworkSettings) -> Self {
        Self {
            user_agent: settings.user_agent.clone(),
            max_redirects: settings.max_redirects,
            pool_idle_timeout: settings.pool_idle_timeout(),
            pool_max_idle_per_host: settings.pool_max_idle_per_host,
        }
    }
}

/// HTTP client wrapper implementing [`Transport`]
#[derive(Clone, Debug)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let policy = if config.max_redirects == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(config.max_redirects)
        };

        let client = Client::builder()
            .redirect(policy)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &NetConfig {
        &self.config
    }

    /// Get the underlying reqwest client for advanced usage
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

impl Transport for NetClient {
    fn fetch<'a>(
        &'a self,
        url: &'a Url,
    ) -> BoxFuture<'a, Result<TransportResponse, NetworkError>> {
        async move {
            tracing::debug!(%url, "sending GET");

            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?;

            let status = response.status().as_u16();
            let content_length = response.content_length();
            tracing::debug!(%url, status, ?content_length, "response headers received");

            let body = response
                .bytes_stream()
                .map_err(|e| NetworkError::StreamFailed(e.to_string()))
                .boxed();

            Ok(TransportResponse {
                status,
                content_length,
                body,
            })
        }
        .boxed()
    }
}
