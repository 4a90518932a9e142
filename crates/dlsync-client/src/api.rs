//! Download client resource of the server API

use std::time::Duration;

use async_trait::async_trait;
use dlsync_core::{DesiredEntry, ObservedRecord, ObservedStateProvider};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::{Error, Result};

const API_KEY_HEADER: &str = "x-api-key";

/// Write side of the download client resource
#[async_trait]
pub trait DownloadClientWriter: Send + Sync {
    /// Create a download client, returning the stored record
    async fn create(&self, entry: &DesiredEntry) -> Result<ObservedRecord>;

    /// Replace the download client with the given id
    async fn update(&self, id: i64, record: &ObservedRecord) -> Result<ObservedRecord>;

    /// Remove the download client with the given id
    async fn delete(&self, id: i64) -> Result<()>;
}

/// HTTP client for `/api/{version}/downloadclient`
#[derive(Debug, Clone)]
pub struct DownloadClientApi {
    client: Client,
    base_url: String,
}

impl DownloadClientApi {
    /// Build a client for the given server
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the url or api key is missing or
    /// the api key is not a valid header value.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::invalid_config("server url is empty"));
        }

        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::invalid_config("api key is not set"))?;

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| Error::invalid_config(format!("api key is not a valid header: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::invalid_config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.download_client_url(),
        })
    }

    /// List every download client on the server
    pub async fn list(&self) -> Result<Vec<ObservedRecord>> {
        let response = self.send(Method::GET, self.base_url.clone(), |r| r).await?;
        read_json(response).await
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<Response> {
        debug!(method = %method, url = %url, "Sending request");

        let response = build(self.client.request(method.clone(), &url)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                method: method.to_string(),
                url,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl DownloadClientWriter for DownloadClientApi {
    async fn create(&self, entry: &DesiredEntry) -> Result<ObservedRecord> {
        let response = self
            .send(Method::POST, self.base_url.clone(), |r| r.json(entry))
            .await?;
        read_json(response).await
    }

    async fn update(&self, id: i64, record: &ObservedRecord) -> Result<ObservedRecord> {
        let response = self
            .send(Method::PUT, self.item_url(id), |r| r.json(record))
            .await?;
        read_json(response).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.send(Method::DELETE, self.item_url(id), |r| r).await?;
        Ok(())
    }
}

#[async_trait]
impl ObservedStateProvider for DownloadClientApi {
    async fn list_download_clients(&self) -> dlsync_core::Result<Vec<ObservedRecord>> {
        self.list().await.map_err(dlsync_core::Error::fetch)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
