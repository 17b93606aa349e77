//! Service directory client.
//!
//! The directory is an unauthenticated HTTP endpoint returning a JSON object
//! keyed by service identifier. Registered services are invoked with a
//! form-encoded POST whose response body is relayed verbatim.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Failure stage of a directory fetch or service invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("reading response body failed: {0}")]
    Body(String),

    #[error("decoding service catalog failed: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// A registered remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ServiceRecord {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Url")]
    pub url: String,
    #[serde(default, alias = "Description")]
    pub description: String,
}

/// Service catalog keyed by service identifier. Iteration order is unspecified.
pub type Catalog = HashMap<String, ServiceRecord>;

/// Access to the service directory and the services it lists.
#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Fetch the full catalog.
    async fn catalog(&self) -> Result<Catalog>;

    /// POST `body` to the service and return the raw response body.
    async fn invoke(&self, service: &ServiceRecord, body: &str) -> Result<String>;
}

/// reqwest-backed directory client.
pub struct HttpServiceDirectory {
    client: Client,
    directory_url: String,
}

impl HttpServiceDirectory {
    pub fn new(client: Client, directory_url: impl Into<String>) -> Self {
        Self {
            client,
            directory_url: directory_url.into(),
        }
    }
}

#[async_trait]
impl ServiceDirectory for HttpServiceDirectory {
    async fn catalog(&self) -> Result<Catalog> {
        let response = self
            .client
            .get(&self.directory_url)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::Body(e.to_string()))?;

        decode_catalog(&body)
    }

    async fn invoke(&self, service: &ServiceRecord, body: &str) -> Result<String> {
        tracing::debug!("POST {} ({} bytes)", service.url, body.len());

        let response = self
            .client
            .post(&service.url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| DirectoryError::Body(e.to_string()))
    }
}

/// Decode a catalog document. `null` decodes to an empty catalog.
pub fn decode_catalog(body: &[u8]) -> Result<Catalog> {
    let catalog: Option<Catalog> =
        serde_json::from_slice(body).map_err(|e| DirectoryError::Decode(e.to_string()))?;
    Ok(catalog.unwrap_or_default())
}

/// All records whose name equals `name`, in catalog iteration order.
pub fn matching<'a>(catalog: &'a Catalog, name: &'a str) -> impl Iterator<Item = &'a ServiceRecord> {
    catalog.values().filter(move |srv| srv.name == name)
}
