//! HTTP membership directory client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::{DirectoryMember, MembershipConfig, MembershipDirectory};
use crate::error::{Error, Result};

pub struct HttpMembershipClient {
    client: Client,
    config: MembershipConfig,
}

impl HttpMembershipClient {
    pub fn new(client: Client, config: MembershipConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(base: &str, op: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), op)
    }

    async fn send(&self, op: &str, request: RequestBuilder) -> Result<Vec<DirectoryMember>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Membership(format!(
                "{} returned {}: {}",
                op,
                status,
                body.trim()
            )));
        }

        decode_members(&body)
    }
}

/// Decode a member array. Empty bodies and `null` decode to no members.
pub fn decode_members(body: &str) -> Result<Vec<DirectoryMember>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let members: Option<Vec<DirectoryMember>> = serde_json::from_str(body)?;
    Ok(members.unwrap_or_default())
}

#[async_trait]
impl MembershipDirectory for HttpMembershipClient {
    fn config(&self) -> &MembershipConfig {
        &self.config
    }

    async fn list(&self) -> Result<Vec<DirectoryMember>> {
        let url = Self::endpoint(&self.config.service_url, "list");
        self.send("list", self.client.get(url)).await
    }

    async fn subscribe(&self) -> Result<Vec<DirectoryMember>> {
        let url = Self::endpoint(&self.config.service_url, "subscribe");
        let request = self.client.post(url).json(&self.config.self_member);
        self.send("subscribe", request).await
    }

    async fn unsubscribe(&self) -> Result<Vec<DirectoryMember>> {
        let url = Self::endpoint(&self.config.service_url, "unsubscribe");
        let request = self.client.post(url).json(&self.config.self_member);
        self.send("unsubscribe", request).await
    }

    async fn reset(&self, service_url: &str) -> Result<Vec<DirectoryMember>> {
        let url = Self::endpoint(service_url, "reset");
        self.send("reset", self.client.post(url)).await
    }
}
