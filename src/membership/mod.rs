//! Membership directory client.
//!
//! The membership directory keeps the authoritative list of subscribed chat
//! members. This process can list it, subscribe or unsubscribe itself, and
//! reset the whole list.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::protocol::Member;

pub use self::http::HttpMembershipClient;

/// Member record in the shape returned by the membership directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DirectoryMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub protocol: String,
}

impl From<&DirectoryMember> for Member {
    fn from(m: &DirectoryMember) -> Self {
        Member::new(&m.name, &m.ip, &m.port, &m.protocol)
    }
}

impl From<&Member> for DirectoryMember {
    fn from(m: &Member) -> Self {
        Self {
            name: m.name.clone(),
            ip: m.ip.clone(),
            port: m.port.clone(),
            protocol: m.protocol.clone(),
        }
    }
}

/// Client configuration, including this process's own identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MembershipConfig {
    pub service_url: String,
    #[serde(rename = "self")]
    pub self_member: DirectoryMember,
}

/// Operations offered by the membership directory.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Client configuration.
    fn config(&self) -> &MembershipConfig;

    /// Current members.
    async fn list(&self) -> Result<Vec<DirectoryMember>>;

    /// Register self; returns the membership after subscribing.
    async fn subscribe(&self) -> Result<Vec<DirectoryMember>>;

    /// Deregister self.
    async fn unsubscribe(&self) -> Result<Vec<DirectoryMember>>;

    /// Drop every member from the directory at `service_url`.
    async fn reset(&self, service_url: &str) -> Result<Vec<DirectoryMember>>;
}
