//! Envelope framing for messages exchanged between chat peers.
//!
//! Envelopes travel as single JSON lines.

use serde::{Deserialize, Serialize};

use super::types::{Member, MessageType};

/// A typed message exchanged between peers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    /// Message type
    pub message_type: MessageType,
    /// Sending member
    pub sender: Member,
    /// Membership carried by subscribe/publish exchanges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
}

impl Envelope {
    /// Create a publish request carrying the current membership.
    pub fn publish(sender: Member, members: Vec<Member>) -> Self {
        Self {
            message_type: MessageType::PublishRequest,
            sender,
            members,
        }
    }

    /// Encode as one newline-terminated JSON line.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    /// Decode one JSON line.
    pub fn from_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line.trim_end())
    }
}
