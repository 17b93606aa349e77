//! Wire vocabulary shared by the membership directory and chat peers.

use serde::{Deserialize, Serialize};

/// Message type classification for subscribe/publish exchanges.
///
/// The discriminants are the ordinals used on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    SubscribeRequest = 0,
    SubscribeReply = 1,
    UnsubscribeRequest = 2,
    UnsubscribeReply = 3,
    PublishRequest = 4,
    PublishReply = 5,
    TestPublishRequest = 6,
    TestPublishReply = 7,
    TestCmdRequest = 8,
    TestCmdReply = 9,
}

impl MessageType {
    /// All message types in ordinal order.
    pub const ALL: [MessageType; 10] = [
        MessageType::SubscribeRequest,
        MessageType::SubscribeReply,
        MessageType::UnsubscribeRequest,
        MessageType::UnsubscribeReply,
        MessageType::PublishRequest,
        MessageType::PublishReply,
        MessageType::TestPublishRequest,
        MessageType::TestPublishReply,
        MessageType::TestCmdRequest,
        MessageType::TestCmdReply,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            MessageType::SubscribeRequest => "SUBSCRIBE_REQUEST",
            MessageType::SubscribeReply => "SUBSCRIBE_REPLY",
            MessageType::UnsubscribeRequest => "UNSUBSCRIBE_REQUEST",
            MessageType::UnsubscribeReply => "UNSUBSCRIBE_REPLY",
            MessageType::PublishRequest => "PUBLISH_REQUEST",
            MessageType::PublishReply => "PUBLISH_REPLY",
            MessageType::TestPublishRequest => "TEST_PUBLISH_REQUEST",
            MessageType::TestPublishReply => "TEST_PUBLISH_REPLY",
            MessageType::TestCmdRequest => "TEST_CMD_REQUEST",
            MessageType::TestCmdReply => "TEST_CMD_REPLY",
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        MessageType::ALL
            .into_iter()
            .find(|t| t.ordinal() == value)
            .ok_or(value)
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A member record as tracked by the chat group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Member {
    pub name: String,
    pub ip: String,
    pub port: String,
    pub protocol: String,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        ip: impl Into<String>,
        port: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            port: port.into(),
            protocol: protocol.into(),
        }
    }

    /// `ip:port` socket address string.
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

/// The last chat message received from a peer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_are_stable() {
        for (i, t) in MessageType::ALL.iter().enumerate() {
            assert_eq!(t.ordinal() as usize, i);
        }
        assert_eq!(MessageType::PublishRequest.ordinal(), 4);
        assert_eq!(MessageType::TestCmdReply.ordinal(), 9);
    }

    #[test]
    fn test_try_from_ordinal() {
        assert_eq!(MessageType::try_from(2), Ok(MessageType::UnsubscribeRequest));
        assert_eq!(MessageType::try_from(10), Err(10));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&MessageType::TestPublishReply).unwrap();
        assert_eq!(json, "\"TEST_PUBLISH_REPLY\"");
        for t in MessageType::ALL {
            assert_eq!(serde_json::to_string(&t).unwrap(), format!("\"{}\"", t.name()));
        }
    }

    #[test]
    fn test_member_address() {
        let m = Member::new("alice", "10.0.0.7", "22365", "tcp");
        assert_eq!(m.address(), "10.0.0.7:22365");
    }
}
