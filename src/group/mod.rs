//! Local chat group state.
//!
//! Holds this participant's identity, the local member list and the last
//! received message, and broadcasts membership changes to peers.

pub mod broadcast;

use crate::error::Result;
use crate::protocol::{ChatMessage, Envelope, Member};

pub use broadcast::{Broadcaster, TcpBroadcaster};

pub struct ChatGroup {
    self_member: Member,
    memberlist: Vec<Member>,
    message: Option<ChatMessage>,
    broadcaster: Box<dyn Broadcaster>,
}

impl ChatGroup {
    pub fn new(self_member: Member, broadcaster: Box<dyn Broadcaster>) -> Self {
        Self {
            self_member,
            memberlist: Vec::new(),
            message: None,
            broadcaster,
        }
    }

    pub fn memberlist(&self) -> &[Member] {
        &self.memberlist
    }

    pub fn message(&self) -> Option<&ChatMessage> {
        self.message.as_ref()
    }

    /// Replace the local member list wholesale.
    pub fn replace_memberlist(&mut self, members: impl IntoIterator<Item = Member>) {
        self.memberlist.clear();
        self.memberlist.extend(members);
    }

    /// Record an inbound chat message.
    pub fn receive_message(&mut self, message: ChatMessage) {
        self.message = Some(message);
    }

    /// Send the current member list to every peer except self.
    pub async fn publish_subscriber_list(&self) -> Result<()> {
        let envelope = Envelope::publish(self.self_member.clone(), self.memberlist.clone());

        for peer in self.memberlist.iter().filter(|m| **m != self.self_member) {
            tracing::debug!("Publishing member list to {} at {}", peer.name, peer.address());
            self.broadcaster.send(peer, &envelope).await?;
        }

        tracing::info!("Published member list ({} members)", self.memberlist.len());
        Ok(())
    }
}
