//! Chat group wire protocol.
//!
//! - Message type codes for subscribe/publish exchanges
//! - Member and chat message records
//! - JSON-line envelopes sent between peers

pub mod envelope;
pub mod types;

pub use envelope::Envelope;
pub use types::{ChatMessage, Member, MessageType};
