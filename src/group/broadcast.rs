//! Delivery of envelopes to chat peers.

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::error::{Error, Result};
use crate::protocol::{Envelope, Member};

/// Sends one envelope to one peer.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn send(&self, peer: &Member, envelope: &Envelope) -> Result<()>;
}

/// Writes each envelope as a JSON line over a fresh TCP connection.
#[derive(Debug, Default, Clone)]
pub struct TcpBroadcaster;

#[async_trait]
impl Broadcaster for TcpBroadcaster {
    async fn send(&self, peer: &Member, envelope: &Envelope) -> Result<()> {
        let address = peer.address();
        let line = envelope.to_line()?;

        let mut stream = TcpStream::connect(&address)
            .await
            .map_err(|e| Error::Publish(format!("connect {} ({}): {}", peer.name, address, e)))?;
        stream
            .write_all(line.as_bytes())
            .await
            .map_err(|e| Error::Publish(format!("write to {} ({}): {}", peer.name, address, e)))?;
        stream.shutdown().await?;
        Ok(())
    }
}
