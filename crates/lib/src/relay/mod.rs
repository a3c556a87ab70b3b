//! UDP relay
//!
//! The relay listens on a UDP socket, decodes each datagram as a
//! [`Message`], stamps it with the receipt time and folds it into the
//! [`MessageStore`]. It never answers a sender.
//!
//! The relay has a single state, listening, entered by [`Relay::run`] and
//! left only when the task is dropped or a receive or store write fails.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

use crate::Message;
use crate::clock::Clock;
use crate::store::MessageStore;

mod errors;
mod sender;

pub use errors::RelayError;
pub use sender::RelaySender;

/// Largest datagram read in one receive. Longer payloads are truncated.
pub const MAX_DATAGRAM_SIZE: usize = 4096;

/// The listening side of the UDP channel.
pub struct Relay {
    socket: UdpSocket,
    store: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
}

impl Relay {
    /// Bind the relay socket to `addr`.
    pub async fn bind(
        addr: SocketAddr,
        store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
    ) -> crate::Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| RelayError::Bind {
                address: addr.to_string(),
                source,
            })?;
        Ok(Self {
            socket,
            store,
            clock,
        })
    }

    /// Address the socket is actually bound to (useful with port 0).
    pub fn local_addr(&self) -> crate::Result<SocketAddr> {
        let addr = self.socket.local_addr().map_err(|source| RelayError::Bind {
            address: "relay socket".to_string(),
            source,
        })?;
        Ok(addr)
    }

    /// Process one datagram payload and return the timestamp it was stored
    /// under.
    ///
    /// The entry under that timestamp is replaced if present. Every other
    /// entry is written back exactly as it was loaded.
    pub async fn handle_datagram(&self, payload: &[u8]) -> Result<String, RelayError> {
        let entry = Message::from_datagram(payload)?.to_entry()?;
        let timestamp = self.clock.now_timestamp();

        let mut entries = self.store.load().await.map_err(RelayError::StoreRead)?;
        if entries.insert(timestamp.clone(), entry).is_some() {
            tracing::debug!("Overwrote existing store entry at {timestamp}");
        }
        self.store
            .save(&entries)
            .await
            .map_err(RelayError::StoreWrite)?;

        Ok(timestamp)
    }

    /// Receive datagrams forever.
    ///
    /// Malformed payloads and unreadable stores drop the datagram and are
    /// logged. A failed receive or store write ends the loop with an error.
    pub async fn run(self) -> crate::Result<()> {
        match self.socket.local_addr() {
            Ok(addr) => tracing::info!("Relay listening on udp://{addr}"),
            Err(e) => tracing::warn!("Relay listening on unknown address: {e}"),
        }

        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        loop {
            let (len, peer) = self
                .socket
                .recv_from(&mut buf)
                .await
                .map_err(|source| RelayError::Receive { source })?;
            tracing::debug!("Received {len} bytes from {peer}");

            match self.handle_datagram(&buf[..len]).await {
                Ok(timestamp) => tracing::info!("Message saved at {timestamp}"),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Dropped datagram from {peer}: {e}");
                }
                Err(e) => {
                    tracing::error!("Relay stopping: {e}");
                    return Err(e.into());
                }
            }
        }
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("socket", &self.socket)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
