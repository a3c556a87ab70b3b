//! Fire-and-forget sender used by the front-end.

use std::net::SocketAddr;

use tokio::net::UdpSocket;

use super::RelayError;
use crate::Message;

/// Sends each message as one datagram to the relay.
///
/// Delivery is never confirmed: the relay does not answer, and a datagram
/// lost on the way is simply gone.
#[derive(Debug)]
pub struct RelaySender {
    socket: UdpSocket,
    relay_addr: SocketAddr,
}

impl RelaySender {
    /// Bind an ephemeral local socket for talking to `relay_addr`.
    pub async fn bind(relay_addr: SocketAddr) -> crate::Result<Self> {
        let local: SocketAddr = if relay_addr.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|source| RelayError::Bind {
                address: local.to_string(),
                source,
            })?;
        Ok(Self { socket, relay_addr })
    }

    pub fn relay_addr(&self) -> SocketAddr {
        self.relay_addr
    }

    /// Send `message` to the relay. Returns the number of bytes sent.
    pub async fn send(&self, message: &Message) -> crate::Result<usize> {
        let payload = message.to_datagram()?;
        let sent = self
            .socket
            .send_to(&payload, self.relay_addr)
            .await
            .map_err(|source| RelayError::Send {
                address: self.relay_addr.to_string(),
                source,
            })?;
        Ok(sent)
    }
}
