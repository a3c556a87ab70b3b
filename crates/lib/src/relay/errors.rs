//! Error types for the UDP relay.

use thiserror::Error;

use crate::message::MessageError;
use crate::store::StoreError;

/// Errors raised by the relay listener and the datagram sender.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RelayError {
    /// Binding a UDP socket failed.
    #[error("Failed to bind UDP socket to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Receiving from the relay socket failed.
    #[error("Failed to receive datagram: {source}")]
    Receive {
        #[source]
        source: std::io::Error,
    },

    /// Sending a datagram to the relay failed.
    #[error("Failed to send datagram to {address}: {source}")]
    Send {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The message could not be decoded from, or encoded into, a datagram.
    #[error(transparent)]
    Message(#[from] MessageError),

    /// Loading the current store contents failed.
    #[error("Failed to load store: {0}")]
    StoreRead(#[source] StoreError),

    /// Writing the updated store failed.
    #[error("Failed to write store: {0}")]
    StoreWrite(#[source] StoreError),
}

impl RelayError {
    /// Check if this error only affects the current datagram.
    ///
    /// Decode and store read failures drop the datagram and the relay keeps
    /// listening. Anything else stops the relay loop.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RelayError::Message(_) | RelayError::StoreRead(_))
    }

    /// Check if the datagram payload was malformed.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, RelayError::Message(e) if e.is_decode_error())
    }

    /// Check if this error came from the store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, RelayError::StoreRead(_) | RelayError::StoreWrite(_))
    }

    /// Check if this error is a socket failure.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            RelayError::Bind { .. } | RelayError::Receive { .. } | RelayError::Send { .. }
        )
    }
}

impl From<RelayError> for crate::Error {
    fn from(err: RelayError) -> Self {
        crate::Error::Relay(err)
    }
}
