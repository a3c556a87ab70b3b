//!
//! Postbox: a small static site with a message form whose submissions are
//! relayed over UDP and appended to a JSON file.
//!
//! ## Components
//!
//! * **Front-end (`frontend`)**: an axum router serving the home, message
//!   and error pages plus `/static/` assets. `POST /message` packs the form
//!   into a [`Message`] and fires it at the relay as a single datagram.
//! * **Relay (`relay::Relay`)**: a UDP listener that decodes each datagram,
//!   stamps it with the receipt time and merges it into the store.
//! * **Store (`store::MessageStore`)**: a JSON object keyed by timestamp,
//!   rewritten in full on every message. The relay is its only writer.
//!
//! The two sides share nothing but the wire format. UDP gives no delivery
//! guarantee and the relay never acknowledges, so the front-end cannot tell
//! whether a message was stored.

pub mod clock;
pub mod config;
pub mod frontend;
pub mod message;
pub mod relay;
pub mod store;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use config::Config;
pub use message::Message;

/// Result type returned by the public Postbox API.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Postbox library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structured message codec errors from the message module
    #[error(transparent)]
    Message(message::MessageError),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured relay errors from the relay module
    #[error(transparent)]
    Relay(relay::RelayError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Message(_) => "message",
            Error::Store(_) => "store",
            Error::Relay(_) => "relay",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Error::Store(store_err) => store_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Store(store_err) => store_err.is_io_error(),
            Error::Relay(relay_err) => relay_err.is_network_error(),
            _ => false,
        }
    }

    /// Check if this error comes from a malformed message payload.
    pub fn is_decode_error(&self) -> bool {
        match self {
            Error::Message(msg_err) => msg_err.is_decode_error(),
            Error::Relay(relay_err) => relay_err.is_decode_error(),
            _ => false,
        }
    }

    /// Check if this error is store-related.
    pub fn is_store_error(&self) -> bool {
        match self {
            Error::Store(_) => true,
            Error::Relay(relay_err) => relay_err.is_store_error(),
            _ => false,
        }
    }
}
