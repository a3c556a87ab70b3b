//! The `{username, message}` pair submitted through the form and relayed
//! over UDP.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A message submitted through the front-end.
///
/// Missing fields decode to empty strings, matching how the form fills in
/// absent inputs. Any other fields a datagram carries ride along in `extra`
/// and are stored as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Errors produced while decoding or encoding a [`Message`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MessageError {
    /// Datagram payload was not valid UTF-8.
    #[error("Datagram is not valid UTF-8: {source}")]
    InvalidUtf8 {
        #[source]
        source: std::str::Utf8Error,
    },

    /// Datagram payload was not a JSON message object.
    #[error("Datagram is not a JSON message: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    /// Datagram held valid JSON that is not an object.
    #[error("Datagram JSON is not an object")]
    NotAnObject,

    /// Message could not be serialized.
    #[error("Failed to encode message: {source}")]
    EncodeFailed {
        #[source]
        source: serde_json::Error,
    },
}

impl MessageError {
    /// Check if the payload could not be decoded.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            MessageError::InvalidUtf8 { .. }
                | MessageError::InvalidJson { .. }
                | MessageError::NotAnObject
        )
    }
}

impl From<MessageError> for crate::Error {
    fn from(err: MessageError) -> Self {
        crate::Error::Message(err)
    }
}

impl Message {
    pub fn new(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Decode a UDP payload: strict UTF-8, then a JSON object.
    pub fn from_datagram(payload: &[u8]) -> Result<Self, MessageError> {
        let text =
            std::str::from_utf8(payload).map_err(|source| MessageError::InvalidUtf8 { source })?;
        let value: Value =
            serde_json::from_str(text).map_err(|source| MessageError::InvalidJson { source })?;
        if !value.is_object() {
            return Err(MessageError::NotAnObject);
        }
        serde_json::from_value(value).map_err(|source| MessageError::InvalidJson { source })
    }

    /// Encode as the UDP wire payload.
    pub fn to_datagram(&self) -> Result<Vec<u8>, MessageError> {
        serde_json::to_vec(self).map_err(|source| MessageError::EncodeFailed { source })
    }

    /// Encode as a store entry.
    pub fn to_entry(&self) -> Result<Value, MessageError> {
        serde_json::to_value(self).map_err(|source| MessageError::EncodeFailed { source })
    }

    /// Extract the message from an `application/x-www-form-urlencoded` body.
    ///
    /// The first occurrence of a field wins. Empty values count as absent.
    pub fn from_form(body: &[u8]) -> Self {
        let mut username = None;
        let mut message = None;
        for (key, value) in url::form_urlencoded::parse(body) {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "username" => &mut username,
                "message" => &mut message,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        Self::new(username.unwrap_or_default(), message.unwrap_or_default())
    }
}
