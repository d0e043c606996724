//! JSON codec using `serde_json`.
//!
//! Structured values cross the boundary as UTF-8 JSON text inside an
//! ordinary header-bearing wire buffer. The codec is pure composition:
//! serialize to a string, then [`WireBuffer::from_text`]; read a
//! string, then deserialize.
//!
//! # Example
//!
//! ```
//! use serde::{Serialize, Deserialize};
//! use wirebuf::codec::JsonCodec;
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Message {
//!     id: u32,
//!     content: String,
//! }
//!
//! let msg = Message { id: 42, content: "hello".to_string() };
//! let buf = JsonCodec::encode(&msg).unwrap();
//! let decoded: Message = JsonCodec::decode(&buf).unwrap();
//! assert_eq!(decoded, msg);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::protocol::{WireBuffer, WireBufferView};

/// JSON codec for structured data.
///
/// Serialization failures and malformed JSON both surface as
/// [`WirebufError::Json`](crate::WirebufError::Json); nothing is
/// retried.
pub struct JsonCodec;

impl JsonCodec {
    /// Serialize a value to JSON in a freshly allocated wire buffer.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized.
    pub fn encode<T: Serialize>(value: &T) -> Result<WireBuffer> {
        let text = serde_json::to_string(value)?;
        Ok(WireBuffer::from_text(Some(&text)))
    }

    /// Deserialize a JSON wire buffer into a value.
    ///
    /// Follows a spill file if the buffer is in overflow mode.
    ///
    /// # Errors
    ///
    /// Returns error if the payload is not valid UTF-8 or not valid
    /// JSON for type `T`.
    pub fn decode<T: DeserializeOwned>(buf: &WireBuffer) -> Result<T> {
        let text = buf.read_string()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Deserialize from a borrowed view over a foreign buffer.
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode).
    pub fn decode_view<T: DeserializeOwned>(view: &WireBufferView<'_>) -> Result<T> {
        let text = view.read_string()?;
        Ok(serde_json::from_str(&text)?)
    }
}
