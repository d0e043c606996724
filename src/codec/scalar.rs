//! Fixed-width scalar codec.
//!
//! Integers cross the boundary as a bare 8-byte little-endian signed
//! encoding with no header. The size is always known by both sides, so
//! the self-describing header of the string/bytes buffers would carry
//! no information.
//!
//! # Example
//!
//! ```
//! use wirebuf::codec::ScalarCodec;
//!
//! let raw = ScalarCodec::encode_i64(i64::MIN);
//! assert_eq!(raw.len(), 8);
//! assert_eq!(ScalarCodec::decode_i64(&raw).unwrap(), i64::MIN);
//! ```

use crate::error::{Result, WirebufError};
use crate::protocol::INT64_SIZE;

/// Headerless codec for fixed-width integers.
pub struct ScalarCodec;

impl ScalarCodec {
    /// Encode a signed 64-bit integer (little-endian, exactly 8 bytes).
    #[inline]
    pub fn encode_i64(value: i64) -> [u8; INT64_SIZE] {
        value.to_le_bytes()
    }

    /// Decode a signed 64-bit integer from the first 8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::Truncated`] if fewer than 8 bytes are
    /// present.
    #[inline]
    pub fn decode_i64(buf: &[u8]) -> Result<i64> {
        if buf.len() < INT64_SIZE {
            return Err(WirebufError::Truncated {
                expected: INT64_SIZE,
                got: buf.len(),
            });
        }
        let mut raw = [0u8; INT64_SIZE];
        raw.copy_from_slice(&buf[..INT64_SIZE]);
        Ok(i64::from_le_bytes(raw))
    }
}
