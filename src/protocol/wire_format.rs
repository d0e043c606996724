//! Wire format encoding and decoding.
//!
//! Implements the 8-byte header format:
//! ```text
//! ┌─────────────┬─────────────┬──────────────────────────────┐
//! │ Length      │ Reserved    │ Payload                      │
//! │ 4 bytes     │ 4 bytes     │ max(requested, MIN_PAYLOAD)  │
//! │ int32 LE    │ int32 LE    │ bytes                        │
//! └─────────────┴─────────────┴──────────────────────────────┘
//! ```
//!
//! All multi-byte integers are Little Endian, signed. The header width
//! is fixed at 8 bytes on every platform.
//!
//! The length field is dual-mode: a non-negative value is the payload
//! length in bytes; a negative value means the payload holds a UTF-8
//! path to a spill file containing the real data, and the absolute
//! value is the length of that path. The sign is interpreted in exactly
//! one place ([`Header::mode`]) so callers never branch on it directly.

/// Header size in bytes (fixed, exactly 8).
pub const HEADER_SIZE: usize = 8;

/// Default floor on allocated payload capacity, in bytes.
///
/// Every buffer's payload region is at least this large regardless of
/// the requested length, so a native callee handed a bare pointer can
/// rely on a safe minimum write length from the protocol contract
/// rather than from the buffer itself.
pub const MIN_PAYLOAD: usize = 1024;

/// Width of the dedicated headerless int64 scalar encoding.
pub const INT64_SIZE: usize = 8;

/// How a header's length field says the payload should be read.
///
/// This is the decoded form of the sign bit: `Inline` carries the
/// payload length, `Spilled` carries the length of the UTF-8 file path
/// stored in the payload region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMode {
    /// Payload region holds the value itself, `len` bytes of it.
    Inline(usize),
    /// Payload region holds a `path_len`-byte UTF-8 spill-file path.
    Spilled(usize),
}

/// Decoded header from wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Signed length field (negative means overflow mode).
    pub length: i32,
}

impl Header {
    /// Create a header for an inline payload of `length` bytes.
    pub fn new(length: i32) -> Self {
        Self { length }
    }

    /// Encode header to bytes (Little Endian, reserved field zeroed).
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::protocol::Header;
    ///
    /// let bytes = Header::new(5).encode();
    /// assert_eq!(bytes, [5, 0, 0, 0, 0, 0, 0, 0]);
    /// ```
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if buffer is smaller than `HEADER_SIZE` (8 bytes).
    pub fn encode_into(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= HEADER_SIZE);
        buf[0..4].copy_from_slice(&self.length.to_le_bytes());
        buf[4..8].copy_from_slice(&0i32.to_le_bytes());
    }

    /// Decode header from bytes (Little Endian).
    ///
    /// Returns `None` if buffer is too short. The reserved field is
    /// ignored: a writer must zero it, a reader must tolerate anything.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::protocol::Header;
    ///
    /// let bytes = [7, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
    /// let header = Header::decode(&bytes).unwrap();
    /// assert_eq!(header.length, 7);
    /// ```
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            length: i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
        })
    }

    /// Interpret the sign of the length field.
    ///
    /// This is the single authoritative place the dual-mode encoding is
    /// resolved into a tagged variant.
    pub fn mode(&self) -> LengthMode {
        if self.length < 0 {
            LengthMode::Spilled(self.length.unsigned_abs() as usize)
        } else {
            LengthMode::Inline(self.length as usize)
        }
    }

    /// Check if this header signals overflow mode.
    #[inline]
    pub fn is_spilled(&self) -> bool {
        self.length < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode_decode_roundtrip() {
        let original = Header::new(100);
        let encoded = original.encode();
        let decoded = Header::decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_header_little_endian_byte_order() {
        let header = Header::new(0x0102_0304);
        let bytes = header.encode();

        // Length: 0x01020304 in LE
        assert_eq!(bytes[0], 0x04);
        assert_eq!(bytes[1], 0x03);
        assert_eq!(bytes[2], 0x02);
        assert_eq!(bytes[3], 0x01);

        // Reserved: always zero on write
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_header_size_is_exactly_8() {
        assert_eq!(HEADER_SIZE, 8);
        let header = Header::new(0);
        assert_eq!(header.encode().len(), 8);
    }

    #[test]
    fn test_negative_length_survives_roundtrip() {
        let header = Header::new(-42);
        let decoded = Header::decode(&header.encode()).unwrap();
        assert_eq!(decoded.length, -42);
        assert!(decoded.is_spilled());
    }

    #[test]
    fn test_decode_too_short_buffer() {
        let buf = [0u8; 7]; // One byte short
        assert!(Header::decode(&buf).is_none());
    }

    #[test]
    fn test_decode_ignores_reserved_field() {
        let mut bytes = Header::new(12).encode();
        bytes[4..8].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let header = Header::decode(&bytes).unwrap();
        assert_eq!(header.length, 12);
    }

    #[test]
    fn test_mode_inline() {
        assert_eq!(Header::new(0).mode(), LengthMode::Inline(0));
        assert_eq!(Header::new(500).mode(), LengthMode::Inline(500));
    }

    #[test]
    fn test_mode_spilled() {
        assert_eq!(Header::new(-5).mode(), LengthMode::Spilled(5));
        assert_eq!(
            Header::new(i32::MIN).mode(),
            LengthMode::Spilled(i32::MIN.unsigned_abs() as usize)
        );
    }
}
