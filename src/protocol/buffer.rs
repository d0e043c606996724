//! Wire buffer allocation, writing, and reading.
//!
//! A [`WireBuffer`] is the unit of exchange across the foreign-function
//! boundary: an 8-byte header followed by a payload region of at least
//! [`MIN_PAYLOAD`] bytes. The buffer is created by [`WireBuffer::allocate`],
//! written by exactly one `write_*` call that establishes the final
//! length field, and read any number of times.
//!
//! Reading resolves the dual-mode length field through the
//! [`Contents`] variant: `Inline` borrows the payload directly,
//! `Spilled` names the temporary file holding the real value. The
//! convenience readers `read_bytes`/`read_string` follow the spill
//! transparently — note that doing so consumes the spill file, so a
//! spilled buffer must be read at most once.
//!
//! # Example
//!
//! ```
//! use wirebuf::WireBuffer;
//!
//! let mut buf = WireBuffer::allocate(5);
//! buf.write_bytes(b"hello").unwrap();
//! assert_eq!(&buf.read_bytes().unwrap()[..], b"hello");
//! ```

use std::path::Path;

use bytes::Bytes;

use super::wire_format::{Header, LengthMode, HEADER_SIZE, MIN_PAYLOAD};
use crate::error::{Result, WirebufError};
use crate::overflow;

/// Decoded view of what a buffer's payload region holds.
///
/// The sign of the header length field is resolved into this variant in
/// one place; calling code never inspects the sign itself.
#[derive(Debug, PartialEq, Eq)]
pub enum Contents<'a> {
    /// Payload region holds the value itself.
    Inline(&'a [u8]),
    /// Payload region holds the path of a spill file with the value.
    ///
    /// The file is single-use: reading it deletes it.
    Spilled(&'a Path),
}

/// An owned wire buffer: 8-byte header plus payload region.
///
/// Total allocation is always `HEADER_SIZE + max(requested, floor)`
/// where the floor defaults to [`MIN_PAYLOAD`]. The floor lets a native
/// callee that received only a pointer rely on a minimum writable
/// capacity from the protocol contract.
#[derive(Debug, Clone)]
pub struct WireBuffer {
    data: Vec<u8>,
}

impl WireBuffer {
    /// Allocate a buffer for a payload of `requested_len` bytes.
    ///
    /// The header is initialized with `length = requested_len` and a
    /// zeroed reserved field; the payload region is zero-filled and at
    /// least [`MIN_PAYLOAD`] bytes. Allocation only fails on memory
    /// exhaustion, which is fatal.
    ///
    /// # Panics
    ///
    /// Panics if `requested_len` exceeds `i32::MAX`, which cannot be
    /// represented in the wire header.
    pub fn allocate(requested_len: usize) -> Self {
        Self::allocate_with_floor(requested_len, MIN_PAYLOAD)
    }

    /// Allocate with a custom payload-capacity floor.
    ///
    /// [`allocate`](Self::allocate) uses the documented default of
    /// [`MIN_PAYLOAD`]; this variant exists for callers that negotiate
    /// a different floor with their native side.
    ///
    /// # Panics
    ///
    /// Panics if the resulting capacity exceeds `i32::MAX`.
    pub fn allocate_with_floor(requested_len: usize, floor: usize) -> Self {
        let capacity = requested_len.max(floor);
        assert!(
            capacity <= i32::MAX as usize,
            "payload capacity {capacity} exceeds wire format maximum"
        );
        let mut data = vec![0u8; HEADER_SIZE + capacity];
        Header::new(requested_len as i32).encode_into(&mut data);
        Self { data }
    }

    /// Copy a byte payload into a freshly allocated buffer.
    ///
    /// `None` is treated identically to an empty payload: the result is
    /// `allocate(0)` with `length == 0`. The protocol does not
    /// distinguish absent from empty.
    pub fn from_payload(payload: Option<&[u8]>) -> Self {
        match payload {
            None => Self::allocate(0),
            Some(payload) => {
                let mut buf = Self::allocate(payload.len());
                buf.set_payload(payload);
                buf
            }
        }
    }

    /// UTF-8 encode a string into a freshly allocated buffer.
    ///
    /// `None` and the empty string both yield an empty buffer with
    /// `length == 0`, same as [`from_payload`](Self::from_payload).
    pub fn from_text(text: Option<&str>) -> Self {
        match text {
            None => Self::allocate(0),
            Some(text) => Self::from_payload(Some(text.as_bytes())),
        }
    }

    /// Write a byte payload, establishing the final length field.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::CapacityExceeded`] if the payload does
    /// not fit the allocated capacity. The buffer, header included, is
    /// left untouched in that case; the payload is never truncated.
    pub fn write_bytes(&mut self, payload: &[u8]) -> Result<()> {
        let capacity = self.capacity();
        if payload.len() > capacity {
            return Err(WirebufError::CapacityExceeded {
                len: payload.len(),
                capacity,
            });
        }
        self.set_payload(payload);
        Ok(())
    }

    /// UTF-8 encode a string and write it as the payload.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::CapacityExceeded`] if the encoded text
    /// does not fit the allocated capacity.
    pub fn write_string(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Header + payload copy, caller has pre-checked capacity.
    fn set_payload(&mut self, payload: &[u8]) {
        debug_assert!(payload.len() <= self.capacity());
        Header::new(payload.len() as i32).encode_into(&mut self.data);
        self.data[HEADER_SIZE..HEADER_SIZE + payload.len()].copy_from_slice(payload);
    }

    /// Decode the header.
    pub fn header(&self) -> Header {
        // Allocation always includes a full header.
        Header::decode(&self.data).expect("allocation includes full header")
    }

    /// Resolve the dual-mode length field without touching the spill file.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::Truncated`] if the header claims more
    /// bytes than the buffer holds, or [`WirebufError::Encoding`] if a
    /// spill path is not valid UTF-8.
    pub fn contents(&self) -> Result<Contents<'_>> {
        contents_of(&self.data)
    }

    /// Read the payload, following a spill file if present.
    ///
    /// A spilled buffer is consumed by this call (the spill file is
    /// deleted after reading); do not read it twice.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::OverflowRead`] if the spill file cannot
    /// be opened or read.
    pub fn read_bytes(&self) -> Result<Bytes> {
        read_bytes_of(&self.data)
    }

    /// Read the payload as UTF-8 text, following a spill file if present.
    ///
    /// # Errors
    ///
    /// As [`read_bytes`](Self::read_bytes), plus
    /// [`WirebufError::Encoding`] if the payload is not valid UTF-8.
    pub fn read_string(&self) -> Result<String> {
        read_string_of(&self.data)
    }

    /// Allocated payload capacity in bytes (excludes the header).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len() - HEADER_SIZE
    }

    /// Total buffer length in bytes, header included.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    /// The whole buffer, header included.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Raw pointer for handing the buffer to a native callee that only
    /// reads it.
    ///
    /// The callee must not retain the pointer beyond the call; the
    /// buffer stays owned by this side.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// Raw pointer for handing the buffer to a native callee that
    /// writes into it.
    ///
    /// The capacity contract is implicit at the boundary: the callee
    /// may write up to [`capacity`](Self::capacity) payload bytes and
    /// must set the header length field to the used length. Validate
    /// the result defensively with [`read_bytes`](Self::read_bytes),
    /// which rejects headers claiming more than the buffer holds.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data.as_mut_ptr()
    }
}

/// Borrowed read-only view over a wire buffer owned elsewhere.
///
/// Used to read an output buffer produced by the native side without
/// copying it into a [`WireBuffer`] first.
#[derive(Debug, Clone, Copy)]
pub struct WireBufferView<'a> {
    data: &'a [u8],
}

impl<'a> WireBufferView<'a> {
    /// View over an in-memory byte region.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// View over a foreign buffer given as pointer plus total length.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `total_len` bytes for the
    /// lifetime `'a`, and the memory must not be mutated while the view
    /// exists. This is the trust boundary with the native side: the
    /// pointer and length come from the per-function capacity contract,
    /// not from anything this crate can check.
    pub unsafe fn from_raw(ptr: *const u8, total_len: usize) -> Self {
        Self {
            data: std::slice::from_raw_parts(ptr, total_len),
        }
    }

    /// Decode the header.
    ///
    /// # Errors
    ///
    /// Returns [`WirebufError::Truncated`] if the view is shorter than
    /// the 8-byte header.
    pub fn header(&self) -> Result<Header> {
        Header::decode(self.data).ok_or(WirebufError::Truncated {
            expected: HEADER_SIZE,
            got: self.data.len(),
        })
    }

    /// Resolve the dual-mode length field without touching the spill file.
    pub fn contents(&self) -> Result<Contents<'a>> {
        contents_of(self.data)
    }

    /// Read the payload, following a spill file if present.
    ///
    /// Consumes the spill file, exactly like [`WireBuffer::read_bytes`].
    pub fn read_bytes(&self) -> Result<Bytes> {
        read_bytes_of(self.data)
    }

    /// Read the payload as UTF-8 text, following a spill file if present.
    pub fn read_string(&self) -> Result<String> {
        read_string_of(self.data)
    }
}

fn contents_of(data: &[u8]) -> Result<Contents<'_>> {
    let header = Header::decode(data).ok_or(WirebufError::Truncated {
        expected: HEADER_SIZE,
        got: data.len(),
    })?;
    match header.mode() {
        LengthMode::Inline(len) => {
            let end = HEADER_SIZE + len;
            if data.len() < end {
                return Err(WirebufError::Truncated {
                    expected: end,
                    got: data.len(),
                });
            }
            Ok(Contents::Inline(&data[HEADER_SIZE..end]))
        }
        LengthMode::Spilled(path_len) => {
            let end = HEADER_SIZE + path_len;
            if data.len() < end {
                return Err(WirebufError::Truncated {
                    expected: end,
                    got: data.len(),
                });
            }
            let path = std::str::from_utf8(&data[HEADER_SIZE..end])?;
            Ok(Contents::Spilled(Path::new(path)))
        }
    }
}

fn read_bytes_of(data: &[u8]) -> Result<Bytes> {
    match contents_of(data)? {
        Contents::Inline(payload) => Ok(Bytes::copy_from_slice(payload)),
        Contents::Spilled(path) => Ok(Bytes::from(overflow::read_spill(path)?)),
    }
}

fn read_string_of(data: &[u8]) -> Result<String> {
    let bytes = read_bytes_of(data)?;
    let text = std::str::from_utf8(&bytes)?;
    Ok(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_allocation_is_enforced() {
        let buf = WireBuffer::allocate(3);
        assert_eq!(buf.total_len(), HEADER_SIZE + MIN_PAYLOAD);
        assert_eq!(buf.capacity(), MIN_PAYLOAD);
        assert_eq!(buf.header().length, 3);
    }

    #[test]
    fn test_can_allocate_beyond_minimum() {
        let buf = WireBuffer::allocate(6000);
        assert_eq!(buf.total_len(), HEADER_SIZE + 6000);
        assert_eq!(buf.header().length, 6000);
    }

    #[test]
    fn test_allocate_at_exact_floor_boundary() {
        let at_floor = WireBuffer::allocate(MIN_PAYLOAD);
        assert_eq!(at_floor.total_len(), HEADER_SIZE + MIN_PAYLOAD);

        let one_past = WireBuffer::allocate(MIN_PAYLOAD + 1);
        assert_eq!(one_past.total_len(), HEADER_SIZE + MIN_PAYLOAD + 1);
    }

    #[test]
    fn test_allocate_with_custom_floor() {
        let buf = WireBuffer::allocate_with_floor(3, 16);
        assert_eq!(buf.total_len(), HEADER_SIZE + 16);
        assert_eq!(buf.header().length, 3);
    }

    #[test]
    fn test_reserved_field_zero_after_allocate_and_write() {
        let mut buf = WireBuffer::allocate(4);
        assert_eq!(&buf.as_slice()[4..8], &[0, 0, 0, 0]);

        buf.write_bytes(b"data").unwrap();
        assert_eq!(&buf.as_slice()[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_write_read_bytes_roundtrip() {
        let mut buf = WireBuffer::allocate(5);
        buf.write_bytes(b"hello").unwrap();

        assert_eq!(buf.header().length, 5);
        assert_eq!(&buf.read_bytes().unwrap()[..], b"hello");
    }

    #[test]
    fn test_write_read_string_roundtrip() {
        let mut buf = WireBuffer::allocate(16);
        buf.write_string("grüße").unwrap();
        assert_eq!(buf.read_string().unwrap(), "grüße");
    }

    #[test]
    fn test_zero_length_payload() {
        let mut buf = WireBuffer::allocate(0);
        buf.write_bytes(b"").unwrap();

        assert_eq!(buf.header().length, 0);
        assert!(buf.read_bytes().unwrap().is_empty());
    }

    #[test]
    fn test_from_payload_none_equals_empty() {
        let absent = WireBuffer::from_payload(None);
        let empty = WireBuffer::from_payload(Some(b""));

        assert_eq!(absent.header().length, 0);
        assert_eq!(empty.header().length, 0);
        assert_eq!(absent.total_len(), HEADER_SIZE + MIN_PAYLOAD);
        assert_eq!(absent.total_len(), empty.total_len());
    }

    #[test]
    fn test_from_text_none_and_empty_indistinguishable() {
        let absent = WireBuffer::from_text(None);
        let empty = WireBuffer::from_text(Some(""));

        assert_eq!(absent.as_slice(), empty.as_slice());
        assert_eq!(absent.header().length, 0);
    }

    #[test]
    fn test_from_text_copies_full_payload() {
        let buf = WireBuffer::from_text(Some("foobar"));
        assert_eq!(buf.header().length, 6);
        assert_eq!(buf.read_string().unwrap(), "foobar");
    }

    #[test]
    fn test_capacity_exceeded_leaves_header_unmodified() {
        let mut buf = WireBuffer::allocate(4);
        buf.write_bytes(b"snap").unwrap();

        let before = buf.as_slice().to_vec();
        let oversized = vec![0xAB; MIN_PAYLOAD + 1];
        let err = buf.write_bytes(&oversized).unwrap_err();

        assert!(matches!(
            err,
            WirebufError::CapacityExceeded { len, capacity }
                if len == MIN_PAYLOAD + 1 && capacity == MIN_PAYLOAD
        ));
        assert_eq!(buf.as_slice(), &before[..]);
    }

    #[test]
    fn test_write_up_to_capacity_succeeds() {
        let mut buf = WireBuffer::allocate(0);
        let exact = vec![0xCD; MIN_PAYLOAD];
        buf.write_bytes(&exact).unwrap();
        assert_eq!(&buf.read_bytes().unwrap()[..], &exact[..]);
    }

    #[test]
    fn test_contents_inline_borrows_payload() {
        let mut buf = WireBuffer::allocate(3);
        buf.write_bytes(b"abc").unwrap();

        match buf.contents().unwrap() {
            Contents::Inline(payload) => assert_eq!(payload, b"abc"),
            Contents::Spilled(_) => panic!("inline buffer decoded as spilled"),
        }
    }

    #[test]
    fn test_contents_spilled_exposes_path() {
        let mut buf = WireBuffer::allocate(16);
        buf.write_bytes(b"/tmp/spill-1").unwrap();
        // Flip the header to overflow mode by hand.
        let mut raw = buf.as_slice().to_vec();
        raw[0..4].copy_from_slice(&(-12i32).to_le_bytes());

        let view = WireBufferView::new(&raw);
        match view.contents().unwrap() {
            Contents::Spilled(path) => assert_eq!(path, Path::new("/tmp/spill-1")),
            Contents::Inline(_) => panic!("spilled buffer decoded as inline"),
        }
    }

    #[test]
    fn test_read_string_invalid_utf8() {
        let mut buf = WireBuffer::allocate(2);
        buf.write_bytes(&[0xFF, 0xFE]).unwrap();

        let err = buf.read_string().unwrap_err();
        assert!(matches!(err, WirebufError::Encoding(_)));
    }

    #[test]
    fn test_view_header_too_short() {
        let view = WireBufferView::new(&[0u8; 4]);
        let err = view.header().unwrap_err();
        assert!(matches!(
            err,
            WirebufError::Truncated { expected: HEADER_SIZE, got: 4 }
        ));
    }

    #[test]
    fn test_view_rejects_length_beyond_buffer() {
        // Header claims 100 payload bytes, buffer only holds 8 + 4.
        let mut raw = vec![0u8; HEADER_SIZE + 4];
        raw[0..4].copy_from_slice(&100i32.to_le_bytes());

        let view = WireBufferView::new(&raw);
        let err = view.read_bytes().unwrap_err();
        assert!(matches!(err, WirebufError::Truncated { .. }));
    }

    #[test]
    fn test_view_reads_native_written_buffer() {
        // Simulate a callee writing into a buffer it did not allocate:
        // payload shorter than the requested length, header updated.
        let mut buf = WireBuffer::allocate(64);
        let ptr = buf.as_mut_ptr();
        let written = b"callee output";
        unsafe {
            std::ptr::copy_nonoverlapping(written.as_ptr(), ptr.add(HEADER_SIZE), written.len());
            let header = Header::new(written.len() as i32).encode();
            std::ptr::copy_nonoverlapping(header.as_ptr(), ptr, HEADER_SIZE);
        }

        let view = unsafe { WireBufferView::from_raw(buf.as_ptr(), buf.total_len()) };
        assert_eq!(view.read_string().unwrap(), "callee output");
    }
}
