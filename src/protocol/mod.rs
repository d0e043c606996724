//! Wire buffer protocol: header layout and buffer operations.
//!
//! [`Header`] is the bit-exact 8-byte header encoding; [`WireBuffer`]
//! and [`WireBufferView`] are the owned and borrowed forms of the
//! header-plus-payload unit exchanged across the boundary.

mod buffer;
mod wire_format;

pub use buffer::{Contents, WireBuffer, WireBufferView};
pub use wire_format::{Header, LengthMode, HEADER_SIZE, INT64_SIZE, MIN_PAYLOAD};
