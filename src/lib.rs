//! # wirebuf
//!
//! Cross-language wire-buffer protocol for marshaling values across a
//! foreign-function boundary between a Rust host and a natively
//! compiled shared library.
//!
//! ## Architecture
//!
//! - **Buffer Codec** ([`protocol`]): allocates, writes, and reads wire
//!   buffers — an 8-byte little-endian header (signed length + reserved
//!   field) followed by a payload region of at least 1024 bytes.
//! - **Overflow Handler** ([`overflow`]): resolves the negative-length
//!   sentinel, where the payload holds a spill-file path instead of the
//!   value. Spill files are read once, then deleted.
//! - **Value Codecs** ([`codec`]): JSON for structured data, a
//!   headerless 8-byte encoding for int64 scalars.
//! - **Loader** ([`loader`]): resolves the platform-specific shared
//!   library file and binds its exported symbols.
//!
//! The header-first, length-prefixed layout lets either side validate
//! buffer contents with no shared schema beyond the wire format itself;
//! the sign of the length field is the zero-cost escape valve for
//! values too large to copy inline.
//!
//! ## Example
//!
//! ```
//! use wirebuf::{JsonCodec, WireBuffer};
//!
//! // A request value marshaled for the native side.
//! let request = WireBuffer::from_text(Some("select * from t"));
//! assert_eq!(request.header().length, 15);
//!
//! // A structured payload via the JSON codec.
//! let buf = JsonCodec::encode(&serde_json::json!({"limit": 10})).unwrap();
//! let round: serde_json::Value = JsonCodec::decode(&buf).unwrap();
//! assert_eq!(round["limit"], 10);
//! ```
//!
//! ## Concurrency
//!
//! All operations are synchronous and touch no shared state beyond the
//! buffer passed in. Distinct threads may operate on distinct buffers
//! freely; two threads sharing one buffer is the caller's problem.

pub mod codec;
pub mod error;
pub mod loader;
pub mod overflow;
pub mod protocol;

pub use codec::{JsonCodec, ScalarCodec};
pub use error::{Result, WirebufError};
pub use protocol::{Contents, WireBuffer, WireBufferView};
