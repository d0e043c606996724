//! Codec module - typed value encodings over wire buffers.
//!
//! Two codecs sit on top of the buffer protocol:
//!
//! - [`JsonCodec`] - structured values as UTF-8 JSON text in a
//!   header-bearing buffer (pure composition of `serde_json` with the
//!   buffer's string operations)
//! - [`ScalarCodec`] - fixed-width integers as a dedicated headerless
//!   8-byte encoding, since both sides always know the size
//!
//! # Design
//!
//! Codecs are implemented as marker structs with static methods rather
//! than trait objects. This keeps codec selection a compile-time
//! decision and the call sites free of dynamic dispatch.
//!
//! # Example
//!
//! ```
//! use wirebuf::codec::{JsonCodec, ScalarCodec};
//!
//! let buf = JsonCodec::encode(&vec![1, 2, 3]).unwrap();
//! let decoded: Vec<i32> = JsonCodec::decode(&buf).unwrap();
//! assert_eq!(decoded, vec![1, 2, 3]);
//!
//! let raw = ScalarCodec::encode_i64(-7);
//! assert_eq!(ScalarCodec::decode_i64(&raw).unwrap(), -7);
//! ```

mod json;
mod scalar;

pub use json::JsonCodec;
pub use scalar::ScalarCodec;
