//! Payload serializer seam.
//!
//! The framing layer never inspects payload bytes. It relies on a
//! [`PayloadCodec`] for three things: the exact encoded size of a record, a
//! deterministic encode into a caller-supplied region of exactly that size, and
//! the inverse decode. Any structured-data library that honours those
//! contracts can be plugged into [`crate::RecordCodec`].

mod protobuf;

pub use protobuf::{ProtobufError, ProtobufPayload, TimeMessage, XstatMessage};

use metadata::Xstat;

/// Serializer for the payload carried inside a frame.
///
/// Implementations must be exact and deterministic: for the same record and
/// name, [`PayloadCodec::encoded_len`] equals the number of bytes
/// [`PayloadCodec::encode`] writes, and the bytes are always identical.
pub trait PayloadCodec {
    /// Error reported by encode or decode.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the exact payload size of `record` when encoded under `name`.
    fn encoded_len(&self, record: &Xstat, name: &str) -> usize;

    /// Encodes `record` under `name` into `dst` and returns the bytes written.
    ///
    /// `dst` is exactly [`PayloadCodec::encoded_len`] bytes long.
    fn encode(&self, record: &Xstat, name: &str, dst: &mut [u8]) -> Result<usize, Self::Error>;

    /// Decodes a record from the whole of `src`.
    fn decode(&self, src: &[u8]) -> Result<Xstat, Self::Error>;
}

impl<P: PayloadCodec + ?Sized> PayloadCodec for &P {
    type Error = P::Error;

    fn encoded_len(&self, record: &Xstat, name: &str) -> usize {
        (**self).encoded_len(record, name)
    }

    fn encode(&self, record: &Xstat, name: &str, dst: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).encode(record, name, dst)
    }

    fn decode(&self, src: &[u8]) -> Result<Xstat, Self::Error> {
        (**self).decode(src)
    }
}
