//! Frame length prefix.
//!
//! Every frame starts with a 4-byte big-endian unsigned payload length,
//! followed by exactly that many payload bytes. Frames are concatenated with no
//! padding or separators.

use crate::error::FrameError;

/// Size in bytes of the length prefix that precedes every payload.
pub const FRAME_HEADER_LEN: usize = 4;

/// Largest payload length accepted on decode unless a codec is configured otherwise.
///
/// Checked before any allocation sized by the prefix, so a hostile length
/// field cannot drive memory use.
pub const MAX_FRAME_PAYLOAD: u32 = 65536;

/// Encodes `payload_len` as the big-endian prefix used on the wire.
#[must_use]
#[inline]
pub const fn encode_header(payload_len: u32) -> [u8; FRAME_HEADER_LEN] {
    payload_len.to_be_bytes()
}

/// Writes the prefix for `payload_len` into the start of `out` without allocating.
pub fn encode_header_into(payload_len: u32, out: &mut [u8]) -> Result<(), FrameError> {
    if out.len() < FRAME_HEADER_LEN {
        return Err(FrameError::InsufficientSpace {
            required: FRAME_HEADER_LEN,
            available: out.len(),
        });
    }

    out[..FRAME_HEADER_LEN].copy_from_slice(&encode_header(payload_len));
    Ok(())
}

/// Parses the payload length from the beginning of `bytes`.
///
/// Only the prefix is validated here; bounding the length is the caller's
/// responsibility because the limit is configurable per codec.
pub fn decode_header(bytes: &[u8]) -> Result<u32, FrameError> {
    let Some(prefix) = bytes.first_chunk::<FRAME_HEADER_LEN>() else {
        return Err(FrameError::BufferTooSmall {
            required: FRAME_HEADER_LEN,
            available: bytes.len(),
        });
    };

    Ok(u32::from_be_bytes(*prefix))
}
