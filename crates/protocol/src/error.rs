use std::error::Error as StdError;
use std::io;

/// Boxed error reported by a [`crate::PayloadCodec`] implementation.
pub type PayloadError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors produced while framing or unframing records.
///
/// No variant is ever logged or swallowed by this crate. After any encode
/// failure the whole destination region handed to the encoder must be treated
/// as garbage: the length prefix may already have been written.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The destination buffer cannot hold the complete frame.
    ///
    /// Nothing was written; re-allocate at least `required` bytes and retry.
    #[error("not enough space in buffer: frame needs {required} bytes, {available} available")]
    InsufficientSpace {
        /// Bytes the complete frame occupies, including the length prefix.
        required: usize,
        /// Bytes the destination offered.
        available: usize,
    },
    /// The source buffer ends before the declared (or minimum) frame size.
    ///
    /// Supply more bytes, for example by reading further from a stream, and retry.
    #[error("input buffer too small for frame: need {required} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required to decode the frame.
        required: usize,
        /// Bytes that were available.
        available: usize,
    },
    /// The payload length exceeds the bound in force.
    ///
    /// On decode the declared length is above the codec's bound and the input
    /// is treated as malformed or hostile; decoding at this position must stop.
    /// On encode the payload cannot be described by the 32-bit prefix.
    #[error("unsafe frame payload length {len} exceeds maximum {max}")]
    FrameTooLarge {
        /// Declared (decode) or computed (encode) payload length.
        len: u64,
        /// Decode bound of the codec, or `u32::MAX` on encode.
        max: u32,
    },
    /// The payload serializer failed while encoding.
    #[error("payload encode failed: {0}")]
    Encode(#[source] PayloadError),
    /// The payload serializer failed while decoding.
    #[error("payload decode failed: {0}")]
    Decode(#[source] PayloadError),
    /// The serializer wrote a different number of bytes than it reported.
    #[error("payload serializer wrote {actual} bytes after sizing the payload at {expected}")]
    PayloadLengthMismatch {
        /// Size reported before encoding.
        expected: usize,
        /// Bytes actually written.
        actual: usize,
    },
    /// Transport failure in the stream helpers or the async codec.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FrameError {
    /// Returns `true` when the caller can retry after supplying more room or more bytes.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientSpace { .. } | Self::BufferTooSmall { .. }
        )
    }

    /// Returns `true` when the error came from the payload serializer.
    #[must_use]
    pub const fn is_payload_error(&self) -> bool {
        matches!(
            self,
            Self::Encode(_) | Self::Decode(_) | Self::PayloadLengthMismatch { .. }
        )
    }

    /// Converts the error into an [`io::Error`] for `Read`/`Write` based callers.
    ///
    /// Transport errors pass through unchanged. Malformed input maps to
    /// [`io::ErrorKind::InvalidData`], truncated input to
    /// [`io::ErrorKind::UnexpectedEof`] and encode-side failures to
    /// [`io::ErrorKind::InvalidInput`].
    #[must_use]
    pub fn into_io_error(self) -> io::Error {
        match self {
            Self::Io(inner) => inner,
            other => io::Error::new(other.io_kind(), other),
        }
    }

    fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::Io(inner) => inner.kind(),
            Self::BufferTooSmall { .. } => io::ErrorKind::UnexpectedEof,
            Self::FrameTooLarge { .. } | Self::Decode(_) => io::ErrorKind::InvalidData,
            Self::InsufficientSpace { .. } | Self::Encode(_) | Self::PayloadLengthMismatch { .. } => {
                io::ErrorKind::InvalidInput
            }
        }
    }
}
