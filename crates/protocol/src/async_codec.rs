//! Async framing for record streams using tokio-util.
//!
//! [`XstatCodec`] plugs a [`RecordCodec`] into [`tokio_util::codec::Framed`],
//! [`tokio_util::codec::FramedRead`] and [`tokio_util::codec::FramedWrite`].
//! Frames on the stream are byte-identical to those produced by
//! [`RecordCodec::marshal_into`].

use bytes::{Buf, BytesMut};
use metadata::Xstat;
use tokio_util::codec::{Decoder, Encoder};

use crate::envelope::{FRAME_HEADER_LEN, decode_header};
use crate::error::FrameError;
use crate::payload::{PayloadCodec, ProtobufPayload};
use crate::record_codec::RecordCodec;

/// tokio-util codec for length-prefixed [`Xstat`] frames.
///
/// # Example
///
/// ```ignore
/// use futures::{SinkExt, StreamExt};
/// use tokio_util::codec::Framed;
/// use protocol::XstatCodec;
///
/// async fn relay(stream: impl AsyncRead + AsyncWrite + Unpin, record: &Xstat) {
///     let mut framed = Framed::new(stream, XstatCodec::new());
///     framed.send(record).await?;
///     while let Some(next) = framed.next().await {
///         println!("{}", next?);
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct XstatCodec<P = ProtobufPayload> {
    inner: RecordCodec<P>,
}

impl XstatCodec<ProtobufPayload> {
    /// Creates a codec with the protobuf payload and the default bound.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: RecordCodec::new(),
        }
    }
}

impl Default for XstatCodec<ProtobufPayload> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PayloadCodec> XstatCodec<P> {
    /// Wraps an already configured [`RecordCodec`].
    #[must_use]
    pub const fn from_record_codec(inner: RecordCodec<P>) -> Self {
        Self { inner }
    }

    /// Returns the underlying frame codec.
    #[must_use]
    pub const fn record_codec(&self) -> &RecordCodec<P> {
        &self.inner
    }

    fn encode_frame(
        &self,
        record: &Xstat,
        name_override: &str,
        dst: &mut BytesMut,
    ) -> Result<(), FrameError> {
        let frame_len = self.inner.encoded_len(record, name_override);
        let start = dst.len();
        dst.resize(start + frame_len, 0);

        match self
            .inner
            .marshal_into(record, name_override, &mut dst[start..])
        {
            Ok(_) => Ok(()),
            Err(error) => {
                dst.truncate(start);
                Err(error)
            }
        }
    }
}

impl<P: PayloadCodec> Decoder for XstatCodec<P> {
    type Item = Xstat;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < FRAME_HEADER_LEN {
            return Ok(None);
        }

        let declared = decode_header(&src[..])?;
        if declared > self.inner.max_payload() {
            return Err(FrameError::FrameTooLarge {
                len: u64::from(declared),
                max: self.inner.max_payload(),
            });
        }

        let frame_len = FRAME_HEADER_LEN + declared as usize;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        let (record, consumed) = self.inner.unmarshal_from(&src[..frame_len])?;
        src.advance(consumed);
        Ok(Some(record))
    }
}

impl<P: PayloadCodec> Encoder<&Xstat> for XstatCodec<P> {
    type Error = FrameError;

    fn encode(&mut self, item: &Xstat, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_frame(item, "", dst)
    }
}

impl<P: PayloadCodec> Encoder<Xstat> for XstatCodec<P> {
    type Error = FrameError;

    fn encode(&mut self, item: Xstat, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_frame(&item, "", dst)
    }
}

/// Encodes a record under a name override without cloning it.
impl<P: PayloadCodec> Encoder<(&Xstat, &str)> for XstatCodec<P> {
    type Error = FrameError;

    fn encode(
        &mut self,
        (record, name_override): (&Xstat, &str),
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        self.encode_frame(record, name_override, dst)
    }
}
