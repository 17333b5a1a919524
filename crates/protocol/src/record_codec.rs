use metadata::Xstat;

use crate::debug_codec::{trace_frame_decoded, trace_frame_encoded};
use crate::envelope::{FRAME_HEADER_LEN, MAX_FRAME_PAYLOAD, decode_header, encode_header_into};
use crate::error::FrameError;
use crate::frames::Frames;
use crate::payload::{PayloadCodec, ProtobufPayload};

/// Resolves the name a record is encoded under.
///
/// A non-empty `name_override` wins; otherwise the record's own name is used.
/// The record itself is never modified.
#[must_use]
#[inline]
pub fn resolve_name<'a>(record: &'a Xstat, name_override: &'a str) -> &'a str {
    if name_override.is_empty() {
        &record.name
    } else {
        name_override
    }
}

/// Length-prefixed frame codec for [`Xstat`] records.
///
/// Each frame is a 4-byte big-endian payload length followed by the payload
/// produced by `P`. Decoding rejects any declared length above
/// [`RecordCodec::max_payload`] before touching payload bytes.
#[derive(Clone, Debug)]
pub struct RecordCodec<P = ProtobufPayload> {
    payload: P,
    max_payload: u32,
}

impl RecordCodec<ProtobufPayload> {
    /// Creates a codec using the protobuf payload and [`MAX_FRAME_PAYLOAD`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            payload: ProtobufPayload,
            max_payload: MAX_FRAME_PAYLOAD,
        }
    }
}

impl Default for RecordCodec<ProtobufPayload> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PayloadCodec> RecordCodec<P> {
    /// Creates a codec around a custom payload serializer.
    #[must_use]
    pub const fn with_payload(payload: P) -> Self {
        Self {
            payload,
            max_payload: MAX_FRAME_PAYLOAD,
        }
    }

    /// Replaces the bound on declared payload lengths accepted when decoding.
    ///
    /// Use a smaller bound where peers are less trusted. Encoding is not
    /// limited by it.
    #[must_use]
    pub const fn with_max_payload(mut self, max_payload: u32) -> Self {
        self.max_payload = max_payload;
        self
    }

    /// Returns the largest payload length this codec accepts on decode.
    #[must_use]
    pub const fn max_payload(&self) -> u32 {
        self.max_payload
    }

    /// Returns the payload serializer.
    #[must_use]
    pub const fn payload(&self) -> &P {
        &self.payload
    }

    /// Returns the exact number of bytes [`RecordCodec::marshal_into`] writes
    /// for `record` under `name_override`, length prefix included.
    #[must_use]
    pub fn encoded_len(&self, record: &Xstat, name_override: &str) -> usize {
        let name = resolve_name(record, name_override);
        FRAME_HEADER_LEN + self.payload.encoded_len(record, name)
    }

    /// Encodes `record` as one frame at the start of `dst`.
    ///
    /// Returns the number of bytes written, which is the cursor advance for
    /// packing further frames into the same buffer. [`RecordCodec::max_payload`]
    /// is not consulted here; it bounds what this codec accepts on decode.
    ///
    /// # Errors
    ///
    /// - [`FrameError::InsufficientSpace`] when `dst` is shorter than the frame;
    ///   `dst` is untouched.
    /// - [`FrameError::FrameTooLarge`] when the payload length does not fit the
    ///   32-bit prefix; `dst` is untouched.
    /// - [`FrameError::Encode`] or [`FrameError::PayloadLengthMismatch`] when the
    ///   serializer fails. The length prefix has already been written by then,
    ///   so the entire `dst` region must be discarded.
    pub fn marshal_into(
        &self,
        record: &Xstat,
        name_override: &str,
        dst: &mut [u8],
    ) -> Result<usize, FrameError> {
        let name = resolve_name(record, name_override);
        let payload_len = self.payload.encoded_len(record, name);

        let frame_len = FRAME_HEADER_LEN.saturating_add(payload_len);
        if dst.len() < frame_len {
            return Err(FrameError::InsufficientSpace {
                required: frame_len,
                available: dst.len(),
            });
        }

        let declared = u32::try_from(payload_len).map_err(|_| FrameError::FrameTooLarge {
            len: payload_len as u64,
            max: u32::MAX,
        })?;
        encode_header_into(declared, dst)?;

        let written = self
            .payload
            .encode(record, name, &mut dst[FRAME_HEADER_LEN..frame_len])
            .map_err(|error| FrameError::Encode(Box::new(error)))?;
        if written != payload_len {
            return Err(FrameError::PayloadLengthMismatch {
                expected: payload_len,
                actual: written,
            });
        }

        trace_frame_encoded(name, payload_len);
        Ok(frame_len)
    }

    /// Decodes the frame at the start of `src`.
    ///
    /// Returns the record and the number of bytes consumed; bytes after the
    /// frame are left for the next call.
    ///
    /// # Errors
    ///
    /// - [`FrameError::BufferTooSmall`] when `src` is shorter than the prefix or
    ///   than the declared frame.
    /// - [`FrameError::FrameTooLarge`] when the declared length exceeds
    ///   [`RecordCodec::max_payload`]. Checked before any payload byte is read.
    /// - [`FrameError::Decode`] when the serializer rejects the payload.
    pub fn unmarshal_from(&self, src: &[u8]) -> Result<(Xstat, usize), FrameError> {
        let declared = decode_header(src)?;
        if declared > self.max_payload {
            return Err(FrameError::FrameTooLarge {
                len: u64::from(declared),
                max: self.max_payload,
            });
        }

        let payload_len = declared as usize;
        let body = &src[FRAME_HEADER_LEN..];
        if body.len() < payload_len {
            return Err(FrameError::BufferTooSmall {
                required: FRAME_HEADER_LEN + payload_len,
                available: src.len(),
            });
        }

        let record = self
            .payload
            .decode(&body[..payload_len])
            .map_err(|error| FrameError::Decode(Box::new(error)))?;

        trace_frame_decoded(&record.name, payload_len);
        Ok((record, FRAME_HEADER_LEN + payload_len))
    }

    /// Packs `records` back-to-back at the start of `dst`.
    ///
    /// Each item pairs a record with its name override. Returns the total
    /// number of bytes written. On error, frames already written stay in place
    /// but the region past them is unspecified.
    pub fn marshal_all<'r, I>(&self, records: I, dst: &mut [u8]) -> Result<usize, FrameError>
    where
        I: IntoIterator<Item = (&'r Xstat, &'r str)>,
    {
        let mut offset = 0;
        for (record, name_override) in records {
            offset += self.marshal_into(record, name_override, &mut dst[offset..])?;
        }
        Ok(offset)
    }

    /// Returns an iterator decoding consecutive frames from `src`.
    #[must_use]
    pub fn frames<'a>(&'a self, src: &'a [u8]) -> Frames<'a, P> {
        Frames::new(self, src)
    }
}

/// [`RecordCodec::encoded_len`] with the default codec.
#[must_use]
pub fn encoded_len(record: &Xstat, name_override: &str) -> usize {
    RecordCodec::new().encoded_len(record, name_override)
}

/// [`RecordCodec::marshal_into`] with the default codec.
pub fn marshal_into(record: &Xstat, name_override: &str, dst: &mut [u8]) -> Result<usize, FrameError> {
    RecordCodec::new().marshal_into(record, name_override, dst)
}

/// [`RecordCodec::unmarshal_from`] with the default codec.
pub fn unmarshal_from(src: &[u8]) -> Result<(Xstat, usize), FrameError> {
    RecordCodec::new().unmarshal_from(src)
}
