//! Blocking `std::io` helpers for record streams.

use std::io::{self, Read, Write};

use metadata::Xstat;

use crate::envelope::{FRAME_HEADER_LEN, decode_header};
use crate::error::FrameError;
use crate::payload::PayloadCodec;
use crate::record_codec::RecordCodec;

/// Encodes `record` under `name_override` and writes the whole frame to `writer`.
///
/// Returns the number of bytes written. The frame is assembled in memory first,
/// so a codec error never leaves a partial frame on the stream.
pub fn write_record<W, P>(
    writer: &mut W,
    codec: &RecordCodec<P>,
    record: &Xstat,
    name_override: &str,
) -> Result<usize, FrameError>
where
    W: Write + ?Sized,
    P: PayloadCodec,
{
    let mut frame = vec![0u8; codec.encoded_len(record, name_override)];
    let written = codec.marshal_into(record, name_override, &mut frame)?;
    writer.write_all(&frame[..written])?;
    Ok(written)
}

/// Reads the next frame from `reader` and decodes it.
///
/// Returns `Ok(None)` when the stream ends cleanly before the first prefix
/// byte. The declared length is checked against [`RecordCodec::max_payload`]
/// before the payload buffer is allocated.
pub fn read_record<R, P>(reader: &mut R, codec: &RecordCodec<P>) -> Result<Option<Xstat>, FrameError>
where
    R: Read + ?Sized,
    P: PayloadCodec,
{
    let mut header = [0u8; FRAME_HEADER_LEN];
    if !read_header(reader, &mut header)? {
        return Ok(None);
    }

    let declared = decode_header(&header)?;
    if declared > codec.max_payload() {
        return Err(FrameError::FrameTooLarge {
            len: u64::from(declared),
            max: codec.max_payload(),
        });
    }

    let frame_len = FRAME_HEADER_LEN + declared as usize;
    let mut frame = Vec::new();
    frame
        .try_reserve_exact(frame_len)
        .map_err(|err| io::Error::new(io::ErrorKind::OutOfMemory, err))?;
    frame.extend_from_slice(&header);
    frame.resize(frame_len, 0);

    reader
        .read_exact(&mut frame[FRAME_HEADER_LEN..])
        .map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("record frame truncated: expected {declared} payload bytes"),
            ),
            _ => err,
        })?;

    let (record, _) = codec.unmarshal_from(&frame)?;
    Ok(Some(record))
}

/// Fills `header`, returning `false` on EOF before the first byte.
fn read_header<R: Read + ?Sized>(
    reader: &mut R,
    header: &mut [u8; FRAME_HEADER_LEN],
) -> io::Result<bool> {
    let mut filled = 0;
    while filled < FRAME_HEADER_LEN {
        match reader.read(&mut header[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "record frame prefix truncated: expected {FRAME_HEADER_LEN} bytes but received {filled}"
                    ),
                ));
            }
            Ok(read) => filled += read,
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(true)
}
