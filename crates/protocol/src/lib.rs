#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Length-prefixed binary framing for [`Xstat`] records.
//!
//! A frame is a 4-byte big-endian payload length followed by the payload bytes
//! produced by a [`PayloadCodec`]. Frames are packed back-to-back with no
//! padding, so a caller can encode many records into one buffer by advancing a
//! cursor by each returned length and later decode them in the same order.
//!
//! Decoding validates the declared length against a bound
//! ([`MAX_FRAME_PAYLOAD`] unless configured otherwise) before any payload byte
//! is read, so a hostile prefix cannot drive allocation.
//!
//! # Examples
//!
//! Pack two records into one buffer and read them back.
//!
//! ```
//! use metadata::{FileTime, Xstat};
//! use protocol::RecordCodec;
//!
//! let mut hosts = Xstat::new("/etc/hosts");
//! hosts.size = 158;
//! hosts.mode = 0o100644;
//! hosts.mtime = FileTime::from_unix_time(1_700_000_000, 0);
//! hosts.xattr.insert("user.test".into(), "v".into());
//! let passwd = Xstat::new("/etc/passwd");
//!
//! let codec = RecordCodec::new();
//! let mut buf = vec![0u8; 1024];
//! let mut cursor = 0;
//! cursor += codec.marshal_into(&hosts, "", &mut buf[cursor..])?;
//! cursor += codec.marshal_into(&passwd, "passwd", &mut buf[cursor..])?;
//!
//! let (first, used) = codec.unmarshal_from(&buf[..cursor])?;
//! let (second, rest) = codec.unmarshal_from(&buf[used..cursor])?;
//! assert_eq!(first, hosts);
//! assert_eq!(second.name, "passwd");
//! assert_eq!(used + rest, cursor);
//! # Ok::<(), protocol::FrameError>(())
//! ```

#[cfg(feature = "async")]
mod async_codec;
mod debug_codec;
mod envelope;
mod error;
mod frames;
mod io;
mod payload;
mod record_codec;

#[cfg(feature = "async")]
pub use async_codec::XstatCodec;
pub use envelope::{
    FRAME_HEADER_LEN, MAX_FRAME_PAYLOAD, decode_header, encode_header, encode_header_into,
};
pub use error::{FrameError, PayloadError};
pub use frames::Frames;
pub use io::{read_record, write_record};
pub use metadata::{Xattrs, Xstat};
pub use payload::{PayloadCodec, ProtobufError, ProtobufPayload, TimeMessage, XstatMessage};
pub use record_codec::{RecordCodec, encoded_len, marshal_into, resolve_name, unmarshal_from};
