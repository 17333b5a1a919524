#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Extended stat records and their length-prefixed wire frames.
//!
//! This crate is a thin facade over the workspace members:
//!
//! - [`metadata`] defines the [`Xstat`] record and collects it from the
//!   filesystem, extended attributes included.
//! - [`protocol`] frames records as `[u32 big-endian length][payload]` and
//!   decodes them back with a bound on the declared length.
//!
//! # Examples
//!
//! Collect a few files and stream their records through one buffer:
//!
//! ```no_run
//! use xstat::{RecordCodec, Xstat};
//!
//! let codec = RecordCodec::new();
//! let mut buf = vec![0u8; 65536];
//! let mut cursor = 0;
//! for path in ["/etc/hosts", "/etc/passwd", "/etc/group"] {
//!     let record = Xstat::from_path(path, true)?;
//!     cursor += codec.marshal_into(&record, "", &mut buf[cursor..])?;
//! }
//!
//! for record in codec.frames(&buf[..cursor]) {
//!     println!("{}", record?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use metadata;
pub use protocol;

pub use metadata::{
    CollectOptions, FileTime, FileType, MetadataError, PERMISSION_MASK, Xattrs, Xstat,
    read_xattrs,
};
#[cfg(feature = "async")]
pub use protocol::XstatCodec;
pub use protocol::{
    FRAME_HEADER_LEN, FrameError, Frames, MAX_FRAME_PAYLOAD, PayloadCodec, ProtobufPayload,
    RecordCodec, encoded_len, marshal_into, read_record, resolve_name, unmarshal_from,
    write_record,
};
