//! Protobuf payload backed by `prost`.
//!
//! Field layout:
//!
//! ```text
//! message Time  { int64 sec = 1; uint32 nsec = 2; }
//! message Xstat {
//!     string name = 1;  int64 size = 2;  uint32 uid = 3;  uint32 gid = 4;
//!     uint32 mode = 5;  Time mtime = 6;  Time atime = 7;
//!     uint64 nlink = 8; uint64 ino = 9;  map<string, string> xattr = 10;
//! }
//! ```
//!
//! The attribute map is a `BTreeMap`, so prost emits entries in key order and
//! identical records always produce identical bytes.

use std::collections::BTreeMap;

use metadata::{FileTime, Xstat};
use prost::Message;

use super::PayloadCodec;

/// Wire form of a (seconds, nanoseconds) timestamp.
#[derive(Clone, Copy, PartialEq, Eq, Message)]
pub struct TimeMessage {
    /// Whole seconds since the Unix epoch.
    #[prost(int64, tag = "1")]
    pub sec: i64,
    /// Sub-second nanoseconds.
    #[prost(uint32, tag = "2")]
    pub nsec: u32,
}

impl From<FileTime> for TimeMessage {
    fn from(time: FileTime) -> Self {
        Self {
            sec: time.unix_seconds(),
            nsec: time.nanoseconds(),
        }
    }
}

impl From<TimeMessage> for FileTime {
    fn from(time: TimeMessage) -> Self {
        Self::from_unix_time(time.sec, time.nsec)
    }
}

/// Wire form of an [`Xstat`] record.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct XstatMessage {
    /// Effective name (the override if one was supplied).
    #[prost(string, tag = "1")]
    pub name: String,
    /// Size in bytes.
    #[prost(int64, tag = "2")]
    pub size: i64,
    /// Owning user id.
    #[prost(uint32, tag = "3")]
    pub uid: u32,
    /// Owning group id.
    #[prost(uint32, tag = "4")]
    pub gid: u32,
    /// File type and permission bits.
    #[prost(uint32, tag = "5")]
    pub mode: u32,
    /// Modification time.
    #[prost(message, optional, tag = "6")]
    pub mtime: Option<TimeMessage>,
    /// Access time.
    #[prost(message, optional, tag = "7")]
    pub atime: Option<TimeMessage>,
    /// Hard link count.
    #[prost(uint64, tag = "8")]
    pub nlink: u64,
    /// Inode number.
    #[prost(uint64, tag = "9")]
    pub ino: u64,
    /// Extended attributes.
    #[prost(btree_map = "string, string", tag = "10")]
    pub xattr: BTreeMap<String, String>,
}

impl XstatMessage {
    /// Builds the wire message for `record` under `name`.
    #[must_use]
    pub fn from_record(record: &Xstat, name: &str) -> Self {
        Self {
            name: name.to_owned(),
            size: record.size,
            uid: record.uid,
            gid: record.gid,
            mode: record.mode,
            mtime: Some(record.mtime.into()),
            atime: Some(record.atime.into()),
            nlink: record.nlink,
            ino: record.ino,
            xattr: record.xattr.clone(),
        }
    }

    /// Converts the message into a record. Absent timestamps become [`FileTime::zero`].
    #[must_use]
    pub fn into_record(self) -> Xstat {
        let mut record = Xstat::new(self.name);
        record.size = self.size;
        record.uid = self.uid;
        record.gid = self.gid;
        record.mode = self.mode;
        record.mtime = self.mtime.map_or_else(FileTime::zero, FileTime::from);
        record.atime = self.atime.map_or_else(FileTime::zero, FileTime::from);
        record.nlink = self.nlink;
        record.ino = self.ino;
        record.xattr = self.xattr;
        record
    }
}

/// Failures reported by [`ProtobufPayload`].
#[derive(Debug, thiserror::Error)]
pub enum ProtobufError {
    /// The destination region was too small for the message.
    #[error(transparent)]
    Encode(#[from] prost::EncodeError),
    /// The payload bytes are not a valid message.
    #[error(transparent)]
    Decode(#[from] prost::DecodeError),
}

/// Default [`PayloadCodec`]: protobuf encoding via `prost`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProtobufPayload;

impl PayloadCodec for ProtobufPayload {
    type Error = ProtobufError;

    fn encoded_len(&self, record: &Xstat, name: &str) -> usize {
        XstatMessage::from_record(record, name).encoded_len()
    }

    fn encode(&self, record: &Xstat, name: &str, dst: &mut [u8]) -> Result<usize, Self::Error> {
        let capacity = dst.len();
        let mut cursor = dst;
        XstatMessage::from_record(record, name).encode(&mut cursor)?;
        Ok(capacity - cursor.len())
    }

    fn decode(&self, src: &[u8]) -> Result<Xstat, Self::Error> {
        Ok(XstatMessage::decode(src)?.into_record())
    }
}
