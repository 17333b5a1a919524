//! Many records packed back-to-back into one caller-owned buffer.

use metadata::{FileTime, Xstat};
use protocol::{FrameError, MAX_FRAME_PAYLOAD, RecordCodec};

fn record(name: &str, size: i64, xattrs: &[(&str, &str)]) -> Xstat {
    let mut record = Xstat::new(name);
    record.size = size;
    record.mode = 0o100644;
    record.nlink = 1;
    record.ino = size as u64 + 10;
    record.mtime = FileTime::from_unix_time(1_700_000_000 + size, 250);
    record.atime = FileTime::from_unix_time(1_700_000_100 + size, 500);
    for (key, value) in xattrs {
        record.xattr.insert((*key).to_owned(), (*value).to_owned());
    }
    record
}

fn three_records() -> Vec<Xstat> {
    vec![
        record("/etc/hosts", 158, &[("user.test", "v")]),
        record("/etc/passwd", 2_048, &[]),
        record(
            "/etc/group",
            912,
            &[("user.a", "1"), ("user.b", "2"), ("security.selinux", "etc_t")],
        ),
    ]
}

#[test]
fn three_records_round_trip_through_one_buffer() {
    let records = three_records();
    let codec = RecordCodec::new();
    let mut buf = vec![0u8; MAX_FRAME_PAYLOAD as usize];

    let mut cursor = 0;
    for item in &records {
        let size = codec.encoded_len(item, "");
        let written = codec
            .marshal_into(item, "", &mut buf[cursor..])
            .expect("marshal");
        assert_eq!(written, size);
        cursor += written;
    }
    let end = cursor;

    let mut offset = 0;
    for expected in &records {
        let (decoded, consumed) = codec
            .unmarshal_from(&buf[offset..end])
            .expect("unmarshal");
        assert_eq!(&decoded, expected);
        offset += consumed;
    }
    assert_eq!(offset, end, "cursor must be exhausted exactly");
}

#[test]
fn frames_iterator_matches_manual_cursor() {
    let records = three_records();
    let codec = RecordCodec::new();
    let mut buf = vec![0u8; 4096];
    let end = codec
        .marshal_all(records.iter().map(|r| (r, "")), &mut buf)
        .expect("pack");

    let mut frames = codec.frames(&buf[..end]);
    let decoded: Vec<Xstat> = frames
        .by_ref()
        .collect::<Result<_, FrameError>>()
        .expect("decode all");
    assert_eq!(decoded, records);
    assert_eq!(frames.consumed(), end);
}

#[test]
fn overrides_apply_per_frame() {
    let records = three_records();
    let names = ["hosts", "", "group"];
    let codec = RecordCodec::new();
    let mut buf = vec![0u8; 4096];
    let end = codec
        .marshal_all(records.iter().zip(names), &mut buf)
        .expect("pack");

    let decoded: Vec<String> = codec
        .frames(&buf[..end])
        .map(|item| item.expect("decode").name)
        .collect();
    assert_eq!(decoded, ["hosts", "/etc/passwd", "group"]);
}

#[test]
fn running_out_of_room_midway_keeps_earlier_frames() {
    let records = three_records();
    let codec = RecordCodec::new();
    let first = codec.encoded_len(&records[0], "");
    let second = codec.encoded_len(&records[1], "");
    let mut buf = vec![0u8; first + second + 3];

    let err = codec
        .marshal_all(records.iter().map(|r| (r, "")), &mut buf)
        .unwrap_err();
    assert!(err.is_retryable());

    let decoded: Vec<_> = codec
        .frames(&buf[..first + second])
        .collect::<Result<Vec<_>, _>>()
        .expect("earlier frames intact");
    assert_eq!(decoded, records[..2]);
}

#[test]
fn ctime_is_not_transmitted() {
    let mut original = record("/tmp/changed", 1, &[]);
    original.ctime = FileTime::from_unix_time(1_800_000_000, 7);

    let codec = RecordCodec::new();
    let mut buf = vec![0u8; codec.encoded_len(&original, "")];
    codec.marshal_into(&original, "", &mut buf).expect("marshal");
    let (decoded, _) = codec.unmarshal_from(&buf).expect("unmarshal");

    assert_eq!(decoded, original);
    assert_eq!(decoded.ctime, FileTime::zero());
}
