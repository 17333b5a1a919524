//! Property-based tests for the record frame codec.

use std::collections::BTreeMap;

use metadata::{FileTime, Xstat};
use proptest::prelude::*;
use protocol::{FRAME_HEADER_LEN, FrameError, RecordCodec, decode_header, resolve_name};

fn xattrs() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("user\\.[a-z]{1,12}", ".{0,24}", 0..6)
}

fn file_time() -> impl Strategy<Value = FileTime> {
    (-4_000_000_000i64..4_000_000_000, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| FileTime::from_unix_time(secs, nanos))
}

prop_compose! {
    fn arb_record()(
        name in ".{0,64}",
        size in any::<i64>(),
        uid in any::<u32>(),
        gid in any::<u32>(),
        mode in any::<u32>(),
        mtime in file_time(),
        atime in file_time(),
        nlink in any::<u64>(),
        ino in any::<u64>(),
        xattr in xattrs(),
    ) -> Xstat {
        let mut record = Xstat::new(name);
        record.size = size;
        record.uid = uid;
        record.gid = gid;
        record.mode = mode;
        record.mtime = mtime;
        record.atime = atime;
        record.nlink = nlink;
        record.ino = ino;
        record.xattr = xattr;
        record
    }
}

proptest! {
    #[test]
    fn written_bytes_equal_encoded_len(record in arb_record(), name in ".{0,16}") {
        let codec = RecordCodec::new();
        let size = codec.encoded_len(&record, &name);
        let mut buf = vec![0u8; size];
        let written = codec.marshal_into(&record, &name, &mut buf).expect("marshal");
        prop_assert_eq!(written, size);
        prop_assert_eq!(decode_header(&buf).expect("prefix") as usize, size - FRAME_HEADER_LEN);
    }

    #[test]
    fn round_trip_restores_record_with_resolved_name(record in arb_record(), name in ".{0,16}") {
        let codec = RecordCodec::new();
        let mut buf = vec![0u8; codec.encoded_len(&record, &name)];
        let written = codec.marshal_into(&record, &name, &mut buf).expect("marshal");

        let (decoded, consumed) = codec.unmarshal_from(&buf).expect("unmarshal");
        prop_assert_eq!(consumed, written);

        let mut expected = record.clone();
        expected.name = resolve_name(&record, &name).to_owned();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn short_destination_is_rejected_untouched(record in arb_record(), short_by in 1usize..8) {
        let codec = RecordCodec::new();
        let size = codec.encoded_len(&record, "");
        let mut buf = vec![0xC3u8; size.saturating_sub(short_by)];
        let err = codec.marshal_into(&record, "", &mut buf).unwrap_err();
        let is_insufficient_space = matches!(err, FrameError::InsufficientSpace { .. });
        prop_assert!(is_insufficient_space);
        prop_assert!(buf.iter().all(|&b| b == 0xC3));
    }

    #[test]
    fn encoding_is_deterministic(record in arb_record()) {
        let codec = RecordCodec::new();
        let size = codec.encoded_len(&record, "");
        let mut first = vec![0u8; size];
        let mut second = vec![0u8; size];
        codec.marshal_into(&record, "", &mut first).expect("first");
        codec.marshal_into(&record.clone(), "", &mut second).expect("second");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let codec = RecordCodec::new();
        if let Ok((_, consumed)) = codec.unmarshal_from(&bytes) {
            prop_assert!(consumed <= bytes.len());
        }
    }

    #[test]
    fn xattr_equality_is_order_independent(pairs in prop::collection::vec(("user\\.[a-z]{1,8}", "[a-z]{0,8}"), 0..8)) {
        let mut forward = Xstat::new("f");
        let mut reverse = Xstat::new("f");
        let unique: BTreeMap<String, String> = pairs.into_iter().collect();
        for (k, v) in &unique {
            forward.xattr.insert(k.clone(), v.clone());
        }
        for (k, v) in unique.iter().rev() {
            reverse.xattr.insert(k.clone(), v.clone());
        }
        prop_assert_eq!(&forward, &reverse);

        if let Some((key, value)) = unique.iter().next() {
            reverse.xattr.insert(key.clone(), format!("{value}!"));
            prop_assert_ne!(&forward, &reverse);
        }
    }
}
