use std::iter::FusedIterator;

use metadata::Xstat;

use crate::debug_codec::trace_frames_stopped;
use crate::error::FrameError;
use crate::payload::PayloadCodec;
use crate::record_codec::RecordCodec;

/// Iterator over the frames packed into a byte slice.
///
/// Created by [`RecordCodec::frames`]. Yields one decoded record per frame and
/// stops after the first error, leaving [`Frames::remaining`] pointing at the
/// frame that failed.
#[derive(Debug)]
pub struct Frames<'a, P> {
    codec: &'a RecordCodec<P>,
    src: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a, P: PayloadCodec> Frames<'a, P> {
    pub(crate) fn new(codec: &'a RecordCodec<P>, src: &'a [u8]) -> Self {
        Self {
            codec,
            src,
            offset: 0,
            failed: false,
        }
    }

    /// Bytes consumed by the frames decoded so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.offset
    }

    /// Bytes not yet decoded.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.src[self.offset..]
    }
}

impl<P: PayloadCodec> Iterator for Frames<'_, P> {
    type Item = Result<Xstat, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset == self.src.len() {
            return None;
        }

        match self.codec.unmarshal_from(self.remaining()) {
            Ok((record, consumed)) => {
                self.offset += consumed;
                Some(Ok(record))
            }
            Err(error) => {
                trace_frames_stopped(self.offset, &error);
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

impl<P: PayloadCodec> FusedIterator for Frames<'_, P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::encode_header;

    fn packed(names: &[&str]) -> Vec<u8> {
        let codec = RecordCodec::new();
        let records: Vec<Xstat> = names.iter().map(|name| Xstat::new(*name)).collect();
        let total: usize = records.iter().map(|r| codec.encoded_len(r, "")).sum();
        let mut buf = vec![0u8; total];
        let written = codec
            .marshal_all(records.iter().map(|r| (r, "")), &mut buf)
            .expect("pack");
        assert_eq!(written, total);
        buf
    }

    #[test]
    fn yields_every_frame_in_order() {
        let buf = packed(&["a", "bb", "ccc"]);
        let codec = RecordCodec::new();
        let mut frames = codec.frames(&buf);

        let names: Vec<String> = frames
            .by_ref()
            .map(|record| record.expect("decode").name)
            .collect();
        assert_eq!(names, ["a", "bb", "ccc"]);
        assert_eq!(frames.consumed(), buf.len());
        assert!(frames.remaining().is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        let codec = RecordCodec::new();
        assert!(codec.frames(&[]).next().is_none());
    }

    #[test]
    fn stops_after_truncated_tail() {
        let mut buf = packed(&["first", "second"]);
        buf.truncate(buf.len() - 1);

        let codec = RecordCodec::new();
        let mut frames = codec.frames(&buf);
        assert_eq!(frames.next().expect("first").expect("decode").name, "first");

        let err = frames.next().expect("error item").unwrap_err();
        assert!(err.is_retryable());
        let tail_start = frames.consumed();
        assert_eq!(frames.remaining(), &buf[tail_start..]);

        assert!(frames.next().is_none());
        assert!(frames.next().is_none());
    }

    #[test]
    fn stops_on_hostile_prefix() {
        let mut buf = packed(&["ok"]);
        buf.extend_from_slice(&encode_header(u32::MAX));

        let codec = RecordCodec::new();
        let results: Vec<_> = codec.frames(&buf).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(FrameError::FrameTooLarge { .. })
        ));
    }
}
