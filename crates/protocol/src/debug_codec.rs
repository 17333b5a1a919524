//! Tracing for frame encode and decode.
//!
//! Compiled only with the `tracing` feature; otherwise every function is an
//! inline no-op.

/// Target name for tracing events emitted by the frame codec.
#[cfg(feature = "tracing")]
const CODEC_TARGET: &str = "xstat::codec";

/// Traces a frame written for the record named `name`.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_frame_encoded(name: &str, payload_len: usize) {
    tracing::trace!(
        target: CODEC_TARGET,
        name = %name,
        payload_len = payload_len,
        "frame_encoded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_frame_encoded(_name: &str, _payload_len: usize) {}

/// Traces a frame decoded into the record named `name`.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_frame_decoded(name: &str, payload_len: usize) {
    tracing::trace!(
        target: CODEC_TARGET,
        name = %name,
        payload_len = payload_len,
        "frame_decoded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_frame_decoded(_name: &str, _payload_len: usize) {}

/// Traces a frame iterator stopping on an error at `offset`.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_frames_stopped(offset: usize, error: &crate::FrameError) {
    tracing::debug!(
        target: CODEC_TARGET,
        offset = offset,
        error = %error,
        "frames_stopped"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_frames_stopped(_offset: usize, _error: &crate::FrameError) {}
