//! frame.rs
//!
//! The uniform contract every byte-framing codec implements: encode/decode
//! over caller-supplied slices, reporting progress and failure as a result
//! triple rather than through exceptions.

#![allow(dead_code)]

use crate::error::Error;

/// Outcome of a single `encode`/`decode` call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EncodeResult {
    /// Bytes consumed from the source.
    pub bytes_read: usize,
    /// Bytes produced into the target.
    pub bytes_written: usize,
    /// `Some(_)` distinguishes malformed input from a natural truncation;
    /// `None` is success.
    pub error: Option<Error>,
}

impl EncodeResult {
    pub(crate) const fn ok(bytes_read: usize, bytes_written: usize) -> Self {
        Self {
            bytes_read,
            bytes_written,
            error: None,
        }
    }

    pub(crate) const fn fail(bytes_read: usize, bytes_written: usize, error: Error) -> Self {
        Self {
            bytes_read,
            bytes_written,
            error: Some(error),
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// A byte-framing codec: stuffs or unstuffs reserved bytes over a fixed
/// overhead bound, never allocating.
pub trait FrameEncoder {
    /// Frame `source`, writing into `target`. `target` must be at least
    /// `max_encoded_len(source.len())` bytes or the call refuses.
    fn encode(&self, source: &[u8], target: &mut [u8]) -> EncodeResult;

    /// Unframe `source`, writing into `target`.
    fn decode(&self, source: &[u8], target: &mut [u8]) -> EncodeResult;

    /// Worst-case encoded length for a source of `source_len` bytes.
    fn max_encoded_len(&self, source_len: usize) -> usize;

    /// Worst-case decoded length for an encoded input of `source_len`
    /// bytes.
    fn max_decoded_len(&self, source_len: usize) -> usize;
}
