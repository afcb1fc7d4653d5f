//! cobs.rs
//!
//! Consistent Overhead Byte Stuffing: eliminates 0x00 from a byte stream at
//! a bounded overhead, splitting runs of non-zero bytes at 254-byte
//! boundaries. Translated from the pointer-chasing reference algorithm
//! into safe slice indexing.

#![allow(dead_code)]

use crate::error::Error;
use crate::frame::{EncodeResult, FrameEncoder};

/// Longest run of non-zero bytes a single COBS code byte can cover.
pub const MAX_PACKET_SIZE: usize = 254;

/// Stateless COBS encoder/decoder.
#[derive(Copy, Clone, Debug, Default)]
pub struct CobsCodec;

impl CobsCodec {
    pub const fn new() -> Self {
        Self
    }

    /// `n + floor((n-1)/254) + 2` for `n >= 1`; `0` for `n == 0`.
    pub const fn max_encoded_len(n: usize) -> usize {
        if n == 0 {
            0
        } else {
            n + (n - 1) / MAX_PACKET_SIZE + 2
        }
    }

    /// Equal to the encoded length: a COBS frame never grows on decode.
    pub const fn max_decoded_len(n: usize) -> usize {
        n
    }

    /// Encodes `source` into `target`. Refuses (returns all-zero, no
    /// error) when `source` is empty or `target` is smaller than
    /// [`Self::max_encoded_len`].
    pub fn encode(source: &[u8], target: &mut [u8]) -> EncodeResult {
        let n = source.len();
        if n == 0 {
            return EncodeResult::ok(0, 0);
        }
        if target.len() < Self::max_encoded_len(n) {
            return EncodeResult::ok(0, 0);
        }

        let mut code_idx = 0usize;
        let mut dst = 1usize;
        let mut code: u8 = 1;
        let mut src = 0usize;

        while src < n {
            let byte = source[src];
            let remaining_after = n - src - 1;
            if byte != 0 {
                target[dst] = byte;
                dst += 1;
                code += 1;
            }
            if byte == 0 || code == 0xFF {
                target[code_idx] = code;
                code_idx = dst;
                if byte == 0 || remaining_after > 0 {
                    dst += 1;
                }
                code = 1;
            }
            src += 1;
        }
        target[code_idx] = code;

        EncodeResult::ok(n, dst)
    }

    /// Decodes `source` into `target`. `error = Some(Malformed)` on a
    /// literal 0x00 in the stream or a code declaring a span past
    /// end-of-source.
    pub fn decode(source: &[u8], target: &mut [u8]) -> EncodeResult {
        let n = source.len();
        let mut src = 0usize;
        let mut dst = 0usize;

        while src < n {
            let code = source[src] as usize;
            if code == 0 {
                return EncodeResult::fail(src, dst, Error::Malformed);
            }
            src += 1;
            let run = code - 1;
            if src + run > n {
                return EncodeResult::fail(src, dst, Error::Malformed);
            }
            for k in 0..run {
                let byte = source[src + k];
                if byte == 0 {
                    return EncodeResult::fail(src + k, dst, Error::Malformed);
                }
                if dst >= target.len() {
                    return EncodeResult::fail(src + k, dst, Error::OutOfSpace);
                }
                target[dst] = byte;
                dst += 1;
            }
            src += run;
            if code != 0xFF && src != n {
                if dst >= target.len() {
                    return EncodeResult::fail(src, dst, Error::OutOfSpace);
                }
                target[dst] = 0;
                dst += 1;
            }
        }

        EncodeResult::ok(src, dst)
    }
}

impl FrameEncoder for CobsCodec {
    fn encode(&self, source: &[u8], target: &mut [u8]) -> EncodeResult {
        Self::encode(source, target)
    }

    fn decode(&self, source: &[u8], target: &mut [u8]) -> EncodeResult {
        Self::decode(source, target)
    }

    fn max_encoded_len(&self, source_len: usize) -> usize {
        Self::max_encoded_len(source_len)
    }

    fn max_decoded_len(&self, source_len: usize) -> usize {
        Self::max_decoded_len(source_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(source: &[u8]) {
        let mut encoded = [0u8; 1024];
        let enc = CobsCodec::encode(source, &mut encoded);
        assert!(enc.is_ok());
        let mut decoded = [0u8; 1024];
        let dec = CobsCodec::decode(&encoded[..enc.bytes_written], &mut decoded);
        assert!(dec.is_ok(), "decode failed: {:?}", dec);
        assert_eq!(&decoded[..dec.bytes_written], source);
    }

    #[test]
    fn max_encoded_len_matches_bound() {
        assert_eq!(CobsCodec::max_encoded_len(0), 0);
        assert_eq!(CobsCodec::max_encoded_len(1), 3);
        assert_eq!(CobsCodec::max_encoded_len(254), 256);
        assert_eq!(CobsCodec::max_encoded_len(255), 257);
    }

    #[test]
    fn s2_single_zero() {
        let mut target = [0u8; 8];
        let r = CobsCodec::encode(&[0x00], &mut target);
        assert_eq!(r, EncodeResult::ok(1, 2));
        assert_eq!(&target[..2], &[0x01, 0x01]);

        let mut decoded = [0u8; 8];
        let r = CobsCodec::decode(&[0x01, 0x01], &mut decoded);
        assert_eq!(r, EncodeResult::ok(2, 1));
        assert_eq!(&decoded[..1], &[0x00]);
    }

    #[test]
    fn s3_single_non_zero() {
        let mut target = [0u8; 8];
        let r = CobsCodec::encode(&[0x09], &mut target);
        assert_eq!(r, EncodeResult::ok(1, 2));
        assert_eq!(&target[..2], &[0x02, 0x09]);
    }

    #[test]
    fn s4_mixed() {
        let source: [u8; 17] = [
            0x01, 0x02, 0x00, 0x01, 0x02, 0x03, 0x00, 0x01, 0x02, 0x03, 0x04, 0x00, 0x01, 0x02,
            0x03, 0x04, 0x05,
        ];
        let expected: [u8; 18] = [
            0x03, 0x01, 0x02, 0x04, 0x01, 0x02, 0x03, 0x05, 0x01, 0x02, 0x03, 0x04, 0x06, 0x01,
            0x02, 0x03, 0x04, 0x05,
        ];
        let mut target = [0u8; 32];
        let r = CobsCodec::encode(&source, &mut target);
        assert_eq!(r.bytes_written, 18);
        assert_eq!(&target[..18], &expected);
        roundtrip(&source);
    }

    #[test]
    fn s5_254_byte_run() {
        let mut source = [0u8; 254];
        for (i, b) in source.iter_mut().enumerate() {
            *b = (i + 1) as u8;
        }
        let mut target = [0u8; 300];
        let r = CobsCodec::encode(&source, &mut target);
        assert_eq!(r.bytes_written, 255);
        assert_eq!(target[0], 0xFF);
        assert_eq!(&target[1..255], &source[..]);
        roundtrip(&source);
    }

    #[test]
    fn s6_over_254_run() {
        let mut source = [0u8; 269];
        for i in 0..254 {
            source[i] = (i + 1) as u8;
        }
        source[254] = 0xFF;
        source[255] = 0x00;
        for i in 0..13 {
            source[256 + i] = (i + 1) as u8;
        }

        let mut target = [0u8; 300];
        let r = CobsCodec::encode(&source, &mut target);
        assert_eq!(r.bytes_written, 271);
        assert_eq!(target[0], 0xFF);
        assert_eq!(&target[1..255], &source[..254]);
        assert_eq!(target[255], 0x02);
        assert_eq!(target[256], 0xFF);
        assert_eq!(target[257], 0x0E);
        assert_eq!(&target[258..271], &source[256..269]);
        roundtrip(&source);
    }

    #[test]
    fn decode_rejects_literal_zero_code() {
        let mut target = [0u8; 8];
        let r = CobsCodec::decode(&[0x02, 0x00], &mut target);
        assert_eq!(r.error, Some(Error::Malformed));
    }

    #[test]
    fn decode_rejects_span_past_end() {
        let mut target = [0u8; 8];
        let r = CobsCodec::decode(&[0x05, 0x01, 0x02], &mut target);
        assert_eq!(r.error, Some(Error::Malformed));
    }

    #[test]
    fn encode_refuses_when_target_too_small() {
        let mut target = [0u8; 1];
        let r = CobsCodec::encode(&[1, 2, 3], &mut target);
        assert_eq!(r, EncodeResult::ok(0, 0));
    }
}
