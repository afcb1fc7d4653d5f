//! dle.rs
//!
//! Data Link Escape byte stuffing: hides the reserved framing markers
//! STX/ETX/DLE inside a byte stream behind a two-byte escape sequence.
//! Implements the more defensive of the two decoder behaviors seen across
//! the sources this was translated from: a trailing lone DLE is a natural
//! truncation, and DLE followed by an unescaped reserved byte is rejected
//! rather than silently accepted.

#![allow(dead_code)]

use crate::error::Error;
use crate::frame::{EncodeResult, FrameEncoder};
use crate::pdu::Pdu;

pub const STX: u8 = 0x02;
pub const ETX: u8 = 0x03;
pub const DLE: u8 = 0x10;

fn is_reserved(b: u8) -> bool {
    b == STX || b == ETX || b == DLE
}

/// Stateless DLE encoder/decoder.
#[derive(Copy, Clone, Debug, Default)]
pub struct DleCodec;

impl DleCodec {
    pub const fn new() -> Self {
        Self
    }

    pub const fn max_encoded_len(n: usize) -> usize {
        2 * n
    }

    pub const fn max_decoded_len(n: usize) -> usize {
        n
    }

    pub fn encode(source: &[u8], target: &mut [u8]) -> EncodeResult {
        let mut dst = 0usize;
        for (i, &byte) in source.iter().enumerate() {
            let needed = if is_reserved(byte) { 2 } else { 1 };
            if dst + needed > target.len() {
                return EncodeResult::fail(i, dst, Error::OutOfSpace);
            }
            if is_reserved(byte) {
                target[dst] = DLE;
                target[dst + 1] = byte ^ DLE;
                dst += 2;
            } else {
                target[dst] = byte;
                dst += 1;
            }
        }
        EncodeResult::ok(source.len(), dst)
    }

    /// `error = None` even when `bytes_read < source.len()`: a trailing
    /// lone DLE is a natural truncation, not a protocol violation (more
    /// input may complete it later).
    pub fn decode(source: &[u8], target: &mut [u8]) -> EncodeResult {
        let n = source.len();
        let mut src = 0usize;
        let mut dst = 0usize;

        while src < n {
            let byte = source[src];
            if byte == STX || byte == ETX {
                return EncodeResult::fail(src, dst, Error::Malformed);
            }
            if byte == DLE {
                if src + 1 >= n {
                    // Trailing lone DLE: stop here, leave it unconsumed.
                    return EncodeResult::ok(src, dst);
                }
                let escaped = source[src + 1];
                let original = escaped ^ DLE;
                if !is_reserved(original) {
                    // Unescaped reserved byte (or any other invalid
                    // successor) following DLE: rewind to before the DLE.
                    return EncodeResult::fail(src, dst, Error::Malformed);
                }
                if dst >= target.len() {
                    return EncodeResult::fail(src, dst, Error::OutOfSpace);
                }
                target[dst] = original;
                dst += 1;
                src += 2;
            } else {
                if dst >= target.len() {
                    return EncodeResult::fail(src, dst, Error::OutOfSpace);
                }
                target[dst] = byte;
                dst += 1;
                src += 1;
            }
        }

        EncodeResult::ok(src, dst)
    }

    /// Encodes `pdu`'s current window in place, reading the source
    /// backward-to-forward from its tail while writing the escaped form
    /// from the buffer's tail backward (§4.1's reverse I/O), so the writer
    /// never overtakes the not-yet-read source even at worst-case 2x
    /// expansion. Requires `2 * data_len + offset <= capacity`.
    pub fn encode_in_place<const S: usize>(pdu: &mut Pdu<S>) -> Result<(), Error> {
        let offset = pdu.get_offset();
        let n = pdu.get_data_len();
        let needed = 2 * n;
        if offset + needed > pdu.get_capacity() {
            return Err(Error::OutOfSpace);
        }

        // Snapshot the source bytes before growing the window: once
        // data_len is extended, `put_down_rev` is free to write into any
        // address at or above the new write cursor, and the invariant
        // below only guarantees it stays ahead of `read_idx`, not that it
        // avoids the original window's tail entirely.
        let mut source = [0u8; S];
        source[..n].copy_from_slice(pdu.data());

        if !pdu.set_data_len(needed) {
            return Err(Error::OutOfSpace);
        }
        pdu.reset_cursor();
        if !pdu.skip_write(needed) {
            return Err(Error::OutOfSpace);
        }

        for i in (0..n).rev() {
            let byte = source[i];
            let ok = if is_reserved(byte) {
                pdu.put_down_rev_bytes(&[DLE, byte ^ DLE])
            } else {
                pdu.put_down_rev_bytes(&[byte])
            };
            if !ok {
                return Err(Error::OutOfSpace);
            }
        }

        let final_cursor = pdu.get_write_cursor();
        let actual_len = (offset + needed) - final_cursor;
        if !pdu.set_data_len(actual_len) {
            return Err(Error::OutOfSpace);
        }
        if !pdu.set_offset(final_cursor) {
            return Err(Error::OutOfSpace);
        }
        pdu.reset_cursor();
        Ok(())
    }
}

impl FrameEncoder for DleCodec {
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

    #[test]
    fn s7_escaping_round_trips_reserved_bytes() {
        let mut target = [0u8; 8];
        let r = DleCodec::encode(&[STX], &mut target);
        assert_eq!(r, EncodeResult::ok(1, 2));
        assert_eq!(&target[..2], &[DLE, STX ^ DLE]);

        let r = DleCodec::encode(&[ETX], &mut target);
        assert_eq!(&target[..2], &[DLE, ETX ^ DLE]);

        let r2 = DleCodec::encode(&[DLE], &mut target);
        assert_eq!(&target[..r2.bytes_written], &[DLE, DLE ^ DLE]);
    }

    #[test]
    fn non_reserved_bytes_pass_through_identity() {
        let mut source = [0u8; 253];
        let mut i = 0usize;
        for b in 0u16..=255 {
            let b = b as u8;
            if is_reserved(b) {
                continue;
            }
            source[i] = b;
            i += 1;
        }

        let mut target = [0u8; 256];
        let r = DleCodec::encode(&source, &mut target);
        assert_eq!(r.bytes_written, source.len());
        assert_eq!(&target[..r.bytes_written], &source[..]);
    }

    #[test]
    fn s8_truncation_on_trailing_lone_dle() {
        let mut target = [0u8; 8];
        let r = DleCodec::decode(&[0x20, 0x21, DLE], &mut target);
        assert_eq!(r, EncodeResult::ok(2, 2));
        assert_eq!(&target[..2], &[0x20, 0x21]);
    }

    #[test]
    fn s9_malformed_variants() {
        let cases: [&[u8]; 5] = [
            &[0x01, STX],
            &[0x01, ETX],
            &[0x01, DLE, STX],
            &[0x01, DLE, ETX],
            &[0x01, DLE, DLE],
        ];
        for case in cases {
            let mut target = [0u8; 8];
            let r = DleCodec::decode(case, &mut target);
            assert_eq!(r.error, Some(Error::Malformed), "case {:?}", case);
            assert_eq!(r.bytes_read, 1);
            assert_eq!(&target[..r.bytes_written], &[0x01]);
        }
    }

    #[test]
    fn round_trip_arbitrary_payload() {
        let source: [u8; 7] = [0x00, STX, 0xFF, ETX, DLE, 0x7F, 0x01];
        let mut encoded = [0u8; 32];
        let enc = DleCodec::encode(&source, &mut encoded);
        assert!(enc.is_ok());
        let mut decoded = [0u8; 32];
        let dec = DleCodec::decode(&encoded[..enc.bytes_written], &mut decoded);
        assert!(dec.is_ok());
        assert_eq!(&decoded[..dec.bytes_written], &source);
    }

    #[test]
    fn in_place_encode_matches_two_buffer_form() {
        let mut pdu: Pdu<32> = Pdu::new();
        let payload = [STX, 0x41, DLE, ETX, 0x42];
        assert!(pdu.put_down_bytes(&payload));
        pdu.set_data_len(payload.len());
        pdu.reset_cursor();

        let mut expected = [0u8; 16];
        let two_buffer = DleCodec::encode(&payload, &mut expected);

        DleCodec::encode_in_place(&mut pdu).unwrap();
        assert_eq!(pdu.get_data_len(), two_buffer.bytes_written);
        assert_eq!(pdu.data(), &expected[..two_buffer.bytes_written]);
    }
}
