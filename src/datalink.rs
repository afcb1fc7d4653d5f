//! datalink.rs
//!
//! The layer applications talk to: on encode, append a big-endian CRC-32
//! trailer over a PDU's payload; on decode, verify and strip it. As
//! documented in the design notes this was translated from, the layer
//! holds a frame encoder member but does not invoke it on either path —
//! CRC append/verify only. That omission is preserved deliberately rather
//! than "fixed", since whether framing composition belongs at this layer
//! or above it is a decision for the caller, not this core.

#![allow(dead_code)]

use crate::crc32::Crc32Engine;
use crate::frame::FrameEncoder;
use crate::pool::PduHandle;

/// Composes a frame codec and a CRC-32 engine over pooled PDUs. Stateless
/// between calls; holds both collaborators as owned members, configured
/// at construction.
pub struct DatalinkLayer<TEncoder, TCrc> {
    #[allow(dead_code)]
    encoder: TEncoder,
    crc: TCrc,
}

impl<TEncoder, TCrc> DatalinkLayer<TEncoder, TCrc>
where
    TEncoder: FrameEncoder,
    TCrc: Crc32Engine,
{
    pub fn new(encoder: TEncoder, crc: TCrc) -> Self {
        Self { encoder, crc }
    }

    /// Appends a CRC-32 trailer over `handle`'s current `data()` window.
    /// Consumes `handle` on failure (insufficient room to grow by
    /// `crc_size()`).
    pub fn encode<'p, 'd, const S: usize, const N: usize>(
        &self,
        mut handle: PduHandle<'p, 'd, S, N>,
    ) -> Option<PduHandle<'p, 'd, S, N>> {
        let crc_size = self.crc.crc_size();
        let digest = {
            let pdu = handle.pdu();
            self.crc.calc_block(pdu.data())
        };

        let mut pdu = handle.pdu_mut();
        let new_len = pdu.get_data_len() + crc_size;
        if !pdu.set_data_len(new_len) {
            drop(pdu);
            return None;
        }
        pdu.reset_cursor();
        if !pdu.skip_write(new_len - crc_size) {
            drop(pdu);
            return None;
        }
        if !pdu.put_down(digest) {
            drop(pdu);
            return None;
        }
        drop(pdu);
        Some(handle)
    }

    /// Verifies and strips the trailing CRC-32. Consumes `handle` on
    /// failure (not enough data to hold a trailer, or a mismatch).
    pub fn decode<'p, 'd, const S: usize, const N: usize>(
        &self,
        mut handle: PduHandle<'p, 'd, S, N>,
    ) -> Option<PduHandle<'p, 'd, S, N>> {
        let crc_size = self.crc.crc_size();
        let (expected, digest, payload_len) = {
            let pdu = handle.pdu();
            let len = pdu.get_data_len();
            if len < crc_size {
                return None;
            }
            let payload_len = len - crc_size;
            let data = pdu.data();
            let trailer = &data[payload_len..len];
            let expected = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
            let digest = self.crc.calc_block(&data[..payload_len]);
            (expected, digest, payload_len)
        };

        if expected != digest {
            return None;
        }

        let mut pdu = handle.pdu_mut();
        if !pdu.set_data_len(payload_len) {
            drop(pdu);
            return None;
        }
        pdu.reset_cursor();
        drop(pdu);
        Some(handle)
    }
}
