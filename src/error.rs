//! error.rs
//!
//! The error taxonomy shared by every layer of the stack (see the Error
//! Handling Design section of the spec this crate implements).

#![allow(dead_code)]

/// Failure reported by a fallible operation in the stack.
///
/// All failures surface as a return value; nothing in this crate panics or
/// unwinds on the hot path, and nothing is silently retried internally.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// Target buffer or PDU window too small to hold the output/CRC.
    /// Non-recoverable for that PDU; the caller should drop or resize it.
    OutOfSpace,
    /// Decoder reached end-of-input at a natural boundary (e.g. a trailing
    /// lone DLE byte). Recoverable if more input may arrive later.
    Truncated,
    /// Decoder detected a protocol violation: a literal 0x00 inside a COBS
    /// stream, a bare STX/ETX inside a DLE stream, DLE followed by an
    /// unescaped reserved byte, or a CRC mismatch. Non-recoverable for that
    /// PDU.
    Malformed,
    /// The PDU pool has no free slot. The caller must release a PDU and
    /// retry, or back-pressure upstream.
    Exhausted,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::OutOfSpace => "out of space",
            Error::Truncated => "truncated input",
            Error::Malformed => "malformed input",
            Error::Exhausted => "pool exhausted",
        };
        f.write_str(msg)
    }
}
