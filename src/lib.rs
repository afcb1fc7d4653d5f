//! A fixed-memory PDU pool, COBS/DLE framing codecs, a configurable
//! CRC-32 engine, and a datalink layer that composes them — the core of
//! an embedded-style communications stack. `no_std`, no heap allocation
//! in steady state, single-threaded discipline throughout; see the
//! per-module docs for the concurrency and memory model each type
//! upholds.

#![no_std]

pub mod cobs;
pub mod crc32;
pub mod datalink;
pub mod diagnostics;
pub mod dle;
pub mod error;
pub mod frame;
pub mod pdu;
pub mod pool;

pub use cobs::CobsCodec;
pub use crc32::{Crc32Calculator, Crc32Engine, Crc32Params};
pub use datalink::DatalinkLayer;
pub use diagnostics::{DiagnosticDomain, DiagnosticLogLevel, Diagnostics, NullDiagnostics};
pub use dle::DleCodec;
pub use error::Error;
pub use frame::{EncodeResult, FrameEncoder};
pub use pdu::Pdu;
pub use pool::{PduHandle, PduPool};

#[cfg(feature = "defmt")]
pub use diagnostics::DefmtDiagnostics;
