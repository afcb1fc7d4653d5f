//! diagnostics.rs
//!
//! Diagnostic logging sink. The core never talks to a concrete logger; it
//! only needs "emit a line at (domain, level)", injected at construction.
//! `NullDiagnostics` is the zero-cost default. Enable the `defmt` feature
//! for `DefmtDiagnostics`, which forwards to `defmt`'s structured logging
//! macros on-target.

#![allow(dead_code)]

/// Which subsystem a diagnostic line came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagnosticDomain {
    Memory,
    Framing,
    Crc,
    Datalink,
}

/// Severity of a diagnostic line.
///
/// `None` and `All` are sentinel values for configuring a logger's
/// threshold; they are not valid levels to pass to [`Diagnostics::log`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagnosticLogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
    /// Sentinel: disables a logger entirely. Not a message level.
    None,
    /// Sentinel: enables every level. Not a message level.
    All,
}

/// One method: emit a line at a given domain/level.
pub trait Diagnostics {
    fn log(&self, domain: DiagnosticDomain, level: DiagnosticLogLevel, msg: &str);
}

/// Discards every line. The default sink when none is supplied.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    #[inline]
    fn log(&self, _domain: DiagnosticDomain, _level: DiagnosticLogLevel, _msg: &str) {}
}

/// Forwards to `defmt`'s global logger, bucketed by [`DiagnosticLogLevel`].
#[cfg(feature = "defmt")]
#[derive(Copy, Clone, Debug, Default)]
pub struct DefmtDiagnostics;

#[cfg(feature = "defmt")]
impl Diagnostics for DefmtDiagnostics {
    fn log(&self, domain: DiagnosticDomain, level: DiagnosticLogLevel, msg: &str) {
        match level {
            DiagnosticLogLevel::Trace => defmt::trace!("[{}] {}", domain, msg),
            DiagnosticLogLevel::Debug => defmt::debug!("[{}] {}", domain, msg),
            DiagnosticLogLevel::Info => defmt::info!("[{}] {}", domain, msg),
            DiagnosticLogLevel::Warning => defmt::warn!("[{}] {}", domain, msg),
            DiagnosticLogLevel::Error | DiagnosticLogLevel::Fatal => {
                defmt::error!("[{}] {}", domain, msg)
            }
            // Sentinels; nothing to emit.
            DiagnosticLogLevel::None | DiagnosticLogLevel::All => {}
        }
    }
}
