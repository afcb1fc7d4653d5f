//! pool.rs
//!
//! A fixed array of PDU slots with linear first-fit allocation and an
//! exclusive, move-only handle that reclaims its slot on drop. No heap
//! allocation; single-owner, single-threaded discipline (see the crate's
//! concurrency notes) enforced with `RefCell`, not raw pointers.

#![allow(dead_code)]

use crate::diagnostics::{DiagnosticDomain, DiagnosticLogLevel, Diagnostics, NullDiagnostics};
use crate::error::Error;
use crate::pdu::Pdu;
use core::cell::{Cell, RefCell};

struct Slot<const S: usize> {
    pdu: RefCell<Pdu<S>>,
    free: Cell<bool>,
}

/// Owns `N` fixed slots of `Pdu<S>`. Not `Sync`; see the crate's
/// concurrency notes. Allocation is a linear first-fit scan, which is
/// adequate at the pool sizes this core targets (single digits to low
/// hundreds of slots).
pub struct PduPool<'d, const S: usize, const N: usize> {
    slots: [Slot<S>; N],
    diagnostics: &'d dyn Diagnostics,
}

impl<const S: usize, const N: usize> PduPool<'static, S, N> {
    /// A pool with no diagnostics sink attached.
    pub fn new() -> Self {
        Self::with_diagnostics(&NullDiagnostics)
    }
}

impl<'d, const S: usize, const N: usize> PduPool<'d, S, N> {
    /// A pool that reports allocate/free activity through `diagnostics`.
    pub fn with_diagnostics(diagnostics: &'d dyn Diagnostics) -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot {
                pdu: RefCell::new(Pdu::new()),
                free: Cell::new(true),
            }),
            diagnostics,
        }
    }

    /// The pool's fixed capacity, `N`.
    #[inline]
    pub fn capacity(&self) -> usize {
        N
    }

    /// Number of slots currently free.
    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| s.free.get()).count()
    }

    /// Scans for the first free slot, marks it in-use with the given
    /// window, and returns an exclusive handle. `None` when `len + offset
    /// > S` or no slot is free.
    pub fn allocate(&self, len: usize, offset: usize) -> Option<PduHandle<'_, 'd, S, N>> {
        if len + offset > S {
            self.diagnostics.log(
                DiagnosticDomain::Memory,
                DiagnosticLogLevel::Error,
                "allocate: requested window exceeds slot capacity",
            );
            return None;
        }
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.free.get() {
                slot.free.set(false);
                let mut pdu = slot.pdu.borrow_mut();
                pdu.reset();
                pdu.set_data_len(len);
                pdu.set_offset(offset);
                pdu.reset_cursor();
                drop(pdu);
                self.diagnostics.log(
                    DiagnosticDomain::Memory,
                    DiagnosticLogLevel::Trace,
                    "allocate: slot acquired",
                );
                return Some(PduHandle { pool: self, index });
            }
        }
        self.diagnostics.log(
            DiagnosticDomain::Memory,
            DiagnosticLogLevel::Error,
            "allocate: pool exhausted",
        );
        None
    }

    /// `allocate(capacity, 0)`.
    pub fn allocate_default(&self) -> Option<PduHandle<'_, 'd, S, N>> {
        self.allocate(S, 0)
    }

    fn free(&self, index: usize) {
        let slot = &self.slots[index];
        debug_assert!(!slot.free.get(), "freeing an already-free pool slot");
        if slot.free.get() {
            self.diagnostics.log(
                DiagnosticDomain::Memory,
                DiagnosticLogLevel::Error,
                "free: slot was already free",
            );
            return;
        }
        slot.pdu.borrow_mut().reset();
        slot.free.set(true);
        self.diagnostics.log(
            DiagnosticDomain::Memory,
            DiagnosticLogLevel::Trace,
            "free: slot reclaimed",
        );
    }
}

/// Exclusive reference to a live pool slot. There is at most one handle per
/// slot at any moment; dropping it reclaims the slot (asserting it was
/// in-use) and zeroes its storage.
pub struct PduHandle<'p, 'd, const S: usize, const N: usize> {
    pool: &'p PduPool<'d, S, N>,
    index: usize,
}

impl<'p, 'd, const S: usize, const N: usize> PduHandle<'p, 'd, S, N> {
    #[inline]
    pub fn pdu(&self) -> core::cell::Ref<'_, Pdu<S>> {
        self.pool.slots[self.index].pdu.borrow()
    }

    #[inline]
    pub fn pdu_mut(&mut self) -> core::cell::RefMut<'_, Pdu<S>> {
        self.pool.slots[self.index].pdu.borrow_mut()
    }
}

impl<'p, 'd, const S: usize, const N: usize> Drop for PduHandle<'p, 'd, S, N> {
    fn drop(&mut self) {
        self.pool.free(self.index);
    }
}

/// Allocates, or reports [`Error::Exhausted`].
pub fn allocate_or_exhausted<'p, 'd, const S: usize, const N: usize>(
    pool: &'p PduPool<'d, S, N>,
    len: usize,
    offset: usize,
) -> Result<PduHandle<'p, 'd, S, N>, Error> {
    pool.allocate(len, offset).ok_or(Error::Exhausted)
}
