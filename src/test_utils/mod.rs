//! Shared test utilities for building small program images on a flat bus.
//!
//! Every helper loads the program at `$8000` and points the reset vector
//! there, so a freshly powered-on CPU starts executing the first byte.
//! NMI and IRQ vectors point at fixed handler addresses away from the
//! addresses the tests use for data and jump targets.

#![allow(dead_code)]

use crate::bus::FlatMemory;

/// Address a freshly powered-on CPU starts at.
pub const PROGRAM_START: u16 = 0x8000;
/// Target of the NMI vector in `program_bus`.
pub const NMI_HANDLER: u16 = 0xA000;
/// Target of the IRQ/BRK vector in `program_bus`.
pub const IRQ_HANDLER: u16 = 0xB000;

/// Flat 64 KiB bus with `prg` at `$8000` and all three vectors set.
pub fn program_bus(prg: &[u8]) -> FlatMemory {
    let mut bus = FlatMemory::new();
    bus.load(PROGRAM_START, prg);
    bus.set_vectors(PROGRAM_START, NMI_HANDLER, IRQ_HANDLER);
    bus
}
