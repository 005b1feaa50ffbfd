#![doc = r#"
Bus module: the CPU's memory capability and the concrete buses shipped with the crate.

Overview
- `Bus` is the only thing the CPU core requires of its environment: byte `get`/`set`
  over a 16-bit address space. Mirroring and device mapping belong to the
  implementation, never to the core.
- `peek` is a side-effect-free read used by the trace recorder. Buses whose reads
  have side effects (I/O latches) must override it; the default forwards to `get`.

Modules and responsibilities
- ram: 2 KiB internal RAM with the $0000-$1FFF mirroring rule.
- flat: fully mapped 64 KiB memory, mainly for tests and single-step vectors.
- nes: NES-style CPU map (mirrored RAM, work RAM, program image); unmapped windows
  report `BusError::AddressOutOfRange`.
"#]

use crate::error::BusError;

pub mod flat;
pub mod nes;
pub mod ram;

pub use flat::FlatMemory;
pub use nes::NesBus;
pub use ram::Ram;

/// Byte-addressable memory capability consumed by the CPU core.
///
/// The core assumes no mutation happens *during* one of its steps; devices
/// sharing the bus may act between steps.
pub trait Bus {
    /// Read a byte. May have device side effects.
    fn get(&mut self, addr: u16) -> Result<u8, BusError>;

    /// Write a byte.
    fn set(&mut self, addr: u16, value: u8) -> Result<(), BusError>;

    /// Read a byte for observation only (trace / debugger).
    #[inline]
    fn peek(&mut self, addr: u16) -> Result<u8, BusError> {
        self.get(addr)
    }

    /// Little-endian word read (low at `addr`, high at `addr + 1`, wrapping at $FFFF).
    /// Used for the interrupt / reset vectors.
    #[inline]
    fn get_word(&mut self, addr: u16) -> Result<u16, BusError> {
        let lo = self.get(addr)? as u16;
        let hi = self.get(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }
}
