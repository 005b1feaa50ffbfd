//! Flat 64 KiB memory: every address is plain RAM, no mirroring, no devices.
//!
//! This is the bus used by unit tests, single-step vectors and the trace
//! golden-log comparisons, where every byte of the address space must be
//! directly addressable.

use crate::bus::Bus;
use crate::error::BusError;

pub const FLAT_SIZE: usize = 0x1_0000;

#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8]>,
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory").finish_non_exhaustive()
    }
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            data: vec![0u8; FLAT_SIZE].into_boxed_slice(),
        }
    }

    /// Copy `bytes` into memory starting at `addr`, wrapping past $FFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut a = addr;
        for &b in bytes {
            self.data[a as usize] = b;
            a = a.wrapping_add(1);
        }
    }

    /// Store a little-endian word (used for the $FFFA/$FFFC/$FFFE vectors).
    pub fn load_word(&mut self, addr: u16, value: u16) {
        self.load(addr, &value.to_le_bytes());
    }

    /// Point the NMI, RESET and IRQ/BRK vectors at the given addresses.
    pub fn set_vectors(&mut self, reset: u16, nmi: u16, irq: u16) {
        self.load_word(0xFFFA, nmi);
        self.load_word(0xFFFC, reset);
        self.load_word(0xFFFE, irq);
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

impl Bus for FlatMemory {
    #[inline]
    fn get(&mut self, addr: u16) -> Result<u8, BusError> {
        Ok(self.read(addr))
    }

    #[inline]
    fn set(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        self.write(addr, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_wraps_at_top_of_memory() {
        let mut m = FlatMemory::new();
        m.load(0xFFFF, &[0x11, 0x22]);
        assert_eq!(m.read(0xFFFF), 0x11);
        assert_eq!(m.read(0x0000), 0x22);
    }

    #[test]
    fn vectors_are_little_endian() {
        let mut m = FlatMemory::new();
        m.set_vectors(0x8000, 0x9000, 0xA000);
        assert_eq!(m.get_word(0xFFFC), Ok(0x8000));
        assert_eq!(m.get_word(0xFFFA), Ok(0x9000));
        assert_eq!(m.get_word(0xFFFE), Ok(0xA000));
        assert_eq!(m.read(0xFFFC), 0x00);
        assert_eq!(m.read(0xFFFD), 0x80);
    }
}
