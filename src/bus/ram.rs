/*!
RAM module: the 2 KiB CPU RAM with mirrored access.

CPU address map for internal RAM:
- $0000-$07FF: 2 KiB internal RAM
- $0800-$1FFF: Mirrors of $0000-$07FF (mask with & 0x07FF)

`Ram` is owned by `NesBus`, but it also implements `Bus` directly so small
programs that live entirely in zero page / stack page can run against it.
Addresses above $1FFF are rejected with `BusError::AddressOutOfRange`.
*/

use crate::bus::Bus;
use crate::error::BusError;

/// Size of CPU internal RAM (in bytes).
pub const CPU_RAM_SIZE: usize = 0x0800;

/// Highest CPU address decoded by the RAM mirrors.
pub const CPU_RAM_MIRROR_END: u16 = 0x1FFF;

/// CPU internal RAM with mirrored access helpers.
#[derive(Clone)]
pub struct Ram {
    data: [u8; CPU_RAM_SIZE],
}

impl Default for Ram {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ram").field("size", &CPU_RAM_SIZE).finish()
    }
}

impl Ram {
    /// Create a new RAM instance initialized to 0.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0; CPU_RAM_SIZE],
        }
    }

    /// Clear RAM contents to 0.
    #[inline]
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Read a byte from CPU-visible RAM space ($0000-$1FFF), applying 2 KiB mirroring.
    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[Self::mirror_index(addr)]
    }

    /// Write a byte to CPU-visible RAM space ($0000-$1FFF), applying 2 KiB mirroring.
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[Self::mirror_index(addr)] = value;
    }

    /// Expose the internal slice (read-only). Useful for diagnostics or hashing.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Compute the physical RAM index for a CPU address using 2 KiB mirroring.
    #[inline]
    pub fn mirror_index(addr: u16) -> usize {
        (addr as usize) & (CPU_RAM_SIZE - 1)
    }
}

impl Bus for Ram {
    fn get(&mut self, addr: u16) -> Result<u8, BusError> {
        if addr > CPU_RAM_MIRROR_END {
            return Err(BusError::AddressOutOfRange(addr));
        }
        Ok(self.read(addr))
    }

    fn set(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        if addr > CPU_RAM_MIRROR_END {
            return Err(BusError::AddressOutOfRange(addr));
        }
        self.write(addr, value);
        Ok(())
    }
}
