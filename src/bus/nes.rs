/*!
NES-style CPU address map without the picture/audio/controller devices.

Address map (CPU):
- $0000-$07FF: 2KB internal RAM
- $0800-$1FFF: Mirrors of $0000-$07FF (mask with & 0x07FF)
- $2000-$5FFF: PPU / APU / I/O / expansion registers. Those devices are
  external collaborators and are not modeled here, so any access reports
  `BusError::AddressOutOfRange`.
- $6000-$7FFF: 8 KiB work RAM
- $8000-$FFFF: Program image. A 16 KiB image is mirrored into $C000-$FFFF
  (NROM-128 layout); a 32 KiB image fills the window. Writes are ignored.

Program images are raw bytes; cartridge file formats are not parsed.
*/

use crate::bus::Bus;
use crate::bus::ram::{CPU_RAM_MIRROR_END, Ram};
use crate::error::BusError;

const WORK_RAM_START: u16 = 0x6000;
const WORK_RAM_SIZE: usize = 0x2000;
const PROGRAM_START: u16 = 0x8000;
const PROGRAM_BANK: usize = 0x4000;
const PROGRAM_WINDOW: usize = 0x8000;

pub struct NesBus {
    ram: Ram,
    work_ram: Box<[u8]>,
    program: Vec<u8>,
}

impl Default for NesBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NesBus {
    /// Empty bus: zeroed RAM and a 16 KiB program bank filled with $FF.
    pub fn new() -> Self {
        Self {
            ram: Ram::new(),
            work_ram: vec![0u8; WORK_RAM_SIZE].into_boxed_slice(),
            program: vec![0xFF; PROGRAM_BANK],
        }
    }

    /// Build a bus around a raw program image (at most 32 KiB).
    ///
    /// Images up to 16 KiB are padded with $FF to a full bank and mirrored;
    /// larger images are padded to 32 KiB.
    pub fn with_program(image: &[u8]) -> Result<Self, BusError> {
        let mut bus = Self::new();
        bus.load_program(image)?;
        Ok(bus)
    }

    pub fn load_program(&mut self, image: &[u8]) -> Result<(), BusError> {
        if image.len() > PROGRAM_WINDOW {
            return Err(BusError::ImageTooLarge {
                len: image.len(),
                max: PROGRAM_WINDOW,
            });
        }
        let size = if image.len() <= PROGRAM_BANK {
            PROGRAM_BANK
        } else {
            PROGRAM_WINDOW
        };
        self.program = vec![0xFF; size];
        self.program[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Patch the NMI / RESET / IRQ vectors inside the program image.
    pub fn set_vectors(&mut self, reset: u16, nmi: u16, irq: u16) {
        for (addr, value) in [(0xFFFAu16, nmi), (0xFFFC, reset), (0xFFFE, irq)] {
            let [lo, hi] = value.to_le_bytes();
            let idx = self.program_index(addr);
            self.program[idx] = lo;
            let idx = self.program_index(addr + 1);
            self.program[idx] = hi;
        }
    }

    /// Direct access to the internal RAM (debugger / test inspection).
    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    /// Clear RAM and work RAM; the program image is kept.
    pub fn clear_ram(&mut self) {
        self.ram.clear();
        self.work_ram.fill(0);
    }

    #[inline]
    fn program_index(&self, addr: u16) -> usize {
        (addr - PROGRAM_START) as usize % self.program.len()
    }
}

impl Bus for NesBus {
    fn get(&mut self, addr: u16) -> Result<u8, BusError> {
        match addr {
            0x0000..=CPU_RAM_MIRROR_END => Ok(self.ram.read(addr)),
            0x2000..=0x5FFF => Err(BusError::AddressOutOfRange(addr)),
            0x6000..=0x7FFF => Ok(self.work_ram[(addr - WORK_RAM_START) as usize]),
            0x8000..=0xFFFF => Ok(self.program[self.program_index(addr)]),
        }
    }

    fn set(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        match addr {
            0x0000..=CPU_RAM_MIRROR_END => self.ram.write(addr, value),
            0x2000..=0x5FFF => return Err(BusError::AddressOutOfRange(addr)),
            0x6000..=0x7FFF => self.work_ram[(addr - WORK_RAM_START) as usize] = value,
            // Program space is read-only; writes are dropped.
            0x8000..=0xFFFF => {}
        }
        Ok(())
    }
}
