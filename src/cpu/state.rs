/*!
state.rs - Canonical 6502 CPU architectural state (registers + flags).

Overview
========
`CpuState` is the single owner of all architecturally visible registers.
It excludes:
  - Bus / memory logic
  - Instruction decode / dispatch logic
  - Cycle accounting
Those live in higher layers (dispatch, execute, core).

`CpuState` is `Copy`. The dispatcher executes every instruction against a
copy and commits it only when the instruction completes, so a failing step
never leaves the register file half-updated.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always reads as 1)
  B = BREAK (only exists on the stack copy: PHP/BRK push 1, IRQ/NMI push 0)
  D = DECIMAL (stored, but the 2A03 has no decimal arithmetic)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
*/

use crate::bus::Bus;
use crate::error::BusError;

/// Processor status flag bit masks (canonical definitions).
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000;
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// SP after the power-on reset sequence.
pub const POWER_ON_SP: u8 = 0xFD;
/// P after the power-on reset sequence ($24: I and the unused bit).
pub const POWER_ON_STATUS: u8 = IRQ_DISABLE | UNUSED;

/// Pure architectural register / flag container for the 6502 CPU.
///
/// Prefer the `CpuRegs` accessors over direct field mutation: `set_status`
/// keeps bit 5 pinned, a raw field write does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: POWER_ON_SP,
            pc: 0x0000,
            status: POWER_ON_STATUS,
        }
    }
}

impl CpuState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full power-on initialization: A=X=Y=0, SP=$FD, P=$24, PC from $FFFC/$FFFD.
    ///
    /// On a bus error the state is left untouched.
    pub fn power_on(&mut self, bus: &mut dyn Bus) -> Result<(), BusError> {
        let pc = bus.get_word(RESET_VECTOR)?;
        *self = Self { pc, ..Self::default() };
        Ok(())
    }

    /// Warm reset: A/X/Y survive, SP drops by 3 (the suppressed pushes),
    /// I is set and PC is reloaded from the reset vector.
    pub fn reset(&mut self, bus: &mut dyn Bus) -> Result<(), BusError> {
        let pc = bus.get_word(RESET_VECTOR)?;
        self.sp = self.sp.wrapping_sub(3);
        self.status |= IRQ_DISABLE | UNUSED;
        self.pc = pc;
        Ok(())
    }

    /// Return true if any bit of `mask` is set in P.
    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }
}
