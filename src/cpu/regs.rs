/*!
regs.rs - `CpuRegs` trait: the register + flag interface used by every
instruction helper and opcode handler.

The trait does NOT include bus access, stack push/pop or instruction fetch.
Those stay explicit at call sites (`&mut dyn Bus`) so handlers never borrow
more than they need.

Required methods are the raw register accessors; everything flag-related is
a default method built on `status` / `set_status`, so each named flag helper
only ever touches its own bit.
*/

use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};

/// Register + flag API of the 6502.
///
/// Handlers in the opcode table receive `&mut dyn CpuRegs`; the helpers in
/// `execute` are generic over `C: CpuRegs + ?Sized` so both forms work.
pub trait CpuRegs {
    // ---------------------------------------------------------------------
    // Read accessors
    // ---------------------------------------------------------------------
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn pc(&self) -> u16;
    fn status(&self) -> u8;

    // ---------------------------------------------------------------------
    // Mutators
    // ---------------------------------------------------------------------
    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_pc(&mut self, v: u16);
    /// Replace P. Implementations keep bit 5 set.
    fn set_status(&mut self, v: u8);

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    fn advance_pc(&mut self, delta: u16) {
        let pc = self.pc().wrapping_add(delta);
        self.set_pc(pc);
    }

    // ---------------------------------------------------------------------
    // Flag operations
    // ---------------------------------------------------------------------

    #[inline]
    fn is_flag_set(&self, mask: u8) -> bool {
        (self.status() & mask) != 0
    }

    /// Set or clear exactly the bits in `mask`.
    #[inline]
    fn assign_flag(&mut self, mask: u8, value: bool) {
        let s = self.status();
        self.set_status(if value { s | mask } else { s & !mask });
    }

    #[inline]
    fn is_carry(&self) -> bool {
        self.is_flag_set(CARRY)
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.is_flag_set(ZERO)
    }
    #[inline]
    fn is_interrupt_disable(&self) -> bool {
        self.is_flag_set(IRQ_DISABLE)
    }
    #[inline]
    fn is_decimal(&self) -> bool {
        self.is_flag_set(DECIMAL)
    }
    #[inline]
    fn is_overflow(&self) -> bool {
        self.is_flag_set(OVERFLOW)
    }
    #[inline]
    fn is_negative(&self) -> bool {
        self.is_flag_set(NEGATIVE)
    }

    #[inline]
    fn set_carry(&mut self, on: bool) {
        self.assign_flag(CARRY, on);
    }
    #[inline]
    fn set_zero(&mut self, on: bool) {
        self.assign_flag(ZERO, on);
    }
    #[inline]
    fn set_interrupt_disable(&mut self, on: bool) {
        self.assign_flag(IRQ_DISABLE, on);
    }
    #[inline]
    fn set_decimal(&mut self, on: bool) {
        self.assign_flag(DECIMAL, on);
    }
    #[inline]
    fn set_overflow(&mut self, on: bool) {
        self.assign_flag(OVERFLOW, on);
    }
    #[inline]
    fn set_negative(&mut self, on: bool) {
        self.assign_flag(NEGATIVE, on);
    }

    /// Composite: ZERO and NEGATIVE from a result byte.
    #[inline]
    fn update_zn(&mut self, result: u8) {
        self.set_zero(result == 0);
        self.set_negative((result & 0x80) != 0);
    }

    /// Status byte as written to the stack.
    /// - UNUSED always set
    /// - BREAK set for PHP / BRK, clear for IRQ / NMI
    #[inline]
    fn compose_status_for_push(&self, set_break: bool) -> u8 {
        let v = self.status() | UNUSED;
        if set_break { v | BREAK } else { v & !BREAK }
    }

    /// Load P from a byte pulled off the stack (PLP / RTI): BREAK is dropped,
    /// UNUSED is forced.
    #[inline]
    fn restore_status_from_stack(&mut self, pulled: u8) {
        self.set_status((pulled & !BREAK) | UNUSED);
    }
}

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    fn status(&self) -> u8 {
        self.status
    }

    #[inline]
    fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    fn set_status(&mut self, v: u8) {
        self.status = v | UNUSED;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_setters_touch_only_their_bit() {
        let all: [(u8, fn(&mut CpuState, bool)); 6] = [
            (CARRY, <CpuState as CpuRegs>::set_carry),
            (ZERO, <CpuState as CpuRegs>::set_zero),
            (IRQ_DISABLE, <CpuState as CpuRegs>::set_interrupt_disable),
            (DECIMAL, <CpuState as CpuRegs>::set_decimal),
            (OVERFLOW, <CpuState as CpuRegs>::set_overflow),
            (NEGATIVE, <CpuState as CpuRegs>::set_negative),
        ];
        for start in [0x20u8, 0xFF] {
            for &(mask, setter) in &all {
                let mut s = CpuState { status: start, ..CpuState::default() };
                setter(&mut s, true);
                assert_eq!(s.status, start | mask);
                setter(&mut s, false);
                assert_eq!(s.status, (start | UNUSED) & !mask);
            }
        }
    }

    #[test]
    fn predicates_follow_bits() {
        let mut s = CpuState::default();
        s.set_status(CARRY | OVERFLOW);
        assert!(s.is_carry());
        assert!(s.is_overflow());
        assert!(!s.is_zero());
        assert!(!s.is_negative());
        assert!(!s.is_interrupt_disable());
        assert!(!s.is_decimal());
    }

    #[test]
    fn update_zn_behavior() {
        let mut s = CpuState::default();
        s.update_zn(0x00);
        assert!(s.is_zero() && !s.is_negative());
        s.update_zn(0x80);
        assert!(!s.is_zero() && s.is_negative());
        s.update_zn(0x7F);
        assert!(!s.is_zero() && !s.is_negative());
    }

    #[test]
    fn set_status_pins_unused_bit() {
        let mut s = CpuState::default();
        s.set_status(0x00);
        assert_eq!(s.status(), UNUSED);
    }

    #[test]
    fn status_push_and_restore() {
        let mut s = CpuState::default();
        s.set_status(CARRY);
        assert_eq!(s.compose_status_for_push(true), CARRY | UNUSED | BREAK);
        assert_eq!(s.compose_status_for_push(false), CARRY | UNUSED);

        s.restore_status_from_stack(0xFF);
        assert_eq!(s.status(), 0xFF & !BREAK);
        s.restore_status_from_stack(0x00);
        assert_eq!(s.status(), UNUSED);
    }

    #[test]
    fn pc_advance_wraps() {
        let mut s = CpuState::default();
        s.set_pc(0xFFFF);
        s.advance_pc(1);
        assert_eq!(s.pc(), 0x0000);
        s.advance_pc(2);
        assert_eq!(s.pc(), 0x0002);
    }
}
