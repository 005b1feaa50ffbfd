/*!
execute.rs - 6502 instruction semantic helpers (ALU, flags, stack, RMW).

Purpose
=======
Centralize the side effects of every instruction so the opcode handlers in
`dispatch` stay one-liners over resolved operands. All helpers are generic
over `C: CpuRegs + ?Sized` (they run on `CpuState` directly and on the
`&mut dyn CpuRegs` the opcode table hands out).

Scope
-----
Stack:
    push, pop, push_word, pop_word
Operand access:
    read_operand, write_operand, modify
Loads / transfers:
    lda/ldx/ldy, tax/tay/txa/tya/tsx/txs
Logical / bit:
    and/ora/eor/bit
Arithmetic:
    adc/sbc (binary only), compare, inc/dec (register and value)
Shifts / rotates:
    asl/lsr/rol/ror as value transforms, applied to A or memory via `modify`

Every helper that touches the bus returns `Result<_, BusError>`; register
and flag helpers are total.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::STACK_BASE;
use crate::error::BusError;

// ---------------------------------------------------------------------------
// Stack helpers
// ---------------------------------------------------------------------------
//
//   Push: write at $0100 | SP, then SP = SP - 1
//   Pull: SP = SP + 1, then read at $0100 | SP
// SP wraps in both directions; overflow is not an error.

#[inline]
pub(crate) fn push<C: CpuRegs + ?Sized>(
    cpu: &mut C,
    bus: &mut dyn Bus,
    v: u8,
) -> Result<(), BusError> {
    let sp = cpu.sp();
    bus.set(STACK_BASE | sp as u16, v)?;
    cpu.set_sp(sp.wrapping_sub(1));
    Ok(())
}

#[inline]
pub(crate) fn pop<C: CpuRegs + ?Sized>(cpu: &mut C, bus: &mut dyn Bus) -> Result<u8, BusError> {
    let sp = cpu.sp().wrapping_add(1);
    let v = bus.get(STACK_BASE | sp as u16)?;
    cpu.set_sp(sp);
    Ok(v)
}

/// Push a return address: high byte first.
#[inline]
pub(crate) fn push_word<C: CpuRegs + ?Sized>(
    cpu: &mut C,
    bus: &mut dyn Bus,
    v: u16,
) -> Result<(), BusError> {
    push(cpu, bus, (v >> 8) as u8)?;
    push(cpu, bus, (v & 0xFF) as u8)
}

/// Pop a return address: low byte first.
#[inline]
pub(crate) fn pop_word<C: CpuRegs + ?Sized>(
    cpu: &mut C,
    bus: &mut dyn Bus,
) -> Result<u16, BusError> {
    let lo = pop(cpu, bus)? as u16;
    let hi = pop(cpu, bus)? as u16;
    Ok((hi << 8) | lo)
}

// ---------------------------------------------------------------------------
// Operand access
// ---------------------------------------------------------------------------

/// Fetch the value an instruction operates on.
#[inline]
pub(crate) fn read_operand<C: CpuRegs + ?Sized>(
    cpu: &C,
    bus: &mut dyn Bus,
    operand: Operand,
) -> Result<u8, BusError> {
    match operand {
        Operand::Address { addr, .. } => bus.get(addr),
        Operand::Accumulator => Ok(cpu.a()),
        Operand::None => unreachable!("read of an implied operand"),
    }
}

#[inline]
pub(crate) fn write_operand<C: CpuRegs + ?Sized>(
    cpu: &mut C,
    bus: &mut dyn Bus,
    operand: Operand,
    v: u8,
) -> Result<(), BusError> {
    match operand {
        Operand::Address { addr, .. } => bus.set(addr, v),
        Operand::Accumulator => {
            cpu.set_a(v);
            Ok(())
        }
        Operand::None => unreachable!("write to an implied operand"),
    }
}

/// Read-modify-write. Memory operands see the hardware sequence
/// read -> write old -> write new; the accumulator is simply replaced.
pub(crate) fn modify<C: CpuRegs + ?Sized>(
    cpu: &mut C,
    bus: &mut dyn Bus,
    operand: Operand,
    transform: fn(&mut C, u8) -> u8,
) -> Result<u8, BusError> {
    let old = read_operand(cpu, bus, operand)?;
    if let Operand::Address { addr, .. } = operand {
        bus.set(addr, old)?;
    }
    let new = transform(cpu, old);
    write_operand(cpu, bus, operand, new)?;
    Ok(new)
}

// ---------------------------------------------------------------------------
// Loads / Transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_a(v);
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn ldx<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn ldy<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_y(v);
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn tax<C: CpuRegs + ?Sized>(cpu: &mut C) {
    let v = cpu.a();
    ldx(cpu, v);
}

#[inline]
pub(crate) fn tay<C: CpuRegs + ?Sized>(cpu: &mut C) {
    let v = cpu.a();
    ldy(cpu, v);
}

#[inline]
pub(crate) fn txa<C: CpuRegs + ?Sized>(cpu: &mut C) {
    let v = cpu.x();
    lda(cpu, v);
}

#[inline]
pub(crate) fn tya<C: CpuRegs + ?Sized>(cpu: &mut C) {
    let v = cpu.y();
    lda(cpu, v);
}

#[inline]
pub(crate) fn tsx<C: CpuRegs + ?Sized>(cpu: &mut C) {
    let v = cpu.sp();
    ldx(cpu, v);
}

/// TXS is the one transfer that leaves the flags alone.
#[inline]
pub(crate) fn txs<C: CpuRegs + ?Sized>(cpu: &mut C) {
    let v = cpu.x();
    cpu.set_sp(v);
}

// ---------------------------------------------------------------------------
// Logical / Bit
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    let r = cpu.a() & v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn ora<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    let r = cpu.a() | v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn eor<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    let r = cpu.a() ^ v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn bit<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    cpu.set_zero((a & v) == 0);
    cpu.set_negative((v & 0x80) != 0);
    cpu.set_overflow((v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// ADC / SBC (binary; the 2A03 ignores D)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn adc<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let sum = a as u16 + v as u16 + cpu.is_carry() as u16;
    let result = sum as u8;

    cpu.set_carry(sum > 0xFF);
    // Overflow: ( !(A ^ M) & (A ^ R) & 0x80 ) != 0
    cpu.set_overflow((!(a ^ v) & (a ^ result) & 0x80) != 0);
    lda(cpu, result);
}

#[inline]
pub(crate) fn sbc<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) {
    adc(cpu, !v);
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

/// CMP / CPX / CPY: C = reg >= v, Z/N from (reg - v) mod 256.
#[inline]
pub(crate) fn compare<C: CpuRegs + ?Sized>(cpu: &mut C, reg: u8, v: u8) {
    cpu.set_carry(reg >= v);
    cpu.update_zn(reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Increment / Decrement
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inc<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) -> u8 {
    let r = v.wrapping_add(1);
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn dec<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) -> u8 {
    let r = v.wrapping_sub(1);
    cpu.update_zn(r);
    r
}

// ---------------------------------------------------------------------------
// Shifts / Rotates (value transforms)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) -> u8 {
    cpu.set_carry((v & 0x80) != 0);
    let r = v << 1;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn lsr<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) -> u8 {
    cpu.set_carry((v & 0x01) != 0);
    let r = v >> 1;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn rol<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = cpu.is_carry() as u8;
    cpu.set_carry((v & 0x80) != 0);
    let r = (v << 1) | carry_in;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn ror<C: CpuRegs + ?Sized>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = if cpu.is_carry() { 0x80 } else { 0 };
    cpu.set_carry((v & 0x01) != 0);
    let r = (v >> 1) | carry_in;
    cpu.update_zn(r);
    r
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatMemory;
    use crate::cpu::state::CpuState;

    fn setup() -> (CpuState, FlatMemory) {
        (CpuState::default(), FlatMemory::new())
    }

    #[test]
    #[should_panic(expected = "implied operand")]
    fn implied_operand_is_never_read() {
        let (mut cpu, mut bus) = setup();
        let _ = read_operand(&mut cpu, &mut bus, Operand::None);
    }

    #[test]
    fn adc_overflow_and_carry() {
        let (mut cpu, _bus) = setup();
        cpu.a = 0x50;
        adc(&mut cpu, 0x50); // signed overflow
        assert_eq!(cpu.a, 0xA0);
        assert!(cpu.is_overflow());
        assert!(!cpu.is_carry());
        assert!(cpu.is_negative());

        cpu.a = 0xF0;
        adc(&mut cpu, 0x20);
        assert_eq!(cpu.a, 0x10);
        assert!(cpu.is_carry());
        assert!(!cpu.is_overflow());
    }

    #[test]
    fn adc_uses_carry_in_and_ignores_decimal() {
        let (mut cpu, _bus) = setup();
        cpu.set_decimal(true);
        cpu.set_carry(true);
        cpu.a = 0x09;
        adc(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x0B);
    }

    #[test]
    fn sbc_is_adc_of_complement() {
        for a in [0x00u8, 0x10, 0x50, 0x80, 0xFF] {
            for v in [0x00u8, 0x01, 0x70, 0xB0, 0xFF] {
                for carry in [false, true] {
                    let mut x = CpuState { a, ..CpuState::default() };
                    x.set_carry(carry);
                    let mut y = x;
                    sbc(&mut x, v);
                    adc(&mut y, !v);
                    assert_eq!(x, y);
                }
            }
        }
        let (mut cpu, _bus) = setup();
        cpu.a = 0x10;
        cpu.set_carry(true);
        sbc(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x0F);
        assert!(cpu.is_carry());
    }

    #[test]
    fn compare_all_pairs() {
        let mut cpu = CpuState::default();
        for reg in 0..=255u8 {
            for v in 0..=255u8 {
                compare(&mut cpu, reg, v);
                assert_eq!(cpu.is_carry(), reg >= v);
                assert_eq!(cpu.is_zero(), reg == v);
                assert_eq!(cpu.is_negative(), reg.wrapping_sub(v) & 0x80 != 0);
            }
        }
    }

    #[test]
    fn stack_round_trip_all_values_with_wrap() {
        let (mut cpu, mut bus) = setup();
        for sp in [0xFDu8, 0x00, 0xFF] {
            for x in 0..=255u8 {
                cpu.sp = sp;
                push(&mut cpu, &mut bus, x).unwrap();
                assert_eq!(cpu.sp, sp.wrapping_sub(1));
                assert_eq!(pop(&mut cpu, &mut bus), Ok(x));
                assert_eq!(cpu.sp, sp);
            }
        }
        cpu.sp = 0x00;
        push(&mut cpu, &mut bus, 0x5A).unwrap();
        assert_eq!(cpu.sp, 0xFF);
        assert_eq!(bus.read(0x0100), 0x5A);
    }

    #[test]
    fn words_push_high_first() {
        let (mut cpu, mut bus) = setup();
        push_word(&mut cpu, &mut bus, 0xC0DE).unwrap();
        assert_eq!(bus.read(0x01FD), 0xC0);
        assert_eq!(bus.read(0x01FC), 0xDE);
        assert_eq!(pop_word(&mut cpu, &mut bus), Ok(0xC0DE));
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn modify_memory_and_accumulator() {
        let (mut cpu, mut bus) = setup();
        bus.write(0x0200, 0x0F);
        let op = Operand::Address { addr: 0x0200, crossed: false };
        assert_eq!(modify(&mut cpu, &mut bus, op, inc), Ok(0x10));
        assert_eq!(bus.read(0x0200), 0x10);

        cpu.a = 0x81;
        assert_eq!(modify(&mut cpu, &mut bus, Operand::Accumulator, asl), Ok(0x02));
        assert_eq!(cpu.a, 0x02);
        assert!(cpu.is_carry());
    }

    #[test]
    fn rotates_thread_carry() {
        let (mut cpu, _bus) = setup();
        cpu.set_carry(false);
        assert_eq!(rol(&mut cpu, 0x80), 0x00);
        assert!(cpu.is_carry());
        assert!(cpu.is_zero());
        assert_eq!(ror(&mut cpu, 0x02), 0x81);
        assert!(!cpu.is_carry());
        assert!(cpu.is_negative());
        assert_eq!(lsr(&mut cpu, 0x01), 0x00);
        assert!(cpu.is_carry() && cpu.is_zero() && !cpu.is_negative());
    }

    #[test]
    fn bit_reads_flags_from_memory() {
        let (mut cpu, _bus) = setup();
        cpu.a = 0x01;
        bit(&mut cpu, 0xC0);
        assert!(cpu.is_zero());
        assert!(cpu.is_negative());
        assert!(cpu.is_overflow());
        assert_eq!(cpu.a, 0x01);
    }

    #[test]
    fn transfers_and_loads() {
        let (mut cpu, _bus) = setup();
        lda(&mut cpu, 0x80);
        tax(&mut cpu);
        assert_eq!(cpu.x, 0x80);
        assert!(cpu.is_negative());
        ldy(&mut cpu, 0x00);
        assert!(cpu.is_zero());
        tya(&mut cpu);
        assert_eq!(cpu.a, 0x00);

        cpu.x = 0x00;
        cpu.set_zero(false);
        txs(&mut cpu);
        assert_eq!(cpu.sp, 0x00);
        assert!(!cpu.is_zero());
    }

    #[test]
    fn stack_errors_leave_sp_alone() {
        struct Deny;
        impl Bus for Deny {
            fn get(&mut self, addr: u16) -> Result<u8, BusError> {
                Err(BusError::AddressOutOfRange(addr))
            }
            fn set(&mut self, addr: u16, _: u8) -> Result<(), BusError> {
                Err(BusError::AddressOutOfRange(addr))
            }
        }
        let mut cpu = CpuState::default();
        assert!(push(&mut cpu, &mut Deny, 1).is_err());
        assert!(pop(&mut cpu, &mut Deny).is_err());
        assert_eq!(cpu.sp, 0xFD);
    }
}
