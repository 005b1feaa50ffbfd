/*!
addressing.rs - 6502 addressing modes and effective-address resolution.

Overview
========
Every resolver takes the address of the operand bytes (the byte after the
opcode, i.e. PC+1) and returns the effective address. Resolvers read memory
to fetch operand bytes and pointers but never write and never touch
registers, so the dispatcher can resolve before deciding anything else.

Modes that can add a cycle report `(addr, crossed)` so the dispatcher can
apply the page-cross penalty where the opcode entry asks for it.

Quirks reproduced
=================
- Zero page indexed modes wrap inside page 0.
- (zp,X) and (zp),Y fetch the pointer high byte from (zp+1) & $FF.
- JMP ($xxFF) fetches the target high byte from $xx00 instead of the next
  page.
*/

use crate::bus::Bus;
use crate::cpu::regs::CpuRegs;
use crate::error::BusError;

/// The thirteen documented 6502 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl AddressingMode {
    /// Encoded instruction length in bytes (opcode included).
    pub const fn len(self) -> u16 {
        use AddressingMode::*;
        match self {
            Implied | Accumulator => 1,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndirectX | IndirectY | Relative => 2,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
        }
    }
}

/// Resolved operand of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Implied mode: the handler works on registers only.
    None,
    /// Accumulator mode (ASL A, ROL A, ...).
    Accumulator,
    /// A memory location. For relative mode `addr` is the branch target.
    Address { addr: u16, crossed: bool },
}

impl Operand {
    #[inline]
    pub fn addr(self) -> Option<u16> {
        match self {
            Operand::Address { addr, .. } => Some(addr),
            _ => None,
        }
    }

    #[inline]
    pub fn crossed(self) -> bool {
        matches!(self, Operand::Address { crossed: true, .. })
    }
}

/// Two addresses cross a page iff their high bytes differ.
#[inline]
pub fn pages_differ(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Resolve the operand of an instruction whose opcode sits at `operand - 1`.
pub fn resolve<C: CpuRegs + ?Sized>(
    mode: AddressingMode,
    cpu: &C,
    bus: &mut dyn Bus,
    operand: u16,
) -> Result<Operand, BusError> {
    use AddressingMode::*;
    let plain = |addr| Operand::Address { addr, crossed: false };
    let indexed = |(addr, crossed)| Operand::Address { addr, crossed };
    Ok(match mode {
        Implied => Operand::None,
        Accumulator => Operand::Accumulator,
        Immediate => plain(immediate(operand)),
        ZeroPage => plain(zero_page(bus, operand)?),
        ZeroPageX => plain(zero_page_indexed(bus, operand, cpu.x())?),
        ZeroPageY => plain(zero_page_indexed(bus, operand, cpu.y())?),
        Absolute => plain(absolute(bus, operand)?),
        AbsoluteX => indexed(absolute_indexed(bus, operand, cpu.x())?),
        AbsoluteY => indexed(absolute_indexed(bus, operand, cpu.y())?),
        Indirect => plain(indirect(bus, operand)?),
        IndirectX => plain(indexed_indirect(bus, operand, cpu.x())?),
        IndirectY => indexed(indirect_indexed(bus, operand, cpu.y())?),
        Relative => indexed(relative(bus, operand)?),
    })
}

// -------------------------
// Per-mode resolvers
// -------------------------

/// The literal byte lives at the operand address itself.
#[inline]
pub fn immediate(operand: u16) -> u16 {
    operand
}

#[inline]
pub fn zero_page(bus: &mut dyn Bus, operand: u16) -> Result<u16, BusError> {
    Ok(bus.get(operand)? as u16)
}

#[inline]
pub fn zero_page_indexed(bus: &mut dyn Bus, operand: u16, index: u8) -> Result<u16, BusError> {
    Ok(bus.get(operand)?.wrapping_add(index) as u16)
}

#[inline]
pub fn absolute(bus: &mut dyn Bus, operand: u16) -> Result<u16, BusError> {
    bus.get_word(operand)
}

#[inline]
pub fn absolute_indexed(
    bus: &mut dyn Bus,
    operand: u16,
    index: u8,
) -> Result<(u16, bool), BusError> {
    let base = bus.get_word(operand)?;
    let addr = base.wrapping_add(index as u16);
    Ok((addr, pages_differ(base, addr)))
}

/// JMP ($nnnn) with the page-wrap defect.
#[inline]
pub fn indirect(bus: &mut dyn Bus, operand: u16) -> Result<u16, BusError> {
    let ptr = bus.get_word(operand)?;
    read_word_page_wrapped(bus, ptr)
}

/// ($zp,X): pointer at (zp + X) & $FF.
#[inline]
pub fn indexed_indirect(bus: &mut dyn Bus, operand: u16, x: u8) -> Result<u16, BusError> {
    let zp = bus.get(operand)?.wrapping_add(x);
    read_word_zp(bus, zp)
}

/// ($zp),Y: pointer at zp, then + Y.
#[inline]
pub fn indirect_indexed(bus: &mut dyn Bus, operand: u16, y: u8) -> Result<(u16, bool), BusError> {
    let zp = bus.get(operand)?;
    let base = read_word_zp(bus, zp)?;
    let addr = base.wrapping_add(y as u16);
    Ok((addr, pages_differ(base, addr)))
}

/// Branch target relative to the instruction after the branch (PC+2).
/// `crossed` reports whether the target leaves that instruction's page.
#[inline]
pub fn relative(bus: &mut dyn Bus, operand: u16) -> Result<(u16, bool), BusError> {
    let offset = bus.get(operand)? as i8;
    let next = operand.wrapping_add(1);
    let target = next.wrapping_add(offset as i16 as u16);
    Ok((target, pages_differ(next, target)))
}

// -------------------------
// Low-level word helpers
// -------------------------

/// Read a little-endian pointer from zero page; the high byte wraps to $00.
#[inline]
pub fn read_word_zp(bus: &mut dyn Bus, base: u8) -> Result<u16, BusError> {
    let lo = bus.get(base as u16)? as u16;
    let hi = bus.get(base.wrapping_add(1) as u16)? as u16;
    Ok((hi << 8) | lo)
}

/// Read a word without carrying into the high byte of the pointer: for
/// `ptr = $30FF` the bytes come from $30FF and $3000.
#[inline]
pub fn read_word_page_wrapped(bus: &mut dyn Bus, ptr: u16) -> Result<u16, BusError> {
    let lo = bus.get(ptr)? as u16;
    let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
    let hi = bus.get(hi_addr)? as u16;
    Ok((hi << 8) | lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatMemory;
    use crate::cpu::state::CpuState;

    fn setup(operand_bytes: &[u8]) -> (CpuState, FlatMemory) {
        let mut bus = FlatMemory::new();
        bus.load(0x8001, operand_bytes);
        (CpuState::default(), bus)
    }

    #[test]
    fn lengths() {
        assert_eq!(AddressingMode::Implied.len(), 1);
        assert_eq!(AddressingMode::Relative.len(), 2);
        assert_eq!(AddressingMode::IndirectY.len(), 2);
        assert_eq!(AddressingMode::Indirect.len(), 3);
    }

    #[test]
    fn zero_page_x_wraps_within_page_zero() {
        let (mut cpu, mut bus) = setup(&[0xF0]);
        cpu.x = 0x20;
        let op = resolve(AddressingMode::ZeroPageX, &cpu, &mut bus, 0x8001).unwrap();
        assert_eq!(op, Operand::Address { addr: 0x0010, crossed: false });
    }

    #[test]
    fn abs_x_page_cross_detection() {
        let (mut cpu, mut bus) = setup(&[0xF5, 0x80]);
        cpu.x = 0x10;
        let op = resolve(AddressingMode::AbsoluteX, &cpu, &mut bus, 0x8001).unwrap();
        assert_eq!(op, Operand::Address { addr: 0x8105, crossed: true });

        cpu.x = 0x01;
        let op = resolve(AddressingMode::AbsoluteX, &cpu, &mut bus, 0x8001).unwrap();
        assert!(!op.crossed());
    }

    #[test]
    fn absolute_indexed_wraps_at_top_of_memory() {
        let (_, mut bus) = setup(&[0xFF, 0xFF]);
        assert_eq!(absolute_indexed(&mut bus, 0x8001, 0x02), Ok((0x0001, true)));
    }

    #[test]
    fn indexed_indirect_pointer_wraps_in_zero_page() {
        let (mut cpu, mut bus) = setup(&[0xFE]);
        cpu.x = 0x01;
        // Pointer at $FF/$00.
        bus.write(0x00FF, 0x34);
        bus.write(0x0000, 0x12);
        bus.write(0x0100, 0x99);
        let op = resolve(AddressingMode::IndirectX, &cpu, &mut bus, 0x8001).unwrap();
        assert_eq!(op.addr(), Some(0x1234));
    }

    #[test]
    fn indirect_indexed_reports_cross() {
        let (mut cpu, mut bus) = setup(&[0x40]);
        cpu.y = 0x10;
        bus.write(0x0040, 0xF8);
        bus.write(0x0041, 0x02);
        let op = resolve(AddressingMode::IndirectY, &cpu, &mut bus, 0x8001).unwrap();
        assert_eq!(op, Operand::Address { addr: 0x0308, crossed: true });
    }

    #[test]
    fn indirect_jmp_bug() {
        // Pointer $30FF: low from $30FF, high from $3000 (not $3100).
        let (cpu, mut bus) = setup(&[0xFF, 0x30]);
        bus.write(0x30FF, 0x34);
        bus.write(0x3000, 0x12);
        bus.write(0x3100, 0x56);
        let op = resolve(AddressingMode::Indirect, &cpu, &mut bus, 0x8001).unwrap();
        assert_eq!(op.addr(), Some(0x1234));
    }

    #[test]
    fn indirect_without_boundary_reads_next_byte() {
        let (_, mut bus) = setup(&[0x80, 0x30]);
        bus.write(0x3080, 0xCD);
        bus.write(0x3081, 0xAB);
        assert_eq!(indirect(&mut bus, 0x8001), Ok(0xABCD));
    }

    #[test]
    fn relative_targets_follow_the_branch() {
        // Branch at $80F0, operand $80F1, next instruction $80F2.
        let mut bus = FlatMemory::new();
        bus.write(0x80F1, 0x02);
        assert_eq!(relative(&mut bus, 0x80F1), Ok((0x80F4, false)));
        bus.write(0x80F1, 0x10);
        assert_eq!(relative(&mut bus, 0x80F1), Ok((0x8102, true)));
        bus.write(0x80F1, 0xFE);
        assert_eq!(relative(&mut bus, 0x80F1), Ok((0x80F0, false)));
        bus.write(0x80F1, 0x80);
        assert_eq!(relative(&mut bus, 0x80F1), Ok((0x8072, false)));
    }

    #[test]
    fn implied_and_accumulator_have_no_address() {
        let (cpu, mut bus) = setup(&[]);
        assert_eq!(
            resolve(AddressingMode::Implied, &cpu, &mut bus, 0x8001),
            Ok(Operand::None)
        );
        assert_eq!(
            resolve(AddressingMode::Accumulator, &cpu, &mut bus, 0x8001),
            Ok(Operand::Accumulator)
        );
        assert_eq!(Operand::Accumulator.addr(), None);
    }

    #[test]
    fn bus_errors_propagate() {
        let mut ram = crate::bus::Ram::new();
        let cpu = CpuState::default();
        assert_eq!(
            resolve(AddressingMode::Absolute, &cpu, &mut ram, 0x8001),
            Err(BusError::AddressOutOfRange(0x8001))
        );
    }
}
