/*!
load_store.rs - Load / Store opcode family handlers.

Loads (set Z/N flags; page-cross penalty on indexed reads, applied by the
dispatcher from the table entry):
    LDA: A9, A5, B5, AD, BD*, B9*, A1, B1*
    LDX: A2, A6, B6, AE, BE*
    LDY: A0, A4, B4, AC, BC*

Stores (no flags changed, no page-cross penalty):
    STA: 85, 95, 8D, 9D, 99, 81, 91
    STX: 86, 96, 8E
    STY: 84, 94, 8C
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{lda, ldx, ldy, read_operand, write_operand};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Flow;
use crate::error::BusError;

pub(crate) fn op_lda(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    lda(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_ldx(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    ldx(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_ldy(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    ldy(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_sta(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = cpu.a();
    write_operand(cpu, bus, op, v)?;
    Ok(Flow::Next)
}

pub(crate) fn op_stx(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = cpu.x();
    write_operand(cpu, bus, op, v)?;
    Ok(Flow::Next)
}

pub(crate) fn op_sty(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = cpu.y();
    write_operand(cpu, bus, op, v)?;
    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use crate::bus::FlatMemory;
    use crate::cpu::core::Cpu;
    use crate::test_utils::program_bus;

    fn setup(prg: &[u8]) -> (Cpu, FlatMemory) {
        let mut bus = program_bus(prg);
        let mut cpu = Cpu::new();
        cpu.power_on(&mut bus).unwrap();
        (cpu, bus)
    }

    #[test]
    fn lda_zero_page_example() {
        // LDA $10 with $10 = $00
        let (mut cpu, mut bus) = setup(&[0xA5, 0x10]);
        cpu.set_a(0x55);
        let pc = cpu.pc();
        assert_eq!(cpu.step(&mut bus), Ok(3));
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.is_flag_set(crate::cpu::ZERO));
        assert!(!cpu.is_flag_set(crate::cpu::NEGATIVE));
        assert_eq!(cpu.pc(), pc + 2);
    }

    #[test]
    fn loads_leave_carry_and_overflow_alone() {
        // SEC ; LDA #$80
        let (mut cpu, mut bus) = setup(&[0x38, 0xA9, 0x80]);
        cpu.set_status(cpu.status() | crate::cpu::OVERFLOW);
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.is_flag_set(crate::cpu::NEGATIVE));
        assert!(cpu.is_flag_set(crate::cpu::CARRY));
        assert!(cpu.is_flag_set(crate::cpu::OVERFLOW));
    }

    #[test]
    fn lda_abs_x_page_cross_costs_extra_cycle() {
        // LDX #$10 ; LDA $80F5,X ; LDA $8000,X
        let (mut cpu, mut bus) = setup(&[0xA2, 0x10, 0xBD, 0xF5, 0x80, 0xBD, 0x00, 0x80]);
        assert_eq!(cpu.step(&mut bus), Ok(2));
        assert_eq!(cpu.step(&mut bus), Ok(5));
        assert_eq!(cpu.step(&mut bus), Ok(4));
    }

    #[test]
    fn lda_indirect_y_page_cross() {
        // LDY #$10 ; LDA ($40),Y with ($40) = $02F8 -> $0308
        let (mut cpu, mut bus) = setup(&[0xA0, 0x10, 0xB1, 0x40]);
        bus.write(0x0040, 0xF8);
        bus.write(0x0041, 0x02);
        bus.write(0x0308, 0x99);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus), Ok(6));
        assert_eq!(cpu.a(), 0x99);
    }

    #[test]
    fn sta_abs_x_never_pays_page_cross() {
        // LDX #$10 ; STA $02F5,X -> $0305 (crosses) ; still 5 cycles
        let (mut cpu, mut bus) = setup(&[0xA2, 0x10, 0x9D, 0xF5, 0x02]);
        cpu.set_a(0x42);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus), Ok(5));
        assert_eq!(bus.read(0x0305), 0x42);
    }

    #[test]
    fn stx_zero_page_y_wraps() {
        // LDY #$20 ; LDX #$7E ; STX $F0,Y -> $10
        let (mut cpu, mut bus) = setup(&[0xA0, 0x20, 0xA2, 0x7E, 0x96, 0xF0]);
        for _ in 0..3 {
            cpu.step(&mut bus).unwrap();
        }
        assert_eq!(bus.read(0x0010), 0x7E);
        assert_eq!(bus.read(0x0110), 0x00);
    }

    #[test]
    fn stores_do_not_touch_flags() {
        // STY $0200
        let (mut cpu, mut bus) = setup(&[0x8C, 0x00, 0x02]);
        let p = cpu.status();
        cpu.set_y(0x00);
        assert_eq!(cpu.step(&mut bus), Ok(4));
        assert_eq!(cpu.status(), p);
    }
}
