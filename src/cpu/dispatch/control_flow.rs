/*!
control_flow.rs - Control-flow opcode handlers (JMP / JSR / RTS / RTI / BRK).

Opcodes:
    0x4C  JMP abs                3 cycles
    0x6C  JMP (ind)              5 cycles (page-wrap defect in the resolver)
    0x20  JSR abs                6 cycles
    0x60  RTS                    6 cycles
    0x40  RTI                    6 cycles
    0x00  BRK                    7 cycles

Stack conventions
=================
- JSR pushes the address of its own last byte (PC+2), high byte first.
- RTS pulls low, then high, and resumes at the pulled address + 1.
- RTI pulls P (BREAK dropped, UNUSED forced), then PC. No +1.
- BRK pushes PC+2 (skipping its padding byte), then P with BREAK set,
  sets I and vectors through $FFFE/$FFFF.

All handlers return `Flow::Jump`; PC is set by the dispatcher.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{pop, pop_word, push, push_word};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::IRQ_VECTOR;
use crate::cpu::table::Flow;
use crate::error::BusError;

/// Absolute / indirect targets are resolved to a plain address.
#[inline]
fn target(op: Operand) -> u16 {
    match op {
        Operand::Address { addr, .. } => addr,
        other => unreachable!("jump decoded without an address operand: {other:?}"),
    }
}

pub(crate) fn op_jmp(
    _cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Jump(target(op)))
}

pub(crate) fn op_jsr(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let ret = cpu.pc().wrapping_add(2);
    push_word(cpu, bus, ret)?;
    Ok(Flow::Jump(target(op)))
}

pub(crate) fn op_rts(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let ret = pop_word(cpu, bus)?;
    Ok(Flow::Jump(ret.wrapping_add(1)))
}

pub(crate) fn op_rti(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let p = pop(cpu, bus)?;
    cpu.restore_status_from_stack(p);
    let ret = pop_word(cpu, bus)?;
    Ok(Flow::Jump(ret))
}

pub(crate) fn op_brk(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let ret = cpu.pc().wrapping_add(2);
    push_word(cpu, bus, ret)?;
    let p = cpu.compose_status_for_push(true);
    push(cpu, bus, p)?;
    cpu.set_interrupt_disable(true);
    let vector = bus.get_word(IRQ_VECTOR)?;
    Ok(Flow::Jump(vector))
}
