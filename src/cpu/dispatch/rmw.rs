/*!
rmw.rs - Read-Modify-Write opcode family handlers.

Opcodes:
    ASL: 0A (A), 06, 16, 0E, 1E
    LSR: 4A (A), 46, 56, 4E, 5E
    ROL: 2A (A), 26, 36, 2E, 3E
    ROR: 6A (A), 66, 76, 6E, 7E
    INC: E6, F6, EE, FE
    DEC: C6, D6, CE, DE

Memory forms go through `execute::modify`, which performs the hardware
bus sequence (read, write back the old value, write the new value). The
abs,X forms always cost 7 cycles; there is no page-cross penalty.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{asl, dec, inc, lsr, modify, rol, ror};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Flow;
use crate::error::BusError;

pub(crate) fn op_asl(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    modify(cpu, bus, op, asl)?;
    Ok(Flow::Next)
}

pub(crate) fn op_lsr(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    modify(cpu, bus, op, lsr)?;
    Ok(Flow::Next)
}

pub(crate) fn op_rol(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    modify(cpu, bus, op, rol)?;
    Ok(Flow::Next)
}

pub(crate) fn op_ror(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    modify(cpu, bus, op, ror)?;
    Ok(Flow::Next)
}

pub(crate) fn op_inc(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    modify(cpu, bus, op, inc)?;
    Ok(Flow::Next)
}

pub(crate) fn op_dec(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    modify(cpu, bus, op, dec)?;
    Ok(Flow::Next)
}
