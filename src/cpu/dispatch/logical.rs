/*!
logical.rs - AND / ORA / EOR / BIT handlers.

AND, ORA and EOR combine the operand into A and set Z/N from the result.
BIT leaves A alone: Z from (A & M), N and V copied from bits 7 and 6 of M.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{and, bit, eor, ora, read_operand};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Flow;
use crate::error::BusError;

pub(crate) fn op_and(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    and(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_ora(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    ora(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_eor(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    eor(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_bit(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    bit(cpu, v);
    Ok(Flow::Next)
}
