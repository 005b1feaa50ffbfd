/*!
compare.rs - Compare opcode family handlers (CMP / CPX / CPY).

Semantics (all three): treat `reg - M` as an unsigned subtraction.
- C = reg >= M
- Z = reg == M
- N = bit 7 of (reg - M) mod 256
A/X/Y and V are not modified.

Cycle notes: CMP abs,X / abs,Y / (zp),Y take +1 on a page cross (table
entries with `Penalty::PageCross`); CPX / CPY have no indexed modes.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{compare, read_operand};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Flow;
use crate::error::BusError;

pub(crate) fn op_cmp(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    let reg = cpu.a();
    compare(cpu, reg, v);
    Ok(Flow::Next)
}

pub(crate) fn op_cpx(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    let reg = cpu.x();
    compare(cpu, reg, v);
    Ok(Flow::Next)
}

pub(crate) fn op_cpy(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    let reg = cpu.y();
    compare(cpu, reg, v);
    Ok(Flow::Next)
}
