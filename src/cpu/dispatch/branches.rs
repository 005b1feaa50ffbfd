/*!
branches.rs - Relative branch handlers (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ).

Each handler tests exactly one flag and reports `Flow::Branch(taken)`. The
target was already resolved from the relative operand; the dispatcher moves
PC and applies the timing:

Base cost: 2 cycles.
Taken: +1 cycle.
Taken and the target is on another page than the next instruction: +2.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Flow;
use crate::error::BusError;

pub(crate) fn op_bpl(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Branch(!cpu.is_negative()))
}

pub(crate) fn op_bmi(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Branch(cpu.is_negative()))
}

pub(crate) fn op_bvc(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Branch(!cpu.is_overflow()))
}

pub(crate) fn op_bvs(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Branch(cpu.is_overflow()))
}

pub(crate) fn op_bcc(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Branch(!cpu.is_carry()))
}

pub(crate) fn op_bcs(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Branch(cpu.is_carry()))
}

pub(crate) fn op_bne(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Branch(!cpu.is_zero()))
}

pub(crate) fn op_beq(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Branch(cpu.is_zero()))
}
