/*!
arithmetic.rs - ADC / SBC and the register increment / decrement handlers.

ADC and SBC are binary on the 2A03: the D flag is stored but never changes
the result. SBC is ADC of the one's complement of the operand, so both share
the same carry and overflow rules.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{adc, dec, inc, read_operand, sbc};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Flow;
use crate::error::BusError;

pub(crate) fn op_adc(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    adc(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_sbc(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    op: Operand,
) -> Result<Flow, BusError> {
    let v = read_operand(cpu, bus, op)?;
    sbc(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_inx(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let r = cpu.x();
    let v = inc(cpu, r);
    cpu.set_x(v);
    Ok(Flow::Next)
}

pub(crate) fn op_iny(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let r = cpu.y();
    let v = inc(cpu, r);
    cpu.set_y(v);
    Ok(Flow::Next)
}

pub(crate) fn op_dex(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let r = cpu.x();
    let v = dec(cpu, r);
    cpu.set_x(v);
    Ok(Flow::Next)
}

pub(crate) fn op_dey(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let r = cpu.y();
    let v = dec(cpu, r);
    cpu.set_y(v);
    Ok(Flow::Next)
}
