/*!
misc.rs - Transfers, stack, flag and NOP opcode handlers.

Transfers (Z/N from the destination, except TXS which sets no flags):
    TAX AA, TAY A8, TXA 8A, TYA 98, TSX BA, TXS 9A
Stack:
    PHA 48, PHP 08 (pushes P | B | U), PLA 68 (sets Z/N),
    PLP 28 (B dropped, U forced)
Flags (each touches exactly one bit):
    CLC 18, SEC 38, CLI 58, SEI 78, CLV B8, CLD D8, SED F8
NOP EA
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{lda, pop, push, tax, tay, tsx, txa, txs, tya};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Flow;
use crate::error::BusError;

// ---------------- Transfers ----------------

pub(crate) fn op_tax(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    tax(cpu);
    Ok(Flow::Next)
}

pub(crate) fn op_tay(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    tay(cpu);
    Ok(Flow::Next)
}

pub(crate) fn op_txa(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    txa(cpu);
    Ok(Flow::Next)
}

pub(crate) fn op_tya(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    tya(cpu);
    Ok(Flow::Next)
}

pub(crate) fn op_tsx(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    tsx(cpu);
    Ok(Flow::Next)
}

pub(crate) fn op_txs(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    txs(cpu);
    Ok(Flow::Next)
}

// ---------------- Stack ----------------

pub(crate) fn op_pha(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let a = cpu.a();
    push(cpu, bus, a)?;
    Ok(Flow::Next)
}

pub(crate) fn op_php(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let p = cpu.compose_status_for_push(true);
    push(cpu, bus, p)?;
    Ok(Flow::Next)
}

pub(crate) fn op_pla(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let v = pop(cpu, bus)?;
    lda(cpu, v);
    Ok(Flow::Next)
}

pub(crate) fn op_plp(
    cpu: &mut dyn CpuRegs,
    bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    let v = pop(cpu, bus)?;
    cpu.restore_status_from_stack(v);
    Ok(Flow::Next)
}

// ---------------- Flags ----------------

pub(crate) fn op_clc(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    cpu.set_carry(false);
    Ok(Flow::Next)
}

pub(crate) fn op_sec(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    cpu.set_carry(true);
    Ok(Flow::Next)
}

pub(crate) fn op_cli(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    cpu.set_interrupt_disable(false);
    Ok(Flow::Next)
}

pub(crate) fn op_sei(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    cpu.set_interrupt_disable(true);
    Ok(Flow::Next)
}

pub(crate) fn op_clv(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    cpu.set_overflow(false);
    Ok(Flow::Next)
}

pub(crate) fn op_cld(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    cpu.set_decimal(false);
    Ok(Flow::Next)
}

pub(crate) fn op_sed(
    cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    cpu.set_decimal(true);
    Ok(Flow::Next)
}

pub(crate) fn op_nop(
    _cpu: &mut dyn CpuRegs,
    _bus: &mut dyn Bus,
    _op: Operand,
) -> Result<Flow, BusError> {
    Ok(Flow::Next)
}
