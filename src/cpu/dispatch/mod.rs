/*!
dispatch - Orchestrator for a single 6502 CPU step (interrupts + opcode dispatch).

Overview
========
Coordinates one step:
1. Services a pending NMI, or an asserted IRQ when I is clear
   (7-cycle interrupt entry; no opcode executes in that step).
2. Fetches the opcode at PC and looks it up in the static table. An empty
   slot is `CpuError::IllegalOpcode`, raised before anything is mutated.
3. Resolves the operand for the entry's addressing mode.
4. Runs the handler against a copy of the register file.
5. Moves PC according to the returned `Flow` and sums the cycle cost
   (base + page-cross + branch penalties).
6. Commits the register copy.

Family handlers
===============
```text
    load_store   LDA LDX LDY STA STX STY
    logical      AND ORA EOR BIT
    arithmetic   ADC SBC INX INY DEX DEY
    compare      CMP CPX CPY
    branches     BPL BMI BVC BVS BCC BCS BNE BEQ
    rmw          ASL LSR ROL ROR INC DEC
    control_flow JMP JSR RTS RTI BRK
    misc         transfers, stack, flags, NOP
```

Atomicity
=========
Register changes only land on success. Memory writes issued by an
instruction before a later bus access fails are not rolled back; the bus is
the owner of memory and the step reports the error unchanged.
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, resolve};
use crate::cpu::cycles::{INTERRUPT_CYCLES, branch_penalty, page_penalty};
use crate::cpu::execute::{push, push_word};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CpuState, IRQ_VECTOR, NMI_VECTOR};
use crate::cpu::table::{Flow, lookup};
use crate::error::{BusError, CpuError};

/// Interrupt input lines owned by the CPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct InterruptLines {
    /// Edge latched by `Cpu::trigger_nmi`; cleared once serviced.
    pub nmi_pending: bool,
    /// Level of the IRQ line; stays asserted until the device releases it.
    pub irq_asserted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Nmi,
    Irq,
}

impl Interrupt {
    pub(crate) fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

/// The interrupt the next step will service, if any. NMI wins over IRQ;
/// IRQ is masked by the I flag.
pub(crate) fn pending_interrupt(state: &CpuState, lines: &InterruptLines) -> Option<Interrupt> {
    if lines.nmi_pending {
        Some(Interrupt::Nmi)
    } else if lines.irq_asserted && !state.is_interrupt_disable() {
        Some(Interrupt::Irq)
    } else {
        None
    }
}

/// Execute one CPU step (interrupt entry or one instruction) and return the
/// cycles consumed.
pub(crate) fn step(
    state: &mut CpuState,
    lines: &mut InterruptLines,
    bus: &mut dyn Bus,
) -> Result<u32, CpuError> {
    if let Some(interrupt) = pending_interrupt(state, lines) {
        let mut next = *state;
        service_interrupt(&mut next, bus, interrupt.vector())?;
        *state = next;
        if interrupt == Interrupt::Nmi {
            lines.nmi_pending = false;
        }
        log::debug!("{interrupt:?} serviced, PC=${:04X}", state.pc);
        return Ok(INTERRUPT_CYCLES);
    }
    execute_instruction(state, bus)
}

/// Fetch, decode and execute the instruction at PC.
pub(crate) fn execute_instruction(
    state: &mut CpuState,
    bus: &mut dyn Bus,
) -> Result<u32, CpuError> {
    let pc = state.pc;
    let opcode = bus.get(pc)?;
    let entry = lookup(opcode).ok_or(CpuError::IllegalOpcode { opcode, pc })?;

    let mut next = *state;
    let operand = resolve(entry.mode, &next, bus, pc.wrapping_add(1))?;
    let mut cycles = entry.cycles as u32 + page_penalty(entry.penalty, operand.crossed());

    match (entry.exec)(&mut next, bus, operand)? {
        Flow::Next => next.advance_pc(entry.mode.len()),
        Flow::Jump(target) => next.set_pc(target),
        Flow::Branch(taken) => {
            match operand {
                Operand::Address { addr, crossed } if taken => {
                    next.set_pc(addr);
                    cycles += branch_penalty(taken, crossed);
                }
                _ => next.advance_pc(entry.mode.len()),
            }
        }
    }

    *state = next;
    Ok(cycles)
}

/// Common interrupt entry sequence: push PC, push P with BREAK clear, set I,
/// load the vector.
fn service_interrupt<C: CpuRegs + ?Sized>(
    cpu: &mut C,
    bus: &mut dyn Bus,
    vector: u16,
) -> Result<(), BusError> {
    let pc = cpu.pc();
    push_word(cpu, bus, pc)?;
    let p = cpu.compose_status_for_push(false);
    push(cpu, bus, p)?;
    cpu.set_interrupt_disable(true);
    let target = bus.get_word(vector)?;
    cpu.set_pc(target);
    Ok(())
}
