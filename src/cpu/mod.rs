/*!
cpu - 6502 CPU core (NES 2A03 variant).

Layout
======
```text
    state.rs      - Register file, flag masks, vectors, power-on / reset.
    regs.rs       - `CpuRegs` trait: register access + flag helpers.
    addressing.rs - Addressing modes and operand resolution.
    cycles.rs     - Page-cross / branch cycle penalties.
    execute.rs    - Instruction semantics shared by the handlers (ALU, stack, RMW).
    table.rs      - Static 256-entry opcode table (mnemonic, mode, cycles, handler).
    dispatch/     - One step: interrupt entry or fetch / decode / execute.
    trace.rs      - Nestest-style per-instruction trace lines.
    core/         - `Cpu` façade owning state, cycle counter and interrupt lines.
```

Only the façade and the read-only metadata (table, addressing modes, trace
types) are public. Handlers and the step loop are crate-internal.

Usage:
```rust,ignore
use nes6502::{Cpu, FlatMemory};

let mut bus = FlatMemory::new();
let mut cpu = Cpu::new();
cpu.power_on(&mut bus)?;
cpu.step(&mut bus)?;
```
*/

pub mod addressing;
pub mod core;
pub mod cycles;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod regs;
pub mod state;
pub mod table;
pub mod trace;

pub use crate::cpu::addressing::{AddressingMode, Operand};
pub use crate::cpu::core::Cpu;
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
pub use crate::cpu::table::{Opcode, lookup};
pub use crate::cpu::trace::{RegisterSnapshot, TraceConfig, TraceRecorder, disassemble};
