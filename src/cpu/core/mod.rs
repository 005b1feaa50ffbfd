/*!
core::Cpu - Canonical 6502 CPU façade wrapping `CpuState`.

Design
======
- `Cpu` owns the register file, the cumulative cycle counter and the two
  interrupt input lines. The bus is never owned; every operation borrows it.
- `step` executes exactly one unit of work (an interrupt entry or one
  instruction) and returns its cycle cost. `step_traced` does the same and
  additionally records a trace line when the recorder is enabled.
- On error the register file and the cycle counter are left as they were
  before the step.

Lifecycle
=========
```text
    let mut cpu = Cpu::new();
    cpu.power_on(&mut bus)?;     // PC from $FFFC, cycles = 7
    loop { cpu.step(&mut bus)?; }
    cpu.reset(&mut bus)?;        // warm reset, cycles += 7
```
*/

use crate::bus::Bus;
use crate::cpu::cycles::RESET_CYCLES;
use crate::cpu::dispatch::{self, InterruptLines};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::CpuState;
use crate::cpu::trace::TraceRecorder;
use crate::error::{CpuError, Result};
use crate::video::VideoClock;

#[derive(Debug, Clone, Default)]
pub struct Cpu {
    state: CpuState,
    cycles: u64,
    lines: InterruptLines,
}

impl Cpu {
    /// Construct a CPU with power-up register defaults. PC is not loaded
    /// until `power_on`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return immutable reference to internal state (for inspection / testing).
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Return mutable reference to internal state (debugger / test setup).
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Power-on: full register initialization, PC from the reset vector,
    /// cycle counter set to the 7-cycle reset sequence.
    pub fn power_on(&mut self, bus: &mut dyn Bus) -> Result<()> {
        self.state.power_on(bus)?;
        self.cycles = RESET_CYCLES;
        self.lines = InterruptLines::default();
        log::debug!("power on, PC=${:04X}", self.state.pc);
        Ok(())
    }

    /// Warm reset. Memory is untouched; A/X/Y survive.
    pub fn reset(&mut self, bus: &mut dyn Bus) -> Result<()> {
        self.state.reset(bus)?;
        self.cycles += RESET_CYCLES;
        self.lines.nmi_pending = false;
        log::debug!("reset, PC=${:04X}", self.state.pc);
        Ok(())
    }

    /// Execute one step and return the cycles it consumed.
    pub fn step(&mut self, bus: &mut dyn Bus) -> Result<u32> {
        let cycles = dispatch::step(&mut self.state, &mut self.lines, bus)
            .inspect_err(|e| self.log_fault(e))?;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// `step`, plus one trace line for the executed instruction when the
    /// recorder is enabled. Steps that service an interrupt produce no line.
    pub fn step_traced(
        &mut self,
        bus: &mut dyn Bus,
        recorder: &mut TraceRecorder,
        video: &dyn VideoClock,
    ) -> Result<u32> {
        if !recorder.enabled() || dispatch::pending_interrupt(&self.state, &self.lines).is_some() {
            return self.step(bus);
        }
        let pending = recorder.begin(&self.state, bus, video);
        let cycles = self.step(bus)?;
        if let Some(pending) = pending {
            recorder.finish(pending, &self.state);
        }
        Ok(cycles)
    }

    /// Run up to `max_instructions` steps; returns the cycles consumed.
    pub fn run(&mut self, bus: &mut dyn Bus, max_instructions: usize) -> Result<u64> {
        let mut total = 0u64;
        for _ in 0..max_instructions {
            total += self.step(bus)? as u64;
        }
        Ok(total)
    }

    fn log_fault(&self, e: &CpuError) {
        match e {
            CpuError::IllegalOpcode { .. } => log::error!("{e}"),
            CpuError::Bus(_) => log::error!("bus fault at PC=${:04X}: {e}", self.state.pc),
        }
    }

    // ---------------------------------------------------------------------
    // Interrupt lines
    // ---------------------------------------------------------------------

    /// Latch a non-maskable interrupt; serviced at the start of the next step.
    pub fn trigger_nmi(&mut self) {
        self.lines.nmi_pending = true;
    }

    /// Drive the level-triggered IRQ line.
    pub fn set_irq(&mut self, asserted: bool) {
        self.lines.irq_asserted = asserted;
    }

    pub fn nmi_pending(&self) -> bool {
        self.lines.nmi_pending
    }

    pub fn irq_asserted(&self) -> bool {
        self.lines.irq_asserted
    }

    /// Cycles elapsed since power-on. Never decreases.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ---------------------------------------------------------------------
    // Register accessors
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> u8 {
        self.state.status
    }

    pub fn set_a(&mut self, v: u8) {
        self.state.a = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.x = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.y = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.pc = v;
    }
    /// Replace P; bit 5 stays set.
    pub fn set_status(&mut self, v: u8) {
        CpuRegs::set_status(&mut self.state, v);
    }

    pub fn is_flag_set(&self, mask: u8) -> bool {
        self.state.is_flag_set(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatMemory;
    use crate::cpu::state::{IRQ_DISABLE, UNUSED};
    use crate::cpu::trace::TraceConfig;
    use crate::error::BusError;
    use crate::test_utils::{NMI_HANDLER, program_bus};
    use crate::video::NtscTiming;

    fn setup(prg: &[u8]) -> (Cpu, FlatMemory) {
        let mut bus = program_bus(prg);
        let mut cpu = Cpu::new();
        cpu.power_on(&mut bus).unwrap();
        (cpu, bus)
    }

    #[test]
    fn power_on_defaults() {
        let (cpu, _bus) = setup(&[0xEA]);
        assert_eq!((cpu.a(), cpu.x(), cpu.y()), (0, 0, 0));
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.status(), 0x24);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.cycles(), 7);
        assert!(cpu.is_flag_set(IRQ_DISABLE));
        assert!(cpu.is_flag_set(UNUSED));
    }

    #[test]
    fn cycle_counter_accumulates() {
        // LDA $10 ; NOP
        let (mut cpu, mut bus) = setup(&[0xA5, 0x10, 0xEA]);
        assert_eq!(cpu.run(&mut bus, 2), Ok(5));
        assert_eq!(cpu.cycles(), 12);
    }

    #[test]
    fn reset_adds_cycles_and_keeps_registers() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x42, 0xEA]);
        cpu.step(&mut bus).unwrap();
        let before = cpu.cycles();
        cpu.reset(&mut bus).unwrap();
        assert_eq!(cpu.cycles(), before + 7);
        assert_eq!(cpu.a(), 0x42);
        assert_eq!(cpu.sp(), 0xFA);
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn illegal_opcode_is_fatal_and_cycles_hold() {
        let (mut cpu, mut bus) = setup(&[0xEA, 0xFF]);
        cpu.step(&mut bus).unwrap();
        let cycles = cpu.cycles();
        let state = *cpu.state();
        assert_eq!(
            cpu.step(&mut bus),
            Err(CpuError::IllegalOpcode { opcode: 0xFF, pc: 0x8001 })
        );
        assert_eq!(cpu.cycles(), cycles);
        assert_eq!(*cpu.state(), state);
    }

    #[test]
    fn bus_errors_propagate_unchanged() {
        let mut ram = crate::bus::Ram::new();
        let mut cpu = Cpu::new();
        assert_eq!(
            cpu.power_on(&mut ram),
            Err(CpuError::Bus(BusError::AddressOutOfRange(0xFFFC)))
        );
    }

    #[test]
    fn nmi_line_is_edge_latched() {
        let (mut cpu, mut bus) = setup(&[0xEA, 0xEA]);
        cpu.trigger_nmi();
        assert!(cpu.nmi_pending());
        assert_eq!(cpu.step(&mut bus), Ok(7));
        assert_eq!(cpu.pc(), NMI_HANDLER);
        assert!(!cpu.nmi_pending());
    }

    #[test]
    fn traced_step_records_line() {
        let (mut cpu, mut bus) = setup(&[0xA5, 0x10]);
        let mut rec = TraceRecorder::new(TraceConfig::enabled());
        let video = NtscTiming::new();
        assert_eq!(cpu.step_traced(&mut bus, &mut rec, &video), Ok(3));
        let line = rec.last().unwrap();
        assert!(line.starts_with("8000  A5 10     LDA $10 = 00"), "{line}");
        assert!(line.contains("A:00 X:00 Y:00 P:26 SP:FD CYC:  0 SL: -1"), "{line}");
    }

    #[test]
    fn disabled_recorder_changes_nothing() {
        let prg = [0xA9, 0x80, 0x69, 0x7F, 0x48, 0xE8];
        let (mut plain, mut bus_a) = setup(&prg);
        let (mut traced, mut bus_b) = setup(&prg);
        let mut rec = TraceRecorder::disabled();
        let video = NtscTiming::new();
        for _ in 0..4 {
            let a = plain.step(&mut bus_a);
            let b = traced.step_traced(&mut bus_b, &mut rec, &video);
            assert_eq!(a, b);
        }
        assert_eq!(plain.state(), traced.state());
        assert_eq!(plain.cycles(), traced.cycles());
        assert!(rec.last().is_none());
    }

    #[test]
    fn interrupt_steps_are_not_traced() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        let mut rec = TraceRecorder::new(TraceConfig::enabled());
        cpu.trigger_nmi();
        cpu.step_traced(&mut bus, &mut rec, &NtscTiming::new()).unwrap();
        assert!(rec.last().is_none());
    }
}
