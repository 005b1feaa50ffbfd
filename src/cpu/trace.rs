/*!
trace.rs - Per-instruction trace recorder (nestest-style golden-log lines).

Line layout
===========
```text
    C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:  0 SL: -1
```

- columns 0..16: PC and the raw instruction bytes
- columns 16..48: disassembly; memory operands show the value found there
  *before* the instruction runs (`LDA $10 = 00`)
- register dump: after the instruction by default, or before it when
  `RegisterSnapshot::BeforeInstruction` is configured (nestest logs)
- CYC / SL: dot and scanline of the video clock when the step began

Observation only
================
The recorder never touches registers or cycle counts. Memory is read
through `Bus::peek`. When the recorder is disabled no string is built.
*/

use std::collections::VecDeque;

use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::state::CpuState;
use crate::cpu::table::{Opcode, lookup};
use crate::error::BusError;
use crate::video::VideoClock;

/// Which register values the trailing dump shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegisterSnapshot {
    #[default]
    AfterInstruction,
    BeforeInstruction,
}

/// History cap used by `TraceConfig::default()`.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// History cap used by `TraceConfig::nestest()`; the full nestest log fits.
pub const NESTEST_HISTORY_LIMIT: usize = 10_000;

/// Recorder configuration, owned by the caller and passed in explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    pub enabled: bool,
    /// Keep every line, not just the most recent one.
    pub keep_history: bool,
    /// Maximum retained history lines; the oldest are evicted first.
    /// `None` keeps everything.
    pub history_limit: Option<usize>,
    pub registers: RegisterSnapshot,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            keep_history: cfg!(feature = "trace_history"),
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            registers: RegisterSnapshot::default(),
        }
    }
}

impl TraceConfig {
    /// Enabled recorder with the remaining defaults.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Enabled recorder that keeps history and dumps pre-instruction
    /// registers, matching the nestest golden log.
    pub fn nestest() -> Self {
        Self {
            enabled: true,
            keep_history: true,
            history_limit: Some(NESTEST_HISTORY_LIMIT),
            registers: RegisterSnapshot::BeforeInstruction,
        }
    }

    /// Same config with a different history cap (`None` = unbounded).
    pub fn with_history_limit(self, history_limit: Option<usize>) -> Self {
        Self {
            history_limit,
            ..self
        }
    }
}

/// Half-built line: everything known before the instruction executes.
#[derive(Debug)]
pub(crate) struct PendingLine {
    prefix: String,
    before: CpuState,
    cycle: u16,
    scanline: i16,
}

#[derive(Debug, Default)]
pub struct TraceRecorder {
    config: TraceConfig,
    last: Option<String>,
    history: VecDeque<String>,
}

impl TraceRecorder {
    pub fn new(config: TraceConfig) -> Self {
        Self {
            config,
            last: None,
            history: VecDeque::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(TraceConfig::default())
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn set_enabled(&mut self, on: bool) {
        self.config.enabled = on;
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Most recent line.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Retained lines, oldest first.
    pub fn history(&self) -> &VecDeque<String> {
        &self.history
    }

    /// Drain the history buffer (e.g. to diff against a golden log).
    pub fn take_history(&mut self) -> Vec<String> {
        std::mem::take(&mut self.history).into()
    }

    pub fn clear(&mut self) {
        self.last = None;
        self.history.clear();
    }

    /// Capture the pre-instruction half of a line. `None` when the bytes
    /// at PC cannot be peeked or do not decode.
    pub(crate) fn begin(
        &self,
        state: &CpuState,
        bus: &mut dyn Bus,
        video: &dyn VideoClock,
    ) -> Option<PendingLine> {
        let prefix = line_prefix(state, bus).ok()??;
        Some(PendingLine {
            prefix,
            before: *state,
            cycle: video.cycle(),
            scanline: video.scanline(),
        })
    }

    /// Complete a line with the register dump and store it.
    pub(crate) fn finish(&mut self, pending: PendingLine, after: &CpuState) {
        let regs = match self.config.registers {
            RegisterSnapshot::AfterInstruction => after,
            RegisterSnapshot::BeforeInstruction => &pending.before,
        };
        let line = format!(
            "{}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{:>3} SL:{:>3}",
            pending.prefix,
            regs.a,
            regs.x,
            regs.y,
            regs.status,
            regs.sp,
            pending.cycle,
            pending.scanline
        );
        log::trace!("{line}");
        if self.config.keep_history && self.config.history_limit != Some(0) {
            if let Some(limit) = self.config.history_limit {
                while self.history.len() >= limit {
                    self.history.pop_front();
                }
            }
            self.history.push_back(line.clone());
        }
        self.last = Some(line);
    }
}

/// PC, raw bytes and disassembly, padded to the register column.
fn line_prefix(state: &CpuState, bus: &mut dyn Bus) -> Result<Option<String>, BusError> {
    let pc = state.pc;
    let opcode = bus.peek(pc)?;
    let Some(entry) = lookup(opcode) else {
        return Ok(None);
    };
    let mut bytes = Vec::with_capacity(3);
    for i in 0..entry.mode.len() {
        bytes.push(format!("{:02X}", bus.peek(pc.wrapping_add(i))?));
    }
    let head = format!("{:04X}  {}", pc, bytes.join(" "));
    let text = disassemble(entry, state, bus)?;
    Ok(Some(format!("{head:<16}{text:<32}")))
}

fn peek_word(bus: &mut dyn Bus, addr: u16) -> Result<u16, BusError> {
    let lo = bus.peek(addr)? as u16;
    let hi = bus.peek(addr.wrapping_add(1))? as u16;
    Ok((hi << 8) | lo)
}

/// Zero-page pointer read with the high byte wrapping to $00.
fn peek_word_zp(bus: &mut dyn Bus, zp: u8) -> Result<u16, BusError> {
    let lo = bus.peek(zp as u16)? as u16;
    let hi = bus.peek(zp.wrapping_add(1) as u16)? as u16;
    Ok((hi << 8) | lo)
}

/// Render one instruction the way the nestest log does.
pub fn disassemble(
    entry: &Opcode,
    state: &CpuState,
    bus: &mut dyn Bus,
) -> Result<String, BusError> {
    use AddressingMode::*;
    let m = entry.mnemonic;
    let operand = state.pc.wrapping_add(1);
    // JMP / JSR targets are code, not data: no "= value" suffix.
    let is_transfer = matches!(m, "JMP" | "JSR");

    Ok(match entry.mode {
        Implied => m.to_string(),
        Accumulator => format!("{m} A"),
        Immediate => format!("{m} #${:02X}", bus.peek(operand)?),
        ZeroPage => {
            let zp = bus.peek(operand)?;
            format!("{m} ${zp:02X} = {:02X}", bus.peek(zp as u16)?)
        }
        ZeroPageX | ZeroPageY => {
            let (reg, index) = if entry.mode == ZeroPageX {
                ('X', state.x)
            } else {
                ('Y', state.y)
            };
            let zp = bus.peek(operand)?;
            let addr = zp.wrapping_add(index);
            format!("{m} ${zp:02X},{reg} @ {addr:02X} = {:02X}", bus.peek(addr as u16)?)
        }
        Absolute => {
            let addr = peek_word(bus, operand)?;
            if is_transfer {
                format!("{m} ${addr:04X}")
            } else {
                format!("{m} ${addr:04X} = {:02X}", bus.peek(addr)?)
            }
        }
        AbsoluteX | AbsoluteY => {
            let (reg, index) = if entry.mode == AbsoluteX {
                ('X', state.x)
            } else {
                ('Y', state.y)
            };
            let base = peek_word(bus, operand)?;
            let addr = base.wrapping_add(index as u16);
            format!("{m} ${base:04X},{reg} @ {addr:04X} = {:02X}", bus.peek(addr)?)
        }
        Indirect => {
            let ptr = peek_word(bus, operand)?;
            let lo = bus.peek(ptr)? as u16;
            let hi = bus.peek((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF))? as u16;
            format!("{m} (${ptr:04X}) = {:04X}", (hi << 8) | lo)
        }
        IndirectX => {
            let zp = bus.peek(operand)?;
            let ptr = zp.wrapping_add(state.x);
            let addr = peek_word_zp(bus, ptr)?;
            format!("{m} (${zp:02X},X) @ {ptr:02X} = {addr:04X} = {:02X}", bus.peek(addr)?)
        }
        IndirectY => {
            let zp = bus.peek(operand)?;
            let base = peek_word_zp(bus, zp)?;
            let addr = base.wrapping_add(state.y as u16);
            format!("{m} (${zp:02X}),Y = {base:04X} @ {addr:04X} = {:02X}", bus.peek(addr)?)
        }
        Relative => {
            let offset = bus.peek(operand)? as i8;
            let target = state.pc.wrapping_add(2).wrapping_add(offset as i16 as u16);
            format!("{m} ${target:04X}")
        }
    })
}
