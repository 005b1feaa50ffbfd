#![doc = r#"
nes6502 library crate.

This crate exposes a cycle-stepped 6502 CPU core (the NES 2A03 variant: no
decimal arithmetic) together with the small set of collaborators needed to
drive it.

Modules:
- bus: `Bus` capability trait plus concrete buses (mirrored RAM, flat 64 KiB, NES-style map)
- console: lock-step driver (one CPU step, three video dots per CPU cycle)
- cpu: 6502 CPU core (facade + state + addressing + opcode table + dispatch + trace)
- error: `BusError` / `CpuError` and the crate `Result` alias
- video: `VideoClock` trait and an NTSC dot/scanline timing model

In tests, shared program-bus builders are available under `crate::test_utils`.
"#]

// Core emulator modules
pub mod bus;
pub mod console;
pub mod cpu;
pub mod error;
pub mod video;

// Re-export commonly used types at the crate root for convenience.
pub use bus::{Bus, FlatMemory, NesBus, Ram};
pub use console::{Console, ConsoleConfig, FrameStats};
pub use cpu::core::Cpu;
pub use cpu::trace::{RegisterSnapshot, TraceConfig, TraceRecorder};
pub use cpu::{CpuRegs, CpuState};
pub use error::{BusError, CpuError, Result};
pub use video::{NtscTiming, VideoClock};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
