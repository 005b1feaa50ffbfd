/*!
console.rs - Lock-step driver for the CPU, its bus and a video clock.

One `step` runs one CPU step (an instruction or an interrupt entry) and then
ticks the video clock three dots for every CPU cycle consumed. After the
ticks the driver forwards any vertical-blank NMI the video clock raised to
the CPU and latches frame completion.

```text
    let mut console = Console::new(bus, NtscTiming::with_vblank_nmi(), ConsoleConfig::default());
    console.power_on()?;
    let stats = console.run_frame()?;
```
*/

use crate::bus::Bus;
use crate::cpu::core::Cpu;
use crate::cpu::trace::{TraceConfig, TraceRecorder};
use crate::error::Result;
use crate::video::VideoClock;

/// Video dots per CPU cycle (NTSC).
pub const DOTS_PER_CPU_CYCLE: u32 = 3;

/// Driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub trace: TraceConfig,
    /// Safety cap on steps within `run_frame`.
    pub max_steps_per_frame: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            trace: TraceConfig::default(),
            max_steps_per_frame: 100_000,
        }
    }
}

/// Outcome of `run_frame`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub steps: usize,
    pub cycles: u64,
    /// False when the step cap was hit before the frame ended.
    pub completed: bool,
}

pub struct Console<B: Bus, V: VideoClock> {
    cpu: Cpu,
    bus: B,
    video: V,
    recorder: TraceRecorder,
    config: ConsoleConfig,
    frame_complete: bool,
}

impl<B: Bus, V: VideoClock> Console<B, V> {
    pub fn new(bus: B, video: V, config: ConsoleConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            bus,
            video,
            recorder: TraceRecorder::new(config.trace),
            config,
            frame_complete: false,
        }
    }

    /// Cold start: CPU power-on, video clock back to the pre-render line,
    /// trace recorder emptied.
    pub fn power_on(&mut self) -> Result<()> {
        self.cpu.power_on(&mut self.bus)?;
        self.video.reset();
        self.recorder.clear();
        self.frame_complete = false;
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.cpu.reset(&mut self.bus)
    }

    /// One CPU step followed by the matching video dots. Returns CPU cycles.
    pub fn step(&mut self) -> Result<u32> {
        let cycles = self
            .cpu
            .step_traced(&mut self.bus, &mut self.recorder, &self.video)?;
        for _ in 0..cycles * DOTS_PER_CPU_CYCLE {
            self.video.tick();
        }
        if self.video.take_nmi_request() {
            self.cpu.trigger_nmi();
        }
        if self.video.take_frame_complete() {
            self.frame_complete = true;
        }
        Ok(cycles)
    }

    /// Step until the video clock completes a frame, at most
    /// `max_steps_per_frame` steps.
    pub fn run_frame(&mut self) -> Result<FrameStats> {
        self.run_frame_bounded(self.config.max_steps_per_frame)
    }

    pub fn run_frame_bounded(&mut self, max_steps: usize) -> Result<FrameStats> {
        let mut stats = FrameStats::default();
        self.frame_complete = false;
        while stats.steps < max_steps {
            stats.cycles += self.step()? as u64;
            stats.steps += 1;
            if std::mem::take(&mut self.frame_complete) {
                stats.completed = true;
                break;
            }
        }
        if !stats.completed {
            log::warn!("frame did not complete within {max_steps} steps");
        }
        Ok(stats)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn recorder(&self) -> &TraceRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut TraceRecorder {
        &mut self.recorder
    }
}
